use serde::Serialize;
use shapeguard::schema::SchemaPath;

use crate::cmd::DescribeArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, table, OutputFormat};

#[derive(Debug, Serialize)]
struct FieldRow<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    kind: &'static str,
    required: bool,
}

#[derive(Debug, Serialize)]
struct DescribeOutput<'a> {
    record: &'static str,
    fields: Vec<FieldRow<'a>>,
}

pub fn run(args: DescribeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.max_depth == 0 {
        return Err(CliError::new(USAGE, "--max-depth must be greater than zero"));
    }

    let schema = args.shape.schema();
    let paths = schema.paths(args.max_depth);
    let output = DescribeOutput {
        record: schema.record,
        fields: paths.iter().map(row).collect(),
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => {
            let mut out = table(&["PATH", "TYPE", "KIND", "REQUIRED"]);
            for field in &output.fields {
                out.add_row(vec![
                    field.path.to_string(),
                    field.type_name.to_string(),
                    field.kind.to_string(),
                    if field.required { "yes" } else { "no" }.to_string(),
                ]);
            }
            println!("{}", output.record);
            println!("{out}");
        }
        OutputFormat::Pretty => {
            println!("{}", output.record);
            for field in &output.fields {
                let marker = if field.required { " (required)" } else { "" };
                println!("  {}: {}{marker}", field.path, field.type_name);
            }
        }
    }

    Ok(SUCCESS)
}

fn row(path: &SchemaPath) -> FieldRow<'_> {
    FieldRow {
        path: &path.path,
        type_name: &path.type_name,
        kind: path.kind.as_str(),
        required: path.required,
    }
}
