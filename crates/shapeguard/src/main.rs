mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "shapeguard",
    version,
    about = "Validate JSON request payloads against declared shapes"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::Shape;

    #[test]
    fn parses_check_from_stdin() {
        let cli = Cli::try_parse_from(["shapeguard", "check"]).expect("check args should parse");
        match cli.command {
            Command::Check(args) => {
                assert!(args.file.is_none());
                assert!(matches!(args.shape, Shape::Order));
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn parses_check_with_file_and_limit() {
        let cli = Cli::try_parse_from([
            "shapeguard",
            "--format",
            "json",
            "check",
            "order.json",
            "--shape",
            "order",
            "--max-body-bytes",
            "512",
        ])
        .expect("check args should parse");

        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        match cli.command {
            Command::Check(args) => {
                assert_eq!(
                    args.file.as_deref(),
                    Some(std::path::Path::new("order.json"))
                );
                assert_eq!(args.max_body_bytes, Some(512));
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_shape() {
        let err = Cli::try_parse_from(["shapeguard", "describe", "--shape", "invoice"])
            .expect_err("unknown shape should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn parses_version_extended() {
        let cli = Cli::try_parse_from(["shapeguard", "version", "--extended"])
            .expect("version args should parse");
        assert!(matches!(cli.command, Command::Version(args) if args.extended));
    }
}
