use std::fs::File;
use std::io::{self, Read};

use shapeguard::{handle_request, ErrorEnvelope, OrderRequest, OrderSummary, RequestConfig};
use tracing::info;

use crate::cmd::{CheckArgs, Shape};
use crate::exit::{envelope_code, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_json, table, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let config = request_config(args.max_body_bytes)?;

    let outcome = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("open {}", path.display()), err))?;
            check(args.shape, file, &config)
        }
        None => check(args.shape, io::stdin().lock(), &config),
    };

    match outcome {
        Ok(summary) => {
            info!(
                items = summary.item_count,
                total_quantity = summary.total_quantity,
                "payload accepted"
            );
            print_summary(&summary, format);
            Ok(SUCCESS)
        }
        Err(envelope) => {
            info!(status = envelope.status, errors = envelope.errors.len(), "payload rejected");
            print_envelope(&envelope, format);
            Ok(envelope_code(&envelope))
        }
    }
}

fn request_config(max_body_bytes: Option<usize>) -> CliResult<RequestConfig> {
    match max_body_bytes {
        Some(0) => Err(CliError::new(
            USAGE,
            "--max-body-bytes must be greater than zero",
        )),
        Some(limit) => Ok(RequestConfig::default().with_max_body_bytes(limit)),
        None => Ok(RequestConfig::default()),
    }
}

fn check<R: Read>(
    shape: Shape,
    reader: R,
    config: &RequestConfig,
) -> Result<OrderSummary, ErrorEnvelope> {
    match shape {
        Shape::Order => {
            handle_request::<OrderRequest, _, _, _>(reader, config, OrderSummary::from_request)
        }
    }
}

fn print_summary(summary: &OrderSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Table => {
            let mut out = table(&["PRODUCT_ID", "QUANTITY"]);
            for item in &summary.items {
                out.add_row(vec![item.product_id.to_string(), item.quantity.to_string()]);
            }
            println!("{out}");
            println!(
                "items: {}  total quantity: {}",
                summary.item_count, summary.total_quantity
            );
        }
        OutputFormat::Pretty => {
            println!(
                "accepted: {} items, total quantity {}",
                summary.item_count, summary.total_quantity
            );
        }
    }
}

fn print_envelope(envelope: &ErrorEnvelope, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(envelope),
        OutputFormat::Table => {
            println!("{} {}", envelope.status, envelope.message);
            let mut out = table(&["FIELD", "CODE", "MESSAGE"]);
            for entry in &envelope.errors {
                out.add_row(vec![
                    entry.field.clone(),
                    entry.code.clone(),
                    entry.message.clone(),
                ]);
            }
            println!("{out}");
        }
        OutputFormat::Pretty => {
            println!("rejected: {} {}", envelope.status, envelope.message);
            for entry in &envelope.errors {
                println!("  {}: {} ({})", entry.field, entry.message, entry.code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_is_a_usage_error() {
        let err = request_config(Some(0)).unwrap_err();
        assert_eq!(err.code, USAGE);
        assert_eq!(request_config(None).unwrap(), RequestConfig::default());
        assert_eq!(request_config(Some(10)).unwrap().max_body_bytes, 10);
    }

    #[test]
    fn order_check_summarises_valid_payload() {
        let summary = check(
            Shape::Order,
            &br#"{"order":{"items":[{"product_id":1,"quantity":2},{"product_id":2,"quantity":1}]}}"#[..],
            &RequestConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
    }

    #[test]
    fn order_check_rejects_empty_object() {
        let envelope = check(Shape::Order, &b"{}"[..], &RequestConfig::default()).unwrap_err();
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.errors[0].field, "order.items");
    }
}
