//! Operator-facing error reporting
//!
//! Every enumerable field of the failure is printed individually, not
//! just a summary line, so provider-specific error shapes stay
//! diagnosable. The process exits non-zero afterwards.

use colored::Colorize;
use nimbus_cloud::CloudError;

pub fn print_error(error: &CloudError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    match error {
        CloudError::MissingConfiguration { missing } => {
            for name in missing {
                eprintln!("  missing: {name}");
            }
        }
        CloudError::InvalidConfiguration { name, detail } => {
            eprintln!("  parameter: {name}");
            eprintln!("  detail: {detail}");
        }
        CloudError::ApiUnavailable { detail, payload } => {
            eprintln!("  detail: {detail}");
            print_payload(payload);
        }
        CloudError::Unauthorized { payload } => {
            print_payload(payload);
        }
        CloudError::ResourceNotFound {
            kind,
            name,
            candidates,
        } => {
            eprintln!("  kind: {kind}");
            eprintln!("  requested: {name}");
            for candidate in candidates {
                eprintln!("  available: {candidate}");
            }
        }
        CloudError::InstanceNotFound(name) => {
            eprintln!("  instance: {name}");
        }
        CloudError::UnexpectedState { name, observed } => {
            eprintln!("  instance: {name}");
            eprintln!("  observed status: {observed}");
        }
        CloudError::TransitionRejected { status, payload } => {
            eprintln!("  http status: {status}");
            print_payload(payload);
        }
    }
}

/// Pretty-print the raw provider body, indented under the error.
fn print_payload(payload: &serde_json::Value) {
    if payload.is_null() {
        return;
    }
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    for line in text.lines() {
        eprintln!("  {}", line.dimmed());
    }
}
