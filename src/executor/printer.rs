use std::io::Write;

use colored::Colorize;

use super::models::ExecutionResult;

/// Short request report for the interactive user. The host reads stdout, so
/// this goes to stderr. Only successful responses reach this point.
pub fn print_execution_summary(
    result: &ExecutionResult,
    rows: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {}",
        result.request.method.bold(),
        result.request.url.cyan()
    )?;
    writeln!(
        out,
        "{} {} {}",
        "Status:".bold(),
        result.response.status.to_string().green(),
        format!("({:.1} ms)", result.response.duration_ms).dimmed()
    )?;

    if let Some(bytes) = result.request.body_bytes {
        writeln!(
            out,
            "{} {}",
            "Request body:".bold(),
            format!("{} bytes", bytes).dimmed()
        )?;
    }

    writeln!(
        out,
        "{} {} {}",
        "Response:".bold(),
        result
            .response
            .content_type
            .as_deref()
            .unwrap_or("unknown content type"),
        format!("({} bytes)", result.response.body.len()).dimmed()
    )?;
    writeln!(out, "{} {}", "Rows:".bold(), rows)
}
