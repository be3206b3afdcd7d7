//! `cobuy shell`: interactive recommendation console.
//!
//! Each round asks for a product (id or name), a result count and a search
//! depth, then prints the framed recommendation report. Blank answers take
//! the configured defaults; `exit` or end of input quits.

use crate::cmd::Session;
use crate::cmd::recommend::{RecommendOutput, render_recommend_pretty};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Execute `cobuy shell` on stdin/stdout.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub fn run_shell(session: &Session) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell_loop(session, &mut stdin.lock(), &mut stdout.lock())
}

/// Drive the console over arbitrary input/output streams.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub fn run_shell_loop(session: &Session, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    let cap = session.settings.max_depth_cap.max(1);
    writeln!(out)?;
    writeln!(out, "cobuy: interactive product recommendations")?;
    writeln!(
        out,
        "Type a product ID or a product name (e.g., '1' or 'Laptop'). Type 'exit' to quit."
    )?;
    writeln!(out)?;

    loop {
        let Some(answer) = ask(input, out, "Enter product ID or name ('exit' to quit): ")? else {
            break;
        };
        if answer.is_empty() {
            continue;
        }
        if answer.eq_ignore_ascii_case("exit") {
            break;
        }

        let Ok(product) = session.resolve(&answer) else {
            writeln!(
                out,
                "No product found matching that input. Try ID or name (e.g., '1' or 'Laptop').\n"
            )?;
            continue;
        };

        let Some(limit) = ask(
            input,
            out,
            &format!(
                "How many recommendations would you like? (default {}): ",
                session.settings.limit
            ),
        )?
        else {
            break;
        };
        let Some(depth) = ask(
            input,
            out,
            &format!(
                "Max graph depth to search (1-{cap}, default {}): ",
                session.settings.max_depth
            ),
        )?
        else {
            break;
        };

        debug!(product = %product.id, %limit, %depth, "shell query");
        let report =
            RecommendOutput::compute(session, product, limit.parse().ok(), depth.parse().ok());
        render_recommend_pretty(&report, out)?;
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Print `prompt` and read one trimmed line. `None` at end of input.
fn ask(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
