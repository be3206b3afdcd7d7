//! Output modes and rendering helpers shared by every `cobuy` command.
//!
//! A command builds one `Serialize` report and hands it to [`emit`] with a
//! text renderer and a pretty renderer. JSON needs no renderer of its own.
//!
//! # Choosing a mode
//!
//! [`OutputMode::detect`] checks, in order: `--format`, the hidden `--json`
//! alias, the `FORMAT` environment variable, and finally whether stdout is a
//! terminal (pretty) or a pipe (text). Unrecognized `FORMAT` values are
//! ignored.

use clap::ValueEnum;
use cobuy_core::error::CobuyError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Column width of the separators drawn in pretty output.
pub const RULE_WIDTH: usize = 72;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Framed reports for a person at a terminal.
    Pretty,
    /// One record per line, for pipes and scripts.
    Text,
    /// Pretty-printed JSON of the command's report.
    Json,
}

impl OutputMode {
    /// Pick the mode from flags, `FORMAT` and the stdout TTY state.
    #[must_use]
    pub fn detect(format_flag: Option<Self>, json_flag: bool) -> Self {
        let format_env = std::env::var("FORMAT").ok();
        Self::choose(
            format_flag,
            json_flag,
            format_env.as_deref(),
            io::stdout().is_terminal(),
        )
    }

    fn choose(
        format_flag: Option<Self>,
        json_flag: bool,
        format_env: Option<&str>,
        stdout_is_tty: bool,
    ) -> Self {
        format_flag
            .or_else(|| json_flag.then_some(Self::Json))
            .or_else(|| format_env.and_then(|value| Self::from_str(value.trim(), true).ok()))
            .unwrap_or(if stdout_is_tty { Self::Pretty } else { Self::Text })
    }
}

/// Serialize `report` to stdout as JSON, or hand it to the text or pretty
/// renderer.
pub fn emit<T: Serialize>(
    mode: OutputMode,
    report: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit_to(&mut out, mode, report, text, pretty)?;
    out.flush()?;
    Ok(())
}

fn emit_to<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    report: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputMode::Text => text(report, out)?,
        OutputMode::Pretty => pretty(report, out)?,
    }
    Ok(())
}

fn rule(w: &mut dyn Write, fill: char) -> io::Result<()> {
    let line: String = std::iter::repeat_n(fill, RULE_WIDTH).collect();
    writeln!(w, "{line}")
}

/// Thin `-` separator between pretty rows.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    rule(w, '-')
}

/// Heavy `=` separator opening and closing a framed report.
pub fn pretty_frame(w: &mut dyn Write) -> io::Result<()> {
    rule(w, '=')
}

/// Heading line underlined with [`pretty_rule`].
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// `Key:` padded to a fixed column, then the value.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    let label = format!("{key}:");
    writeln!(w, "{label:<16} {}", value.as_ref())
}

/// A failed command as shown to the user on stderr.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code when the failure is a [`CobuyError`].
    #[serde(rename = "error_code", skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl CliError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            code: None,
        }
    }

    /// Write the error to stderr in `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if stderr cannot be written.
    pub fn report(&self, mode: OutputMode) -> anyhow::Result<()> {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        self.write_to(&mut out, mode)
    }

    fn write_to(&self, out: &mut dyn Write, mode: OutputMode) -> anyhow::Result<()> {
        if mode == OutputMode::Json {
            serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": self }))?;
            writeln!(out)?;
            return Ok(());
        }
        writeln!(out, "error: {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            writeln!(out, "  suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl From<&CobuyError> for CliError {
    fn from(err: &CobuyError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: Some(err.suggestion()),
            code: Some(err.error_code().code()),
        }
    }
}

/// The message keeps the whole context chain; code and suggestion come from
/// the first [`CobuyError`] found in it.
impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        let mut cli = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<CobuyError>())
            .map_or_else(|| Self::new(String::new()), Self::from);
        cli.message = format!("{err:#}");
        cli
    }
}
