//! JSON and JSON Lines writers.

use std::io::{self, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::report::WalkReport;
use crate::config::OutputFormat;

/// Wrapper that treats a closed downstream pipe (`| head`) as success.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Serializes `reports` in `format` to any writer.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_reports<W: Write>(
    writer: &mut W,
    reports: &[WalkReport],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, reports)
                .context("Failed to serialize report")?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for report in reports {
                serde_json::to_writer(&mut *writer, report)
                    .context("Failed to serialize report line")?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush().context("Failed to flush report output")?;
    Ok(())
}

/// Writes `reports` to `output`, or to stdout when `output` is `None`.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written.
pub fn export_reports(
    reports: &[WalkReport],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = io::BufWriter::new(file);
            write_reports(&mut writer, reports, format)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = IgnoreBrokenPipe::new(stdout.lock());
            write_reports(&mut writer, reports, format)
        }
    }
}
