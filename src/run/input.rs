//! Input collection from arguments, files and stdin.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads one candidate per line, skipping blank lines and `#` comments.
///
/// Unreadable lines (invalid UTF-8) are logged and skipped.
pub async fn read_inputs<R: AsyncBufRead + Unpin>(reader: R) -> Vec<String> {
    let mut lines = reader.lines();
    let mut inputs = Vec::new();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read line from input: {e}");
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        inputs.push(trimmed.to_string());
    }
    inputs
}

/// Collects inputs from the command line followed by `file` (`-` reads stdin).
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn collect_inputs(urls: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut inputs: Vec<String> = urls.to_vec();
    match file {
        Some(path) if path.as_os_str() == "-" => {
            info!("Reading URLs from stdin");
            inputs.extend(read_inputs(BufReader::new(tokio::io::stdin())).await);
        }
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            let from_file = read_inputs(BufReader::new(file)).await;
            info!("Total URLs in file: {}", from_file.len());
            inputs.extend(from_file);
        }
        None => {}
    }
    Ok(inputs)
}
