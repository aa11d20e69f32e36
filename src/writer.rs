use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FetchLogsError, Result};
use crate::models::LogEvent;

const STRIP_SUFFIX_CHARS: usize = 3;

/// Replaces the characters that would otherwise end up as path or time
/// separators in a file name.
fn sanitize(text: &str) -> String {
    text.replace([' ', '/', ':'], "_")
}

pub fn output_file_name(log_group: &str, start_time_text: &str, duration: i64) -> String {
    format!(
        "{}{}d{}logs.txt",
        sanitize(log_group),
        sanitize(start_time_text),
        duration
    )
}

fn stream_suffix(stream_name: &str) -> &str {
    let count = stream_name.chars().count();
    match stream_name
        .char_indices()
        .nth(count.saturating_sub(STRIP_SUFFIX_CHARS))
    {
        Some((idx, _)) => &stream_name[idx..],
        None => stream_name,
    }
}

/// One output line without the trailing newline.
pub fn render_line(event: &LogEvent, strip: bool) -> Result<String> {
    if strip {
        let stream = event.log_stream_name.as_deref().unwrap_or_default();
        let message = event.message.as_deref().unwrap_or_default();
        Ok(format!("{}:{}", stream_suffix(stream), message))
    } else {
        Ok(serde_json::to_string(event)?)
    }
}

fn write_error(destination: &Path, source: std::io::Error) -> FetchLogsError {
    FetchLogsError::Write {
        path: destination.to_path_buf(),
        source,
    }
}

/// Writes one line per event to `out`. `destination` names the sink in
/// write errors; encoding failures come back as `Serialize`.
pub fn write_to<W: Write>(
    out: &mut W,
    destination: &Path,
    events: &[LogEvent],
    strip: bool,
) -> Result<()> {
    for event in events {
        let line = render_line(event, strip)?;
        writeln!(out, "{}", line).map_err(|e| write_error(destination, e))?;
    }
    out.flush().map_err(|e| write_error(destination, e))
}

pub fn write_events(events: &[LogEvent], destination: &Path, strip: bool) -> Result<()> {
    let file = File::create(destination).map_err(|e| write_error(destination, e))?;
    let mut out = BufWriter::new(file);
    write_to(&mut out, destination, events, strip)
}
