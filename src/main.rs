#[macro_use]
extern crate lazy_static;

mod aws;
mod config;
mod error;
mod models;
mod utilities;
mod window;
mod writer;

use crate::aws::{CloudWatchLogSource, LogSource};
use crate::error::{FetchLogsError, Result};
use clap::Parser;
use colored::Colorize;
use config::AppConfig;
use log::{error, info};
use std::path::Path;
use std::time::SystemTime;
use utilities::format_millis;

pub fn setup_logger(level: log::LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|source| FetchLogsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        dispatch = dispatch.chain(file);
    }

    dispatch
        .apply()
        .map_err(|e| FetchLogsError::Logger(e.to_string()))?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let app_config = AppConfig::parse();

    if let Err(e) = setup_logger(app_config.log_level(), app_config.log_file.as_deref()) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(&app_config).await {
        error!("{}", e);
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(app_config: &AppConfig) -> Result<()> {
    info!("Starting application with args: {:?}", app_config);

    info!(
        "Profile: {} (region {})",
        app_config.profile, app_config.region
    );
    let config = aws::build_config(&app_config.profile, &app_config.region).await?;
    let source = CloudWatchLogSource::new(&config);

    fetch_and_write(&source, app_config).await?;
    info!("Done!");
    Ok(())
}

/// Parses the window, drains every page from `source` and writes the output
/// file. Returns the number of events written.
async fn fetch_and_write<S: LogSource + ?Sized>(source: &S, app_config: &AppConfig) -> Result<usize> {
    // Parse first: a bad start time must never reach the service.
    let window = app_config.fetch_window()?;
    let output = app_config.output_path();

    info!(
        "Fetching logs from {} between {} ({}) and {} ({})",
        app_config.log_group,
        window.start_time,
        format_millis(window.start_time),
        window.end_time,
        format_millis(window.end_time)
    );
    let max_pages = usize::try_from(app_config.max_pages).unwrap_or(usize::MAX);
    let events = aws::fetch_logs(source, &app_config.log_group, window, max_pages).await?;

    info!(
        "Fetched {} log event(s). Saving to {}",
        events.len(),
        output.display()
    );
    writer::write_events(&events, &output, app_config.strip)?;
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::test_support::ScriptedSource;
    use crate::models::{LogEvent, LogPage};

    fn app_config(start_time: &str, output: &Path, extra: &[&str]) -> AppConfig {
        let output = output.to_string_lossy().into_owned();
        let mut args = vec!["cwfetch", start_time, "orders", "--output", output.as_str()];
        args.extend_from_slice(extra);
        AppConfig::try_parse_from(args).unwrap()
    }

    fn page(stream: &str, messages: &[&str], next_token: Option<&str>) -> LogPage {
        LogPage {
            events: messages
                .iter()
                .map(|m| LogEvent {
                    log_stream_name: Some(stream.to_string()),
                    message: Some(m.to_string()),
                    ..Default::default()
                })
                .collect(),
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn malformed_start_time_never_reaches_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let config = app_config("2025-08-08 06:46:00", &output, &[]);
        let source = ScriptedSource::new(vec![]);

        let err = fetch_and_write(&source, &config).await.unwrap_err();

        assert!(matches!(err, FetchLogsError::Parse { .. }));
        assert!(source.requests().is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn writes_every_page_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let config = app_config("08/08/25 06:46:00", &output, &["--strip"]);
        let source = ScriptedSource::new(vec![
            Ok(page("stream-abc", &["one", "two"], Some("t1"))),
            Ok(page("stream-xyz", &["three"], None)),
        ]);

        let written = fetch_and_write(&source, &config).await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "abc:one\nabc:two\nxyz:three\n"
        );
        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].end_time - requests[0].start_time, 5 * 60_000);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let config = app_config("08/08/25 06:46:00", &output, &[]);
        let source = ScriptedSource::new(vec![
            Ok(page("s", &["partial"], Some("t1"))),
            Err(FetchLogsError::Fetch {
                log_group: "orders".to_string(),
                source: "AccessDeniedException".into(),
            }),
        ]);

        let err = fetch_and_write(&source, &config).await.unwrap_err();

        assert!(matches!(err, FetchLogsError::Fetch { .. }));
        assert!(!output.exists());
    }
}
