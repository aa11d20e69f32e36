use std::path::PathBuf;

use clap::Parser;

use crate::error::Result;
use crate::window::FetchWindow;
use crate::writer::output_file_name;

#[derive(Parser, Debug)]
#[command(
    name = "cwfetch",
    version,
    about = "Download CloudWatch log events for a log group and time window to a local file."
)]
pub struct AppConfig {
    /// Start time in UTC, day first: "DD/MM/YY HH:MM:SS" (e.g. "08/08/25 06:46:00")
    pub start_time: String,

    /// CloudWatch Logs log group name
    pub log_group: String,

    /// Minutes of logs to fetch from the start time
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(i64).range(1..))]
    pub duration: i64,

    /// Write "<last 3 chars of stream>:<message>" lines instead of JSON
    #[arg(long)]
    pub strip: bool,

    /// AWS profile used to resolve credentials
    #[arg(long, default_value = "default")]
    pub profile: String,

    /// AWS region of the log group
    #[arg(long, default_value = "eu-central-1")]
    pub region: String,

    /// Output path; derived from the log group, start time and duration when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Give up if the service still has more pages after this many
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    /// Also write the diagnostic log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log each page at debug level
    #[arg(long, short)]
    pub verbose: bool,
}

impl AppConfig {
    pub fn fetch_window(&self) -> Result<FetchWindow> {
        FetchWindow::parse(&self.start_time, self.duration)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(output_file_name(
                &self.log_group,
                &self.start_time,
                self.duration,
            )),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
