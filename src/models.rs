use aws_sdk_cloudwatchlogs::types::FilteredLogEvent;
use serde::Serialize;

pub type SendableError = Box<dyn std::error::Error + Send + Sync>;

/// Events per `FilterLogEvents` call; the service maximum.
pub const PAGE_LIMIT: i32 = 10_000;

/// One event as returned by `FilterLogEvents`.
///
/// Field names serialize the way the service reports them, and missing
/// fields are left out of the JSON rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingestion_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl From<FilteredLogEvent> for LogEvent {
    fn from(x: FilteredLogEvent) -> Self {
        LogEvent {
            log_stream_name: x.log_stream_name,
            timestamp: x.timestamp,
            message: x.message,
            ingestion_time: x.ingestion_time,
            event_id: x.event_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub log_group: String,
    pub start_time: i64,
    pub end_time: i64,
    pub limit: i32,
    pub next_token: Option<String>,
}

/// A single response page. `next_token == None` means the service is done.
#[derive(Debug, Clone, Default)]
pub struct LogPage {
    pub events: Vec<LogEvent>,
    pub next_token: Option<String>,
}
