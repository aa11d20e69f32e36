use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_cloudwatchlogs::{error::DisplayErrorContext, Client};
use log::{debug, info};

use crate::error::{FetchLogsError, Result};
use crate::models::{FilterRequest, LogEvent, LogPage, PAGE_LIMIT};
use crate::window::FetchWindow;

lazy_static! {
    static ref AWS_REGIONS: Vec<&'static str> = vec![
        "us-east-1", "us-east-2", "us-west-1", "us-west-2",
        "af-south-1", "ap-east-1", "ap-south-1", "ap-south-2",
        "ap-southeast-1", "ap-southeast-2", "ap-southeast-3",
        "ap-southeast-4", "ap-northeast-1", "ap-northeast-2",
        "ap-northeast-3", "ca-central-1", "ca-west-1",
        "eu-central-1", "eu-central-2", "eu-west-1", "eu-west-2",
        "eu-west-3", "eu-south-1", "eu-south-2", "eu-north-1",
        "il-central-1", "me-central-1", "me-south-1", "sa-east-1",
    ];
}

fn find_region(input: &str) -> Option<&'static str> {
    AWS_REGIONS.iter().find(|&&region| region == input).copied()
}

/// Builds the SDK config for one named profile. The profile is handed to the
/// loader directly; `AWS_PROFILE` is never touched.
pub async fn build_config(profile: &str, region: &str) -> Result<SdkConfig> {
    let selected_region = find_region(region)
        .ok_or_else(|| FetchLogsError::Config(format!("unknown AWS region '{}'", region)))?;

    let shared_config = aws_config::from_env()
        .profile_name(profile)
        .region(Region::new(selected_region))
        .load()
        .await;
    Ok(shared_config)
}

/// The paginated "filter log events" operation.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn filter_log_events(&self, request: &FilterRequest) -> Result<LogPage>;
}

pub struct CloudWatchLogSource {
    client: Client,
}

impl CloudWatchLogSource {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl LogSource for CloudWatchLogSource {
    async fn filter_log_events(&self, request: &FilterRequest) -> Result<LogPage> {
        let resp = self
            .client
            .filter_log_events()
            .log_group_name(&request.log_group)
            .set_start_time(Some(request.start_time))
            .set_end_time(Some(request.end_time))
            .limit(request.limit)
            .set_next_token(request.next_token.clone())
            .send()
            .await
            .map_err(|e| FetchLogsError::Fetch {
                log_group: request.log_group.clone(),
                source: DisplayErrorContext(e).to_string().into(),
            })?;

        Ok(LogPage {
            events: resp
                .events
                .unwrap_or_default()
                .into_iter()
                .map(LogEvent::from)
                .collect(),
            next_token: resp.next_token,
        })
    }
}

/// Drains every page of `FilterLogEvents` for the window, keeping events in
/// the order the service returned them.
///
/// Fails with `PaginationLimitExceeded` if the service still reports more
/// results after `max_pages` pages.
pub async fn fetch_logs<S: LogSource + ?Sized>(
    source: &S,
    log_group_name: &str,
    window: FetchWindow,
    max_pages: usize,
) -> Result<Vec<LogEvent>> {
    let mut result = Vec::new();
    let mut next_token = None;
    let mut pages = 0;

    loop {
        let request = FilterRequest {
            log_group: log_group_name.to_string(),
            start_time: window.start_time,
            end_time: window.end_time,
            limit: PAGE_LIMIT,
            next_token: next_token.take(),
        };
        let page = source.filter_log_events(&request).await?;
        pages += 1;

        debug!(
            "Page {}: retrieved {} event(s) for log group: {}",
            pages,
            page.events.len(),
            log_group_name
        );
        result.extend(page.events);

        next_token = page.next_token.filter(|token| !token.is_empty());
        if next_token.is_none() {
            break;
        }
        if pages >= max_pages {
            return Err(FetchLogsError::PaginationLimitExceeded { pages });
        }
    }

    info!(
        "Retrieved {} event(s) in {} page(s) for log group: {}",
        result.len(),
        pages,
        log_group_name
    );
    Ok(result)
}
