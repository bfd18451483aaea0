use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::SchedulerError;
use crate::http::headers::default_headers;
use crate::http::log_middleware::RequestLogMiddleware;
use crate::http::rate_limit::RateLimitMiddleware;
use crate::http::status_middleware::StatusMiddleware;
use crate::model::branch_code::BranchCode;
use crate::model::department::Department;

/// Outcome of a full catalog download.
#[derive(Debug, Default)]
pub struct FetchSummary {
    pub saved: Vec<String>,
    pub failed: Vec<String>,
}

/// Downloads the course catalog into one JSON file per department.
pub struct CourseDataFetcher {
    client: ClientWithMiddleware,
    config: Config,
}

impl CourseDataFetcher {
    pub fn new(config: Config) -> Result<Self, SchedulerError> {
        let client = Client::builder().default_headers(default_headers()).build()?;
        let client = ClientBuilder::new(client)
            .with(RequestLogMiddleware)
            .with(RateLimitMiddleware::new(config.request_interval()))
            .with(StatusMiddleware)
            .build();

        Ok(CourseDataFetcher { client, config })
    }

    pub fn branch_codes_url(&self) -> Result<Url, SchedulerError> {
        Ok(Url::parse_with_params(
            &self.config.branch_codes_url,
            &[("programSeviyeTipiAnahtari", self.config.program_level.as_str())],
        )?)
    }

    pub fn course_data_url(&self, branch_code_id: i64) -> Result<Url, SchedulerError> {
        Ok(Url::parse_with_params(
            &self.config.course_data_url,
            &[
                ("ProgramSeviyeTipiAnahtari", self.config.program_level.clone()),
                ("dersBransKoduId", branch_code_id.to_string()),
            ],
        )?)
    }

    pub async fn fetch_branch_codes(&self) -> Result<Vec<BranchCode>, SchedulerError> {
        let url = self.branch_codes_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SchedulerError::from(e).context("Failed to fetch branch codes"))?;
        Ok(response.json().await?)
    }

    /// Raw course list for one department, kept as-is for writing to disk.
    pub async fn fetch_course_data(&self, branch_code_id: i64) -> Result<Value, SchedulerError> {
        let url = self.course_data_url(branch_code_id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                SchedulerError::from(e).context(&format!(
                    "Failed to fetch course data for branch code {}",
                    branch_code_id
                ))
            })?;
        Ok(response.json().await?)
    }

    /// Writes `<data_dir>/<code>.json` with four-space indentation.
    pub async fn save_to_file(&self, code: &str, data: &Value) -> Result<PathBuf, SchedulerError> {
        tokio::fs::create_dir_all(&self.config.data_dir).await?;
        let path = Department::file_path(&self.config.data_dir, &file_stem(code));

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut serializer)?;

        tokio::fs::write(&path, buf).await?;
        Ok(path)
    }

    async fn fetch_and_save(&self, branch: &BranchCode) -> Result<PathBuf, SchedulerError> {
        log::info!("Fetching data for {} (ID: {})...", branch.code, branch.id);
        let data = self.fetch_course_data(branch.id).await?;
        let path = self.save_to_file(&branch.code, &data).await?;
        log::info!("Data for {} saved successfully.", branch.code);
        Ok(path)
    }

    /// Fetches every department with a bounded number of requests in
    /// flight. One department failing does not stop the others.
    pub async fn run(&self) -> Result<FetchSummary, SchedulerError> {
        let branches = self.fetch_branch_codes().await?;
        log::info!(
            "{} branch codes found, fetching with {} workers",
            branches.len(),
            self.config.concurrency()
        );

        let results: Vec<(String, Result<PathBuf, SchedulerError>)> = stream::iter(branches)
            .map(|branch| async move {
                let result = self.fetch_and_save(&branch).await;
                (branch.code, result)
            })
            .buffer_unordered(self.config.concurrency())
            .collect()
            .await;

        let mut summary = FetchSummary::default();
        for (code, result) in results {
            match result {
                Ok(_) => summary.saved.push(code),
                Err(err) => {
                    log::error!("Error: {} ({})", err, code);
                    summary.failed.push(code);
                }
            }
        }
        summary.saved.sort();
        summary.failed.sort();
        Ok(summary)
    }
}

/// Branch codes become file names; keep them inside the data directory.
fn file_stem(code: &str) -> String {
    code.trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
