use crate::model::time_record::{NewTimeRecord, TimeRecord, TimeRecordPatch};
use crate::model::user::User;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the external time-record store (a json-server style REST
/// API). All consistency guarantees live on the store side; this client does
/// plain request/response with no retries.
#[derive(Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl StoreClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Credential match: `GET /users?email=&password=` returns zero or one
    /// users; non-empty means the pair matched.
    #[tracing::instrument(skip(self, password))]
    pub async fn find_user(&self, email: &str, password: &str) -> Result<Option<User>> {
        let url = format!("{}/users", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("email", email), ("password", password)])
            .send()
            .await
            .context("Failed to send user lookup request")?;

        let users: Vec<User> = Self::read_json(response, "user lookup").await?;
        Ok(users.into_iter().next())
    }

    /// Account existence check for the forgot-password flow.
    #[tracing::instrument(skip(self))]
    pub async fn user_exists(&self, email: &str) -> Result<bool> {
        let url = format!("{}/users", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .context("Failed to send user existence request")?;

        let users: Vec<User> = Self::read_json(response, "user existence").await?;
        Ok(!users.is_empty())
    }

    #[tracing::instrument(skip(self))]
    pub async fn time_records(&self, employee_id: u64) -> Result<Vec<TimeRecord>> {
        let url = format!("{}/timeRecords", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("employeeId", employee_id.to_string())])
            .send()
            .await
            .context("Failed to send time record list request")?;

        Self::read_json(response, "time record list").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn time_record(&self, id: u64) -> Result<TimeRecord> {
        let url = format!("{}/timeRecords/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send time record fetch request")?;

        Self::read_json(response, "time record fetch").await
    }

    #[tracing::instrument(skip(self, record))]
    pub async fn create_time_record(&self, record: &NewTimeRecord) -> Result<TimeRecord> {
        let url = format!("{}/timeRecords", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .context("Failed to send time record create request")?;

        Self::read_json(response, "time record create").await
    }

    /// Read-modify-write update. The store has no concurrency token, so
    /// concurrent writers can race; a lost update is the documented trade-off.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_time_record(&self, id: u64, patch: &TimeRecordPatch) -> Result<TimeRecord> {
        let url = format!("{}/timeRecords/{}", self.base_url, id);

        let response = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .context("Failed to send time record update request")?;

        Self::read_json(response, "time record update").await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            anyhow::bail!("{} failed with status {}: {}", what, status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }
}
