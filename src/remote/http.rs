//! HTTP implementation of [`RemoteService`] built on reqwest.

use crate::error::{DashboardError, Result};
use crate::remote::{
    config::ClientConfig,
    data::{
        Acknowledgement, Command, CommandResponse, CommandUpdate, RawLogRecord, ReadingSubmission,
    },
    traits::RemoteService,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Remote service client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpRemote {
    /// Create a new client. The configured timeout applies to every request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DashboardError::config_error(format!("Invalid HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check the status and return the raw body of a response.
    async fn read_body(path: &str, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::protocol_error(format!(
                "{} returned HTTP {}",
                path, status
            )));
        }
        let bytes = response.bytes().await.map_err(|e| {
            DashboardError::transport_error(format!("Failed to read {} body: {}", path, e))
        })?;
        Ok(bytes.to_vec())
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let body = Self::read_body(path, response).await?;
        serde_json::from_slice(&body).map_err(|e| {
            DashboardError::protocol_error(format!("Unexpected {} response: {}", path, e))
        })
    }

    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        debug!("Requesting {}", self.config.endpoint(path));
        request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::transport_error(format!("{} failed: {}", path, e)))
    }
}

#[async_trait]
impl RemoteService for HttpRemote {
    async fn get_command(&self) -> Result<Command> {
        let path = "/command";
        let response = self
            .send(path, self.client.get(self.config.endpoint(path)))
            .await?;
        let body: CommandResponse = Self::decode(path, response).await?;
        Ok(body.command)
    }

    async fn set_command(&self, command: &Command) -> Result<()> {
        let path = "/update-command";
        let update = CommandUpdate {
            command: command.clone(),
        };
        let response = self
            .send(path, self.client.post(self.config.endpoint(path)).json(&update))
            .await?;
        // Only the status matters; the body is implementation-defined.
        Self::read_body(path, response).await?;
        Ok(())
    }

    async fn submit_reading(&self, raw_value: &str) -> Result<Acknowledgement> {
        let path = "/data";
        let submission = ReadingSubmission {
            soil_moisture: raw_value.to_string(),
        };
        let response = self
            .send(
                path,
                self.client.post(self.config.endpoint(path)).json(&submission),
            )
            .await?;
        Self::decode(path, response).await
    }

    async fn get_log(&self) -> Result<Vec<RawLogRecord>> {
        let path = "/logs";
        let response = self
            .send(path, self.client.get(self.config.endpoint(path)))
            .await?;
        Self::decode(path, response).await
    }
}
