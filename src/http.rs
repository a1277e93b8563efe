//! Shared outbound HTTP client

use std::time::Duration;

use reqwest::{Client, Response};

use crate::config::HttpConfig;
use crate::{PlannerError, Result};

/// Build the client every provider shares
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-success status into a transport error
pub fn check_status(response: Response, service: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(PlannerError::transport(format!(
            "{service} request failed with status {status}"
        )))
    }
}
