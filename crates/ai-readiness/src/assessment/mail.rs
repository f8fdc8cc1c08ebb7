//! Mail transports behind the `Notifier` seam.

use async_trait::async_trait;
use reqwest::Client;

use super::repository::{MailError, Notifier, OutboundEmail};
use crate::config::{MailConfig, MailProvider};

/// Posts messages as JSON to a transactional mail API using a bearer key.
#[derive(Clone)]
pub struct HttpMailNotifier {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpMailNotifier {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpMailNotifier {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MailError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

/// Transport selected from configuration at startup.
#[derive(Clone)]
pub enum MailTransport {
    Http(HttpMailNotifier),
    Disabled,
}

impl MailTransport {
    pub fn from_config(config: &MailConfig) -> Self {
        match (config.provider, &config.api_url, &config.api_key) {
            (MailProvider::Http, Some(url), Some(key)) => {
                Self::Http(HttpMailNotifier::new(url.clone(), key.clone()))
            }
            _ => Self::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[async_trait]
impl Notifier for MailTransport {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        match self {
            Self::Http(notifier) => notifier.send(email).await,
            Self::Disabled => Err(MailError::NotConfigured),
        }
    }
}
