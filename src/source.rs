use crate::errors::DashboardError;
use crate::models::Payload;
use reqwest::{Client, Url};
use std::future::Future;
use tracing::debug;

/// Where a poll cycle gets its payload from.
pub trait DataSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Payload, DashboardError>> + Send;
}

/// GETs `./data` relative to the hosting page.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(base_url: &Url) -> Result<Self, DashboardError> {
        let endpoint = base_url
            .join("./data")
            .map_err(|err| DashboardError::Config(format!("cannot resolve data endpoint: {err}")))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Payload, DashboardError> {
        debug!(endpoint = %self.endpoint, "fetching data");
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status(status));
        }
        let bytes = response.bytes().await?;
        Payload::from_slice(&bytes)
    }
}
