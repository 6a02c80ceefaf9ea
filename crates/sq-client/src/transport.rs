//! HTTP transport for the web API.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Cutouts for big halos take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Narrow fetch seam over the service.
///
/// The API serves JSON for metadata endpoints and container files for bulk
/// data, nothing else. Tests implement this with canned responses.
pub trait ApiTransport {
    fn get_json(&self, url: &str) -> ClientResult<serde_json::Value>;
    fn download(&self, url: &str, dest: &Path) -> ClientResult<()>;
}

/// `reqwest`-backed transport carrying the `api-key` header on every request.
pub struct HttpTransport {
    http: Client,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(config, http))
    }

    /// Use a custom `reqwest` client, e.g. for proxy or TLS configuration.
    pub fn with_client(config: &ClientConfig, http: Client) -> Self {
        Self {
            http,
            api_key: config.api_key().as_str().to_string(),
        }
    }

    fn get(&self, url: &str) -> ClientResult<Response> {
        debug!(url, "GET");
        let resp = self.http.get(url).header("api-key", &self.api_key).send()?;
        check_status(&resp)?;
        Ok(resp)
    }
}

impl ApiTransport for HttpTransport {
    fn get_json(&self, url: &str) -> ClientResult<serde_json::Value> {
        let resp = self.get(url)?;
        Ok(resp.json()?)
    }

    fn download(&self, url: &str, dest: &Path) -> ClientResult<()> {
        let resp = self.get(url)?;
        let bytes = resp.bytes()?;
        fs::write(dest, &bytes)?;
        debug!(url, dest = %dest.display(), bytes = bytes.len(), "downloaded");
        Ok(())
    }
}

/// Map non-success statuses to an error carrying status and URL.
fn check_status(resp: &Response) -> ClientResult<()> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Api {
            status: status.as_u16(),
            url: resp.url().to_string(),
        })
    }
}
