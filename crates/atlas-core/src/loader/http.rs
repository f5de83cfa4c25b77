// crates/atlas-core/src/loader/http.rs
#![cfg(feature = "fetch")]

use super::{Response, Transport};
use crate::error::TransportError;
use reqwest::blocking::Client;

/// Blocking `reqwest` transport. Timeouts are whatever the client defaults to.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("atlas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        let err = |e: reqwest::Error| TransportError {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(err)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(err)?;

        Ok(Response { status, body })
    }
}
