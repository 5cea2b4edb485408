use crate::domain::ports::XmlmcTransport;
use crate::domain::request::XmlmcRequest;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// XMLMC over HTTP, authenticated with an API key.
#[derive(Clone)]
pub struct HttpXmlmcClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpXmlmcClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn method_url(&self, request: &XmlmcRequest) -> String {
        format!(
            "{}/{}/?method={}",
            self.endpoint.trim_end_matches('/'),
            request.service(),
            request.method()
        )
    }
}

impl fmt::Debug for HttpXmlmcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpXmlmcClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl XmlmcTransport for HttpXmlmcClient {
    async fn invoke(&self, request: &XmlmcRequest) -> Result<String> {
        let url = self.method_url(request);
        let body = request.to_xml()?;

        tracing::debug!("Invoking XMLMC {}::{} at {}", request.service(), request.method(), url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/xmlmc")
            .header(ACCEPT, "text/xml")
            .header(AUTHORIZATION, format!("ESP-APIKEY {}", self.api_key))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("XMLMC response status: {}", status);
        let payload = response.text().await?;

        if !status.is_success() {
            return Err(ImportError::HttpStatusError {
                status: status.as_u16(),
                body: payload,
            });
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url() {
        let client = HttpXmlmcClient::new(
            "https://instance.example.com/xmlmc/",
            "key",
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
        .unwrap();
        let request = XmlmcRequest::new("data", "entityBrowseRecords");

        assert_eq!(
            client.method_url(&request),
            "https://instance.example.com/xmlmc/data/?method=entityBrowseRecords"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = HttpXmlmcClient::new(
            "https://instance.example.com/xmlmc",
            "very-secret-key",
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        )
        .unwrap();

        let output = format!("{:?}", client);
        assert!(!output.contains("very-secret-key"));
        assert!(output.contains("<redacted>"));
        assert!(output.contains("https://instance.example.com/xmlmc"));
    }
}
