use crate::domain::request::XmlmcRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Remote query channel: sends an XMLMC call and returns the raw response payload.
#[async_trait]
pub trait XmlmcTransport: Send + Sync {
    async fn invoke(&self, request: &XmlmcRequest) -> Result<String>;
}

/// Source-system service key to target service name.
pub trait ServiceMapping: Send + Sync {
    fn target_service(&self, source_key: &str) -> Option<&str>;
}

impl ServiceMapping for HashMap<String, String> {
    fn target_service(&self, source_key: &str) -> Option<&str> {
        self.get(source_key).map(String::as_str)
    }
}

#[async_trait]
impl<T: XmlmcTransport + ?Sized> XmlmcTransport for std::sync::Arc<T> {
    async fn invoke(&self, request: &XmlmcRequest) -> Result<String> {
        (**self).invoke(request).await
    }
}
