pub mod cache;
pub mod resolver;
pub mod search;

pub use crate::domain::model::{BpmFlags, Resolution, ServiceRecord, UnresolvedReason};
pub use crate::domain::ports::{ServiceMapping, XmlmcTransport};
pub use crate::domain::request::XmlmcRequest;
pub use crate::utils::error::Result;
