pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpXmlmcClient;
pub use config::ImportConfig;
pub use crate::core::{cache::ServiceCache, resolver::ServiceResolver, search::ServiceSearch};
pub use domain::model::{BpmFlags, Resolution, ServiceRecord, UnresolvedReason};
pub use utils::error::{ImportError, Result};
