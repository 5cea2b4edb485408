pub mod toml_config;

pub use toml_config::ImportConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// 終端機用精簡格式
    Compact,
    /// 集中式日誌收集用 JSON
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "service-import")]
#[command(about = "Resolve migration service keys to instance service IDs")]
pub struct CliConfig {
    #[arg(long, default_value = "service_import.toml")]
    pub config: String,

    #[arg(long = "service-key", help = "Source-system service key to resolve (repeatable)")]
    pub service_keys: Vec<String>,

    #[arg(long = "service-name", help = "Instance service name to resolve (repeatable)")]
    pub service_names: Vec<String>,

    #[arg(long, help = "Override import.concurrent_requests")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, help = "Log output format")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
