use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Import log severity scale (1-5) as written to the import log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info = 1,
    Notice = 2,
    Debug = 3,
    Error = 4,
    Warning = 5,
}

impl Severity {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Severity::Info),
            2 => Some(Severity::Notice),
            3 => Some(Severity::Debug),
            4 => Some(Severity::Error),
            5 => Some(Severity::Warning),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

/// 將 1-5 嚴重度寫入 tracing
pub fn log_event(severity: Severity, message: &str) {
    match severity {
        Severity::Info | Severity::Notice => tracing::info!(severity = severity.level(), "{}", message),
        Severity::Debug => tracing::debug!(severity = severity.level(), "{}", message),
        Severity::Error => tracing::error!(severity = severity.level(), "{}", message),
        Severity::Warning => tracing::warn!(severity = severity.level(), "{}", message),
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("service_import=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("service_import=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON 輸出，給集中式日誌收集使用
pub fn init_json_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "service_import=debug,info"
        } else {
            "service_import=info"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(true)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::from_level(1), Some(Severity::Info));
        assert_eq!(Severity::from_level(4), Some(Severity::Error));
        assert_eq!(Severity::from_level(5), Some(Severity::Warning));
        assert_eq!(Severity::from_level(0), None);
        assert_eq!(Severity::from_level(6), None);
        assert_eq!(Severity::Warning.level(), 5);
    }
}
