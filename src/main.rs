use clap::Parser;
use service_import::utils::{
    logger,
    validation::{validate_range, Validate, MAX_CONCURRENT_REQUESTS},
};
use service_import::config::LogFormat;
use service_import::{CliConfig, ImportConfig, ServiceResolver};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting service-import");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = ImportConfig::from_file(&cli.config)?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Some(concurrent) = cli.concurrent_requests {
        if let Err(e) = validate_range("--concurrent-requests", concurrent, 1, MAX_CONCURRENT_REQUESTS) {
            tracing::error!("❌ Invalid command line option: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
    let concurrency = cli
        .concurrent_requests
        .unwrap_or_else(|| config.concurrent_requests());
    let client = config.http_client()?;
    let application = config.instance.application.clone();

    let mut resolver = ServiceResolver::new(client, config);
    if let Some(application) = application {
        resolver = resolver.with_application(application);
    }
    let resolver = Arc::new(resolver);

    let mut results: Vec<(String, String, String)> = resolver
        .resolve_keys(cli.service_keys.clone(), concurrency)
        .await
        .into_iter()
        .map(|(key, id)| ("service_key".to_string(), key, id))
        .collect();

    for name in &cli.service_names {
        let id = resolver.resolve_by_name(name).await;
        results.push(("service_name".to_string(), name.clone(), id));
    }

    let unresolved = results.iter().filter(|(_, _, id)| id.is_empty()).count();

    if cli.json {
        let output: Vec<serde_json::Value> = results
            .iter()
            .map(|(kind, input, id)| {
                serde_json::json!({
                    "kind": kind,
                    "input": input,
                    "service_id": id,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (kind, input, id) in &results {
            if id.is_empty() {
                println!("{} [{}] -> (unresolved)", kind, input);
            } else {
                println!("{} [{}] -> {}", kind, input, id);
            }
        }
    }

    tracing::info!(
        "✅ Resolved {} of {} services ({} cached)",
        results.len() - unresolved,
        results.len(),
        resolver.cache().len()
    );

    Ok(())
}
