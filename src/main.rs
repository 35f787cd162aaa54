use clap::Parser;
use tmj_site::utils::logger;
use tmj_site::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tmj-site");

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            // 2 for bad configuration, 1 for anything else
            std::process::exit(if e.is_config_error() { 2 } else { 1 });
        }
    };
    if cli.verbose {
        tracing::debug!(
            "Resolved config: host={} port={} testimonials={} requests={}",
            config.host,
            config.port,
            config.testimonials_collection,
            config.consultation_collection
        );
    }

    if let Err(e) = tmj_site::server::run(config).await {
        tracing::error!("❌ Server stopped with error: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("✅ Server shut down cleanly");
    Ok(())
}
