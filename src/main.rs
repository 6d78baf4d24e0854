use arcgis_tiles::core::report::{render_json_report, render_text_report};
use arcgis_tiles::utils::{logger, validation::Validate};
use arcgis_tiles::{CliConfig, ReportFormat, ScanEngine, ScanOutcome};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match ScanEngine::from_config(&config) {
        Ok(engine) => engine.run().await,
        Err(e) => {
            tracing::error!("❌ Could not start scan: {} (Kind: {:?})", e, e.kind());
            ScanOutcome::default()
        }
    };

    // 無論掃描結果如何都輸出報表
    match config.format {
        ReportFormat::Text => println!("{}", render_text_report(&outcome.records)),
        ReportFormat::Json => println!("{}", render_json_report(&outcome.records)?),
    }

    Ok(())
}
