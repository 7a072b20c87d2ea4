use clap::Parser;
use flight_map::config::cli::{report_run, resolve_iata, DESTINATION_PROMPT, SOURCE_PROMPT};
use flight_map::utils::{logger, validation::Validate};
use flight_map::{CliConfig, LocalStorage, RouteConfig, RouteEngine, RouteMapError, RoutePipeline, TomlConfig};

fn report_failure(e: &RouteMapError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting flight-map");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入 TOML 配置 (可選)
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => Some(config),
                Err(e) => report_failure(&e),
            }
        }
        None => None,
    };

    // 命令列 > 設定檔 > 互動輸入
    let given_source = cli
        .source
        .as_deref()
        .or_else(|| file_config.as_ref().and_then(TomlConfig::source_iata));
    let given_destination = cli
        .destination
        .as_deref()
        .or_else(|| file_config.as_ref().and_then(TomlConfig::destination_iata));

    let (source, destination) = {
        let mut input = std::io::stdin().lock();
        let mut output = std::io::stdout();
        let source = resolve_iata(given_source, SOURCE_PROMPT, &mut input, &mut output)
            .unwrap_or_else(|e| report_failure(&e));
        let destination =
            resolve_iata(given_destination, DESTINATION_PROMPT, &mut input, &mut output)
                .unwrap_or_else(|e| report_failure(&e));
        (source, destination)
    };

    let config = RouteConfig::from_layers(&cli, file_config.as_ref(), &source, &destination);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_failure(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let monitor_enabled = config.monitor;
    let pipeline = RoutePipeline::new(storage, config);
    let engine = RouteEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = report_run(engine.run().await, &mut std::io::stdout()) {
        report_failure(&e);
    }

    Ok(())
}
