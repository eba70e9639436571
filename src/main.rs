use anyhow::Context;
use clap::Parser;
use mint_konnector::core::ConfigProvider;
use mint_konnector::utils::error::ErrorSeverity;
use mint_konnector::utils::{logger, validation::Validate};
use mint_konnector::{BillsPipeline, CliConfig, EtlEngine, LocalStorage, TomlConfig, VendorProfile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting mint-konnector");
    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if let Some(output) = &args.output {
        config.output.path = output.clone();
        tracing::info!("Output path overridden to: {}", output);
    }

    let profile = VendorProfile::mint_energie();

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| profile.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &profile);

    if args.dry_run {
        tracing::info!("Dry run: configuration is valid, nothing fetched");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = BillsPipeline::with_profile(storage, config, profile);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Konnector run completed");
            println!("✅ Bills saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Konnector run failed: {} (Category: {:?}, Severity: {:?}, Code: {})",
                e,
                e.category(),
                e.severity(),
                e.error_code()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, profile: &VendorProfile) {
    tracing::info!("Vendor: {} ({})", profile.vendor, profile.base_url);
    tracing::info!("Login: {}", config.credentials().login);
    tracing::info!("Output: {}", config.output_path());
    if let Some(timeout) = config.request_timeout() {
        tracing::info!("Request timeout: {:?}", timeout);
    }
    if config.parameters().is_some() {
        tracing::debug!("Static parameters present");
    }
}
