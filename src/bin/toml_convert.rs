use clap::Parser;
use shop_payloads::core::ConfigProvider;
use shop_payloads::utils::{logger, validation::Validate};
use shop_payloads::{LocalStorage, PayloadEngine, PayloadKind, PayloadPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-convert")]
#[command(about = "Payload conversion driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "payloads.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the payload kind from config
    #[arg(long, value_enum)]
    kind: Option<PayloadKind>,

    /// Dry run - decode the input and report without writing outputs
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init(
        args.verbose || config.verbose_logging(),
        config.json_logging(),
    );

    tracing::info!("🚀 Starting TOML-based payload conversion");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(kind) = args.kind {
        config.source.kind = kind;
        tracing::info!("🔧 Payload kind overridden to: {}", kind);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    let source = LocalStorage::current_dir();
    let sink = LocalStorage::new(config.output_path().to_string());
    let engine = PayloadEngine::new(PayloadPipeline::new(source, sink, config));

    let outcome = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No outputs will be written");
        engine.preview().await.map(|result| {
            println!("🔍 Dry run: {} {} payloads decoded", result.record_count, result.kind);
            if !result.dropped_fields.is_empty() {
                println!("  Unknown fields dropped: {}", result.dropped_fields.join(", "));
            }
            Vec::new()
        })
    } else {
        engine.run().await
    };

    match outcome {
        Ok(written) => {
            tracing::info!("✅ Conversion completed successfully!");
            for path in written {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let formats: Vec<&str> = config
        .output_formats()
        .iter()
        .map(|format| format.extension())
        .collect();

    println!("📋 Configuration Summary:");
    println!("  Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {} ({})", config.input_file(), config.payload_kind());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", formats.join(", "));
    println!("  File stem: {}", config.file_stem());
    println!("  Reject unknown fields: {}", config.reject_unknown_fields());

    if let Some(bundle) = config.bundle_name() {
        println!("  Bundle: {} (ZIP)", bundle);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
