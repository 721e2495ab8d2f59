use clap::Parser;
use prescription_ocr::utils::{logger, validation::Validate};
use prescription_ocr::{AnalysisEngine, AnalyzerError, CliConfig, MockOcrEngine, PrescriptionPipeline};

/// 輸出錯誤訊息並依嚴重程度結束程式
fn exit_with(e: &AnalyzerError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證命令列參數並載入配置
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(cli.verbose, &config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logging.level);
    }

    tracing::info!("Starting prescription-ocr CLI");
    tracing::debug!("Effective config: {:?}", config);

    let image = cli.image_input();
    let pipeline = PrescriptionPipeline::new(MockOcrEngine::new(), config, image);
    let engine = AnalysisEngine::new(pipeline);

    match engine.run().await {
        Ok(output) => {
            tracing::info!("✅ Prescription analysis completed");
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Prescription analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            exit_with(&e);
        }
    }

    Ok(())
}
