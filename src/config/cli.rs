use crate::config::toml_config::AppConfig;
use crate::domain::model::ImageInput;
use crate::domain::ports::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "prescription-ocr")]
#[command(about = "Extracts structured data from prescription images")]
pub struct CliConfig {
    #[arg(long, help = "Prescription image; passed to the OCR engine as an opaque handle")]
    pub image: Option<PathBuf>,

    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Minimum similarity (0-100) for medication name correction")]
    pub fuzzy_threshold: Option<u8>,

    #[arg(long)]
    pub no_expand_abbreviations: bool,

    #[arg(long, help = "Compact JSON output")]
    pub compact: bool,

    #[arg(long, help = "Print the effective configuration and exit")]
    pub print_config: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列參數
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(threshold) = self.fuzzy_threshold {
            config.processing.fuzzy_match_threshold = threshold;
        }
        if self.no_expand_abbreviations {
            config.processing.expand_abbreviations = false;
        }
        if self.compact {
            config.output.pretty = false;
        }
        if self.json_logs {
            config.logging.json = true;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }

        Ok(config)
    }

    pub fn image_input(&self) -> ImageInput {
        self.image.clone().into()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(image) = &self.image {
            validate_path("image", &image.to_string_lossy())?;
        }
        if let Some(config) = &self.config {
            validate_path("config", &config.to_string_lossy())?;
        }
        Ok(())
    }
}
