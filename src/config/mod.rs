pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

/// Output file stem used when none is configured.
pub const DEFAULT_FILE_STEM: &str = "{kind}";

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::{ConfigProvider, OutputFormat, PayloadKind};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "shop-payloads")]
    #[command(about = "Convert request payload files into canonical JSON, CSV and TSV")]
    pub struct CliConfig {
        /// JSON file holding one payload object or an array of them
        #[arg(short, long)]
        pub input: String,

        #[arg(short, long, value_enum, default_value = "product-item")]
        pub kind: PayloadKind,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_enum, value_delimiter = ',', default_values = ["json", "csv", "tsv"])]
        pub formats: Vec<OutputFormat>,

        /// Fail on fields the payload kind does not declare instead of dropping them
        #[arg(long)]
        pub reject_unknown_fields: bool,

        /// Output file stem; supports {kind} and {timestamp}
        #[arg(long, default_value = super::DEFAULT_FILE_STEM)]
        pub stem: String,

        /// Bundle all outputs into this zip archive
        #[arg(long)]
        pub bundle: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_file(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn payload_kind(&self) -> PayloadKind {
            self.kind
        }

        fn output_formats(&self) -> &[OutputFormat] {
            &self.formats
        }

        fn reject_unknown_fields(&self) -> bool {
            self.reject_unknown_fields
        }

        fn file_stem(&self) -> &str {
            &self.stem
        }

        fn bundle_name(&self) -> Option<&str> {
            self.bundle.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_non_empty_list("formats", &self.formats)?;
            validation::validate_unique_list("formats", &self.formats)?;
            validation::validate_file_stem("stem", &self.stem)?;

            if let Some(bundle) = &self.bundle {
                validation::validate_file_stem("bundle", bundle)?;
                validation::validate_file_extensions("bundle", std::slice::from_ref(bundle), &["zip"])?;
            }
            Ok(())
        }
    }

}
