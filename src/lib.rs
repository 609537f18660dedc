pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{storage::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{engine::PayloadEngine, pipeline::PayloadPipeline};
pub use crate::domain::{Address, CreateUserRequest, OutputFormat, Payload, PayloadKind, ProductItem};
pub use crate::utils::error::{PayloadError, Result};
