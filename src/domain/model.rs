use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One JSON object read from an input document, before it is typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Position of the element in the input document.
    pub index: usize,
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub kind: PayloadKind,
    pub record_count: usize,
    pub json_output: String,
    pub csv_output: String,
    pub tsv_output: String,
    /// Input keys that were not wire fields of `kind` and got dropped.
    pub dropped_fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    ProductItem,
    CreateUserRequest,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::ProductItem => "product-item",
            PayloadKind::CreateUserRequest => "create-user-request",
        }
    }

    /// Stem used for output files when no filename template is configured.
    pub fn default_file_stem(&self) -> &'static str {
        match self {
            PayloadKind::ProductItem => "product_items",
            PayloadKind::CreateUserRequest => "create_user_requests",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

/// A request payload record that can travel through the converter.
pub trait Payload: Serialize + DeserializeOwned + Send + Sync {
    const KIND: PayloadKind;

    /// Wire names of every field, in declaration order.
    const FIELDS: &'static [&'static str];

    /// One cell per entry of `FIELDS`; absent values are empty cells.
    fn row(&self) -> Vec<String>;
}

pub(crate) fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
