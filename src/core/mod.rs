pub mod codec;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{OutputFormat, PayloadKind, Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
