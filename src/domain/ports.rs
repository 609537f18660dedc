use crate::domain::model::{OutputFormat, PayloadKind, Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn payload_kind(&self) -> PayloadKind;
    fn output_formats(&self) -> &[OutputFormat];
    fn reject_unknown_fields(&self) -> bool;
    /// Output file stem; may contain `{kind}` and `{timestamp}`.
    fn file_stem(&self) -> &str;
    /// Zip archive name when outputs are bundled, `None` for loose files.
    fn bundle_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
