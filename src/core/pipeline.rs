use crate::core::codec;
use crate::core::{ConfigProvider, OutputFormat, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

pub struct PayloadPipeline<S: Storage, C: ConfigProvider> {
    source: S,
    sink: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PayloadPipeline<S, C> {
    pub fn new(source: S, sink: S, config: C) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Expands `{kind}` and `{timestamp}` in the configured file stem.
    fn resolve_stem(&self, result: &TransformResult) -> String {
        self.config
            .file_stem()
            .replace("{kind}", result.kind.default_file_stem())
            .replace(
                "{timestamp}",
                &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
            )
    }

    fn rendered_files(&self, result: &TransformResult) -> Vec<(String, Vec<u8>)> {
        let stem = self.resolve_stem(result);

        self.config
            .output_formats()
            .iter()
            .map(|format| {
                let body = match format {
                    OutputFormat::Json => &result.json_output,
                    OutputFormat::Csv => &result.csv_output,
                    OutputFormat::Tsv => &result.tsv_output,
                };
                (
                    format!("{}.{}", stem, format.extension()),
                    body.as_bytes().to_vec(),
                )
            })
            .collect()
    }

    fn output_location(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PayloadPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_file();
        tracing::debug!("Reading {} payloads from: {}", self.config.payload_kind(), input);

        let bytes = self.source.read_file(input).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        codec::parse_records(self.config.payload_kind(), &bytes)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let result = codec::transform_records(
            self.config.payload_kind(),
            data,
            self.config.reject_unknown_fields(),
        )?;

        if !result.dropped_fields.is_empty() {
            tracing::warn!(
                "Dropped unknown fields while decoding: {}",
                result.dropped_fields.join(", ")
            );
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let files = self.rendered_files(&result);

        if let Some(bundle) = self.config.bundle_name() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                for (name, body) in &files {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(body)?;
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.sink.write_file(bundle, &zip_data).await?;
            return Ok(vec![self.output_location(bundle)]);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, body) in files {
            tracing::debug!("Writing {} ({} bytes)", name, body.len());
            self.sink.write_file(&name, &body).await?;
            written.push(self.output_location(&name));
        }

        Ok(written)
    }
}
