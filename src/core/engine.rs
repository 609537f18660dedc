use crate::core::{Pipeline, TransformResult};
use crate::utils::error::Result;

pub struct PayloadEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PayloadEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extracts and transforms without writing anything.
    pub async fn preview(&self) -> Result<TransformResult> {
        tracing::info!("Extracting payloads...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());

        tracing::info!("Decoding payloads...");
        let result = self.pipeline.transform(records).await?;
        tracing::info!("Decoded {} {} payloads", result.record_count, result.kind);

        Ok(result)
    }

    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Starting payload conversion...");

        let result = self.preview().await?;

        tracing::info!("Writing outputs...");
        let written = self.pipeline.load(result).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PayloadKind, Record};
    use crate::utils::error::PayloadError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingPipeline {
        loads: AtomicUsize,
        fail_extract: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<Vec<Record>> {
            if self.fail_extract {
                return Err(PayloadError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            Ok(vec![Record {
                index: 0,
                data: serde_json::Map::new(),
            }])
        }

        async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
            Ok(TransformResult {
                kind: PayloadKind::ProductItem,
                record_count: data.len(),
                json_output: "[]".to_string(),
                csv_output: String::new(),
                tsv_output: String::new(),
                dropped_fields: Vec::new(),
            })
        }

        async fn load(&self, _result: TransformResult) -> Result<Vec<String>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["out/product_items.json".to_string()])
        }
    }

    fn pipeline(fail_extract: bool) -> RecordingPipeline {
        RecordingPipeline {
            loads: AtomicUsize::new(0),
            fail_extract,
        }
    }

    #[test]
    fn test_preview_does_not_load() {
        let engine = PayloadEngine::new(pipeline(false));

        let result = tokio_test::block_on(engine.preview()).unwrap();

        assert_eq!(result.record_count, 1);
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_loads_once() {
        let engine = PayloadEngine::new(pipeline(false));

        let written = engine.run().await.unwrap();

        assert_eq!(written, vec!["out/product_items.json".to_string()]);
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_extract_failure() {
        let engine = PayloadEngine::new(pipeline(true));

        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline().loads.load(Ordering::SeqCst), 0);
    }
}
