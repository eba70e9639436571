use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 任何一步失敗都直接中止，不會有部分輸出
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting konnector run");

        // Extract
        let raw_items = self.pipeline.extract().await?;
        tracing::info!("Extracted {} invoice blocks", raw_items.len());

        // Transform
        let result = self.pipeline.transform(raw_items).await?;
        tracing::info!("Built {} bill records", result.bills.len());

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawListItem, TransformResult};
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipeline {
        fail_extract: bool,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<RawListItem>> {
            if self.fail_extract {
                return Err(EtlError::LoginFailed {
                    message: "nope".to_string(),
                });
            }
            Ok(Vec::new())
        }

        async fn transform(&self, _data: Vec<RawListItem>) -> Result<TransformResult> {
            Ok(TransformResult {
                vendor: "mint-energie".to_string(),
                bills: Vec::new(),
                identifiers: Vec::new(),
            })
        }

        async fn load(&self, _result: TransformResult) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok("out/bills.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_loads_on_success() {
        let engine = EtlEngine::new(StubPipeline {
            fail_extract: false,
            loads: AtomicUsize::new(0),
        });

        assert_eq!(engine.run().await.unwrap(), "out/bills.json");
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_skips_load_after_failure() {
        let engine = EtlEngine::new(StubPipeline {
            fail_extract: true,
            loads: AtomicUsize::new(0),
        });

        assert!(matches!(
            engine.run().await,
            Err(EtlError::LoginFailed { .. })
        ));
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
