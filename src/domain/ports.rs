use crate::domain::model::{Credentials, RawListItem, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn credentials(&self) -> &Credentials;
    /// 帳號以外的靜態參數，內容不透明
    fn parameters(&self) -> Option<&HashMap<String, toml::Value>>;
    fn output_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawListItem>>;
    async fn transform(&self, data: Vec<RawListItem>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
