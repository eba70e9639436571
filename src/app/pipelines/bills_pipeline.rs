use crate::config::vendor::VendorProfile;
use crate::core::extractor::DocumentExtractor;
use crate::core::session::{Authenticator, HttpSettings};
use crate::core::{ConfigProvider, Pipeline, RawListItem, Storage, TransformResult};
use crate::utils::error::Result;

pub const MANIFEST_FILE: &str = "bills.json";

/// 登入、抓取帳單列表、正規化，最後把整批交給儲存端
pub struct BillsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    profile: VendorProfile,
    authenticator: Authenticator,
    extractor: DocumentExtractor,
}

impl<S: Storage, C: ConfigProvider> BillsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_profile(storage, config, VendorProfile::mint_energie())
    }

    pub fn with_profile(storage: S, config: C, profile: VendorProfile) -> Self {
        let settings = HttpSettings {
            timeout: config.request_timeout(),
            user_agent: config.user_agent().map(str::to_string),
        };

        Self {
            authenticator: Authenticator::new(profile.clone(), settings),
            extractor: DocumentExtractor::new(profile.clone()),
            storage,
            config,
            profile,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BillsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawListItem>> {
        tracing::info!("Authenticating ...");
        if self.config.parameters().is_some() {
            tracing::debug!("Found static parameters");
        }

        let session = self
            .authenticator
            .authenticate(self.config.credentials())
            .await?;
        tracing::info!("Successfully logged in");

        tracing::info!("Fetching the list of documents");
        let body = self.extractor.fetch_page(&session).await?;

        tracing::info!("Parsing list of documents");
        self.extractor.parse_documents(&body)
    }

    async fn transform(&self, data: Vec<RawListItem>) -> Result<TransformResult> {
        let bills = self.extractor.normalize(&data);

        let bad_dates = bills.iter().filter(|b| !b.has_valid_date()).count();
        let bad_amounts = bills.iter().filter(|b| !b.has_valid_amount()).count();
        if bad_dates > 0 || bad_amounts > 0 {
            tracing::warn!(
                "{} bills with unparseable date, {} with unparseable amount; kept as-is",
                bad_dates,
                bad_amounts
            );
        }

        Ok(TransformResult {
            vendor: self.profile.vendor.clone(),
            bills,
            identifiers: self.profile.identifiers.clone(),
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::info!("Saving data ({} bills)", result.bills.len());

        let json_data = serde_json::to_string_pretty(&result)?;
        self.storage
            .write_file(MANIFEST_FILE, json_data.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), MANIFEST_FILE))
    }
}
