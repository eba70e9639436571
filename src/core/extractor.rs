use crate::config::vendor::VendorProfile;
use crate::core::html::{self, HtmlPage};
use crate::core::normalize::build_bill;
use crate::core::session::AuthenticatedSession;
use crate::core::{BillRecord, RawListItem};
use crate::utils::error::Result;

/// Pulls the billing-history page and turns each invoice block into a record.
pub struct DocumentExtractor {
    profile: VendorProfile,
}

impl DocumentExtractor {
    pub fn new(profile: VendorProfile) -> Self {
        Self { profile }
    }

    pub async fn fetch_page(&self, session: &AuthenticatedSession) -> Result<String> {
        let (final_url, body) = session.get_page(self.profile.bills_url()?).await?;
        tracing::debug!("Billing page {} ({} bytes)", final_url, body.len());
        Ok(body)
    }

    /// One item per container block, in document order. Missing sub-elements
    /// yield empty strings rather than dropping the block.
    pub fn parse_documents(&self, body: &str) -> Result<Vec<RawListItem>> {
        let listing = &self.profile.listing;
        let page = HtmlPage::parse(body);

        let mut items = Vec::new();
        for block in page.query_all(&listing.container)? {
            let date_text = html::text_of_all(&html::query_all(block, &listing.date)?);
            let amount_text = html::text_of_all(&html::query_all(block, &listing.amount)?);
            let file_href = html::query_all(block, &listing.file_link)?
                .first()
                .and_then(|link| html::attr(*link, &listing.file_attr))
                .unwrap_or_default();

            items.push(RawListItem {
                date_text: date_text.trim().to_string(),
                amount_text: amount_text.trim().to_string(),
                file_href,
            });
        }

        Ok(items)
    }

    pub fn normalize(&self, items: &[RawListItem]) -> Vec<BillRecord> {
        items.iter().map(|raw| build_bill(raw, &self.profile)).collect()
    }

    pub async fn fetch_bills(&self, session: &AuthenticatedSession) -> Result<Vec<BillRecord>> {
        let body = self.fetch_page(session).await?;
        let items = self.parse_documents(&body)?;
        Ok(self.normalize(&items))
    }
}
