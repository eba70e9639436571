use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use url::Url;

pub const VENDOR: &str = "mint-energie";
pub const BASE_URL: &str = "https://www.mint-energie.com";

/// 登入表單的欄位名稱，皆為站點固定值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub form_selector: String,
    pub login_field: String,
    pub password_field: String,
    pub submit_field: String,
    pub submit_value: String,
}

/// 帳單列表的結構選擇器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    pub container: String,
    pub date: String,
    pub amount: String,
    pub file_link: String,
    pub file_attr: String,
}

/// Everything site-specific about the billing portal, passed to both the
/// authenticator and the extractor. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProfile {
    pub vendor: String,
    pub base_url: String,
    pub login_path: String,
    pub bills_path: String,
    pub login_form: LoginForm,
    /// 只出現在「我的帳戶」頁面的登出連結
    pub success_selector: String,
    pub error_selector: String,
    pub listing: ListingSelectors,
    pub currency: String,
    pub identifiers: Vec<String>,
}

impl VendorProfile {
    pub fn mint_energie() -> Self {
        Self {
            vendor: VENDOR.to_string(),
            base_url: BASE_URL.to_string(),
            login_path: "/Pages/Connexion/connexion.aspx".to_string(),
            bills_path: "/Pages/Compte/informations_paiement.aspx".to_string(),
            login_form: LoginForm {
                form_selector: "form".to_string(),
                login_field: "TB_Login".to_string(),
                password_field: "TB_Password".to_string(),
                submit_field: "BT_Connexion".to_string(),
                submit_value: "se connecter".to_string(),
            },
            success_selector: "#header1_LB_Exit".to_string(),
            error_selector: ".error".to_string(),
            listing: ListingSelectors {
                container: ".factulist".to_string(),
                date: "div.colA b:nth-child(1)".to_string(),
                amount: "div.colB b:nth-child(1)".to_string(),
                file_link: "div.colC a".to_string(),
                file_attr: "href".to_string(),
            },
            currency: "EUR".to_string(),
            identifiers: vec!["budget telecom".to_string()],
        }
    }

    /// Same profile served from another origin, e.g. a local fixture server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn login_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?.join(&self.login_path)?)
    }

    pub fn bills_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?.join(&self.bills_path)?)
    }
}

impl Validate for VendorProfile {
    fn validate(&self) -> Result<()> {
        validate_url("vendor.base_url", &self.base_url)?;
        validate_non_empty_string("vendor.vendor", &self.vendor)?;
        validate_non_empty_string("vendor.success_selector", &self.success_selector)?;
        validate_non_empty_string("vendor.listing.container", &self.listing.container)?;
        self.login_url()?;
        self.bills_url()?;
        Ok(())
    }
}
