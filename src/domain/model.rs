use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 帳單列表中單一區塊的原始文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListItem {
    pub date_text: String,
    pub amount_text: String,
    pub file_href: String,
}

/// 只會序列化交給儲存端；NaN 金額寫成 `null`，無法再讀回
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRecord {
    /// 當地時間中午；`None` 表示日期無法解析
    pub date: Option<DateTime<Local>>,
    pub amount: f64,
    pub currency: String,
    pub fileurl: String,
    pub filename: String,
    pub vendor: String,
    #[serde(rename = "vendorRef", skip_serializing_if = "Option::is_none")]
    pub vendor_ref: Option<String>,
}

impl BillRecord {
    pub fn has_valid_date(&self) -> bool {
        self.date.is_some()
    }

    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite()
    }
}

/// 交給帳單儲存端的一批資料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformResult {
    pub vendor: String,
    pub bills: Vec<BillRecord>,
    /// 用來比對銀行交易的關鍵字
    pub identifiers: Vec<String>,
}
