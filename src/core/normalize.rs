use crate::config::vendor::VendorProfile;
use crate::core::{BillRecord, RawListItem};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// `"12.50€"` -> `12.5`. Parses the leading number after dropping the euro
/// sign; anything without numeric content becomes NaN.
pub fn normalize_price(price: &str) -> f64 {
    let cleaned = price.replacen('€', "", 1);
    let cleaned = cleaned.trim();

    NUMBER_PREFIX
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// `"DD/MM/YYYY"` -> that day at 12:00 local time.
///
/// Noon keeps the calendar day stable when the value is later shifted across
/// time zones or DST. Returns `None` when the text is not a real date.
pub fn to_epoch(date: &str) -> Option<DateTime<Local>> {
    let parts: Vec<&str> = date.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let (day, month, year) = (*day, *month, *year);

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if year.len() != 4 || month.len() > 2 || day.len() > 2 {
        return None;
    }
    if !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    let noon = date.and_hms_opt(12, 0, 0)?;
    Local.from_local_datetime(&noon).earliest()
}

/// `2020-06-17`
pub fn extract_string_date(date: &DateTime<Local>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn bill_filename(
    date: Option<&DateTime<Local>>,
    vendor: &str,
    amount: f64,
    currency: &str,
    vendor_ref: Option<&str>,
) -> String {
    let date_part = date
        .map(extract_string_date)
        .unwrap_or_else(|| "invalid-date".to_string());
    let ref_part = vendor_ref.map(|r| format!("_{}", r)).unwrap_or_default();

    format!(
        "{}_{}_{:.2}{}{}.pdf",
        date_part, vendor, amount, currency, ref_part
    )
}

/// 單一區塊轉成帳單；欄位壞掉也照樣輸出
pub fn build_bill(raw: &RawListItem, profile: &VendorProfile) -> BillRecord {
    let date = to_epoch(&raw.date_text);
    let amount = normalize_price(&raw.amount_text);
    let vendor_ref: Option<String> = None;

    let filename = bill_filename(
        date.as_ref(),
        &profile.vendor,
        amount,
        &profile.currency,
        vendor_ref.as_deref(),
    );

    BillRecord {
        date,
        amount,
        currency: profile.currency.clone(),
        fileurl: raw.file_href.clone(),
        filename,
        vendor: profile.vendor.clone(),
        vendor_ref,
    }
}
