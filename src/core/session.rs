use crate::config::vendor::VendorProfile;
use crate::core::html::{self, HtmlPage};
use crate::core::Credentials;
use crate::utils::error::{EtlError, Result};
use reqwest::{Client, StatusCode};
use scraper::ElementRef;
use std::time::Duration;
use url::Url;

/// 每次呼叫都套用的 HTTP 設定
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpSettings {
    fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(builder.build()?)
    }
}

/// A cookie-carrying client that has passed the login check.
pub struct AuthenticatedSession {
    client: Client,
    landing_url: Url,
}

impl AuthenticatedSession {
    /// Page the login POST ended on, after redirects.
    pub fn landing_url(&self) -> &Url {
        &self.landing_url
    }

    /// GET a page with the session cookies; non-2xx is a transport error.
    pub async fn get_page(&self, url: Url) -> Result<(Url, String)> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().clone();
        let body = response.text().await?;
        Ok((final_url, body))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Rejected { message: String },
}

/// Decides whether the page returned by the login POST belongs to a logged-in
/// user: exactly one success marker must be present. On rejection the text of
/// the error elements is returned, possibly empty.
pub fn validate_login(
    profile: &VendorProfile,
    status: StatusCode,
    page: &HtmlPage,
    final_url: &Url,
) -> Result<LoginOutcome> {
    tracing::debug!("Login response {} from {}", status, final_url);

    if page.query_all(&profile.success_selector)?.len() == 1 {
        return Ok(LoginOutcome::Success);
    }

    let errors = page.query_all(&profile.error_selector)?;
    Ok(LoginOutcome::Rejected {
        message: html::text_of_all(&errors),
    })
}

/// 要送出的表單：目標網址與欄位（保留文件順序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: Url,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(field) => field.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

/// Reads the login form the way a browser would submit it, so hidden tokens
/// are sent back. Without a form, posts to the page itself with no extra
/// fields.
pub fn read_login_form(
    profile: &VendorProfile,
    body: &str,
    page_url: &Url,
) -> Result<FormSubmission> {
    let page = HtmlPage::parse(body);
    let forms = page.query_all(&profile.login_form.form_selector)?;
    let Some(form) = forms.first().copied() else {
        tracing::warn!("No login form found on {}, posting to it directly", page_url);
        return Ok(FormSubmission {
            action: page_url.clone(),
            fields: Vec::new(),
        });
    };

    let action = match html::attr(form, "action") {
        Some(action) if !action.trim().is_empty() => page_url.join(action.trim())?,
        _ => page_url.clone(),
    };

    let mut fields = Vec::new();
    for input in html::query_all(form, "input[name], textarea[name], select[name]")? {
        if html::attr(input, "disabled").is_some() {
            continue;
        }

        let name = html::attr(input, "name").unwrap_or_default();
        let kind = html::attr(input, "type")
            .unwrap_or_default()
            .to_ascii_lowercase();

        match kind.as_str() {
            "submit" | "button" | "image" | "reset" | "file" => continue,
            "checkbox" | "radio" if html::attr(input, "checked").is_none() => continue,
            _ => {}
        }

        let value = match input.value().name() {
            "textarea" => html::text(input),
            "select" => match selected_option(input)? {
                Some(value) => value,
                None => continue,
            },
            _ => html::attr(input, "value").unwrap_or_else(|| match kind.as_str() {
                "checkbox" | "radio" => "on".to_string(),
                _ => String::new(),
            }),
        };
        fields.push((name, value));
    }

    Ok(FormSubmission { action, fields })
}

/// 被選取的 option，沒有就取第一個；option 無 value 時用其文字
fn selected_option(select: ElementRef<'_>) -> Result<Option<String>> {
    let options: Vec<_> = html::query_all(select, "option")?
        .into_iter()
        .filter(|o| html::attr(*o, "disabled").is_none())
        .collect();
    let chosen = options
        .iter()
        .find(|o| html::attr(**o, "selected").is_some())
        .or_else(|| options.first());

    Ok(chosen.map(|o| {
        html::attr(*o, "value").unwrap_or_else(|| html::text(*o).trim().to_string())
    }))
}

pub struct Authenticator {
    profile: VendorProfile,
    settings: HttpSettings,
}

impl Authenticator {
    pub fn new(profile: VendorProfile, settings: HttpSettings) -> Self {
        Self { profile, settings }
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedSession> {
        let client = self.settings.build_client()?;
        let login_url = self.profile.login_url()?;

        // 先取得登入頁，拿到 session cookie 與隱藏欄位
        tracing::debug!("GET {}", login_url);
        let response = client.get(login_url).send().await?.error_for_status()?;
        let page_url = response.url().clone();
        let body = response.text().await?;

        let mut submission = read_login_form(&self.profile, &body, &page_url)?;
        let form = &self.profile.login_form;
        submission.set(&form.login_field, &credentials.login);
        submission.set(&form.password_field, &credentials.password);
        submission.set(&form.submit_field, &form.submit_value);

        tracing::debug!(
            "POST {} with {} form fields",
            submission.action,
            submission.fields.len()
        );
        let response = client
            .post(submission.action.clone())
            .form(&submission.fields)
            .send()
            .await?
            .error_for_status()?;
        let status = response.status();
        let final_url = response.url().clone();
        let body = response.text().await?;

        let outcome = {
            let page = HtmlPage::parse(&body);
            validate_login(&self.profile, status, &page, &final_url)?
        };

        match outcome {
            LoginOutcome::Success => Ok(AuthenticatedSession {
                client,
                landing_url: final_url,
            }),
            LoginOutcome::Rejected { message } => {
                tracing::error!("Login rejected: {}", message);
                Err(EtlError::LoginFailed { message })
            }
        }
    }
}
