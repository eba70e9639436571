use httpmock::prelude::*;
use mint_konnector::{BillsPipeline, EtlEngine, EtlError, LocalStorage, TomlConfig, VendorProfile};
use tempfile::TempDir;

const LOGIN_PATH: &str = "/Pages/Connexion/connexion.aspx";
const BILLS_PATH: &str = "/Pages/Compte/informations_paiement.aspx";

const LOGIN_PAGE: &str = r#"
<html><body>
  <form method="post" action="./connexion.aspx">
    <input type="hidden" name="__VIEWSTATE" value="abc" />
    <input type="hidden" name="__EVENTVALIDATION" value="def" />
    <input name="TB_Login" type="text" />
    <input name="TB_Password" type="password" />
    <input name="BT_Connexion" type="submit" value="se connecter" />
  </form>
</body></html>"#;

const ACCOUNT_PAGE: &str = r#"
<html><body>
  <a id="header1_LB_Exit" href="/Pages/Connexion/deconnexion.aspx">Se déconnecter</a>
</body></html>"#;

const BILLS_PAGE: &str = r#"
<html><body>
  <div class="factulist">
    <div class="colA"><b>17/06/2020</b></div>
    <div class="colB"><b>12.50€</b></div>
    <div class="colC"><a href="/doc1.pdf">PDF</a></div>
  </div>
  <div class="factulist">
    <div class="colA"><b>01/01/2020</b></div>
    <div class="colB"><b>5.00€</b></div>
    <div class="colC"><a href="/doc2.pdf">PDF</a></div>
  </div>
  <div class="factulist">
    <div class="colA"><b>31/12/2019</b></div>
    <div class="colB"><b>100.00€</b></div>
    <div class="colC"><a href="/doc3.pdf">PDF</a></div>
  </div>
</body></html>"#;

fn config_for(output_path: &str, password: &str) -> TomlConfig {
    let normalized_path = output_path.replace('\\', "/");
    TomlConfig::from_toml_str(&format!(
        r#"
[fields]
login = "jane"
password = "{}"

[parameters]
note = "unused"

[output]
path = "{}"

[http]
timeout_seconds = 10
"#,
        password, normalized_path
    ))
    .unwrap()
}

fn mock_login(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path(LOGIN_PATH);
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .header("Set-Cookie", "ASP.NET_SessionId=xyz789; path=/; HttpOnly")
            .body(LOGIN_PAGE);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(LOGIN_PATH)
            .body_contains("TB_Password=good");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(ACCOUNT_PAGE);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(LOGIN_PATH)
            .body_contains("TB_Password=bad");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(r#"<div class="error">Identifiants invalides</div>"#);
    });
}

#[tokio::test]
async fn test_end_to_end_bill_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_login(&server);
    let bills_mock = server.mock(|when, then| {
        when.method(GET)
            .path(BILLS_PATH)
            .header("cookie", "ASP.NET_SessionId=xyz789");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(BILLS_PAGE);
    });

    let profile = VendorProfile::mint_energie().with_base_url(server.base_url());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = BillsPipeline::with_profile(storage, config_for(&output_path, "good"), profile);
    let engine = EtlEngine::new(pipeline);

    let result = engine.run().await;

    assert!(result.is_ok());
    bills_mock.assert();
    assert!(result.unwrap().ends_with("bills.json"));

    let full_path = std::path::Path::new(&output_path).join("bills.json");
    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(full_path).unwrap()).unwrap();

    assert_eq!(manifest["vendor"], "mint-energie");
    assert_eq!(manifest["identifiers"], serde_json::json!(["budget telecom"]));

    let bills = manifest["bills"].as_array().unwrap();
    let filenames: Vec<&str> = bills
        .iter()
        .map(|b| b["filename"].as_str().unwrap())
        .collect();
    assert_eq!(
        filenames,
        vec![
            "2020-06-17_mint-energie_12.50EUR.pdf",
            "2020-01-01_mint-energie_5.00EUR.pdf",
            "2019-12-31_mint-energie_100.00EUR.pdf",
        ]
    );
    for bill in bills {
        assert_eq!(bill["currency"], "EUR");
        assert_eq!(bill["vendor"], "mint-energie");
    }
    assert_eq!(bills[0]["fileurl"], "/doc1.pdf");
    assert_eq!(bills[0]["amount"], 12.5);
}

#[tokio::test]
async fn test_rejected_login_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_login(&server);
    let bills_mock = server.mock(|when, then| {
        when.method(GET).path(BILLS_PATH);
        then.status(200).body(BILLS_PAGE);
    });

    let profile = VendorProfile::mint_energie().with_base_url(server.base_url());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = BillsPipeline::with_profile(storage, config_for(&output_path, "bad"), profile);

    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    bills_mock.assert_hits(0);
    assert_eq!(err.error_code(), "LOGIN_FAILED");
    assert!(matches!(err, EtlError::LoginFailed { ref message } if message == "Identifiants invalides"));
    assert!(!std::path::Path::new(&output_path).join("bills.json").exists());
}

#[tokio::test]
async fn test_bills_page_failure_is_vendor_down() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_login(&server);
    server.mock(|when, then| {
        when.method(GET).path(BILLS_PATH);
        then.status(500);
    });

    let profile = VendorProfile::mint_energie().with_base_url(server.base_url());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = BillsPipeline::with_profile(storage, config_for(&output_path, "good"), profile);

    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, EtlError::TransportError(_)));
    assert_eq!(err.error_code(), "VENDOR_DOWN");
    assert!(!std::path::Path::new(&output_path).join("bills.json").exists());
}

#[tokio::test]
async fn test_empty_bill_list_still_saves_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_login(&server);
    server.mock(|when, then| {
        when.method(GET).path(BILLS_PATH);
        then.status(200)
            .body("<html><body><p>Aucune facture disponible</p></body></html>");
    });

    let profile = VendorProfile::mint_energie().with_base_url(server.base_url());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = BillsPipeline::with_profile(storage, config_for(&output_path, "good"), profile);

    EtlEngine::new(pipeline).run().await.unwrap();

    let full_path = std::path::Path::new(&output_path).join("bills.json");
    let manifest: serde_json::Value =
        serde_json::from_slice(&std::fs::read(full_path).unwrap()).unwrap();
    assert_eq!(manifest["bills"], serde_json::json!([]));
}
