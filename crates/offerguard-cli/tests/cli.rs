use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use predicates::prelude::*;
use tempfile::tempdir;

/// An API root nothing listens on.
fn dead_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Serve `body` with `status` on both analyze routes until the test process exits.
///
/// The binary under test runs in its own process, so the stub gets a runtime on
/// a background thread instead of the test's.
fn stub_api(status: u16, body: &'static str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    let status = StatusCode::from_u16(status).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let reply = move || async move { (status, body) };
            let app = Router::new()
                .route("/api/analyze/text", post(reply))
                .route("/api/analyze/document", post(reply));
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{addr}/api")
}

const ACME: &str = r#"{
    "id": "abc123",
    "document_type": "offer_letter",
    "legitimacy_score": 0.91,
    "confidence_score": 0.88,
    "is_legitimate": true,
    "company_info": {"name": "Acme", "domain": "acme.com", "verified": true},
    "warnings": ["Salary is above market range"]
}"#;

#[test]
fn blank_text_is_inert() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .env("OFFERGUARD_API_URL", dead_api_url())
        .arg("text")
        .arg("   \n\t ")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nothing to submit: text is empty"));
}

#[test]
fn blank_stdin_is_inert() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .env("OFFERGUARD_API_URL", dead_api_url())
        .arg("text")
        .write_stdin("  \n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nothing to submit"));
}

#[test]
fn unsupported_document_is_rejected_before_upload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .env("OFFERGUARD_API_URL", dead_api_url())
        .arg("file")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn unreachable_service_reports_fallback_message() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .arg("--api-url")
        .arg(dead_api_url())
        .arg("text")
        .arg("Dear John, we offer you...")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: Error analyzing text"));
}

#[test]
fn unreachable_service_document_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offer.pdf");
    std::fs::write(&path, b"%PDF-1.7").unwrap();

    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .arg("--api-url")
        .arg(dead_api_url())
        .arg("file")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: Error analyzing document"));
}

#[test]
fn text_and_from_conflict() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .arg("text")
        .arg("offer")
        .arg("--from")
        .arg("letter.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn text_verdict_prints_card() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .arg("--api-url")
        .arg(stub_api(201, ACME))
        .arg("text")
        .arg("Dear John, we offer you...")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== [OK] Legitimate Document ==="))
        .stdout(predicate::str::contains("Confidence Score: 88.0%"))
        .stdout(predicate::str::contains("OFFER LETTER"))
        .stdout(predicate::str::contains("91.0%"))
        .stdout(predicate::str::contains("acme.com (Verified)"))
        .stdout(predicate::str::contains("! Salary is above market range"))
        .stdout(predicate::str::contains("Result ID: abc123"));
}

#[test]
fn document_verdict_as_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("offer.pdf");
    std::fs::write(&path, b"%PDF-1.7").unwrap();

    let output = assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .env("OFFERGUARD_API_URL", stub_api(200, ACME))
        .arg("--json")
        .arg("file")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let screen: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(screen["screen"], "report");
    assert_eq!(screen["headline"]["confidence"], "88.0%");
    assert_eq!(screen["legitimacy"]["text"], "91.0%");
    assert_eq!(screen["company"]["name"], "Acme");
    assert_eq!(screen["result_id"], "abc123");
}

#[test]
fn server_detail_is_reported() {
    assert_cmd::cargo::cargo_bin_cmd!("offerguard")
        .arg("--api-url")
        .arg(stub_api(400, r#"{"detail": "Text too short"}"#))
        .arg("text")
        .arg("hi")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: Text too short"));
}
