//! Wire-level tests of the dataset client against a mock z/OSMF server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{basic_auth, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zosmf_client::{
    ClientError, Connection, DatasetClient, HttpDatasetClient, TlsVerification, CSRF_HEADER,
};
use zosmf_core::{DatasetAttributes, DatasetContent, DatasetName};

const USER: &str = "IBMUSER";
const PASSWORD: &str = "SYS1";

fn client_for(base_url: &str, timeout: Duration) -> HttpDatasetClient {
    let connection =
        Connection::new(base_url, USER, PASSWORD, TlsVerification::Verify, timeout).unwrap();
    HttpDatasetClient::new(connection).unwrap()
}

fn client(server: &MockServer) -> HttpDatasetClient {
    client_for(&server.uri(), Duration::from_secs(5))
}

fn name() -> DatasetName {
    DatasetName::new("TEST.DS").unwrap()
}

#[tokio::test]
async fn fetch_returns_body_verbatim() {
    let server = MockServer::start().await;
    let body = "LINE 1   \r\nLINE 2\n\n  trailing \u{e9}\t";

    Mock::given(method("GET"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .and(header(CSRF_HEADER, "dummy"))
        .and(header("accept", "text/plain"))
        .and(header("content-type", "text/plain"))
        .and(basic_auth(USER, PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let content = client(&server).fetch_content(&name()).await.unwrap();
    assert_eq!(content.as_bytes(), body.as_bytes());
}

#[tokio::test]
async fn fetch_missing_dataset_is_remote_error() {
    let server = MockServer::start().await;
    let body = r#"{"rc":4,"reason":13,"category":6,"message":"Data set not found"}"#;

    Mock::given(method("GET"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&server)
        .await;

    match client(&server).fetch_content(&name()).await {
        Err(ClientError::Remote { status, body: got }) => {
            assert_eq!(status, 404);
            assert_eq!(got, body.as_bytes());
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_keeps_non_utf8_content_byte_for_byte() {
    let server = MockServer::start().await;
    // "HELLO" in EBCDIC
    let ebcdic = vec![0xC8, 0xC5, 0xD3, 0xD3, 0xD6];

    Mock::given(method("GET"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(ebcdic.clone()))
        .mount(&server)
        .await;

    let content = client(&server).fetch_content(&name()).await.unwrap();
    assert_eq!(content.as_bytes(), ebcdic.as_slice());
    assert_eq!(content.as_str(), None);
}

#[tokio::test]
async fn replace_sends_raw_bytes() {
    let server = MockServer::start().await;
    let bytes = vec![0xC8, 0xC5, 0x00, 0xff];

    Mock::given(method("PUT"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .replace_content(&name(), &DatasetContent::from(bytes.clone()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].body, bytes);
}

#[tokio::test]
async fn allocate_posts_empty_object_for_unset_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .and(header(CSRF_HEADER, "dummy"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(basic_auth(USER, PASSWORD))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .allocate(&name(), &DatasetAttributes::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn allocate_sends_only_set_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let attributes = DatasetAttributes::default()
        .with_dsorg("PS")
        .with_recfm("FB")
        .with_lrecl(80)
        .with_space("TRK", 5, 0);
    client(&server).allocate(&name(), &attributes).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({
            "dsorg": "PS",
            "recfm": "FB",
            "lrecl": 80,
            "alcunit": "TRK",
            "primary": 5
        })
    );
}

#[tokio::test]
async fn allocate_conflict_is_generic_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .mount(&server)
        .await;

    let err = client(&server)
        .allocate(&name(), &DatasetAttributes::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.body_text().as_deref(), Some("already exists"));
}

#[tokio::test]
async fn replace_puts_plain_text_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .and(header(CSRF_HEADER, "dummy"))
        .and(header("content-type", "text/plain"))
        .and(basic_auth(USER, PASSWORD))
        .and(body_string("HELLO\nWORLD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .replace_content(&name(), &DatasetContent::from("HELLO\nWORLD"))
        .await
        .unwrap();
}

#[tokio::test]
async fn non_200_success_codes_are_failures() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = client(&server)
        .replace_content(&name(), &DatasetContent::from("X"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(204));
    assert_eq!(err.body(), Some(&[][..]));
}

#[tokio::test]
async fn delete_issues_delete_to_dataset_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/zosmf/restfiles/ds/TEST.DS"))
        .and(header(CSRF_HEADER, "dummy"))
        .and(basic_auth(USER, PASSWORD))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete(&name()).await.unwrap();
}

#[tokio::test]
async fn server_error_body_is_preserved() {
    let server = MockServer::start().await;
    let body = "  <html>\r\n internal error </html>\n";

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let err = client(&server).delete(&name()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(body.as_bytes()));
}

#[tokio::test]
async fn non_utf8_error_body_is_preserved() {
    let server = MockServer::start().await;
    let body = vec![b'E', b'R', 0xff, 0xfe];

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let err = client(&server).delete(&name()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(body.as_slice()));
}

#[tokio::test]
async fn truncated_error_body_keeps_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Announces 100 body bytes, sends 7 and closes the connection.
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  content-length: 100\r\n\r\n\
                  partial",
            )
            .await
            .unwrap();
    });

    let client = client_for(&format!("http://{addr}"), Duration::from_secs(5));
    let err = client.delete(&name()).await.unwrap_err();

    assert!(!err.is_transport());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Port 1 is reserved and nothing listens on it in test environments.
    let client = client_for("http://127.0.0.1:1", Duration::from_secs(5));

    let err = client.fetch_content(&name()).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Duration::from_millis(200));
    let err = client.fetch_content(&name()).await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.is_timeout());
}
