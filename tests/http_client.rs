#![cfg(feature = "http")]

use std::time::Duration;

use secrecy::SecretString;
use signup_flow::{
    HttpSignupClient, SignupConfig, SignupController, SignupError, SignupTransport,
    SubmissionStatus, SubmitOutcome, TransportError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const TOKEN: &str = "test-credential";

fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into())
}

fn client_for(base: &str) -> HttpSignupClient {
    let config = SignupConfig::new(base, secret(TOKEN))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    HttpSignupClient::new(config).unwrap()
}

/// Reads one HTTP/1.1 request. The head is lowercased, the body is left as sent.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.expect("read failed");
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.expect("read failed");
        assert!(n > 0, "client closed before sending body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[head_end..head_end + content_length]);
    format!("{}{}", head, body)
}

/// Serves a single canned response and hands back the request it received.
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/v1", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });

    (base, handle)
}

#[tokio::test]
async fn test_register_posts_json_with_bearer() {
    let (base, server) = serve_once(201, "").await;
    let client = client_for(&base);

    let response = client
        .register("alice", &secret("Abcdefghi1"))
        .await
        .unwrap();
    assert_eq!(response.status, 201);
    assert!(response.body.is_empty());

    let request = server.await.unwrap();
    assert!(request.starts_with("post /api/v1/signup http/1.1"), "{}", request);
    assert!(request.contains("content-type: application/json"));
    assert!(request.contains(&format!("authorization: bearer {}", TOKEN)));
    assert!(request.contains("user-agent: signup-flow/"));
    assert!(request.ends_with(r#"{"username":"alice","password":"Abcdefghi1"}"#));
}

#[tokio::test]
async fn test_register_returns_error_body() {
    let (base, server) = serve_once(400, r#"{"message":"password not allowed"}"#).await;
    let client = client_for(&base);

    let response = client
        .register("alice", &secret("Abcdefghi1"))
        .await
        .unwrap();
    assert_eq!(response.status, 400);
    assert_eq!(response.body, r#"{"message":"password not allowed"}"#);
    server.await.unwrap();
}

#[tokio::test]
async fn test_register_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/v1", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(stream);
    });

    let config = SignupConfig::new(&base, secret(TOKEN))
        .unwrap()
        .with_timeout(Duration::from_millis(200));
    let client = HttpSignupClient::new(config).unwrap();

    let result = client.register("alice", &secret("Abcdefghi1")).await;
    assert_eq!(result, Err(TransportError::Timeout));
}

#[tokio::test]
async fn test_controller_against_http_rejection() {
    let (base, server) = serve_once(400, r#"{"message": "password not allowed"}"#).await;
    let controller = SignupController::new(client_for(&base));
    controller.set_username("alice");
    controller.set_password("Abcdefghi1");

    let outcome = controller.submit().await;
    assert_eq!(outcome, SubmitOutcome::Failed(SignupError::PasswordRejected));
    assert_eq!(controller.status(), SubmissionStatus::Idle);
    server.await.unwrap();
}

#[tokio::test]
async fn test_controller_against_http_success() {
    let (base, server) = serve_once(200, r#"{"id": 42}"#).await;
    let controller = SignupController::new(client_for(&base));
    let created = controller.account_created();
    controller.set_username("alice");
    controller.set_password("Abcdefghi1");

    assert_eq!(controller.submit().await, SubmitOutcome::Created);
    assert_eq!(created.await.unwrap().username, "alice");
    assert_eq!(controller.status(), SubmissionStatus::Succeeded);
    server.await.unwrap();
}
