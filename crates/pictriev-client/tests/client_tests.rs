//! Client tests against a mock Pictriev endpoint.

use std::io::Write;
use std::time::Duration;

use pictriev_client::{Command, Language, PictrievClient, PictrievConfig, PictrievError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ENDPOINT: &str = "/facedbj.php";

fn client_for(server: &MockServer) -> PictrievClient {
    PictrievClient::new(PictrievConfig {
        base_url: format!("{}{}", server.uri(), ENDPOINT),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        ..Default::default()
    })
    .unwrap()
}

/// Matches requests whose query string starts with the given command key.
fn command(name: &'static str) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    move |req: &Request| {
        req.url
            .query()
            .map(|q| q == name || q.starts_with(&format!("{}&", name)))
            .unwrap_or(false)
    }
}

fn detection_ok() -> serde_json::Value {
    json!({
        "result": "OK",
        "imageid": "abc",
        "nfaces": 2,
        "ptime": 0.5,
        "sx": 640,
        "sy": 480
    })
}

// =============================================================================
// Detection by URL
// =============================================================================

#[tokio::test]
async fn test_find_face_url_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(command("findface"))
        .and(query_param("image", "http://example.com/face.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .find_face_url("http://example.com/face.jpg")
        .await
        .unwrap();

    assert_eq!(result.image_id, "abc");
    assert_eq!(result.face_count, 2);
    assert_eq!(result.processing_time, 0.5);
    assert_eq!(result.width, 640);
    assert_eq!(result.height, 480);
}

#[tokio::test]
async fn test_find_face_url_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": "NG", "msg": "invalid image"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .find_face_url("http://example.com/broken.jpg")
        .await
        .unwrap_err();

    let fault = err.as_fault().expect("expected a service fault");
    assert_eq!(fault.command, Command::FindFace);
    assert_eq!(fault.result, "NG");
    assert_eq!(err.to_string(), "invalid image");
}

#[tokio::test]
async fn test_server_error_is_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .find_face_url("http://example.com/face.jpg")
        .await
        .unwrap_err();

    assert!(matches!(err, PictrievError::BadStatus(500)));
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .find_face_url("http://example.com/face.jpg")
        .await
        .unwrap_err();

    assert!(matches!(err, PictrievError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = PictrievClient::new(PictrievConfig {
        base_url: format!("http://127.0.0.1:{}{}", port, ENDPOINT),
        ..Default::default()
    })
    .unwrap();

    let err = client
        .find_face_url("http://example.com/face.jpg")
        .await
        .unwrap_err();

    assert!(matches!(err, PictrievError::Network(_)));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detection_ok())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = PictrievClient::new(PictrievConfig {
        base_url: format!("{}{}", server.uri(), ENDPOINT),
        timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();

    let err = client
        .find_face_url("http://example.com/face.jpg")
        .await
        .unwrap_err();

    match err {
        PictrievError::Network(e) => assert!(e.is_timeout()),
        other => panic!("expected network timeout, got {:?}", other),
    }
}

// =============================================================================
// Detection by upload
// =============================================================================

#[tokio::test]
async fn test_find_face_image_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(command("findface"))
        .and(query_param("image", "post"))
        .and(header_exists("content-type"))
        .and(body_string_contains(r#"name="photo"; filename="photo""#))
        .and(body_string_contains("fake-jpeg-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "OK",
            "imageid": "up1",
            "nfaces": 0,
            "ptime": 0.2,
            "sx": 100,
            "sy": 80
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .find_face_image(b"fake-jpeg-bytes".to_vec())
        .await
        .unwrap();

    assert_eq!(result.image_id, "up1");
    assert_eq!(result.face_count, 0);
    assert!(!result.has_faces());
}

#[tokio::test]
async fn test_find_face_file_reads_whole_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("file-contents-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"file-contents-123").unwrap();
    file.flush().unwrap();

    let result = client_for(&server).find_face_file(file.path()).await.unwrap();
    assert_eq!(result.image_id, "abc");
}

#[tokio::test]
async fn test_find_face_reader() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("reader-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_ok()))
        .mount(&server)
        .await;

    let reader: &[u8] = b"reader-bytes";
    let result = client_for(&server).find_face_reader(reader).await.unwrap();
    assert_eq!(result.face_count, 2);
}

// =============================================================================
// Identity lookup
// =============================================================================

#[tokio::test]
async fn test_whois_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(command("whoissim"))
        .and(query_param("imageid", "abc"))
        .and(query_param("faceid", "1"))
        .and(query_param("lang", "ko"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "OK",
            "age": 28.5,
            "agedist": [0.05, 0.7, 0.25],
            "attrs": [
                [0, 0.87, "Jane Doe", 12345.0],
                [1, 0.08, "Erika Mustermann", 42]
            ],
            "gender": ["F", 0.9]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .whois("abc", 1, Language::Ko)
        .await
        .unwrap();

    assert_eq!(result.age, 28.5);
    assert_eq!(result.age_distribution, vec![0.05, 0.7, 0.25]);
    assert_eq!(result.language, Language::Ko);
    assert_eq!(result.attributes.len(), 2);
    assert_eq!(result.attributes[0].probability, 0.87);
    assert_eq!(result.attributes[0].label, "Jane Doe");
    assert_eq!(result.attributes[0].image_id, "12345");
    assert_eq!(result.attributes[1].image_id, "42");
    assert!((result.gender.man() - 0.1).abs() < 1e-9);
    assert!((result.gender.woman() - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn test_whois_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(command("whoissim"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": "NG", "msg": "invalid imageid"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .whois("missing", 0, Language::En)
        .await
        .unwrap_err();

    let fault = err.as_fault().expect("expected a service fault");
    assert_eq!(fault.command, Command::Whois);
    assert_eq!(fault.msg, "invalid imageid");
}

#[tokio::test]
async fn test_whois_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .whois("abc", 0, Language::En)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(command("findface"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_ok()))
        .expect(8)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .find_face_url(&format!("http://example.com/{}.jpg", i))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().image_id, "abc");
    }
}
