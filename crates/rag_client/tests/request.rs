mod common;

use std::io::{Read, Write};
use std::net::TcpListener;

use common::closed_port_url;
use pretty_assertions::assert_eq;
use rag_client::{
    ApiRequest, ClientSettings, FileBlob, ReqwestClient, RequestClient, RequestError,
};
use rag_core::FailureKind;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base: &str) -> ReqwestClient {
    ReqwestClient::new(ClientSettings::new(base).expect("valid base url")).expect("client")
}

#[tokio::test]
async fn requests_identify_the_client() {
    let server = MockServer::start().await;
    let agent = format!("resume-rag/{}", env!("CARGO_PKG_VERSION"));
    Mock::given(method("GET"))
        .and(path("/api/resumes"))
        .and(header("user-agent", agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server.uri())
        .send(ApiRequest::get("/api/resumes"))
        .await
        .expect("request ok");
    assert_eq!(response.status, 200);
    assert_eq!(&response.body[..], b"{}");
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/backend/api/resumes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/backend/", server.uri());
    client_for(&base)
        .send(ApiRequest::get("/api/resumes"))
        .await
        .expect("request ok");
}

#[tokio::test]
async fn unstructured_error_body_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .send(ApiRequest::get("/api/resumes"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RequestError::Http {
            status: 502,
            message: "502 Bad Gateway".into(),
        }
    );
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let err = client_for(&closed_port_url())
        .send(ApiRequest::get("/api/resumes"))
        .await
        .unwrap_err();

    match err {
        RequestError::Transport { message } => assert!(message.starts_with("connection failed")),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_content_type_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = FileBlob {
        file_name: "alice.pdf".into(),
        content_type: "not a mime type".into(),
        bytes: "%PDF-1.4".into(),
    };
    let err = client_for(&server.uri())
        .send(ApiRequest::post_file("/api/resumes", "file", file))
        .await
        .unwrap_err();

    match &err {
        RequestError::Invalid { message } => assert!(message.contains("alice.pdf")),
        other => panic!("expected invalid request, got {other:?}"),
    }
    assert_eq!(err.to_failure().kind, FailureKind::Validation);
}

#[tokio::test]
async fn truncated_body_is_a_decode_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 512];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = stream.read(&mut chunk).expect("read request");
            if read == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
            .expect("write response");
    });

    let err = client_for(&base)
        .send(ApiRequest::get("/api/resumes"))
        .await
        .unwrap_err();

    match err {
        RequestError::Decode { message } => {
            assert!(message.starts_with("response body interrupted"))
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}
