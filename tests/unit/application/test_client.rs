use gazelle_client::application::config::{GazelleConfig, SiteConfig};
use gazelle_client::application::interfaces::tracker::TrackerApi;
use gazelle_client::client::GazelleClient;
use gazelle_client::error::AppError;
use gazelle_client::utils::logger::setup_logger;
use mockito::{Matcher, Server, ServerGuard};
use serde::Deserialize;
use serde_json::json;

const INDEX_BODY: &str = r#"{"status":"success","response":{"id":7,"authkey":"k","username":"alice"}}"#;

async fn token_client(server: &ServerGuard) -> GazelleClient {
    let site = SiteConfig::with_token(&server.url(), "abc123").unwrap();
    GazelleClient::connect(site).await.unwrap()
}

/// Mocks a login POST redirected to the home page, like a real Gazelle site
async fn mock_successful_login(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let login = server
        .mock("POST", "/login.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "alice".into()),
            Matcher::UrlEncoded("password".into(), "hunter2".into()),
        ]))
        .with_status(302)
        .with_header("location", &format!("{}/index.php", server.url()))
        .with_header("set-cookie", "session=xyz; Path=/")
        .create_async()
        .await;
    let home = server
        .mock("GET", "/index.php")
        .with_status(200)
        .with_body("<html>home</html>")
        .create_async()
        .await;
    (login, home)
}

#[tokio::test]
async fn test_token_construction_makes_no_network_call() {
    setup_logger();
    let site = SiteConfig::with_token("https://example.test", "abc123").unwrap();
    let client = GazelleClient::connect(site).await.unwrap();
    assert!(client.session().is_token());
    assert_eq!(client.session().authkey(), None);
    assert_eq!(client.site_url(), "https://example.test");
}

#[tokio::test]
async fn test_token_request_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/login.php")
        .expect(0)
        .create_async()
        .await;
    let index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Exact("action=index".into()))
        .match_header("authorization", "abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"success","response":{"id":7,"authkey":"k"}}"#)
        .create_async()
        .await;

    let client = token_client(&server).await;
    let payload = client.request("index", &[]).await.unwrap();

    assert_eq!(payload, json!({"id": 7, "authkey": "k"}));
    index.assert_async().await;
    login.assert_async().await;
}

#[tokio::test]
async fn test_token_header_sent_on_every_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".into(), "torrent".into()),
            Matcher::UrlEncoded("id".into(), "42".into()),
        ]))
        .match_header("authorization", "abc123")
        .with_status(200)
        .with_body(r#"{"status":"success","response":{"group":{"name":"Album"}}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = token_client(&server).await;
    for _ in 0..2 {
        let payload = client.request("torrent", &[("id", "42")]).await.unwrap();
        assert_eq!(payload["group"]["name"], "Album");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_is_a_protocol_error_naming_the_action() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::UrlEncoded("action".into(), "browse".into()))
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = token_client(&server).await;
    match client.request("browse", &[("searchstr", "foo")]).await {
        Err(AppError::Protocol(msg)) => assert!(msg.contains("browse"), "{msg}"),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_status_names_action_and_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"failure"}"#)
        .create_async()
        .await;

    let client = token_client(&server).await;
    match client.request("torrent", &[("id", "0")]).await {
        Err(AppError::Protocol(msg)) => {
            assert!(msg.contains("torrent"), "{msg}");
            assert!(msg.contains("failure"), "{msg}");
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_is_not_followed_for_api_calls() {
    let mut server = Server::new_async().await;
    let _ajax = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .with_status(302)
        .with_header("location", &format!("{}/login.php", server.url()))
        .create_async()
        .await;
    let login_page = server
        .mock("GET", "/login.php")
        .expect(0)
        .create_async()
        .await;

    let client = token_client(&server).await;
    match client.request("index", &[]).await {
        Err(AppError::Protocol(msg)) => assert!(msg.contains("302"), "{msg}"),
        other => panic!("expected protocol error, got {other:?}"),
    }
    login_page.assert_async().await;
}

#[tokio::test]
async fn test_form_login_bootstraps_authkey() {
    setup_logger();
    let mut server = Server::new_async().await;
    let (login, home) = mock_successful_login(&mut server).await;
    let index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Exact("action=index".into()))
        .with_status(200)
        .with_body(INDEX_BODY)
        .create_async()
        .await;
    let torrent = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".into(), "torrent".into()),
            Matcher::UrlEncoded("id".into(), "42".into()),
            Matcher::UrlEncoded("auth".into(), "k".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"success","response":{"torrent":{"id":42}}}"#)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    let client = GazelleClient::connect(site).await.unwrap();

    assert!(!client.session().is_token());
    assert_eq!(client.session().user_id(), Some(7));
    assert_eq!(client.session().authkey(), Some("k"));

    let payload = client.request("torrent", &[("id", "42")]).await.unwrap();
    assert_eq!(payload["torrent"]["id"], 42);

    login.assert_async().await;
    home.assert_async().await;
    index.assert_async().await;
    torrent.assert_async().await;
}

#[tokio::test]
async fn test_form_login_cookie_is_reused() {
    let mut server = Server::new_async().await;
    let _login = mock_successful_login(&mut server).await;
    let index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .match_header("cookie", Matcher::Regex("session=xyz".into()))
        .with_status(200)
        .with_body(INDEX_BODY)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    GazelleClient::connect(site).await.unwrap();
    index.assert_async().await;
}

#[tokio::test]
async fn test_login_page_served_again_is_an_authentication_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/login.php")
        .with_status(200)
        .with_body("<form>Your username or password was incorrect.</form>")
        .create_async()
        .await;
    let index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "wrong").unwrap();
    match GazelleClient::connect(site).await {
        Err(AppError::Authentication(msg)) => assert!(msg.contains("invalid"), "{msg}"),
        Err(other) => panic!("expected authentication error, got {other:?}"),
        Ok(_) => panic!("expected authentication error, got a client"),
    }
    index.assert_async().await;
}

#[tokio::test]
async fn test_login_http_error_is_an_authentication_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/login.php")
        .with_status(500)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    match GazelleClient::connect(site).await {
        Err(AppError::Authentication(msg)) => assert!(msg.contains("500"), "{msg}"),
        Err(other) => panic!("expected authentication error, got {other:?}"),
        Ok(_) => panic!("expected authentication error, got a client"),
    }
}

#[tokio::test]
async fn test_failed_bootstrap_is_a_protocol_error() {
    let mut server = Server::new_async().await;
    let _login = mock_successful_login(&mut server).await;
    let _index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"failure","error":"not logged in"}"#)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    match GazelleClient::connect(site).await {
        Err(AppError::Protocol(msg)) => {
            assert!(msg.contains("index"), "{msg}");
            assert!(msg.contains("failure"), "{msg}");
        }
        Err(other) => panic!("expected protocol error, got {other:?}"),
        Ok(_) => panic!("expected protocol error, got a client"),
    }
}

#[tokio::test]
async fn test_bootstrap_without_authkey_is_a_protocol_error() {
    let mut server = Server::new_async().await;
    let _login = mock_successful_login(&mut server).await;
    let _index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"success","response":{"id":7}}"#)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    match GazelleClient::connect(site).await {
        Err(AppError::Protocol(msg)) => assert!(msg.contains("authkey"), "{msg}"),
        Err(other) => panic!("expected protocol error, got {other:?}"),
        Ok(_) => panic!("expected protocol error, got a client"),
    }
}

#[tokio::test]
async fn test_bootstrap_tolerates_loosely_typed_index_fields() {
    let mut server = Server::new_async().await;
    let _login = mock_successful_login(&mut server).await;
    let _index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Exact("action=index".into()))
        .with_status(200)
        .with_body(r#"{"status":"success","response":{"id":"7","authkey":"k","username":12345,"passkey":null}}"#)
        .create_async()
        .await;

    let site = SiteConfig::with_login(&server.url(), "alice", "hunter2").unwrap();
    let client = GazelleClient::connect(site).await.unwrap();
    assert_eq!(client.session().user_id(), Some(7));
    assert_eq!(client.session().authkey(), Some("k"));
}

#[tokio::test]
async fn test_from_config_missing_site_fails_before_network() {
    let config = GazelleConfig::default();
    match GazelleClient::from_config(&config, "red").await {
        Err(AppError::Configuration(msg)) => assert!(msg.contains("red"), "{msg}"),
        Err(other) => panic!("expected configuration error, got {other:?}"),
        Ok(_) => panic!("expected configuration error, got a client"),
    }
}

#[tokio::test]
async fn test_index_and_typed_requests() {
    #[derive(Deserialize)]
    struct Group {
        name: String,
    }

    let mut server = Server::new_async().await;
    let _index = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Exact("action=index".into()))
        .with_status(200)
        .with_body(INDEX_BODY)
        .create_async()
        .await;
    let _group = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::UrlEncoded("action".into(), "torrentgroup".into()))
        .with_status(200)
        .with_body(r#"{"status":"success","response":{"name":"Album"}}"#)
        .create_async()
        .await;

    let client = token_client(&server).await;
    let me = client.index().await.unwrap();
    assert_eq!(me.id, Some(7));
    assert_eq!(me.username.as_deref(), Some("alice"));

    let group: Group = client
        .request_as("torrentgroup", &[("id", "1")])
        .await
        .unwrap();
    assert_eq!(group.name, "Album");

    let err = client
        .request_as::<Vec<u32>>("torrentgroup", &[("id", "1")])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Protocol(_)));
}

#[tokio::test]
async fn test_client_behind_tracker_trait() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/ajax.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"success","response":[1,2,3]}"#)
        .create_async()
        .await;

    let client = token_client(&server).await;
    let tracker: &dyn TrackerApi = &client;
    assert_eq!(tracker.site_url(), server.url());
    assert_eq!(tracker.request("top10", &[]).await.unwrap(), json!([1, 2, 3]));
}
