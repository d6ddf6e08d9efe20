use mytasks_cli::{CliError, Command, Shell, ShellConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shell(server: &MockServer, raw_errors: bool) -> Shell {
    Shell::new(ShellConfig {
        server: Some(server.uri()),
        user: Some("1".to_string()),
        password: Some("PASSWORD1".to_string()),
        raw_errors,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_users_are_printed_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "1", "name": "USER1"}
        ])))
        .mount(&server)
        .await;

    let shell = shell(&server, false);
    let output = shell.run(Command::Users).await.unwrap().expect("output");
    assert!(output.contains("\"name\": \"USER1\""));
    assert!(!shell.auth_failed());
    assert!(!shell.error_seen());
}

#[tokio::test]
async fn test_unauthorized_runs_auth_handler() {
    let server = MockServer::start().await;
    Mock::given(path("/groups/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let shell = shell(&server, false);
    let output = shell
        .run(Command::Get { path: "/groups/1".to_string() })
        .await
        .unwrap();
    assert!(output.is_none());
    assert!(shell.auth_failed());
    assert!(!shell.error_seen());
}

#[tokio::test]
async fn test_server_error_reporting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error_message": "500 Internal Server Error: Error while saving new group",
            "status": 500
        })))
        .mount(&server)
        .await;

    let command = Command::Post {
        path: "/groups/".to_string(),
        data: Some(r#"{"name": "home"}"#.to_string()),
    };

    let handled = shell(&server, false);
    assert!(handled.run(command.clone()).await.unwrap().is_none());
    assert!(handled.error_seen());

    let raw = shell(&server, true);
    let err = raw.run(command).await.unwrap_err();
    assert!(matches!(&err, CliError::Client(e) if e.status() == Some(500)));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_login_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "1", "name": "USER1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let output = shell(&server, false).run(Command::Login).await.unwrap().expect("output");
    assert!(output.contains("USER1"));
}

#[tokio::test]
async fn test_credentials_stored_without_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/1"))
        .and(header("Authorization", "Basic MTpQQVNTV09SRDE="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "1", "name": "GROUP1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let shell = shell(&server, true);
    let output = shell.run(Command::Group { id: "1".to_string() }).await.unwrap();
    assert!(output.expect("output").contains("GROUP1"));
}
