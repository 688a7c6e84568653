use crate::suite::{result, rpc, trigger_row, TestApp, API_PATH};
use serde_json::json;
use std::collections::HashMap;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use zabbix_dependencies::prelude::{Application, Error, ZabbixConfig};

#[tokio::test]
async fn start_reports_the_api_version() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    // Act
    let started = application.start().await.expect("Failed to start");
    // Assert
    assert_eq!("7.0.0", started.version());
    assert!(started.client().has_token());
}

#[tokio::test]
async fn unreachable_api_is_a_connection_error() {
    // Arrange
    let server = MockServer::start().await;
    let url = format!("{}{}", server.uri(), API_PATH);
    drop(server);
    let configuration = ZabbixConfig::from(HashMap::from([
        ("ZABBIX_URL", url.as_str()),
        ("ZABBIX_API_TOKEN", "token"),
        ("ZABBIX_TIMEOUT_IN_MS", "1000"),
    ]));
    // Act
    let result = Application::start(&configuration).await;
    // Assert
    assert!(matches!(result, Err(Error::Connection(_))));
}

#[tokio::test]
async fn broken_version_endpoint_is_a_connection_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let url = format!("{}{}", server.uri(), API_PATH);
    let configuration = ZabbixConfig::from(HashMap::from([
        ("ZABBIX_URL", url.as_str()),
        ("ZABBIX_API_TOKEN", "token"),
    ]));
    // Act
    let result = Application::start(&configuration).await;
    // Assert
    assert!(matches!(result, Err(Error::Connection(_))));
}

#[tokio::test]
async fn missing_credentials_fail_before_any_request() {
    // Arrange
    let application = TestApp::spawn(HashMap::from([("ZABBIX_API_TOKEN", "")])).await;
    // Act
    let result = application.start().await;
    // Assert
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(application.methods().await.is_empty());
}

#[tokio::test]
async fn login_token_is_used_for_later_calls() {
    // Arrange
    let application = TestApp::spawn(HashMap::from([
        ("ZABBIX_API_TOKEN", ""),
        ("ZABBIX_USERNAME", "Admin"),
        ("ZABBIX_PASSWORD", "zabbix"),
    ]))
    .await;
    application
        .mount(
            rpc(
                "user.login",
                json!({ "username": "Admin", "password": "zabbix" }),
            )
            .respond_with(result(json!("0424bd59b807674191e7d77572075f33")))
            .expect(1),
        )
        .await;
    application
        .mount(
            Mock::given(method("POST"))
                .and(path(API_PATH))
                .and(header(
                    "authorization",
                    "Bearer 0424bd59b807674191e7d77572075f33",
                ))
                .and(body_partial_json(json!({
                    "method": "trigger.get",
                    "params": { "triggerids": ["20202"] }
                })))
                .respond_with(result(json!([trigger_row("20202", "Device down", "0")])))
                .expect(1),
        )
        .await;
    application
        .mount(
            rpc("host.get", json!({ "hostids": ["10101"] }))
                .respond_with(result(json!([{ "hostid": "10101", "host": "fw-01", "name": "Firewall 01" }]))),
        )
        .await;
    application.host_triggers("10101", vec![]).await;
    // Act
    let report = application
        .run("10101", "20202")
        .await
        .expect("Failed to create dependencies");
    // Assert
    assert_eq!(0, report.total());
    assert_eq!(
        vec!["apiinfo.version", "user.login", "trigger.get", "host.get", "trigger.get"],
        application.methods().await
    );
}
