use crate::suite::{result, rpc, rpc_error, trigger_row, TestApp};
use serde_json::json;
use std::collections::HashMap;
use wiremock::ResponseTemplate;
use zabbix_dependencies::prelude::{Error, Outcome, SkipReason, TriggerId};

fn id(value: &str) -> TriggerId {
    value.parse().expect("Failed to parse trigger id")
}

#[tokio::test]
async fn creates_a_dependency_for_every_trigger() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .host_triggers(
            "10101",
            vec![
                trigger_row("1", "A", "0"),
                trigger_row("2", "B", "0"),
                trigger_row("3", "C", "0"),
            ],
        )
        .await;
    for trigger in ["1", "2", "3"] {
        application
            .dependency(trigger, "20202", result(json!({ "triggerids": [trigger] })))
            .await;
    }
    // Act
    let report = application
        .run("10101", "20202")
        .await
        .expect("Failed to create dependencies");
    // Assert
    assert_eq!(3, report.total());
    assert_eq!(3, report.succeeded());
    assert_eq!(0, report.skipped());
    assert_eq!(0, report.failed());
    assert_eq!(vec!["1", "2", "3"], application.dependency_requests().await);
}

#[tokio::test]
async fn skips_the_parent_and_discovered_triggers() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .host_triggers(
            "10101",
            vec![
                trigger_row("1", "A", "0"),
                trigger_row("2", "Interface Gi1/0/1: Link down", "4"),
                trigger_row("20202", "Device down", "0"),
            ],
        )
        .await;
    application
        .dependency("1", "20202", result(json!({ "triggerids": ["1"] })))
        .await;
    // Act
    let report = application
        .run("10101", "20202")
        .await
        .expect("Failed to create dependencies");
    // Assert
    assert_eq!(3, report.total());
    assert_eq!(1, report.succeeded());
    assert_eq!(2, report.skipped());
    assert_eq!(0, report.failed());
    assert_eq!(
        Some(&Outcome::skipped(SkipReason::Prototype)),
        report.outcome_of(&id("2"))
    );
    assert_eq!(
        Some(&Outcome::skipped(SkipReason::IsParent)),
        report.outcome_of(&id("20202"))
    );
    assert_eq!(vec!["1"], application.dependency_requests().await);
}

#[tokio::test]
async fn missing_parent_fails_before_listing() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.missing_parent("99999").await;
    application
        .mount(
            rpc("trigger.get", json!({ "hostids": ["10101"] }))
                .respond_with(result(json!([])))
                .expect(0),
        )
        .await;
    // Act
    let result = application.run("10101", "99999").await;
    // Assert
    assert!(matches!(result, Err(Error::ParentNotFound(parent)) if parent == id("99999")));
    assert_eq!(
        vec!["apiinfo.version", "trigger.get"],
        application.methods().await
    );
}

#[tokio::test]
async fn discovered_parent_is_rejected() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("30303", "4").await;
    // Act
    let result = application.run("10101", "30303").await;
    // Assert
    assert!(matches!(result, Err(Error::InvalidParent(_))));
    assert!(application.dependency_requests().await.is_empty());
}

#[tokio::test]
async fn remote_rejection_is_recorded_and_the_run_continues() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .host_triggers(
            "10101",
            vec![
                trigger_row("1", "A", "0"),
                trigger_row("2", "B", "0"),
                trigger_row("3", "C", "0"),
            ],
        )
        .await;
    application
        .dependency("1", "20202", result(json!({ "triggerids": ["1"] })))
        .await;
    application
        .dependency("2", "20202", result(json!({ "triggerids": ["2"] })))
        .await;
    application
        .dependency(
            "3",
            "20202",
            rpc_error("Invalid params.", "Cannot create circular dependency."),
        )
        .await;
    // Act
    let report = application
        .run("10101", "20202")
        .await
        .expect("Failed to create dependencies");
    // Assert
    assert_eq!(2, report.succeeded());
    assert_eq!(1, report.failed());
    match report.outcome_of(&id("3")) {
        Some(Outcome::Failed { reason }) => {
            assert!(reason.contains("circular dependency"))
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn rerun_reports_existing_dependencies_as_failed() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .mount(
            rpc("trigger.get", json!({ "hostids": ["10101"] })).respond_with(result(json!([
                trigger_row("1", "A", "0"),
                trigger_row("2", "B", "0")
            ]))),
        )
        .await;
    for trigger in ["1", "2"] {
        application
            .mount(
                rpc(
                    "trigger.adddependencies",
                    json!({ "triggerid": trigger, "dependsOnTriggerid": "20202" }),
                )
                .respond_with(result(json!({ "triggerids": [trigger] })))
                .up_to_n_times(1)
                .with_priority(1),
            )
            .await;
    }
    application
        .mount(
            rpc("trigger.adddependencies", json!({ "dependsOnTriggerid": "20202" }))
                .respond_with(rpc_error(
                    "Invalid params.",
                    "Dependency already exists.",
                )),
        )
        .await;
    // Act
    let first = application
        .run("10101", "20202")
        .await
        .expect("First run failed");
    let second = application
        .run("10101", "20202")
        .await
        .expect("Second run failed");
    // Assert
    assert_eq!(2, first.succeeded());
    assert_eq!(0, second.succeeded());
    assert_eq!(2, second.failed());
    assert!(second.results().iter().all(|result| matches!(
        &result.outcome,
        Outcome::Failed { reason } if reason.contains("already exists")
    )));
}

#[tokio::test]
async fn empty_host_produces_an_empty_report() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application.host_triggers("10101", vec![]).await;
    // Act
    let report = application
        .run("10101", "20202")
        .await
        .expect("Failed to create dependencies");
    // Assert
    assert_eq!(0, report.total());
    assert!(application.dependency_requests().await.is_empty());
}

#[tokio::test]
async fn unknown_host_is_fatal() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application
        .mount(rpc("host.get", json!({ "hostids": ["10101"] })).respond_with(result(json!([]))))
        .await;
    // Act
    let result = application.run("10101", "20202").await;
    // Assert
    assert!(matches!(result, Err(Error::HostNotFound(_))));
}

#[tokio::test]
async fn listing_without_flags_is_rejected() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .host_triggers(
            "10101",
            vec![json!({ "triggerid": "1", "description": "A", "status": "0" })],
        )
        .await;
    // Act
    let result = application.run("10101", "20202").await;
    // Assert
    assert!(matches!(result, Err(Error::Decode { .. })));
    assert!(application.dependency_requests().await.is_empty());
}

#[tokio::test]
async fn failed_listing_is_a_connection_error() {
    // Arrange
    let application = TestApp::spawn(HashMap::new()).await;
    application.parent("20202", "0").await;
    application.host("10101").await;
    application
        .mount(
            rpc("trigger.get", json!({ "hostids": ["10101"] }))
                .respond_with(ResponseTemplate::new(500)),
        )
        .await;
    // Act
    let result = application.run("10101", "20202").await;
    // Assert
    assert!(matches!(result, Err(Error::Connection(_))));
}
