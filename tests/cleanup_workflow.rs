use docker_registry_api::cleanup::{CleanupWorkflow, ScriptedConfirm, TagState};
use docker_registry_api::config::RegistryEndpoint;
use docker_registry_api::logging::Logger;
use docker_registry_api::registry::RegistryClient;
use docker_registry_api::registry::transport::{HttpResponse, Method, ScriptedTransport};
use std::sync::Arc;

const BASE: &str = "https://localhost:5000/v2";

fn app_registry() -> ScriptedTransport {
    ScriptedTransport::new()
        .route(Method::Get, format!("{}/", BASE), HttpResponse::new(200))
        .route(
            Method::Get,
            format!("{}/_catalog", BASE),
            HttpResponse::new(200).with_body(r#"{"repositories":["app"]}"#),
        )
        .route(
            Method::Get,
            format!("{}/app/tags/list", BASE),
            HttpResponse::new(200).with_body(r#"{"name":"app","tags":["latest","v1","v2"]}"#),
        )
        .route(
            Method::Get,
            format!("{}/app/manifests/latest", BASE),
            HttpResponse::new(200).with_header("Docker-Content-Digest", "sha256:000latest"),
        )
        .route(
            Method::Get,
            format!("{}/app/manifests/v1", BASE),
            HttpResponse::new(200).with_header("Docker-Content-Digest", "sha256:111v1"),
        )
        .route(
            Method::Get,
            format!("{}/app/manifests/v2", BASE),
            HttpResponse::new(200).with_header("Docker-Content-Digest", "sha256:222v2"),
        )
        .route(
            Method::Delete,
            format!("{}/app/manifests/sha256:111v1", BASE),
            HttpResponse::new(202),
        )
        .route(
            Method::Delete,
            format!("{}/app/manifests/sha256:222v2", BASE),
            HttpResponse::new(202),
        )
}

fn client(transport: Arc<ScriptedTransport>) -> RegistryClient {
    RegistryClient::builder(RegistryEndpoint::new("localhost:5000").unwrap())
        .with_transport(transport)
        .with_output(Logger::new_quiet())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_yes_to_v1_no_to_v2_deletes_only_v1() {
    let transport = Arc::new(app_registry());
    let mut workflow = CleanupWorkflow::new(
        client(transport.clone()),
        ScriptedConfirm::new(["y", "n"]),
        Logger::new_quiet(),
    );

    let report = workflow.cleanup("app").await.unwrap();

    let deletes = transport.requests_with(Method::Delete);
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].url, format!("{}/app/manifests/sha256:111v1", BASE));

    let prompts = workflow.confirmer().prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].starts_with("[2/3] Delete app:v1 (sha256:111v1)?"));
    assert!(prompts[1].starts_with("[3/3] Delete app:v2 (sha256:222v2)?"));

    assert_eq!(report.outcome("latest").unwrap().state, TagState::Retained);
    assert_eq!(
        report.outcome("v1").unwrap().state,
        TagState::Deleted("sha256:111v1".to_string())
    );
    assert_eq!(
        report.outcome("v2").unwrap().state,
        TagState::Skipped("sha256:222v2".to_string())
    );
}

#[tokio::test]
async fn test_answers_are_case_insensitive() {
    let transport = Arc::new(app_registry());
    let mut workflow = CleanupWorkflow::new(
        client(transport.clone()),
        ScriptedConfirm::new(["YES", "Y"]),
        Logger::new_quiet(),
    );

    let report = workflow.cleanup("app").await.unwrap();

    assert_eq!(report.deleted(), 2);
    assert_eq!(transport.requests_with(Method::Delete).len(), 2);
}

#[tokio::test]
async fn test_digests_resolved_right_before_each_prompt() {
    let transport = Arc::new(app_registry());
    let mut workflow = CleanupWorkflow::new(
        client(transport.clone()),
        ScriptedConfirm::new(["y", "y"]),
        Logger::new_quiet(),
    );

    workflow.cleanup("app").await.unwrap();

    let urls: Vec<String> = transport
        .requests()
        .into_iter()
        .map(|request| format!("{} {}", request.method, request.url))
        .collect();
    assert_eq!(
        urls,
        vec![
            format!("GET {}/_catalog", BASE),
            format!("GET {}/app/tags/list", BASE),
            format!("GET {}/app/manifests/v1", BASE),
            format!("DELETE {}/app/manifests/sha256:111v1", BASE),
            format!("GET {}/app/manifests/v2", BASE),
            format!("DELETE {}/app/manifests/sha256:222v2", BASE),
        ]
    );
}

#[tokio::test]
async fn test_connection_check_then_listing() {
    let transport = Arc::new(app_registry());
    let client = client(transport);

    assert!(client.check_connection().await);
    let catalog = client.get_catalog().await.unwrap();
    let tag_set = client.get_all_tags(&catalog).await.unwrap();
    assert_eq!(tag_set, vec![(
        "app".to_string(),
        vec!["latest".to_string(), "v1".to_string(), "v2".to_string()]
    )]);
}
