//! API integration tests
//!
//! REST endpoints and GraphQL queries against the demo backend

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use costdeck::server::app::create_app;
use costdeck::services::Services;
use serde_json::{json, Value};

fn setup_test_server() -> Result<TestServer> {
    let app = create_app(Services::demo(), Some("http://localhost:3000"))?;
    let server = TestServer::new(app)?;
    Ok(server)
}

async fn graphql(server: &TestServer, query: &str, variables: Value) -> Value {
    let response = server
        .post("/graphql")
        .json(&json!({ "query": query, "variables": variables }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let server = setup_test_server()?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "costdeck-gateway");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "demo");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_invalid_cors_origin_is_rejected() {
    assert!(create_app(Services::demo(), Some("bad\norigin")).is_err());
}

#[tokio::test]
async fn test_graphql_playground() -> Result<()> {
    let server = setup_test_server()?;

    let response = server.get("/graphql").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("GraphQL Playground"));

    Ok(())
}

#[tokio::test]
async fn test_data_source_resolves_concrete_type() -> Result<()> {
    let server = setup_test_server()?;

    let query = r#"
        query DataSource($id: ID!, $params: DataSourceRequestParams) {
            dataSource(dataSourceId: $id, requestParams: $params) {
                __typename
                id
                name
                type
                details { cost resources }
                ... on AwsDataSource { config { bucketName regionName } }
                ... on K8sDataSource { config { port costModel { cpuHourlyCost } } }
            }
        }
    "#;

    let body = graphql(
        &server,
        query,
        json!({ "id": "ds-aws", "params": { "details": true } }),
    )
    .await;
    assert!(body.get("errors").is_none(), "{}", body);
    let data_source = &body["data"]["dataSource"];
    assert_eq!(data_source["__typename"], "AwsDataSource");
    assert_eq!(data_source["type"], "aws_cnr");
    assert_eq!(data_source["config"]["bucketName"], "demo-billing-reports");
    assert!(data_source["details"]["cost"].is_number());

    let body = graphql(&server, query, json!({ "id": "ds-kubernetes" })).await;
    let data_source = &body["data"]["dataSource"];
    assert_eq!(data_source["__typename"], "K8sDataSource");
    assert_eq!(data_source["config"]["port"], 4433);
    assert!(data_source["details"].is_null());

    Ok(())
}

#[tokio::test]
async fn test_every_demo_data_source_resolves() -> Result<()> {
    let server = setup_test_server()?;
    let expected = [
        ("ds-alibaba", "AlibabaDataSource"),
        ("ds-aws", "AwsDataSource"),
        ("ds-azure", "AzureSubscriptionDataSource"),
        ("ds-azure_tenant", "AzureTenantDataSource"),
        ("ds-databricks", "DatabricksDataSource"),
        ("ds-environment", "EnvironmentDataSource"),
        ("ds-gcp", "GcpDataSource"),
        ("ds-kubernetes", "K8sDataSource"),
        ("ds-nebius", "NebiusDataSource"),
    ];

    for (id, type_name) in expected {
        let body = graphql(
            &server,
            "query($id: ID!) { dataSource(dataSourceId: $id) { __typename id } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(body["data"]["dataSource"]["__typename"], type_name, "{}", id);
        assert_eq!(body["data"]["dataSource"]["id"], id);
    }

    Ok(())
}

#[tokio::test]
async fn test_unknown_data_source_type_is_unresolved() -> Result<()> {
    let server = setup_test_server()?;

    let body = graphql(
        &server,
        "query($id: ID!) { dataSource(dataSourceId: $id) { id } }",
        json!({ "id": "ds-legacy" }),
    )
    .await;

    assert!(body["data"]["dataSource"].is_null());
    let error = &body["errors"][0];
    assert_eq!(error["extensions"]["code"], "UNRESOLVED_TYPE");
    assert_eq!(error["extensions"]["discriminator"], "vmware_cnr");

    Ok(())
}

#[tokio::test]
async fn test_missing_data_source_is_not_found() -> Result<()> {
    let server = setup_test_server()?;

    let body = graphql(
        &server,
        "query { dataSource(dataSourceId: \"ds-nope\") { id } }",
        Value::Null,
    )
    .await;

    assert!(body["data"]["dataSource"].is_null());
    assert_eq!(body["errors"][0]["message"], "Resource not found");
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_update_data_source_mutation() -> Result<()> {
    let server = setup_test_server()?;

    let mutation = r#"
        mutation Update($id: ID!, $params: UpdateDataSourceInput!) {
            updateDataSource(dataSourceId: $id, params: $params) {
                __typename
                name
                lastImportAt
                ... on AlibabaDataSource { config { accessKeyId } }
            }
        }
    "#;
    let body = graphql(
        &server,
        mutation,
        json!({
            "id": "ds-alibaba",
            "params": {
                "name": "Alibaba prod",
                "lastImportAt": 1700000000,
                "alibabaConfig": { "accessKeyId": "LTAInew", "secretAccessKey": "hidden" }
            }
        }),
    )
    .await;

    assert!(body.get("errors").is_none(), "{}", body);
    let updated = &body["data"]["updateDataSource"];
    assert_eq!(updated["__typename"], "AlibabaDataSource");
    assert_eq!(updated["name"], "Alibaba prod");
    assert_eq!(updated["lastImportAt"], 1700000000);
    assert_eq!(updated["config"]["accessKeyId"], "LTAInew");

    Ok(())
}

#[tokio::test]
async fn test_events_and_slack_fields() -> Result<()> {
    let server = setup_test_server()?;

    let body = graphql(
        &server,
        r#"query {
            events(organizationId: "org-demo", requestParams: { includeRead: true, level: [ERROR, WARNING] }) {
                id
                level
            }
            url
        }"#,
        Value::Null,
    )
    .await;

    assert!(body.get("errors").is_none(), "{}", body);
    let events = body["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["level"], "ERROR");
    assert!(body["data"]["url"].as_str().unwrap().starts_with("https://slack.com/"));

    let body = graphql(
        &server,
        "mutation { connect(secret: \"s-123\") }",
        Value::Null,
    )
    .await;
    assert_eq!(body["data"]["connect"], true);

    Ok(())
}

#[tokio::test]
async fn test_bearer_token_is_accepted() -> Result<()> {
    let server = setup_test_server()?;

    let response = server
        .post("/graphql")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Bearer token-123"),
        )
        .json(&json!({ "query": "{ url }" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"]["url"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_ml_models_api() -> Result<()> {
    let server = setup_test_server()?;

    let response = server.get("/api/v1/ml/models").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let models: Vec<Value> = response.json();
    assert_eq!(models.len(), 3);

    let response = server.get("/api/v1/ml/models/model-iris").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let model: Value = response.json();
    assert_eq!(model["id"], "model-iris");
    assert_eq!(model["status"], "RUNNING");
    assert_eq!(model["runs_count"], 5);
    assert_eq!(model["last_run"]["id"], "run-iris-5");
    assert_eq!(model["last_successful_run"]["id"], "run-iris-4");
    assert_eq!(model["reached_goals"]["accuracy"]["reached"], false);

    let response = server.get("/api/v1/ml/models/model-churn").await;
    let model: Value = response.json();
    assert_eq!(model["status"], "CREATED");
    assert_eq!(model["total_cost"], 0.0);

    let response = server.get("/api/v1/ml/models/missing").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Resource not found");

    Ok(())
}

#[tokio::test]
async fn test_ml_runs_and_runsets_api() -> Result<()> {
    let server = setup_test_server()?;

    let response = server.get("/api/v1/ml/models/model-iris/runs").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let runs: Vec<Value> = response.json();
    assert_eq!(runs.len(), 5);
    assert_eq!(runs[0]["runset"]["id"], "runset-iris-sweep");
    assert_eq!(runs[0]["runset_template"]["id"], "template-iris");
    assert!(runs[4]["runset"].is_null());

    let response = server.get("/api/v1/ml/runsets/runset-iris-sweep").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let runset: Value = response.json();
    assert_eq!(runset["succeeded_runs"], 2);

    let response = server.get("/api/v1/ml/runset-templates/template-iris").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get("/api/v1/ml/executors").await;
    let executors: Vec<Value> = response.json();
    assert_eq!(executors.len(), 3);

    Ok(())
}
