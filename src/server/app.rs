use anyhow::{anyhow, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

#[cfg(feature = "graphql")]
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
#[cfg(feature = "graphql")]
use axum::{extract::State, http::HeaderMap};

#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema};
#[cfg(feature = "graphql")]
use crate::services::Credentials;
use crate::services::Services;

use super::handlers::{health, ml};

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

pub fn create_app(services: Services, cors_origin: Option<&str>) -> Result<Router> {
    #[cfg(feature = "graphql")]
    let graphql_schema = build_schema(GraphQLContext::from_services(&services));

    let state = AppState {
        services,
        #[cfg(feature = "graphql")]
        graphql_schema,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new().allow_origin(
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
        ),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
    .allow_headers(Any)
    .allow_credentials(false);

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/ml", ml_routes());

    #[cfg(feature = "graphql")]
    {
        app = app.route(
            "/graphql",
            get(graphql_playground)
                .post(graphql_handler)
                .options(|| async { axum::http::StatusCode::OK }),
        );
    }

    Ok(app
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state))
}

fn ml_routes() -> Router<AppState> {
    Router::new()
        .route("/models", get(ml::list_models))
        .route("/models/:id", get(ml::get_model))
        .route("/models/:id/runs", get(ml::get_model_runs))
        .route("/runsets", get(ml::list_runsets))
        .route("/runsets/:id", get(ml::get_runset))
        .route("/runset-templates/:id", get(ml::get_runset_template))
        .route("/executors", get(ml::list_executors))
}

#[cfg(feature = "graphql")]
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let credentials = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(Credentials::from_authorization_header)
        .unwrap_or_default();

    tracing::debug!("GraphQL request received");
    let response = state
        .graphql_schema
        .execute(request.into_inner().data(credentials))
        .await;
    tracing::debug!("GraphQL request completed");
    response.into()
}

#[cfg(feature = "graphql")]
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
