//! HTTP routes: GraphQL over POST and WebSocket, SDL, playground, health, metrics

use actix_web::{web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};

use crate::error::Result;
use crate::graphql::AppSchema;
use crate::metrics;
use crate::state::AppState;

async fn graphql_handler(schema: web::Data<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphql_subscription_handler(
    schema: web::Data<AppSchema>,
    req: HttpRequest,
    payload: web::Payload,
) -> actix_web::Result<HttpResponse> {
    GraphQLSubscription::new(schema.as_ref().clone()).start(&req, payload)
}

async fn schema_handler(schema: web::Data<AppSchema>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            GraphiQLSource::build()
                .endpoint("/graphql")
                .subscription_endpoint("/ws")
                .finish(),
        )
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn metrics_handler(state: web::Data<AppState>) -> Result<HttpResponse> {
    let backend = state.storage.to_string();
    metrics::record_feed_stats(&backend, &state.feed.stats());

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::render()?))
}

/// Register every route; expects `web::Data<AppSchema>` and `web::Data<AppState>`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/graphql", web::post().to(graphql_handler))
        .route("/graphql", web::get().to(graphql_subscription_handler))
        .route("/ws", web::get().to(graphql_subscription_handler))
        .route("/schema", web::get().to(schema_handler))
        .route("/playground", web::get().to(playground_handler))
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler));
}
