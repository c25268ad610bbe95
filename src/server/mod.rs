mod handlers;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::server::handlers::{jobs, quotes, rates, routes};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/rates", get(rates::find).put(rates::update))
        .route("/routes", post(routes::create))
        .route("/routes/:token", get(routes::find))
        .route("/quotes", post(quotes::create))
        .route("/quotes/:token", get(quotes::find))
        .route("/quotes/:token/base", patch(quotes::recompute_base))
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", get(jobs::find))
        .route("/jobs/:id/pricing", post(jobs::attach_pricing))
        .route("/jobs/:id/payment", patch(jobs::update_payment))
        .layer(Extension(api));

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".into())
        .parse()
        .unwrap();

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
