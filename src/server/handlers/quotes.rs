use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Quote, QuoteParams};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    route_token: Uuid,
    #[serde(flatten)]
    params: QuoteParams,
}

#[derive(Serialize, Deserialize)]
pub struct RecomputeParams {
    base: f64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Quote>, Error> {
    let quote = api.create_quote(params.route_token, params.params).await?;

    Ok(quote.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
) -> Result<Json<Quote>, Error> {
    let quote = api.find_quote(token).await?;

    Ok(quote.into())
}

pub async fn recompute_base(
    Extension(api): Extension<DynAPI>,
    Path(token): Path<Uuid>,
    Json(params): Json<RecomputeParams>,
) -> Result<Json<Quote>, Error> {
    let quote = api.recompute_quote(token, params.base).await?;

    Ok(quote.into())
}
