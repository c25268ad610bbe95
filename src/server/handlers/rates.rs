use axum::extract::{Extension, Json};

use crate::entities::RateConfig;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<RateConfig>, Error> {
    let config = api.load_rates().await?;

    Ok(config.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(config): Json<RateConfig>,
) -> Result<Json<RateConfig>, Error> {
    let config = api.save_rates(config).await?;

    Ok(config.into())
}
