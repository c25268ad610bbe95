use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Job, JobCard, PaymentStatus, PricingSource};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct PaymentParams {
    status: PaymentStatus,
    #[serde(default)]
    amount_paid: f64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(card): Json<JobCard>,
) -> Result<Json<Job>, Error> {
    let job = api.create_job(card).await?;

    Ok(job.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, Error> {
    let job = api.find_job(id).await?;

    Ok(job.into())
}

pub async fn attach_pricing(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(source): Json<PricingSource>,
) -> Result<Json<Job>, Error> {
    let job = api.attach_pricing(id, source).await?;

    Ok(job.into())
}

pub async fn update_payment(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<PaymentParams>,
) -> Result<Json<Job>, Error> {
    let job = api
        .update_payment_status(id, params.status, params.amount_paid)
        .await?;

    Ok(job.into())
}
