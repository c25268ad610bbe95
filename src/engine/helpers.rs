use super::Database;

use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::Job,
    error::{invalid_input_error, Error},
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_job_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Job, Error> {
    let Json(job): Json<Job> = tx
        .fetch_optional(sqlx::query("SELECT data FROM jobs WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(invalid_input_error)?
        .try_get("data")?;

    Ok(job)
}

#[tracing::instrument(skip(tx))]
pub async fn update_job(tx: &mut Transaction<'_, Database>, job: &Job) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE jobs SET status = $2, data = $3 WHERE id = $1")
            .bind(&job.id)
            .bind(job.status.name())
            .bind(Json(job)),
    )
    .await?;

    Ok(())
}
