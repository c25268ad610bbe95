use super::helpers::{fetch_job_for_update, update_job};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{JobAPI, QuoteAPI},
    entities::{Job, JobCard, PaymentStatus, PricingSource},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl JobAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_job(&self, card: JobCard) -> Result<Job, Error> {
        let job = Job::new(card);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO jobs (id, status, data) VALUES ($1, $2, $3)")
                .bind(&job.id)
                .bind(job.status.name())
                .bind(Json(&job)),
        )
        .await?;

        Ok(job)
    }

    #[tracing::instrument(skip(self))]
    async fn find_job(&self, id: Uuid) -> Result<Job, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM jobs WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(invalid_input_error)?;
        let Json(job) = result.try_get("data")?;

        Ok(job)
    }

    #[tracing::instrument(skip(self))]
    async fn attach_pricing(&self, job_id: Uuid, source: PricingSource) -> Result<Job, Error> {
        let (final_price, notes) = match source {
            PricingSource::Quote { quote_token } => {
                let quote = self.find_quote(quote_token).await?;

                (quote.result.final_price, format!("quote {}", quote.token))
            }
            PricingSource::Manual { final_price, notes } => (final_price, notes),
        };

        let mut tx = self.pool.begin().await?;

        let mut job = fetch_job_for_update(&mut tx, &job_id).await?;
        job.attach_pricing(final_price, notes)?;

        update_job(&mut tx, &job).await?;
        tx.commit().await?;

        Ok(job)
    }

    #[tracing::instrument(skip(self))]
    async fn update_payment_status(
        &self,
        job_id: Uuid,
        status: PaymentStatus,
        amount_paid: f64,
    ) -> Result<Job, Error> {
        let mut tx = self.pool.begin().await?;

        let mut job = fetch_job_for_update(&mut tx, &job_id).await?;
        job.record_payment(status, amount_paid)?;

        update_job(&mut tx, &job).await?;
        tx.commit().await?;

        Ok(job)
    }
}
