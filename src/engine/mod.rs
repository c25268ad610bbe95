mod helpers;
mod job_api;
mod quote_api;
mod rate_api;
mod route_api;

use std::sync::Arc;

use sqlx::{types::Json, Executor, Pool, Postgres};

use crate::{api::API, distance::DistanceProvider, entities::RateConfig, error::Error};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    provider: Arc<dyn DistanceProvider>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        pool: Pool<Database>,
        provider: Arc<dyn DistanceProvider>,
    ) -> Result<Self, Error> {
        // route service (KV store)
        pool.execute("CREATE TABLE IF NOT EXISTS routes (token UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // quote service (KV store)
        pool.execute("CREATE TABLE IF NOT EXISTS quotes (token UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // job service
        pool.execute("CREATE TABLE IF NOT EXISTS jobs (id UUID PRIMARY KEY, status VARCHAR NOT NULL, data JSONB NOT NULL)")
            .await?;

        // rate configuration, single active row
        pool.execute("CREATE TABLE IF NOT EXISTS rate_configs (id INT4 PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        let seeded = pool
            .fetch_optional(sqlx::query("SELECT id FROM rate_configs WHERE id = 1"))
            .await?;

        if seeded.is_none() {
            pool.execute(
                sqlx::query("INSERT INTO rate_configs (id, data) VALUES (1, $1)")
                    .bind(Json(RateConfig::default())),
            )
            .await?;
        }

        Ok(Self { pool, provider })
    }
}

impl API for Engine {}
