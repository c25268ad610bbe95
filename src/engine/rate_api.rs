use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::RateAPI,
    entities::RateConfig,
    error::{invalid_state_error, Error},
};

#[async_trait]
impl RateAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn load_rates(&self) -> Result<RateConfig, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM rate_configs WHERE id = 1"))
            .await?;

        let result = maybe_result.ok_or_else(invalid_state_error)?;
        let Json(config) = result.try_get("data")?;

        Ok(config)
    }

    #[tracing::instrument(skip(self))]
    async fn save_rates(&self, config: RateConfig) -> Result<RateConfig, Error> {
        config.validate()?;

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO rate_configs (id, data) VALUES (1, $1)
                 ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
            )
            .bind(Json(&config)),
        )
        .await?;

        Ok(config)
    }
}
