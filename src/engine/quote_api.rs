use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::{QuoteAPI, RateAPI, RouteAPI},
    entities::{Quote, QuoteParams},
    error::{invalid_input_error, Error},
    pricing,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, route_token: Uuid, params: QuoteParams) -> Result<Quote, Error> {
        let route = self.find_route(route_token).await?;
        route.validate()?;

        let config = self.load_rates().await?;

        let request = params.into_request(route);
        let result = pricing::compute_quote(&request, &config)?;

        let quote = Quote::new(request, result);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO quotes (token, data) VALUES ($1, $2)")
                .bind(&quote.token)
                .bind(Json(&quote)),
        )
        .await?;

        Ok(quote)
    }

    #[tracing::instrument(skip(self))]
    async fn find_quote(&self, token: Uuid) -> Result<Quote, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM quotes WHERE token = $1").bind(&token))
            .await?;

        let result = maybe_result.ok_or_else(invalid_input_error)?;
        let Json(quote) = result.try_get("data")?;

        Ok(quote)
    }

    /// Staff override of the base-plus-distance figure; the rest of the
    /// formula chain is re-derived and the stored quote replaced.
    #[tracing::instrument(skip(self))]
    async fn recompute_quote(&self, token: Uuid, new_base: f64) -> Result<Quote, Error> {
        let mut quote = self.find_quote(token).await?;

        let config = self.load_rates().await?;

        quote.result = pricing::recompute_from_base(new_base, &quote.request, &config)?;
        quote.base_override = Some(new_base);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("UPDATE quotes SET data = $2 WHERE token = $1")
                .bind(&quote.token)
                .bind(Json(&quote)),
        )
        .await?;

        Ok(quote)
    }
}
