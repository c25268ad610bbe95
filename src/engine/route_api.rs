use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    distance::{resolve_route_with_fallback, RouteOptions, DEFAULT_PROVIDER_TIMEOUT},
    entities::{Route, Waypoint},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_route(
        &self,
        waypoints: Vec<Waypoint>,
        options: RouteOptions,
    ) -> Result<Route, Error> {
        let route = resolve_route_with_fallback(
            self.provider.as_ref(),
            &waypoints,
            &options,
            DEFAULT_PROVIDER_TIMEOUT,
        )
        .await?;

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO routes (token, data) VALUES ($1, $2)")
                .bind(&route.token)
                .bind(Json(&route)),
        )
        .await?;

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, token: Uuid) -> Result<Route, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM routes WHERE token = $1").bind(&token))
            .await?;

        let result = maybe_result.ok_or_else(invalid_input_error)?;
        let Json(route) = result.try_get("data")?;

        Ok(route)
    }
}
