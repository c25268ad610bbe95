//! HTTP directions client. The concrete `DistanceProvider` used in
//! production; callers reach it through `resolve_route_with_fallback`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use crate::distance::{DistanceProvider, RouteOptions};
use crate::entities::{Route, RouteLeg, Waypoint};
use crate::error::{invalid_input_error, upstream_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    route: Option<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RouteResult {
    legs: Vec<LegResult>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LegResult {
    start_address: String,
    end_address: String,
    distance_meters: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DirectionsProvider;

impl DirectionsProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DistanceProvider for DirectionsProvider {
    #[tracing::instrument(skip(self))]
    async fn resolve_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Route, Error> {
        let api_base = env::var("DIRECTIONS_API_BASE")?;
        let url = format!("https://{}/directions/v1/route", api_base);
        let key = env::var("DIRECTIONS_API_KEY")?;

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("key", key)])
            .query(&[("waypoints", waypoints_param(waypoints))])
            .query(&[("return_to_origin", options.include_return_leg)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response<RouteResult> = res.json().await?;

        if data.status != "OK" {
            return Err(upstream_error());
        }

        let result = data.route.ok_or_else(upstream_error)?;

        let legs = result
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                from: leg.start_address,
                to: leg.end_address,
                distance: leg.distance_meters / 1000.0,
            })
            .collect();

        Route::new(legs, false)
    }
}

fn waypoints_param(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(|waypoint| match &waypoint.coordinates {
            Some(coordinates) => String::from(coordinates.clone()),
            None => waypoint.label.clone(),
        })
        .collect::<Vec<_>>()
        .join("|")
}
