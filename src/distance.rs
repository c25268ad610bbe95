//! Route resolution. Every caller that needs a route goes through
//! `resolve_route_with_fallback`: one timeout policy, one offline fallback.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Route, RouteLeg, Waypoint};
use crate::error::{route_unavailable_error, Error};

/// Mean Earth radius, in the same unit as leg distances (km).
const EARTH_RADIUS: f64 = 6371.0;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    #[serde(default)]
    pub include_return_leg: bool,
}

#[async_trait]
pub trait DistanceProvider: Send + Sync {
    async fn resolve_route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Route, Error>;
}

/// Resolves a route through the provider, degrading to a deterministic
/// great-circle estimate when the provider errors out or exceeds the
/// timeout. Provider failure is recoverable and never fatal here; only a
/// fallback that cannot run (missing coordinates) surfaces an error.
#[tracing::instrument(skip(provider))]
pub async fn resolve_route_with_fallback(
    provider: &dyn DistanceProvider,
    waypoints: &[Waypoint],
    options: &RouteOptions,
    timeout: Duration,
) -> Result<Route, Error> {
    match tokio::time::timeout(timeout, provider.resolve_route(waypoints, options)).await {
        Ok(Ok(route)) => Ok(route),
        Ok(Err(err)) => {
            tracing::warn!(code = err.code, "provider failed, using great-circle estimate");
            great_circle_route(waypoints, options)
        }
        Err(_) => {
            tracing::warn!("provider timed out, using great-circle estimate");
            great_circle_route(waypoints, options)
        }
    }
}

/// Pure offline estimate: haversine distance between consecutive waypoints.
/// The result is flagged `approximate` so the caller can surface it.
pub fn great_circle_route(waypoints: &[Waypoint], options: &RouteOptions) -> Result<Route, Error> {
    if waypoints.len() < 2 {
        return Err(route_unavailable_error("at least two waypoints are required"));
    }

    let mut ordered: Vec<&Waypoint> = waypoints.iter().collect();
    if options.include_return_leg {
        ordered.push(&waypoints[0]);
    }

    let mut legs = Vec::with_capacity(ordered.len() - 1);

    for pair in ordered.windows(2) {
        let (from, to) = (pair[0], pair[1]);

        let from_coordinates = coordinates_of(from)?;
        let to_coordinates = coordinates_of(to)?;

        legs.push(RouteLeg {
            from: from.label.clone(),
            to: to.label.clone(),
            distance: haversine(from_coordinates, to_coordinates),
        });
    }

    Route::new(legs, true)
}

fn coordinates_of(waypoint: &Waypoint) -> Result<&Coordinates, Error> {
    waypoint.coordinates.as_ref().ok_or_else(|| {
        route_unavailable_error(&format!(
            "waypoint '{}' has no coordinates for an offline estimate",
            waypoint.label
        ))
    })
}

fn haversine(from: &Coordinates, to: &Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS * c
}
