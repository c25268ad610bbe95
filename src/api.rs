use async_trait::async_trait;
use uuid::Uuid;

use crate::distance::RouteOptions;
use crate::entities::{
    Job, JobCard, PaymentStatus, PricingSource, Quote, QuoteParams, RateConfig, Route, Waypoint,
};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    async fn create_route(
        &self,
        waypoints: Vec<Waypoint>,
        options: RouteOptions,
    ) -> Result<Route, Error>;
    async fn find_route(&self, token: Uuid) -> Result<Route, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(&self, route_token: Uuid, params: QuoteParams) -> Result<Quote, Error>;
    async fn find_quote(&self, token: Uuid) -> Result<Quote, Error>;
    async fn recompute_quote(&self, token: Uuid, new_base: f64) -> Result<Quote, Error>;
}

#[async_trait]
pub trait RateAPI {
    async fn load_rates(&self) -> Result<RateConfig, Error>;
    async fn save_rates(&self, config: RateConfig) -> Result<RateConfig, Error>;
}

#[async_trait]
pub trait JobAPI {
    async fn create_job(&self, card: JobCard) -> Result<Job, Error>;
    async fn find_job(&self, id: Uuid) -> Result<Job, Error>;
    async fn attach_pricing(&self, job_id: Uuid, source: PricingSource) -> Result<Job, Error>;
    async fn update_payment_status(
        &self,
        job_id: Uuid,
        status: PaymentStatus,
        amount_paid: f64,
    ) -> Result<Job, Error>;
}

pub trait API: RouteAPI + QuoteAPI + RateAPI + JobAPI {}
