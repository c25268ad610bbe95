use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Route, ServiceType};

/// An ad-hoc itemized addition to a quote, e.g. winching or prep-to-tow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManualCharge {
    pub description: String,
    pub amount: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percent,
    Fixed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
}

/// The situational input to a quote. The dispatch timestamp carries the
/// caller's UTC offset so after-hours and weekend checks use local time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service_type: ServiceType,
    pub dispatch_time: DateTime<FixedOffset>,
    pub route: Route,
    pub vehicle_consumption: Option<f64>,
    pub manual_charges: Vec<ManualCharge>,
    pub discount: Option<Discount>,
}

/// The situational half of a quote request, as submitted by a caller; the
/// engine pairs it with a stored route to form a `ServiceRequest`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteParams {
    pub service_type: ServiceType,
    pub dispatch_time: DateTime<FixedOffset>,
    pub vehicle_consumption: Option<f64>,
    #[serde(default)]
    pub manual_charges: Vec<ManualCharge>,
    pub discount: Option<Discount>,
}

impl QuoteParams {
    pub fn into_request(self, route: Route) -> ServiceRequest {
        ServiceRequest {
            service_type: self.service_type,
            dispatch_time: self.dispatch_time,
            route,
            vehicle_consumption: self.vehicle_consumption,
            manual_charges: self.manual_charges,
            discount: self.discount,
        }
    }
}

/// Fully itemized outcome of a quote computation. Derived entirely from a
/// `ServiceRequest` and a `RateConfig`; recomputable at any time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub base_fee: f64,
    pub distance_cost: f64,
    pub after_hours_applied: bool,
    pub weekend_applied: bool,
    pub surcharge_amount: f64,
    pub manual_charges_total: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub fuel_used: f64,
    pub fuel_cost: f64,
    pub gross_profit: f64,
    pub profit_margin_percent: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub token: Uuid,
    pub request: ServiceRequest,
    pub result: QuoteResult,
    pub base_override: Option<f64>,
}

impl Quote {
    pub fn new(request: ServiceRequest, result: QuoteResult) -> Self {
        Self {
            token: Uuid::new_v4(),
            request,
            result,
            base_override: None,
        }
    }
}
