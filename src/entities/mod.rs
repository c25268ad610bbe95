mod job;
mod location;
mod quote;
mod rates;
mod route;

pub use job::{Job, JobCard, JobStatus, PaymentStatus, PricingRecord, PricingSource};
pub use location::{Coordinates, Waypoint};
pub use quote::{
    Discount, DiscountKind, ManualCharge, Quote, QuoteParams, QuoteResult, ServiceRequest,
};
pub use rates::{RateConfig, ServiceType};
pub use route::{Route, RouteLeg};
