pub mod jobs;
pub mod quotes;
pub mod rates;
pub mod routes;
