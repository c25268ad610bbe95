use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{invalid_rate_config_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Tow,
    Recovery,
    Winching,
    Jumpstart,
    TyreChange,
    FuelDelivery,
    Other,
}

impl ServiceType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tow => "tow",
            Self::Recovery => "recovery",
            Self::Winching => "winching",
            Self::Jumpstart => "jumpstart",
            Self::TyreChange => "tyre_change",
            Self::FuelDelivery => "fuel_delivery",
            Self::Other => "other",
        }
    }
}

/// Session-wide pricing configuration, edited by an administrator and read
/// by every quote computation. Multipliers are premiums, never discounts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateConfig {
    pub rate_per_km: f64,
    pub base_fees: BTreeMap<ServiceType, f64>,
    pub after_hours_multiplier: f64,
    pub weekend_multiplier: f64,
    pub fuel_price_per_litre: f64,
    pub default_consumption_per_100km: f64,
}

impl RateConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.rate_per_km < 0.0 {
            return Err(invalid_rate_config_error("rate_per_km must not be negative"));
        }

        if self.base_fees.values().any(|fee| *fee < 0.0) {
            return Err(invalid_rate_config_error("base fees must not be negative"));
        }

        if self.after_hours_multiplier < 1.0 {
            return Err(invalid_rate_config_error(
                "after_hours_multiplier must be at least 1.0",
            ));
        }

        if self.weekend_multiplier < 1.0 {
            return Err(invalid_rate_config_error(
                "weekend_multiplier must be at least 1.0",
            ));
        }

        if self.fuel_price_per_litre < 0.0 {
            return Err(invalid_rate_config_error(
                "fuel_price_per_litre must not be negative",
            ));
        }

        if self.default_consumption_per_100km < 0.0 {
            return Err(invalid_rate_config_error(
                "default_consumption_per_100km must not be negative",
            ));
        }

        Ok(())
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        let base_fees = BTreeMap::from([
            (ServiceType::Tow, 300.0),
            (ServiceType::Recovery, 450.0),
            (ServiceType::Winching, 350.0),
            (ServiceType::Jumpstart, 150.0),
            (ServiceType::TyreChange, 150.0),
            (ServiceType::FuelDelivery, 120.0),
            (ServiceType::Other, 200.0),
        ]);

        Self {
            rate_per_km: 15.0,
            base_fees,
            after_hours_multiplier: 1.5,
            weekend_multiplier: 1.2,
            fuel_price_per_litre: 24.50,
            default_consumption_per_100km: 15.0,
        }
    }
}
