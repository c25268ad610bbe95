use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::ServiceType;
use crate::error::{
    invalid_input_error, invalid_payment_state_error, invalid_state_error, Error,
};

const PAYMENT_TOLERANCE: f64 = 1e-6;

/// Intake details captured when a breakdown call comes in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobCard {
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_registration: String,
    pub service_type: ServiceType,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Priced,
    Closed,
}

impl JobStatus {
    pub fn name(&self) -> String {
        match self {
            Self::Open => "open".into(),
            Self::Priced => "priced".into(),
            Self::Closed => "closed".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

/// The pricing attached to a job once a quote is accepted. Mutated by
/// staff edits and payment entries; lives and dies with its job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingRecord {
    pub final_price: f64,
    pub payment_status: PaymentStatus,
    pub amount_paid: f64,
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

impl PricingRecord {
    pub fn new(final_price: f64, notes: String) -> Self {
        Self {
            final_price,
            payment_status: PaymentStatus::Unpaid,
            amount_paid: 0.0,
            notes,
            updated_at: Utc::now(),
        }
    }

    /// Applies a staff-entered payment transition. Allowed moves are
    /// unpaid -> partial, unpaid -> paid, partial -> partial (amount
    /// correction) and partial -> paid; paid is terminal.
    pub fn record_payment(&mut self, status: PaymentStatus, amount_paid: f64) -> Result<(), Error> {
        if self.payment_status == PaymentStatus::Paid {
            return Err(invalid_payment_state_error("pricing is already settled"));
        }

        if self.payment_status == PaymentStatus::Partial && status == PaymentStatus::Unpaid {
            return Err(invalid_payment_state_error(
                "a partial payment cannot revert to unpaid",
            ));
        }

        match status {
            PaymentStatus::Unpaid => {
                if amount_paid != 0.0 {
                    return Err(invalid_payment_state_error(
                        "unpaid requires amount_paid of 0",
                    ));
                }
            }
            PaymentStatus::Partial => {
                if amount_paid <= 0.0 || amount_paid >= self.final_price {
                    return Err(invalid_payment_state_error(
                        "partial requires amount_paid strictly between 0 and the final price",
                    ));
                }
            }
            PaymentStatus::Paid => {
                if (amount_paid - self.final_price).abs() > PAYMENT_TOLERANCE {
                    return Err(invalid_payment_state_error(
                        "paid requires amount_paid equal to the final price",
                    ));
                }
            }
        }

        self.payment_status = status;
        self.amount_paid = amount_paid;
        self.updated_at = Utc::now();

        Ok(())
    }

    pub fn outstanding_balance(&self) -> f64 {
        self.final_price - self.amount_paid
    }
}

/// Where the pricing attached to a job comes from: an accepted quote, or a
/// figure entered directly by staff.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    Quote { quote_token: Uuid },
    Manual { final_price: f64, notes: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub card: JobCard,
    pub pricing: Option<PricingRecord>,
}

impl Job {
    pub fn new(card: JobCard) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Open,
            card,
            pricing: None,
        }
    }

    /// Attaches (or replaces, last write wins) the pricing for this job.
    #[tracing::instrument]
    pub fn attach_pricing(&mut self, final_price: f64, notes: String) -> Result<(), Error> {
        if self.status == JobStatus::Closed {
            return Err(invalid_state_error());
        }

        if final_price < 0.0 {
            return Err(invalid_input_error());
        }

        self.pricing = Some(PricingRecord::new(final_price, notes));
        self.status = JobStatus::Priced;

        Ok(())
    }

    #[tracing::instrument]
    pub fn record_payment(&mut self, status: PaymentStatus, amount_paid: f64) -> Result<(), Error> {
        let pricing = self.pricing.as_mut().ok_or_else(invalid_state_error)?;

        pricing.record_payment(status, amount_paid)?;

        if pricing.payment_status == PaymentStatus::Paid {
            self.status = JobStatus::Closed;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced_job(final_price: f64) -> Job {
        let mut job = Job::new(JobCard {
            customer_name: "T. Botha".into(),
            customer_phone: "+27115550199".into(),
            vehicle_registration: "ND 123-456".into(),
            service_type: ServiceType::Tow,
            notes: "".into(),
        });

        job.attach_pricing(final_price, "accepted quote".into()).unwrap();

        job
    }

    #[test]
    fn new_pricing_starts_unpaid() {
        let job = priced_job(675.0);
        let pricing = job.pricing.as_ref().unwrap();

        assert_eq!(pricing.payment_status, PaymentStatus::Unpaid);
        assert_eq!(pricing.amount_paid, 0.0);
        assert_eq!(job.status, JobStatus::Priced);
    }

    #[test]
    fn partial_then_paid_settles_the_job() {
        let mut job = priced_job(675.0);

        job.record_payment(PaymentStatus::Partial, 300.0).unwrap();
        assert_eq!(job.pricing.as_ref().unwrap().outstanding_balance(), 375.0);

        job.record_payment(PaymentStatus::Paid, 675.0).unwrap();
        assert_eq!(job.status, JobStatus::Closed);
    }

    #[test]
    fn paid_with_wrong_amount_is_rejected() {
        let mut job = priced_job(675.0);

        let err = job.record_payment(PaymentStatus::Paid, 600.0).unwrap_err();

        assert_eq!(err.code, 105);
    }

    #[test]
    fn partial_must_be_strictly_between_zero_and_final() {
        let mut job = priced_job(675.0);

        assert_eq!(job.record_payment(PaymentStatus::Partial, 0.0).unwrap_err().code, 105);
        assert_eq!(job.record_payment(PaymentStatus::Partial, 675.0).unwrap_err().code, 105);
        assert!(job.record_payment(PaymentStatus::Partial, 674.99).is_ok());
    }

    #[test]
    fn partial_cannot_revert_to_unpaid() {
        let mut job = priced_job(675.0);

        job.record_payment(PaymentStatus::Partial, 100.0).unwrap();

        assert_eq!(job.record_payment(PaymentStatus::Unpaid, 0.0).unwrap_err().code, 105);
    }

    #[test]
    fn paid_is_terminal() {
        let mut job = priced_job(675.0);

        job.record_payment(PaymentStatus::Paid, 675.0).unwrap();

        assert_eq!(job.record_payment(PaymentStatus::Partial, 10.0).unwrap_err().code, 105);
    }

    #[test]
    fn payment_without_pricing_is_an_invalid_state() {
        let mut job = Job::new(JobCard {
            customer_name: "T. Botha".into(),
            customer_phone: "+27115550199".into(),
            vehicle_registration: "ND 123-456".into(),
            service_type: ServiceType::Tow,
            notes: "".into(),
        });

        assert_eq!(job.record_payment(PaymentStatus::Paid, 0.0).unwrap_err().code, 100);
    }
}
