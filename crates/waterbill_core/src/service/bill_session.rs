//! Bill session: the displayed result list of the last calculation.
//!
//! # Invariants
//! - Results are replaced only by a successful calculation.
//! - Invalid amounts and zero resident-days leave prior results untouched.

use crate::allocation::{calculate_bill, parse_amount, AllocationError};
use crate::model::bill::BillCalculation;
use crate::model::roster::Tower;
use crate::report::BillReport;
use log::{info, warn};

/// Result of one calculate request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalculationOutcome {
    /// New results replaced the previous ones.
    Calculated { homes: usize, total_amount: f64 },
    /// Amount text was not a positive finite number; engine not invoked.
    SkippedInvalidAmount,
    /// No home has resident-days; previous results kept.
    SkippedZeroResidentDays,
}

impl CalculationOutcome {
    pub fn is_calculated(&self) -> bool {
        matches!(self, Self::Calculated { .. })
    }
}

/// Transient calculation state held by a presentation layer.
#[derive(Debug, Clone, Default)]
pub struct BillSession {
    results: Vec<BillCalculation>,
    total_amount: Option<f64>,
}

impl BillSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates user-entered amount text, then calculates.
    pub fn calculate(&mut self, towers: &[Tower], amount_text: &str) -> CalculationOutcome {
        match parse_amount(amount_text) {
            Some(amount) => self.calculate_amount(towers, amount),
            None => {
                info!("event=bill_calculate module=bill status=skipped reason=invalid_amount");
                CalculationOutcome::SkippedInvalidAmount
            }
        }
    }

    /// Calculates shares for an already-parsed amount.
    pub fn calculate_amount(&mut self, towers: &[Tower], amount: f64) -> CalculationOutcome {
        match calculate_bill(towers, amount) {
            Ok(results) => {
                let homes = results.len();
                self.results = results;
                self.total_amount = Some(amount);
                info!(
                    "event=bill_calculate module=bill status=ok homes={} amount={}",
                    homes, amount
                );
                CalculationOutcome::Calculated {
                    homes,
                    total_amount: amount,
                }
            }
            Err(AllocationError::InvalidAmount(_)) => {
                info!("event=bill_calculate module=bill status=skipped reason=invalid_amount");
                CalculationOutcome::SkippedInvalidAmount
            }
            Err(AllocationError::ZeroResidentDays) => {
                warn!("event=bill_calculate module=bill status=skipped reason=zero_resident_days");
                CalculationOutcome::SkippedZeroResidentDays
            }
        }
    }

    /// Results of the last successful calculation, in roster order.
    pub fn results(&self) -> &[BillCalculation] {
        &self.results
    }

    /// Amount used by the last successful calculation.
    pub fn total_amount(&self) -> Option<f64> {
        self.total_amount
    }

    /// Grouped view of the current results, if any.
    pub fn report(&self) -> Option<BillReport> {
        let total_amount = self.total_amount?;
        Some(BillReport::from_calculations(&self.results, total_amount))
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.total_amount = None;
    }
}
