//! Proportional water bill allocation.
//!
//! # Responsibility
//! - Split a total amount across homes by resident-days.
//! - Flatten a roster into tagged per-home bill records.
//!
//! # Invariants
//! - Never divides by zero: zero total resident-days is an error.
//! - Totals are summed in `u128`, so any slice of `u32` inputs fits.
//! - Never produces a result for a non-finite or non-positive amount.
//! - Output order matches input order, one result per input.
//! - Shares keep full `f64` precision; rounding is a display concern.

use crate::model::bill::BillCalculation;
use crate::model::roster::Tower;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One allocation input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationInput<K> {
    pub key: K,
    pub residents: u32,
    pub days_stayed: u32,
}

/// One allocation output row, keyed like its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<K> {
    pub key: K,
    pub share: f64,
}

/// Reasons an allocation cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationError {
    /// Amount is NaN, infinite, or not strictly positive.
    InvalidAmount(f64),
    /// No home has both residents and days stayed.
    ZeroResidentDays,
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "bill amount must be a positive finite number, got {amount}")
            }
            Self::ZeroResidentDays => {
                write!(f, "total resident-days is zero; no shares computable")
            }
        }
    }
}

impl Error for AllocationError {}

/// Splits `total_amount` across `inputs` proportionally to resident-days.
///
/// # Errors
/// - `InvalidAmount` when `total_amount` is not finite or `<= 0`.
/// - `ZeroResidentDays` when every input has zero resident-days.
pub fn allocate<K: Clone>(
    inputs: &[AllocationInput<K>],
    total_amount: f64,
) -> Result<Vec<Allocation<K>>, AllocationError> {
    if !is_valid_amount(total_amount) {
        return Err(AllocationError::InvalidAmount(total_amount));
    }

    let total_resident_days: u128 = inputs
        .iter()
        .map(|input| u128::from(resident_days(input)))
        .sum();
    if total_resident_days == 0 {
        return Err(AllocationError::ZeroResidentDays);
    }

    let total = total_resident_days as f64;
    Ok(inputs
        .iter()
        .map(|input| Allocation {
            key: input.key.clone(),
            share: (resident_days(input) as f64 / total) * total_amount,
        })
        .collect())
}

/// Computes one bill record per home across all towers, in roster order.
pub fn calculate_bill(
    towers: &[Tower],
    total_amount: f64,
) -> Result<Vec<BillCalculation>, AllocationError> {
    let records: Vec<BillCalculation> = towers
        .iter()
        .flat_map(|tower| {
            tower.stories.iter().flat_map(move |story| {
                story.homes.iter().map(move |home| BillCalculation {
                    tower_id: tower.id.clone(),
                    tower_name: tower.name.clone(),
                    floor: story.floor,
                    home_number: home.number.clone(),
                    residents: home.residents,
                    days_stayed: home.days_stayed,
                    share: 0.0,
                })
            })
        })
        .collect();

    let inputs: Vec<AllocationInput<usize>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| AllocationInput {
            key: index,
            residents: record.residents,
            days_stayed: record.days_stayed,
        })
        .collect();

    let shares = allocate(&inputs, total_amount)?;
    Ok(records
        .into_iter()
        .zip(shares)
        .map(|(record, allocation)| BillCalculation {
            share: allocation.share,
            ..record
        })
        .collect())
}

/// Parses free-form amount text; `None` for anything not a positive finite number.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| is_valid_amount(*amount))
}

fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

fn resident_days<K>(input: &AllocationInput<K>) -> u64 {
    u64::from(input.residents) * u64::from(input.days_stayed)
}
