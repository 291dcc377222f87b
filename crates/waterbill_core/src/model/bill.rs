//! Derived per-home bill record.

use serde::Serialize;

/// One home's share of a calculation run.
///
/// Produced fresh on every calculation and replaced wholesale by the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCalculation {
    pub tower_id: String,
    pub tower_name: String,
    pub floor: u32,
    pub home_number: String,
    pub residents: u32,
    /// Stored value at calculation time, even when `residents == 0`.
    pub days_stayed: u32,
    /// Full-precision share; rounding happens only at display time.
    pub share: f64,
}

impl BillCalculation {
    /// Days shown in results; homes without residents always show 0.
    pub fn display_days(&self) -> u32 {
        if self.residents == 0 {
            0
        } else {
            self.days_stayed
        }
    }

    /// Results label, e.g. `TA1B`.
    pub fn label(&self) -> String {
        format!("T{}{}", self.tower_name, self.home_number)
    }
}
