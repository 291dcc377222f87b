//! Result grouping and currency formatting shared by presentation layers.

use crate::model::bill::BillCalculation;
use serde::Serialize;

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Results of one tower.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerSection {
    pub tower_id: String,
    pub tower_name: String,
    pub rows: Vec<BillCalculation>,
    pub subtotal: f64,
}

/// Calculation results grouped by tower, in roster order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReport {
    pub total_amount: f64,
    pub sections: Vec<TowerSection>,
}

impl BillReport {
    pub fn from_calculations(calculations: &[BillCalculation], total_amount: f64) -> Self {
        let mut sections: Vec<TowerSection> = Vec::new();
        for calc in calculations {
            let existing = sections
                .iter()
                .position(|section| section.tower_id == calc.tower_id);
            let section = match existing {
                Some(index) => &mut sections[index],
                None => {
                    sections.push(TowerSection {
                        tower_id: calc.tower_id.clone(),
                        tower_name: calc.tower_name.clone(),
                        rows: Vec::new(),
                        subtotal: 0.0,
                    });
                    let last = sections.len() - 1;
                    &mut sections[last]
                }
            };
            section.subtotal += calc.share;
            section.rows.push(calc.clone());
        }

        Self {
            total_amount,
            sections,
        }
    }

    /// Sum of every share; equals `total_amount` up to float rounding.
    pub fn allocated_total(&self) -> f64 {
        self.sections.iter().map(|section| section.subtotal).sum()
    }
}

/// Formats an amount with two decimals and a prefixed symbol, e.g. `₹1400.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{symbol}{amount:.2}")
}
