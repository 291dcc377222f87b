//! Plain-text rendering of grids and results.

use std::fmt::Write;
use waterbill_core::{format_currency, BillReport, Month, RosterEvent, Tower};

const RULE_WIDTH: usize = 44;

/// Occupancy grid of one tower.
pub fn tower_grid(tower: &Tower) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tower {}", tower.name);
    let _ = writeln!(out, "{:<8}{:>12}{:>14}", "Home", "Residents", "Days Stayed");
    let _ = writeln!(out, "{}", "-".repeat(34));
    for home in tower.homes() {
        let _ = writeln!(
            out,
            "{:<8}{:>12}{:>14}",
            home.number, home.residents, home.days_stayed
        );
    }
    out
}

/// Month selector entries, e.g. ` 2  February (28 days)`.
pub fn month_list() -> String {
    let mut out = String::new();
    for month in Month::ALL {
        let _ = writeln!(out, "{:>2}  {}", month.number(), month);
    }
    out
}

/// On-screen results table grouped by tower.
pub fn results_table(report: &BillReport, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Calculation Results");
    let _ = writeln!(
        out,
        "Total bill: {}",
        format_currency(report.total_amount, currency)
    );
    write_sections(&mut out, report, currency);
    let _ = writeln!(out);
    let _ = writeln!(out, "Run with --print for a print-ready copy.");
    out
}

/// Print-formatted variant of the results table.
pub fn print_view(report: &BillReport, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "WATER BILL SHARES");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    write_sections(&mut out, report, currency);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{:<28}{:>16}",
        "TOTAL",
        format_currency(report.allocated_total(), currency)
    );
    out
}

/// One-line summary of a roster change.
pub fn change_summary(event: &RosterEvent, towers: &[Tower]) -> String {
    match event {
        RosterEvent::HomeUpdated {
            tower_id,
            story_index,
            home_index,
        } => towers
            .iter()
            .find(|tower| &tower.id == tower_id)
            .and_then(|tower| {
                let home = tower.home(*story_index, *home_index)?;
                Some(format!(
                    "Updated T{}{}: residents={} days={}",
                    tower.name, home.number, home.residents, home.days_stayed
                ))
            })
            .unwrap_or_else(|| format!("Updated home in tower {tower_id}")),
        RosterEvent::MonthApplied { day_count } => {
            let homes: usize = towers.iter().map(|tower| tower.homes().count()).sum();
            format!("Set days stayed to {day_count} for {homes} homes")
        }
        RosterEvent::Reset => "Roster reset to defaults".to_string(),
    }
}

fn write_sections(out: &mut String, report: &BillReport, currency: &str) {
    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "Tower {}", section.tower_name);
        let _ = writeln!(
            out,
            "{:<10}{:>10}{:>8}{:>16}",
            "Home", "Residents", "Days", "Share"
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for row in &section.rows {
            let _ = writeln!(
                out,
                "{:<10}{:>10}{:>8}{:>16}",
                row.label(),
                row.residents,
                row.display_days(),
                format_currency(row.share, currency)
            );
        }
        let _ = writeln!(
            out,
            "{:<28}{:>16}",
            "Subtotal",
            format_currency(section.subtotal, currency)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{change_summary, month_list, print_view, results_table, tower_grid};
    use waterbill_core::{calculate_bill, BillReport, RosterEvent, Tower, TowerLayout};

    fn small_tower() -> Tower {
        let mut tower = Tower::generate(
            "A",
            TowerLayout {
                floors: 1,
                homes_per_floor: 2,
            },
        );
        tower.stories[0].homes[0].residents = 2;
        tower.stories[0].homes[0].days_stayed = 30;
        tower.stories[0].homes[1].days_stayed = 30;
        tower
    }

    #[test]
    fn grid_lists_every_home() {
        let grid = tower_grid(&small_tower());
        assert!(grid.starts_with("Tower A"));
        assert!(grid.contains("1A"));
        assert!(grid.contains("1B"));
    }

    #[test]
    fn month_list_shows_february_with_28_days() {
        assert!(month_list().contains("February (28 days)"));
    }

    #[test]
    fn results_show_zero_days_for_empty_homes_and_two_decimals() {
        let towers = vec![small_tower()];
        let rows = calculate_bill(&towers, 100.0).unwrap();
        let report = BillReport::from_calculations(&rows, 100.0);

        let table = results_table(&report, "$");
        let empty_row = table
            .lines()
            .find(|line| line.starts_with("TA1B"))
            .expect("row for empty home");
        let fields: Vec<&str> = empty_row.split_whitespace().collect();
        assert_eq!(fields, ["TA1B", "0", "0", "$0.00"]);
        assert!(table.contains("$100.00"));

        let printed = print_view(&report, "$");
        assert!(printed.starts_with("WATER BILL SHARES"));
        assert!(!printed.contains("--print"));
    }

    #[test]
    fn change_summary_names_updated_home() {
        let towers = vec![small_tower()];
        let event = RosterEvent::HomeUpdated {
            tower_id: "a".to_string(),
            story_index: 0,
            home_index: 0,
        };
        assert_eq!(
            change_summary(&event, &towers),
            "Updated TA1A: residents=2 days=30"
        );
    }
}
