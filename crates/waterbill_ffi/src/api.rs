//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roster and bill operations to a graphical shell via FRB.
//! - Flatten core types into plain view/response structs.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every roster mutation goes through `RosterStore` and is saved before
//!   the call returns.
//! - Calculation is stateless here; keeping prior results on a skipped
//!   calculation is the shell's job (`calculated == false`).

use std::path::PathBuf;
use std::sync::OnceLock;
use waterbill_core::db::open_db;
use waterbill_core::{
    core_version as core_version_inner, format_currency, init_logging as init_logging_inner,
    AppConfig, BillSession, CalculationOutcome, Month, RosterResult, RosterStore,
    SqliteRosterRepository, Tower,
};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the data directory and currency symbol used by later calls.
///
/// # FFI contract
/// - First call wins; later calls with different values return an error
///   message. Returns empty string on success.
/// - Calls made before configuration use `AppConfig::from_env()`.
#[flutter_rust_bridge::frb(sync)]
pub fn configure(data_dir: String, currency_symbol: Option<String>) -> String {
    let mut config = AppConfig::from_env().with_data_dir(PathBuf::from(data_dir.trim()));
    if let Some(symbol) = currency_symbol.filter(|s| !s.trim().is_empty()) {
        config = config.with_currency_symbol(symbol);
    }

    let active = APP_CONFIG.get_or_init(|| config.clone());
    if *active == config {
        String::new()
    } else {
        format!(
            "already configured with data dir `{}`",
            active.data_dir.display()
        )
    }
}

/// One home row of a tower grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub id: String,
    pub number: String,
    pub floor: u32,
    pub story_index: u32,
    pub home_index: u32,
    pub residents: u32,
    pub days_stayed: u32,
}

/// One tower grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerView {
    pub id: String,
    pub name: String,
    pub homes: Vec<HomeView>,
}

/// Roster snapshot envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterResponse {
    pub ok: bool,
    pub towers: Vec<TowerView>,
    pub message: String,
}

/// Month selector option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    pub number: u32,
    pub label: String,
    pub days: u32,
}

/// One results row.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub tower_id: String,
    /// e.g. `TA1B`.
    pub label: String,
    pub residents: u32,
    /// 0 for homes without residents.
    pub days: u32,
    pub share: f64,
    pub share_display: String,
}

/// Calculation envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BillResponse {
    /// `false` when nothing was calculated; keep showing prior results.
    pub calculated: bool,
    pub rows: Vec<BillRow>,
    pub total_display: String,
    pub message: String,
}

/// Returns the current roster for rendering.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_snapshot() -> RosterResponse {
    match with_roster_store(|store| Ok(store.towers().iter().map(to_tower_view).collect())) {
        Ok(towers) => RosterResponse {
            ok: true,
            towers,
            message: String::new(),
        },
        Err(message) => RosterResponse {
            ok: false,
            towers: Vec::new(),
            message: format!("roster_snapshot failed: {message}"),
        },
    }
}

/// Updates one home's residents and days stayed.
///
/// Days stayed above the longest month are rejected before touching the store.
/// Returns empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_update_home(
    tower_id: String,
    story_index: u32,
    home_index: u32,
    residents: u32,
    days: u32,
) -> String {
    if days > Month::MAX_DAYS {
        return format!(
            "roster_update_home failed: days stayed {days} exceeds {}",
            Month::MAX_DAYS
        );
    }
    let result = with_roster_store(|store| {
        store.update_home(
            &tower_id,
            story_index as usize,
            home_index as usize,
            residents,
            days,
        )
    });
    match result {
        Ok(()) => String::new(),
        Err(message) => format!("roster_update_home failed: {message}"),
    }
}

/// Selects a month by number (1..12) and applies its day count to every home.
///
/// Returns empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn roster_apply_month(month_number: u32) -> String {
    let Some(month) = Month::from_number(month_number) else {
        return format!("roster_apply_month failed: unknown month {month_number}");
    };
    match with_roster_store(|store| store.apply_calendar_month(month)) {
        Ok(()) => String::new(),
        Err(message) => format!("roster_apply_month failed: {message}"),
    }
}

/// Lists month selector options.
#[flutter_rust_bridge::frb(sync)]
pub fn months() -> Vec<MonthOption> {
    Month::ALL
        .iter()
        .map(|month| MonthOption {
            number: month.number(),
            label: month.label().to_string(),
            days: month.days(),
        })
        .collect()
}

/// Calculates shares for user-entered amount text.
#[flutter_rust_bridge::frb(sync)]
pub fn bill_calculate(amount_text: String) -> BillResponse {
    let currency = active_config().currency_symbol;
    let outcome = with_roster_store(|store| {
        let mut session = BillSession::new();
        let outcome = session.calculate(store.towers(), &amount_text);
        Ok((outcome, session))
    });

    match outcome {
        Ok((CalculationOutcome::Calculated { total_amount, .. }, session)) => BillResponse {
            calculated: true,
            rows: session
                .results()
                .iter()
                .map(|calc| BillRow {
                    tower_id: calc.tower_id.clone(),
                    label: calc.label(),
                    residents: calc.residents,
                    days: calc.display_days(),
                    share: calc.share,
                    share_display: format_currency(calc.share, &currency),
                })
                .collect(),
            total_display: format_currency(total_amount, &currency),
            message: String::new(),
        },
        Ok((CalculationOutcome::SkippedInvalidAmount, _)) => {
            skipped("Amount must be a positive number.")
        }
        Ok((CalculationOutcome::SkippedZeroResidentDays, _)) => {
            skipped("No home has both residents and days stayed.")
        }
        Err(message) => skipped(format!("bill_calculate failed: {message}")),
    }
}

fn skipped(message: impl Into<String>) -> BillResponse {
    BillResponse {
        calculated: false,
        rows: Vec::new(),
        total_display: String::new(),
        message: message.into(),
    }
}

fn to_tower_view(tower: &Tower) -> TowerView {
    let homes = tower
        .stories
        .iter()
        .enumerate()
        .flat_map(|(story_index, story)| {
            story
                .homes
                .iter()
                .enumerate()
                .map(move |(home_index, home)| HomeView {
                    id: home.id.clone(),
                    number: home.number.clone(),
                    floor: story.floor,
                    story_index: story_index as u32,
                    home_index: home_index as u32,
                    residents: home.residents,
                    days_stayed: home.days_stayed,
                })
        })
        .collect();

    TowerView {
        id: tower.id.clone(),
        name: tower.name.clone(),
        homes,
    }
}

fn active_config() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_else(AppConfig::from_env)
}

fn with_roster_store<T>(
    f: impl FnOnce(&mut RosterStore<SqliteRosterRepository<'_>>) -> RosterResult<T>,
) -> Result<T, String> {
    let config = active_config();
    let conn = open_db(config.db_path()).map_err(|err| err.to_string())?;
    let mut store =
        RosterStore::open(SqliteRosterRepository::new(&conn)).map_err(|err| err.to_string())?;
    f(&mut store).map_err(|err| err.to_string())
}
