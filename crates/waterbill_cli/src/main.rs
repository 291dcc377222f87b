//! Terminal front end for the water bill splitter.
//!
//! # Responsibility
//! - Resolve config, start logging, open the roster store.
//! - Map each subcommand onto one store or calculation operation.
//! - Render grids, results, and the print view.

mod commands;
mod render;

use commands::{CommandLine, Commands};
use log::{info, warn};
use std::error::Error;
use std::process::ExitCode;
use waterbill_core::db::open_db;
use waterbill_core::{
    init_logging_from_config, AppConfig, BillSession, CalculationOutcome, HomeRef, Month,
    RosterRepository, RosterStore, SqliteRosterRepository,
};

fn main() -> ExitCode {
    let cli = CommandLine::parse_args();
    let config = resolve_config(&cli);

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &CommandLine) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level);
    }
    if let Some(symbol) = &cli.currency {
        config = config.with_currency_symbol(symbol);
    }
    config
}

fn run(command: Commands, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let conn = open_db(config.db_path())?;
    let mut store = RosterStore::open(SqliteRosterRepository::new(&conn))?;
    store.subscribe(|event, towers| println!("{}", render::change_summary(event, towers)));

    match command {
        Commands::Show { tower } => show(&store, tower.as_deref()),
        Commands::Set {
            home,
            residents,
            days,
        } => set_home(&mut store, &home, residents, days),
        Commands::Month { month } => {
            let month = Month::parse(&month)?;
            info!("event=cli_month module=cli month={}", month.label());
            store.apply_calendar_month(month)?;
            Ok(())
        }
        Commands::Months => {
            print!("{}", render::month_list());
            Ok(())
        }
        Commands::Calculate { amount, print } => {
            calculate(&store, &amount, print, &config.currency_symbol);
            Ok(())
        }
        Commands::Reset => {
            store.reset()?;
            Ok(())
        }
    }
}

fn show<R: RosterRepository>(
    store: &RosterStore<R>,
    tower: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let towers: Vec<_> = store
        .towers()
        .iter()
        .filter(|t| tower.map_or(true, |name| t.name.eq_ignore_ascii_case(name)))
        .collect();
    if towers.is_empty() {
        return Err(format!("unknown tower `{}`", tower.unwrap_or_default()).into());
    }

    for (index, tower) in towers.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", render::tower_grid(tower));
    }
    println!();
    println!("Total resident-days: {}", store.total_resident_days());
    Ok(())
}

fn set_home<R: RosterRepository>(
    store: &mut RosterStore<R>,
    reference: &str,
    residents: Option<u32>,
    days: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    if residents.is_none() && days.is_none() {
        return Err("nothing to update; pass --residents and/or --days".into());
    }

    let location = HomeRef::parse(reference)?.resolve(store.towers())?;
    let current = store
        .home(&location.tower_id, location.story_index, location.home_index)
        .ok_or_else(|| format!("home `{reference}` not found"))?;
    let residents = residents.unwrap_or(current.residents);
    let days = days.unwrap_or(current.days_stayed);

    store.update_home(
        &location.tower_id,
        location.story_index,
        location.home_index,
        residents,
        days,
    )?;
    Ok(())
}

fn calculate<R: RosterRepository>(
    store: &RosterStore<R>,
    amount: &str,
    print: bool,
    currency: &str,
) {
    let mut session = BillSession::new();
    match session.calculate(store.towers(), amount) {
        CalculationOutcome::Calculated { .. } => {
            if let Some(report) = session.report() {
                let rendered = if print {
                    render::print_view(&report, currency)
                } else {
                    render::results_table(&report, currency)
                };
                print!("{rendered}");
            }
        }
        CalculationOutcome::SkippedInvalidAmount => {
            eprintln!("No shares calculated: amount must be a positive number.");
        }
        CalculationOutcome::SkippedZeroResidentDays => {
            eprintln!("No shares calculated: no home has both residents and days stayed.");
        }
    }
}
