use std::path::Path;

use abi::{parse_calendar_day, Config};
use anyhow::{anyhow, Context, Result};
use booking_calendar::CalendarCursor;
use booking_service::{calendar_bookings, render, AppState, DegradedReason, Fetched};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "calendar-cli", about = "Booking calendar for a property")]
struct Cli {
    /// YAML config file
    #[arg(short, long, default_value = "~/.config/booking-calendar/config.yml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Month grid with booking counts and a summary
    Month {
        /// property id, defaults to the selected property
        #[arg(short, long)]
        property: Option<String>,
        /// YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// move this many months from `month`
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
    /// Bookings occupying one day
    Day {
        #[arg(short, long)]
        property: Option<String>,
        /// YYYY-MM-DD
        date: String,
    },
    /// Remember a property as the selected one
    Select { property: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        Config::default()
    });
    let state_path = config.state.path();
    let mut state = AppState::load(&state_path)
        .with_context(|| format!("cannot read state file {}", state_path.display()))?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Month {
            property,
            month,
            shift,
        } => {
            let property_id = property_id(property, &state)?;
            let mut cursor = CalendarCursor::new(today);
            if let Some(month) = month {
                cursor.current = parse_month(&month)?;
            }
            cursor.current = booking_calendar::advance_month(cursor.current, shift);

            let bookings = calendar_bookings(&config, &state)?;
            let fetched = bookings.month(&property_id, cursor.current).await;
            report_degraded(&fetched, &mut state, &state_path)?;

            let index = fetched.data();
            let view = index.month(cursor.current);
            print!("{}", render::render_month(&view, today, cursor.selected));
            println!();
            print!("{}", render::render_summary(&view.summary()));
            if index.skipped() > 0 {
                warn!("{} bookings with unreadable dates were left out", index.skipped());
            }
        }
        Command::Day { property, date } => {
            let property_id = property_id(property, &state)?;
            let day = parse_calendar_day(&date)?;
            let bookings = calendar_bookings(&config, &state)?;
            let fetched = bookings.month(&property_id, day).await;
            report_degraded(&fetched, &mut state, &state_path)?;
            print!(
                "{}",
                render::render_day(day, &fetched.data().bookings_on(day))
            );
        }
        Command::Select { property } => {
            let client = booking_service::ApiClient::new(&config.api)?
                .with_token(state.auth.token.clone());
            let properties = booking_service::PropertyService::new(client);
            let selected = booking_service::PropertySource::get(&properties, &property)
                .await
                .with_context(|| format!("cannot load property {}", property))?;
            info!("selected {} ({})", selected.name, selected.id);
            state.select_property(Some(selected));
            state.save(&state_path)?;
        }
    }
    Ok(())
}

fn property_id(arg: Option<String>, state: &AppState) -> Result<String> {
    arg.or_else(|| state.selected_property_id().map(str::to_string))
        .ok_or_else(|| anyhow!("no property given and none selected"))
}

fn parse_month(s: &str) -> Result<NaiveDate> {
    parse_calendar_day(&format!("{}-01", s.trim()))
        .with_context(|| format!("invalid month {}, expected YYYY-MM", s))
}

fn report_degraded<T>(
    fetched: &Fetched<T>,
    state: &mut AppState,
    state_path: &Path,
) -> Result<()> {
    match fetched.reason() {
        None => {}
        Some(DegradedReason::Unauthorized) => {
            eprintln!("session expired, showing offline data only");
            state.logout();
            state.save(state_path)?;
        }
        Some(DegradedReason::Unavailable(reason)) => {
            eprintln!("backend unavailable ({}), showing offline data only", reason);
        }
    }
    Ok(())
}
