use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use dutyshifts_auth::Credentials;
use dutyshifts_calendar::CalendarClient;
use dutyshifts_core::config::DEFAULT_CONFIG_PATH;
use dutyshifts_core::{Config, Overrides};
use dutyshifts_sheets::SheetsClient;
use dutyshifts_sync::{CalendarReconciler, ScheduleSync, SyncOptions};

/// Sync a monthly duty roster spreadsheet into a dedicated calendar.
#[derive(Parser)]
#[command(name = "dutyshifts", version, about)]
struct Cli {
    /// Sheet name to use
    #[arg(long)]
    sheet: Option<String>,

    /// Start from this date (default: today), YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    /// Clear calendar before adding events
    #[arg(long)]
    clear: bool,

    /// Do not create events, only print them
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dutyshifts_core::init();

    let cli = Cli::parse();

    // Reject a malformed date before touching any external service.
    let start_date = cli
        .date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date value: {raw} (expected YYYY-MM-DD)"))
        })
        .transpose()?;

    let config = Config::load(DEFAULT_CONFIG_PATH)?
        .apply(Overrides {
            sheet_name: cli.sheet,
            start_date,
            clear_events: cli.clear,
            dry_run: cli.dry_run,
        })
        .validated()?;

    let username = config
        .resolved_username()
        .context("Could not determine the roster username")?;

    let credentials = Credentials::new(
        config.auth.client_id.clone(),
        config.auth.client_secret.clone(),
        config.auth.token_store.clone(),
    );
    let access_token = credentials.access_token().await?;

    let sheets = SheetsClient::new(access_token, &config.sheet_id);
    let sync = ScheduleSync::new(
        sheets,
        SyncOptions {
            sheet_name: config.sheet_name.clone(),
            sheet_range: config.sheet_range.clone(),
            username,
            start_date: config
                .start_date
                .unwrap_or_else(|| Local::now().date_naive()),
            alarm_times: config.alarm_times.clone(),
        },
    );

    let events = sync.load_events().await?;

    if config.dry_run {
        print!("{}", ScheduleSync::render_report(&events));
    } else {
        let reconciler = CalendarReconciler::new(CalendarClient::new(access_token));
        sync.apply(
            &reconciler,
            &config.calendar_name,
            !config.clear_events,
            &events,
        )
        .await?;
    }

    Ok(())
}
