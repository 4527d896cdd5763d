use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use team_checkins::aggregate::CHART_VALUE_DOMAIN;
use team_checkins::config::Config;
use team_checkins::db::{FileBackend, KeyValueBackend, RecordStore};
use team_checkins::dto::{CheckInInput, CheckInPatch, DashboardSummary};
use team_checkins::error::AppResult;
use team_checkins::export::DirectorySink;
use team_checkins::handlers::{check_ins, dashboard, health};
use team_checkins::models::check_in::{parse_calendar_date, ChartPoint, CheckInRecord, Metric};
use team_checkins::providers::{Clock, SystemClock, UuidGenerator};

#[derive(Parser)]
#[command(name = "checkins")]
#[command(about = "Record team check-ins and chart stress and morale over time")]
struct Cli {
    /// Directory holding the stored collection (overrides config)
    #[arg(short, long, env = "CHECKINS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a new check-in
    Submit(SubmitArgs),

    /// List all check-ins in submission order
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one check-in
    Show { id: String },

    /// Edit fields of an existing check-in
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a check-in
    Delete { id: String },

    /// Export all check-ins as check-ins-<date>.csv
    Export {
        /// Target directory (overrides CHECKINS_EXPORT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Per-date averages of one metric
    Chart {
        #[arg(short, long, default_value_t = Metric::Stress)]
        metric: Metric,
        #[arg(long)]
        json: bool,
    },

    /// Dashboard stat cards for one metric
    Summary {
        #[arg(short, long, default_value_t = Metric::Stress)]
        metric: Metric,
        #[arg(long)]
        json: bool,
    },

    /// Check that the stored collection is readable
    Status,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    name: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<String>,
    /// What you worked on since the last check-in
    #[arg(long)]
    since: String,
    /// What you plan to work on next
    #[arg(long)]
    planned: String,
    #[arg(long, default_value = "")]
    blockers: String,
    /// 1 (very low) to 5 (very high)
    #[arg(long)]
    stress: i32,
    /// Required when stress is 5
    #[arg(long)]
    why_stressed: Option<String>,
    /// 1 (very low) to 5 (very high)
    #[arg(long)]
    morale: i32,
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    since: Option<String>,
    #[arg(long)]
    planned: Option<String>,
    #[arg(long)]
    blockers: Option<String>,
    #[arg(long)]
    stress: Option<i32>,
    #[arg(long)]
    why_stressed: Option<String>,
    #[arg(long)]
    morale: Option<i32>,
}

impl From<EditArgs> for CheckInPatch {
    fn from(a: EditArgs) -> Self {
        Self {
            name: a.name,
            date: a.date,
            activities_since: a.since,
            activities_planned: a.planned,
            blockers: a.blockers,
            stress_level: a.stress,
            why_stressed: a.why_stressed,
            morale_level: a.morale,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing(&config);

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = RecordStore::new(FileBackend::new(data_dir), config.storage_key.clone());
    tracing::debug!(backend = %store.backend().describe(), key = %store.key(), "Store opened");

    if let Err(e) = run(cli.command, &store, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| "team_checkins=info".into());

    // stdout carries command output; logs go to stderr
    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run<B: KeyValueBackend>(
    command: Command,
    store: &RecordStore<B>,
    config: &Config,
) -> AppResult<()> {
    let clock = SystemClock;

    match command {
        Command::Submit(args) => {
            let input = CheckInInput {
                name: args.name,
                date: args
                    .date
                    .unwrap_or_else(|| clock.today().format("%Y-%m-%d").to_string()),
                activities_since: args.since,
                activities_planned: args.planned,
                blockers: args.blockers,
                stress_level: args.stress,
                why_stressed: args.why_stressed,
                morale_level: args.morale,
            };
            let record = check_ins::submit(store, input, &clock, &UuidGenerator)?;
            println!("{}", record.id);
        }
        Command::List { json } => {
            let records = check_ins::list(store);
            if json {
                print_json(&records)?;
            } else {
                print_table(&records);
            }
        }
        Command::Show { id } => {
            let record = check_ins::get(store, &id)?;
            print_json(&record)?;
        }
        Command::Edit { id, fields } => {
            let record = check_ins::edit(store, &id, fields.into())?;
            print_json(&record)?;
        }
        Command::Delete { id } => {
            print_json(&check_ins::remove(store, &id))?;
        }
        Command::Export { out_dir } => {
            let sink = DirectorySink::new(out_dir.unwrap_or_else(|| config.export_dir.clone()));
            let records = store.list_all();
            let response = store.export_csv(&records, &sink, clock.today())?;
            println!("{}", response.path);
        }
        Command::Chart { metric, json } => {
            let summary = dashboard::summarize(&store.list_all(), metric);
            if json {
                print_json(&summary.points)?;
            } else {
                println!("{}", summary.title);
                print_chart(&summary.points);
            }
        }
        Command::Summary { metric, json } => {
            let summary = dashboard::summarize(&store.list_all(), metric);
            if json {
                print_json(&summary)?;
            } else {
                print_summary(&summary);
            }
        }
        Command::Status => {
            let (ready, body) = health::readyz(store);
            print_json(&body)?;
            if !ready {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_date(date: &str) -> String {
    parse_calendar_date(date)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn print_table(records: &[CheckInRecord]) {
    if records.is_empty() {
        println!("No check-ins found. Create your first one with `checkins submit`.");
        return;
    }

    println!(
        "{:<8}  {:<20}  {:<12}  {:<8}  {:<8}  {}",
        "ID", "Name", "Date", "Stress", "Morale", "Blockers"
    );
    for r in records {
        let short_id: String = r.id.chars().take(8).collect();
        let stress = format!("{} {:?}", r.stress_level, Metric::Stress.band(r.stress_level));
        let morale = format!("{} {:?}", r.morale_level, Metric::Morale.band(r.morale_level));
        println!(
            "{:<8}  {:<20}  {:<12}  {:<8}  {:<8}  {}",
            short_id,
            r.name,
            display_date(&r.date),
            stress,
            morale,
            r.blockers
        );
        if let Some(reason) = r.why_stressed.as_deref().filter(|_| r.stress_level == 5) {
            println!("{:<8}  why stressed: {}", "", reason);
        }
    }
}

fn print_chart(points: &[ChartPoint]) {
    if points.is_empty() {
        println!("No data available.");
        return;
    }

    const WIDTH: f64 = 40.0;
    let (lo, hi) = CHART_VALUE_DOMAIN;
    for p in points {
        let clamped = p.value.clamp(lo, hi);
        let len = ((clamped - lo) / (hi - lo) * WIDTH).round() as usize;
        println!("{:<12}  {:>4.1}  |{}", display_date(&p.date), p.value, "#".repeat(len + 1));
    }
}

fn print_summary(summary: &DashboardSummary) {
    let label = summary.metric.label();
    println!("Average {}: {:.1} out of 5", label, summary.average);
    println!(
        "Latest {}:  {:.1} {} {:?}",
        label,
        summary.latest,
        summary.trend.arrow(),
        summary.trend
    );
    println!("Total check-ins: {}", summary.total_check_ins);
}
