//! Guardian CLI
//!
//! Command-line view of the local dashboard:
//! - Medication schedule and dose toggling
//! - Screen-time limits and usage
//! - Activities, dashboard summary and the assistant chat

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use guardian::activities::{recommendations, upcoming_activities};
use guardian::assistant::{recent_interventions, Sender};
use guardian::chart::format_hours;
use guardian::config::{generate_default_config, Config};
use guardian::dashboard::DashboardOverview;
use guardian::devices::{mock_usage, total_hours, usage_by_category, LimitCategory};
use guardian::medication::{MedicationEntry, NewMedication};
use guardian::shell::{Shell, NAV_ITEMS};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guardian")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local parental-monitoring dashboard")]
#[command(long_about = "Guardian keeps a child's medication routine, screen-time limits and activities on this device.\nNothing leaves the machine.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: searched in the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show store location and navigation
    Status,

    /// Show or finish first-run setup
    Onboarding {
        /// Mark setup as done
        #[arg(long)]
        complete: bool,
    },

    /// Today's medication
    Meds {
        #[command(subcommand)]
        action: MedsAction,
    },

    /// Screen-time limits
    Limits {
        #[command(subcommand)]
        action: LimitsAction,
    },

    /// Today's app usage
    Usage,

    /// Upcoming activities and recommendations
    Activities,

    /// Ask the assistant something
    Chat {
        /// Message text
        text: String,
    },

    /// Dashboard summary
    Dashboard,
}

#[derive(Subcommand)]
pub enum MedsAction {
    /// List the schedule
    List,
    /// Mark a dose taken, or undo it
    Toggle {
        /// Medication id
        id: u32,
    },
    /// Add a dose to the schedule
    Add {
        name: String,
        dosage: String,
        /// Scheduled time, e.g. "8:00 PM"
        time: String,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Report a side effect
    Report {
        observation: String,
    },
}

#[derive(Subcommand)]
pub enum LimitsAction {
    /// Show every slider
    Show,
    /// Set one slider, in hours
    Set {
        /// gaming, social, education or total
        category: String,
        hours: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.clone();
    }

    let mut logging = config.logging.clone();
    if !cli.verbose {
        logging.level = "warn".to_string();
    }
    guardian::logging::init(&logging, &[]);

    if let Commands::InitConfig { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let shell = Shell::from_config(&config).context("opening local store")?;
    let format = cli.format;

    match cli.command {
        Commands::InitConfig { .. } => {}

        Commands::Status => {
            if format == OutputFormat::Json {
                let body = serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "store": shell.store().backend_name(),
                    "data_dir": config.store.data_dir,
                    "nav": NAV_ITEMS,
                });
                print_json(&body)?;
            } else {
                println!("Guardian v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Store:    {} ({})", shell.store().backend_name(), config.store.data_dir);
                println!("API:      http://{}", config.api.addr());
                println!();
                for item in NAV_ITEMS {
                    println!("  {:<12} {}", item.label, item.path);
                }
            }
        }

        Commands::Onboarding { complete } => {
            let mut onboarding = shell.onboarding()?;
            if complete {
                onboarding.complete()?;
            }
            let completed = onboarding.is_completed();
            onboarding.close();

            if format == OutputFormat::Json {
                print_json(&serde_json::json!({ "completed": completed }))?;
            } else if completed {
                println!("Setup complete.");
            } else {
                println!("Setup not done yet. Run `guardian onboarding --complete` when ready.");
            }
        }

        Commands::Meds { action } => {
            let mut tracker = shell.medication();
            match action {
                MedsAction::List => {
                    if format == OutputFormat::Json {
                        print_json(&tracker.entries())?;
                    } else {
                        print_schedule(tracker.entries());
                        let adherence = tracker.adherence();
                        println!();
                        println!(
                            "{} of {} taken ({:.0}%)",
                            adherence.taken,
                            adherence.total,
                            adherence.rate() * 100.0
                        );
                    }
                }
                MedsAction::Toggle { id } => {
                    let entry = tracker.toggle(id)?;
                    if format == OutputFormat::Json {
                        print_json(&entry)?;
                    } else if entry.taken {
                        println!("{} {} marked {}", entry.name, entry.dosage, entry.status_label());
                    } else {
                        println!("{} {} back to pending", entry.name, entry.dosage);
                    }
                }
                MedsAction::Add {
                    name,
                    dosage,
                    time,
                    notes,
                } => {
                    let entry = tracker.add(NewMedication {
                        name,
                        dosage,
                        time,
                        notes,
                    })?;
                    if format == OutputFormat::Json {
                        print_json(&entry)?;
                    } else {
                        println!("Added #{}: {} {} at {}", entry.id, entry.name, entry.dosage, entry.time);
                    }
                }
                MedsAction::Report { observation } => {
                    let report = tracker.log_side_effect(&observation)?;
                    if format == OutputFormat::Json {
                        print_json(&report)?;
                    } else {
                        println!("Side effect noted at {}", report.reported_at.format("%-I:%M %p"));
                    }
                }
            }
        }

        Commands::Limits { action } => {
            let mut limits = shell.device_limits();
            if let LimitsAction::Set { category, hours } = action {
                let category: LimitCategory = category.parse()?;
                let stored = limits.set_limit(category, hours)?;
                if format == OutputFormat::Table {
                    println!("{} limit set to {}", category.label(), format_hours(stored));
                    println!();
                }
            }

            let views = limits.views();
            if format == OutputFormat::Json {
                print_json(&views)?;
            } else {
                println!("{:<22} {:>8} {:>12}", "Category", "Limit", "Range");
                println!("{}", "-".repeat(44));
                for view in views {
                    println!(
                        "{:<22} {:>8} {:>12}",
                        view.label,
                        format_hours(view.hours),
                        format!("{}-{}h", view.range.min, view.range.max)
                    );
                }
            }
        }

        Commands::Usage => {
            let apps = mock_usage();
            if format == OutputFormat::Json {
                print_json(&apps)?;
            } else {
                println!("{:<12} {:<12} {:>8}", "App", "Category", "Time");
                println!("{}", "-".repeat(34));
                for app in &apps {
                    println!(
                        "{:<12} {:<12} {:>8}",
                        app.app,
                        app.category.as_str(),
                        format_hours(app.hours)
                    );
                }
                println!();
                for point in usage_by_category(&apps) {
                    println!("  {:<10} {}", point.label, format_hours(point.value));
                }
                println!("Total: {}", format_hours(total_hours(&apps)));
            }
        }

        Commands::Activities => {
            let upcoming = upcoming_activities();
            let recommended = recommendations();
            if format == OutputFormat::Json {
                print_json(&serde_json::json!({
                    "upcoming": upcoming,
                    "recommendations": recommended,
                }))?;
            } else {
                println!("Upcoming:");
                for activity in &upcoming {
                    println!("  {:<20} {:<22} {}", activity.title, activity.time, activity.location);
                }
                println!();
                println!("Recommended nearby:");
                for rec in &recommended {
                    println!("  {:<20} {:>4.1}★  {}", rec.title, rec.rating, rec.distance);
                }
            }
        }

        Commands::Chat { text } => {
            let chat = shell.chat();
            let (_, pending) = chat.submit(&text).await?;
            pending.wait().await;

            let messages = chat.messages().await;
            chat.close();

            if format == OutputFormat::Json {
                print_json(&messages)?;
            } else {
                for message in messages {
                    let who = match message.sender {
                        Sender::User => "You",
                        Sender::Assistant => "Guardian",
                    };
                    println!("{:>9}: {}", who, message.text);
                }
            }
        }

        Commands::Dashboard => {
            let overview = DashboardOverview::build();
            if format == OutputFormat::Json {
                print_json(&serde_json::json!({
                    "overview": overview,
                    "interventions": recent_interventions(),
                }))?;
            } else {
                println!("{}", overview.greeting);
                println!();
                for card in &overview.cards {
                    println!("{:<16} {:<22} {}", card.title, card.value, card.badge);
                }
                println!();
                for point in &overview.weekly_screen_time {
                    println!("  {} {:<24} {}", point.label, "█".repeat((point.value * 4.0) as usize), format_hours(point.value));
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_schedule(entries: &[MedicationEntry]) {
    println!(
        "{:<4} {:<10} {:<12} {:<8} {:<10} {}",
        "ID", "Time", "Name", "Dosage", "Status", "Notes"
    );
    println!("{}", "-".repeat(64));
    for entry in entries {
        println!(
            "{:<4} {:<10} {:<12} {:<8} {:<10} {}",
            entry.id,
            entry.time,
            entry.name,
            entry.dosage,
            entry.status_label(),
            entry.notes.as_deref().unwrap_or("")
        );
    }
}
