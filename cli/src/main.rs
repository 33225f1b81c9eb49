mod preview;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Weekday;
use clap::Parser;
use log::debug;
use playbook_core::{
    parse_args, parse_clock, parse_weekday, resolve_prefix, ConfigRepository, FileConfigRepository,
    FileSessionRepository, RecordCommand, Rgb, ScheduleRecord, Zone,
};
use playbook_core::usecase::DailyPlaybookUseCase;

#[derive(Parser)]
#[command(name = "playbook")]
#[command(about = "Turn a weekly shift export into a printable daily coverage playbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the day columns found in an export
    Days { file: PathBuf },
    /// Import one day into a new session (usage: load week.xlsx --day mon)
    Load {
        file: PathBuf,
        #[arg(long)]
        day: String,
    },
    /// Show the session's records
    List,
    /// Set an employee's zone (prefixes work for both)
    Assign { employee: String, zone: String },
    /// Switch an employee to another zone from a time onwards
    Split { employee: String, at: String, zone: String },
    /// Clear an employee's zone and splits
    Clear { employee: String },
    /// Reorder an employee: up, down, or a 1-based position
    Move { employee: String, to: String },
    /// Delete an employee from the day
    Remove { employee: String },
    /// Add someone by hand (usage: add "Doe, Jane" shift:9A-5P break:12P-1230P zone:cash)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the coverage grid
    Preview,
    /// Write the xlsx playbook
    Generate {
        /// Output file or directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Manage zones
    Zones {
        #[command(subcommand)]
        action: ZoneAction,
    },
}

#[derive(clap::Subcommand)]
enum ZoneAction {
    List,
    /// usage: zones add Greeter FFC0CB (a leading # must be quoted)
    Add { name: String, color: String },
    Edit {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Remove { name: String },
}

fn parse_day(text: &str) -> Result<Weekday> {
    parse_weekday(text).ok_or_else(|| anyhow!("'{}' is not a day of the week", text))
}

fn record_id(usecase: &DailyPlaybookUseCase<'_, FileConfigRepository, FileSessionRepository>, employee: &str) -> Result<uuid::Uuid> {
    let session = usecase.current_session()?;
    let id = session.roster.find_by_name(employee)?.id;
    Ok(id)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_repo = FileConfigRepository::new(None)?;
    let session_repo = FileSessionRepository::new(None)?;
    let usecase = DailyPlaybookUseCase::new(&config_repo, &session_repo);

    match cli.command {
        Commands::Days { file } => {
            let days = usecase.available_days(&file)?;
            println!("Days in {}:", file.display());
            preview::show_days(&days);
        }
        Commands::Load { file, day } => {
            let day = parse_day(&day)?;
            let session = usecase.load_day(&file, day)?;
            preview::show_records(&session);
            preview::show_warnings(&session.warnings);
        }
        Commands::List => {
            let session = usecase.current_session()?;
            preview::show_records(&session);
            preview::show_warnings(&session.warnings);
        }
        Commands::Assign { employee, zone } => {
            let id = record_id(&usecase, &employee)?;
            preview::show_records(&usecase.edit(RecordCommand::AssignZone { id, zone })?);
        }
        Commands::Split { employee, at, zone } => {
            let id = record_id(&usecase, &employee)?;
            let from = parse_clock(&at)?;
            preview::show_records(&usecase.edit(RecordCommand::SplitZone { id, from, zone })?);
        }
        Commands::Clear { employee } => {
            let id = record_id(&usecase, &employee)?;
            preview::show_records(&usecase.edit(RecordCommand::ClearZone { id })?);
        }
        Commands::Move { employee, to } => {
            let id = record_id(&usecase, &employee)?;
            let command = match to.to_lowercase().as_str() {
                "up" => RecordCommand::MoveUp(id),
                "down" => RecordCommand::MoveDown(id),
                n => {
                    let position: usize = n
                        .parse()
                        .map_err(|_| anyhow!("Expected up, down or a position, got '{}'", to))?;
                    RecordCommand::MoveTo { id, position: position.saturating_sub(1) }
                }
            };
            preview::show_records(&usecase.edit(command)?);
        }
        Commands::Remove { employee } => {
            let id = record_id(&usecase, &employee)?;
            let session = usecase.edit(RecordCommand::Remove(id))?;
            println!("Removed {}.", employee);
            preview::show_records(&session);
        }
        Commands::Add { args } => {
            let parsed = parse_args(&args);
            if parsed.name.is_empty() {
                return Err(anyhow!("A name is required"));
            }

            let known_keys = ["shift", "break", "zone"];
            let mut fields: HashMap<String, String> = HashMap::new();
            for (key, value) in parsed.metadata {
                match resolve_prefix(&key, &known_keys) {
                    Ok(full_key) => {
                        fields.insert(full_key, value);
                    }
                    Err(e) => println!("Warning: {}", e),
                }
            }
            debug!("Manual entry {:?} with {:?}", parsed.name, fields);

            let shift = fields
                .get("shift")
                .ok_or_else(|| anyhow!("A shift is required, e.g. shift:9A-5P"))?;
            let record = ScheduleRecord::manual(&parsed.name, shift, fields.get("break").map(String::as_str), 0)?;
            // Reject a bad zone before the record lands in the session.
            let zone = match fields.get("zone") {
                Some(query) => Some(config_repo.load()?.zones.resolve_name(query)?.name.clone()),
                None => None,
            };
            let id = record.id;
            let mut session = usecase.edit(RecordCommand::Add(record))?;
            if let Some(zone) = zone {
                session = usecase.edit(RecordCommand::AssignZone { id, zone })?;
            }
            println!("Added {}.", parsed.name);
            preview::show_records(&session);
        }
        Commands::Preview => {
            let session = usecase.current_session()?;
            let config = config_repo.load()?;
            let (_, sheet) = usecase.build_sheet(&session, &config)?;
            preview::show_grid(&sheet);
            preview::show_warnings(&session.warnings);
        }
        Commands::Generate { output } => {
            let path = usecase.generate(output.as_deref())?;
            println!("Playbook written to {}", path.display());
        }
        Commands::Zones { action } => run_zone_action(&config_repo, action)?,
    }
    Ok(())
}

fn run_zone_action(config_repo: &FileConfigRepository, action: ZoneAction) -> Result<()> {
    let mut config = config_repo.load()?;
    match action {
        ZoneAction::List => {
            for zone in config.zones.zones() {
                println!("  {}  {}", zone.color, zone.name);
            }
            return Ok(());
        }
        ZoneAction::Add { name, color } => {
            config.zones.add(Zone::new(name.as_str(), Rgb::from_hex(&color)?))?;
            println!("Added zone {}.", name.trim());
        }
        ZoneAction::Edit { name, rename, color } => {
            let current = config.zones.resolve_name(&name)?.clone();
            let color = match color {
                Some(hex) => Rgb::from_hex(&hex)?,
                None => current.color,
            };
            let updated = Zone::new(rename.unwrap_or_else(|| current.name.clone()), color);
            config.zones.update(&current.name, updated.clone())?;
            println!("Updated zone {} -> {} {}.", current.name, updated.name, updated.color);
        }
        ZoneAction::Remove { name } => {
            let target = config.zones.resolve_name(&name)?.name.clone();
            config.zones.remove(&target)?;
            println!("Removed zone {}.", target);
        }
    }
    config_repo.save(&config)?;
    Ok(())
}
