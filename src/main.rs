use animelist::modules::edit::FormKind;
use animelist::modules::manager::{EditOutcome, ListManager};
use animelist::modules::presenter::ConsolePresenter;
use animelist::modules::serialize::{Event, OutputFormat, RunConfig, is_not_found, load_run_config, load_script};
use std::error::Error;
use simplelog::*;
use std::fs::OpenOptions;
use log::{info, warn, error};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "animelist",
    version,
    about = "Replays a scripted add/edit session against an anime list and prints both lists"
)]
struct Cli {
    #[arg(short = 's', long = "script", default_value = "./session.toml")]
    script: String,

    #[arg(short = 'c', long = "config", default_value = "./animelist.toml")]
    config: String,

    #[arg(short = 'l', long = "log-file")]
    log_file: Option<String>,

    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the lists as JSON instead of text.
    #[arg(long = "json")]
    json: bool,
}

fn init_logger(log_path: &str, level: &str) -> Result<(), Box<dyn Error>> {
    WriteLogger::init(
        level
            .parse::<LevelFilter>()
            .map_err(|e| format!("invalid log level {level}: {e}"))?,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build(),
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?,
    )?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<RunConfig, Box<dyn Error>> {
    let mut config = match load_run_config(&cli.config) {
        Ok(config) => config,
        Err(err) if is_not_found(&err) => RunConfig::default(),
        Err(err) => return Err(err),
    };
    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }
    if cli.json {
        config.output = OutputFormat::Json;
    }
    Ok(config)
}

async fn apply(manager: &mut ListManager<ConsolePresenter>, event: &Event) {
    match event {
        Event::Add(submission) => match manager.submit_add(submission).await {
            Ok(id) => info!("Stored {id}"),
            Err(e) => error!("Add rejected: {e}"),
        },
        Event::OpenEdit { id } => {
            if !manager.open_edit(*id) {
                warn!("No entry {id} to edit");
            }
        }
        Event::Edit(submission) => match manager.submit_edit(submission) {
            Ok(EditOutcome::Updated(id)) => info!("Saved edit of {id}"),
            Ok(EditOutcome::Stale(id)) => warn!("Entry {id} vanished while editing"),
            Ok(EditOutcome::Idle) => warn!("Edit submitted without an open entry"),
            Err(e) => error!("Edit rejected: {e}"),
        },
        Event::Close { signal } => {
            manager.close_edit(*signal);
        }
        Event::Blur { form, field, value } => {
            manager.field_blur(*form, *field, value);
        }
        Event::Input { form, field } => manager.field_input(*form, *field),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logger(&config.log_file, &config.log_level)?;

    let script = load_script(&cli.script)?;
    info!("Replaying {} events from {}", script.events.len(), cli.script);

    let mut manager = ListManager::new(ConsolePresenter::default());
    for event in &script.events {
        apply(&mut manager, event).await;
    }
    if manager.session().is_active() {
        warn!("Session ended with the {} surface still open", FormKind::Edit);
    }

    let view = manager.render();
    match config.output {
        OutputFormat::Text => print!("{view}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    info!("Done after {} renders", manager.presenter().renders);

    Ok(())
}
