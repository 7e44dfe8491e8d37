use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use taskpad::config::Config;
use taskpad::daemon::{Daemon, DaemonContext};
use taskpad::storage::JsonFileStorage;
use taskpad::store::TaskStore;

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskpad")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("taskpad.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  Tasks file: {}", config.storage.tasks_file.display());
    }

    match &cli.command {
        None => handle_serve_command(None, None, config),
        Some(Commands::Serve { bind, port }) => handle_serve_command(bind.clone(), *port, config),
        Some(Commands::List) => handle_list_command(config),
        Some(Commands::Add { task }) => handle_add_command(task, config),
        Some(Commands::Toggle { id }) => handle_toggle_command(*id, config),
        Some(Commands::Delete { id }) => handle_delete_command(*id, config),
    }
}

fn open_store(config: &Config) -> TaskStore {
    TaskStore::open(JsonFileStorage::new(&config.storage.tasks_file))
}

fn handle_serve_command(bind: Option<String>, port: Option<u16>, config: &Config) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(bind) = bind {
        server.bind_addr = bind;
    }
    if let Some(port) = port {
        server.port = port;
    }

    let context = DaemonContext::open(&config.storage.tasks_file);
    let daemon = Daemon::new(server.addr(), context);

    info!("Starting daemon on {}", daemon.addr());
    println!("{} http://{}", "Serving tasks on".cyan(), daemon.addr());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(daemon.run()).context("Daemon failed")?;
    Ok(())
}

fn handle_list_command(config: &Config) -> Result<()> {
    let tasks = open_store(config).list()?;
    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return Ok(());
    }

    for task in tasks {
        let mark = if task.done { "[x]".green() } else { "[ ]".normal() };
        println!("{} {:>4}  {}", mark, task.id, task.task);
    }
    Ok(())
}

fn handle_add_command(task: &str, config: &Config) -> Result<()> {
    info!("Adding task: {}", task);
    let record = open_store(config).create(task)?;
    println!("{} {} {}", "Added:".green(), record.id, record.task);
    Ok(())
}

fn handle_toggle_command(id: u64, config: &Config) -> Result<()> {
    info!("Toggling task: {}", id);
    if open_store(config).toggle(id)? {
        println!("{} {}", "Toggled:".green(), id);
    } else {
        println!("{} {}", "No such task:".yellow(), id);
    }
    Ok(())
}

fn handle_delete_command(id: u64, config: &Config) -> Result<()> {
    info!("Deleting task: {}", id);
    if open_store(config).delete(id)? {
        println!("{} {}", "Deleted:".red(), id);
    } else {
        println!("{} {}", "No such task:".yellow(), id);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
