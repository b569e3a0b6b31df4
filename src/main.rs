use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use billbank::cli::{
    handle_account_command, handle_card_command, handle_complete, handle_list_command, handle_run,
    AccountCommands, CardCommands, ListCommands,
};
use billbank::commands::View;
use billbank::config::{BillbankPaths, Settings};
use billbank::display::format_audit_entries;
use billbank::models::Month;
use billbank::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BILLBANK_LOG";

#[derive(Parser)]
#[command(
    name = "billbank",
    version,
    about = "Terminal bill and bank tracker driven by a completing command line",
    long_about = "Billbank tracks monthly bills, income, bank accounts and credit cards. \
                  Everything is done through one command line that completes as you \
                  type; `run` and `complete` expose the same engine for scripting."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Execute command lines without the TUI
    Run {
        /// One or more command lines, e.g. "new bill Rent" "set bill amount 1200"
        #[arg(required = true)]
        lines: Vec<String>,
        /// Month the lines act on, as YYYY-MM
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Show completions and the state of a partial command line
    Complete {
        /// The partial line
        #[arg(default_value = "")]
        line: String,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Bill commands
    #[command(subcommand)]
    Bill(ListCommands),

    /// Income commands
    #[command(subcommand)]
    Income(ListCommands),

    /// Bank account commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Credit card commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Transfer commands
    #[command(subcommand)]
    Transfer(ListCommands),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BillbankPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::open(paths.clone())?;
    log::debug!("opened data directory {}", paths.data_dir().display());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            billbank::tui::run_tui(&storage, &settings)?;
        }
        Commands::Init => {
            println!("Initializing Billbank at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'billbank' to open the command line, or try:");
            println!("  billbank run \"new bill Rent\" \"set bill amount 1200\"");
        }
        Commands::Config => {
            println!("Billbank Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:      {}", settings.currency);
            println!("  Date format:   {}", settings.date_format);
            println!("  Tick rate:     {}ms", settings.tick_rate_ms);
            println!(
                "  Password set:  {}",
                settings.protection.password_hash.is_some()
            );
        }
        Commands::Run { lines, month } => {
            handle_run(&storage, &lines, month)?;
        }
        Commands::Complete { line } => {
            handle_complete(&line)?;
        }
        Commands::Audit { count } => {
            let entries = storage.audit().read_recent(count)?;
            println!("{}", format_audit_entries(&entries));
        }
        Commands::Bill(cmd) => handle_list_command(&storage, View::Bills, cmd)?,
        Commands::Income(cmd) => handle_list_command(&storage, View::Income, cmd)?,
        Commands::Transfer(cmd) => handle_list_command(&storage, View::Transfers, cmd)?,
        Commands::Account(cmd) => handle_account_command(&storage, &mut settings, cmd)?,
        Commands::Card(cmd) => handle_card_command(&storage, &mut settings, cmd)?,
    }

    Ok(())
}
