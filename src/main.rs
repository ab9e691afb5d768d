mod commands;
mod render;
mod utils;

use anyhow::Result;
use appointments_core::{AppointmentClient, AppointmentsConfig, Column};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::FieldArgs;

#[derive(Parser)]
#[command(name = "appointments")]
#[command(about = "Browse, create and edit appointments stored on a REST server")]
struct Cli {
    /// Server root, e.g. http://localhost:3000 (overrides config and APPOINTMENTS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of appointments
    List {
        /// Only show appointments whose visible columns contain this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Sort by column: date, time, customer, address, city, cost
        #[arg(short, long)]
        sort: Option<Column>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Rows per page: 5, 10, 25 or 100
        #[arg(long)]
        page_size: Option<usize>,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Interactively search, sort, page, edit and delete
    Browse {
        /// Rows per page: 5, 10, 25 or 100
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show a single appointment
    Show { id: u64 },
    /// Create an appointment; missing fields are prompted for
    New {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Edit an appointment; without field flags every field is prompted for
    Edit {
        id: u64,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an appointment after confirmation
    Delete {
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show (or change) the configuration
    Config {
        /// Save a new server root to the config file
        #[arg(long)]
        set_base_url: Option<String>,

        /// Save a new default page size to the config file
        #[arg(long)]
        set_page_size: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = AppointmentsConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Commands::List {
            filter,
            sort,
            desc,
            page_size,
            page,
        } => {
            let options = commands::list::ListOptions {
                filter,
                sort,
                descending: desc,
                page_size: page_size.unwrap_or(config.page_size),
                page,
            };
            commands::list::run(connect(&config)?, options).await
        }
        Commands::Browse { page_size } => {
            commands::browse::run(connect(&config)?, page_size.unwrap_or(config.page_size)).await
        }
        Commands::Show { id } => commands::show::run(connect(&config)?, id).await,
        Commands::New { fields } => commands::new::run(connect(&config)?, &fields)
            .await
            .map(|_| ()),
        Commands::Edit { id, fields } => commands::edit::run(connect(&config)?, id, &fields)
            .await
            .map(|_| ()),
        Commands::Delete { id, yes } => {
            commands::delete::run(connect(&config)?, id, yes, config.page_size).await
        }
        Commands::Config {
            set_base_url,
            set_page_size,
        } => commands::config::run(config, set_base_url, set_page_size),
    }
}

fn connect(config: &AppointmentsConfig) -> Result<AppointmentClient> {
    let client = AppointmentClient::from_config(config)?;
    tracing::debug!(base_url = client.base_url(), "using appointment server");
    Ok(client)
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let default_filter = if verbose == 0 {
        level.to_string()
    } else {
        format!("warn,appointments={level},appointments_core={level}")
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
