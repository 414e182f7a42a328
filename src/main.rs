use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use satctl::config::{Config, ConfigChanges, Overrides};
use satctl::models::{
    FilterCreate, FilterUpdate, ListOptions, OrganizationCreate, OrganizationUpdate, RoleCreate,
    RoleUpdate,
};
use satctl::satellite::http::format_api_error;
use satctl::{ApiError, Field, SatelliteClient};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Command-line client for the Red Hat Satellite API
#[derive(Parser, Debug)]
#[command(name = "satctl", version, about, long_about = None)]
struct Cli {
    /// Satellite server URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Username for basic authentication (password from SATELLITE_PASSWORD)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save --url, --username and --insecure to the config file
    Configure {
        /// Turn TLS certificate verification back on
        #[arg(long)]
        secure: bool,
    },
    /// Manage organizations
    #[command(subcommand, visible_alias = "org")]
    Organization(OrganizationCommand),
    /// Manage roles
    #[command(subcommand)]
    Role(RoleCommand),
    /// Manage role filters
    #[command(subcommand)]
    Filter(FilterCommand),
}

#[derive(Subcommand, Debug)]
enum OrganizationCommand {
    List(ListArgs),
    Get { id: u64 },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        redhat_repository_url: Option<String>,
    },
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
enum RoleCommand {
    Get { id: u64 },
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: RoleFields,
    },
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: RoleFields,
    },
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct RoleFields {
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_delimiter = ',')]
    organization_ids: Option<Vec<u64>>,
    #[arg(long, value_delimiter = ',')]
    location_ids: Option<Vec<u64>>,
}

#[derive(Subcommand, Debug)]
enum FilterCommand {
    Get { id: u64 },
    Create {
        #[arg(long)]
        role_id: u64,
        #[command(flatten)]
        fields: FilterFields,
    },
    Update {
        id: u64,
        #[arg(long)]
        role_id: Option<u64>,
        #[command(flatten)]
        fields: FilterFields,
    },
    Delete { id: u64 },
}

#[derive(Args, Debug)]
struct FilterFields {
    /// Search expression limiting the filter, e.g. `hostgroup = web`
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_delimiter = ',')]
    permission_ids: Option<Vec<u64>>,
    /// Use the filter's own organizations and locations instead of the role's
    #[arg(long = "override")]
    override_taxonomy: Option<bool>,
    #[arg(long, value_delimiter = ',')]
    organization_ids: Option<Vec<u64>>,
    #[arg(long, value_delimiter = ',')]
    location_ids: Option<Vec<u64>>,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    page: Option<u64>,
    #[arg(long)]
    per_page: Option<u64>,
    #[arg(long)]
    order: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Return every record, ignoring pagination
    #[arg(long)]
    full: bool,
    #[arg(long)]
    organization_id: Option<u64>,
    #[arg(long)]
    location_id: Option<u64>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        ListOptions {
            page: args.page,
            per_page: args.per_page,
            order: args.order,
            search: args.search,
            full_result: args.full.then_some(true),
            organization_id: args.organization_id,
            location_id: args.location_id,
            ..ListOptions::default()
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("satctl started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("satctl").join("satctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".satctl").join("satctl.log");
    }
    PathBuf::from("satctl.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ApiError>() {
                Some(api) => eprintln!("Error: {}", format_api_error(api)),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();

    if let Command::Configure { secure } = cli.command {
        let changes = ConfigChanges {
            url: cli.url,
            username: cli.username,
            insecure: ConfigChanges::tls_flags(cli.insecure, secure)?,
        };
        config.apply(&changes)?;
        config.save()?;
        return print_json(&config);
    }

    let overrides = Overrides {
        url: cli.url,
        username: cli.username,
        insecure: cli.insecure,
    };
    let settings = config.connection_settings(&overrides)?;
    tracing::info!("Using server: {}", settings.url);

    let client = SatelliteClient::new(&settings)?;

    match cli.command {
        Command::Configure { .. } => Ok(()),
        Command::Organization(cmd) => run_organization(&client, cmd).await,
        Command::Role(cmd) => run_role(&client, cmd).await,
        Command::Filter(cmd) => run_filter(&client, cmd).await,
    }
}

async fn run_organization(client: &SatelliteClient, cmd: OrganizationCommand) -> Result<()> {
    let orgs = client.organizations();
    match cmd {
        OrganizationCommand::List(args) => {
            let options = ListOptions::from(args);
            let (list, _) = orgs.list(Some(&options)).await?;
            print_json(&list)
        }
        OrganizationCommand::Get { id } => print_json(&orgs.get(id).await?.0),
        OrganizationCommand::Create {
            name,
            label,
            description,
        } => {
            let payload = OrganizationCreate {
                label: Field::from_option(label),
                description: Field::from_option(description),
                ..OrganizationCreate::named(name)
            };
            print_json(&orgs.create(&payload).await?.0)
        }
        OrganizationCommand::Update {
            id,
            name,
            description,
            redhat_repository_url,
        } => {
            let payload = OrganizationUpdate {
                name: Field::from_option(name),
                description: Field::from_option(description),
                redhat_repository_url: Field::from_option(redhat_repository_url),
                ..OrganizationUpdate::default()
            };
            print_json(&orgs.update(id, &payload).await?.0)
        }
        OrganizationCommand::Delete { id } => {
            let response = orgs.delete(id).await?;
            println!("Deleted organization {id} ({})", response.status);
            Ok(())
        }
    }
}

async fn run_role(client: &SatelliteClient, cmd: RoleCommand) -> Result<()> {
    let roles = client.roles();
    match cmd {
        RoleCommand::Get { id } => print_json(&roles.get(id).await?.0),
        RoleCommand::Create { name, fields } => {
            let payload = RoleCreate {
                description: Field::from_option(fields.description),
                organization_ids: Field::from_option(fields.organization_ids),
                location_ids: Field::from_option(fields.location_ids),
                ..RoleCreate::named(name)
            };
            print_json(&roles.create(&payload).await?.0)
        }
        RoleCommand::Update { id, name, fields } => {
            let payload = RoleUpdate {
                name: Field::from_option(name),
                description: Field::from_option(fields.description),
                organization_ids: Field::from_option(fields.organization_ids),
                location_ids: Field::from_option(fields.location_ids),
            };
            print_json(&roles.update(id, &payload).await?.0)
        }
        RoleCommand::Delete { id } => {
            let response = roles.delete(id).await?;
            println!("Deleted role {id} ({})", response.status);
            Ok(())
        }
    }
}

async fn run_filter(client: &SatelliteClient, cmd: FilterCommand) -> Result<()> {
    let filters = client.filters();
    match cmd {
        FilterCommand::Get { id } => print_json(&filters.get(id).await?.0),
        FilterCommand::Create { role_id, fields } => {
            let payload = FilterCreate {
                search: Field::from_option(fields.search),
                override_taxonomy: Field::from_option(fields.override_taxonomy),
                permission_ids: Field::from_option(fields.permission_ids),
                organization_ids: Field::from_option(fields.organization_ids),
                location_ids: Field::from_option(fields.location_ids),
                ..FilterCreate::for_role(role_id)
            };
            print_json(&filters.create(&payload).await?.0)
        }
        FilterCommand::Update {
            id,
            role_id,
            fields,
        } => {
            let payload = FilterUpdate {
                role_id: Field::from_option(role_id),
                search: Field::from_option(fields.search),
                override_taxonomy: Field::from_option(fields.override_taxonomy),
                permission_ids: Field::from_option(fields.permission_ids),
                organization_ids: Field::from_option(fields.organization_ids),
                location_ids: Field::from_option(fields.location_ids),
            };
            print_json(&filters.update(id, &payload).await?.0)
        }
        FilterCommand::Delete { id } => {
            let response = filters.delete(id).await?;
            println!("Deleted filter {id} ({})", response.status);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
