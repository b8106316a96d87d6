use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod outline;

use config::OrionConfig;

#[derive(Parser, Debug)]
#[command(
    name = "orion",
    version,
    about = "Schema-driven UI composer: edit, preview, run and export component trees",
    arg_required_else_help = true
)]
struct Cli {
    /// Config file (defaults to $ORION_CONFIG, then ./orion.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the starter dashboard as the working schema
    Init {
        /// Overwrite an existing schema
        #[arg(long)]
        force: bool,
    },
    /// List the built-in templates
    Templates,
    /// Add a component (or a template with --template) under a container
    Add {
        /// Component kind, e.g. Button, or a template id with --template
        kind: String,
        /// Container to add under (defaults to the root)
        #[arg(long, value_name = "ID")]
        parent: Option<String>,
        #[arg(long)]
        template: bool,
    },
    /// Set one prop on a node; the value is parsed as JSON, else taken as text
    Set { id: String, key: String, value: String },
    /// Delete a node and its subtree
    Delete { id: String },
    /// Export the working schema as framework source
    Export {
        /// react (jsx) or vue (sfc)
        #[arg(long, short, default_value = "react")]
        dialect: String,
        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Name of the exported React component
        #[arg(long, value_name = "NAME")]
        component: Option<String>,
    },
    /// Print the rendered tree as an outline
    Preview {
        /// Resolve visibility and bindings against the saved runtime state
        #[arg(long)]
        interactive: bool,
        #[arg(long, value_name = "ID")]
        select: Option<String>,
    },
    /// Dispatch an interaction event in interactive mode and persist the state
    Fire {
        id: String,
        #[arg(value_enum)]
        event: EventArg,
        /// New value for `change`, as JSON or text
        #[arg(long)]
        value: Option<String>,
    },
    /// Manage saved projects
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    /// Fill a DataList with AI-generated items
    GenerateItems {
        /// DataList node id
        id: String,
        prompt: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectsCommand {
    /// Save the working schema under a name
    Save { name: String },
    /// List saved projects
    List,
    /// Print a saved project's schema
    Show { id: String },
    /// Replace the working schema with a saved project
    Load { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EventArg {
    Select,
    Click,
    Hover,
    Blur,
    Change,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = OrionConfig::load(cli.config.as_deref())?;
    init_logging(&config);

    match cli.command {
        Command::Init { force } => commands::init(&config, force),
        Command::Templates => commands::templates(),
        Command::Add {
            kind,
            parent,
            template,
        } => commands::add(&config, &kind, parent.as_deref(), template),
        Command::Set { id, key, value } => commands::set(&config, &id, &key, &value),
        Command::Delete { id } => commands::delete(&config, &id),
        Command::Export {
            dialect,
            out,
            component,
        } => commands::export(&config, &dialect, out.as_deref(), component),
        Command::Preview { interactive, select } => commands::preview(&config, interactive, select.as_deref()),
        Command::Fire { id, event, value } => commands::fire(&config, &id, event, value.as_deref()).await,
        Command::Projects { command } => match command {
            ProjectsCommand::Save { name } => commands::save_project(&config, &name),
            ProjectsCommand::List => commands::list_projects(&config),
            ProjectsCommand::Show { id } => commands::show_project(&config, &id),
            ProjectsCommand::Load { id } => commands::load_project(&config, &id),
        },
        Command::GenerateItems { id, prompt } => commands::generate_items(&config, &id, &prompt).await,
    }
}

/// `RUST_LOG` wins, then `[log] filter`, then `info`. Logs go to stderr so
/// exported source on stdout stays clean.
fn init_logging(config: &OrionConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log.filter.as_deref().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
