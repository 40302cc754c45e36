//! ros-explorer CLI: search the ROS component catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use ros_component_explorer::catalog::ComponentCatalog;
use ros_component_explorer::config::ExplorerConfig;
use ros_component_explorer::loader;
use ros_component_explorer::model::Component;
use ros_component_explorer::store::EmbeddedStore;
use ros_component_explorer::vocab;

#[derive(Parser)]
#[command(name = "ros-explorer", version, about = "Semantic catalog of ROS components")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/ros-component-explorer/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Turtle dataset to load into the embedded store.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Persistent oxigraph directory instead of an in-memory store.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Remote SPARQL query endpoint; bypasses the embedded store.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every component.
    List,

    /// Search components by name, class or description (case-insensitive).
    Search {
        /// Substring to look for.
        term: String,
    },

    /// Show all details of one component.
    Show {
        /// Component IRI, `comp:` name, or bare local name (e.g. "amcl").
        id: String,
    },

    /// Count the components in the store.
    Count,

    /// Validate the dataset (or endpoint) and report what it holds.
    Check,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ExplorerConfig::resolve(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    if let Some(dir) = cli.store_dir {
        config.store_dir = Some(dir);
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint);
    }

    match cli.command {
        Commands::List => {
            let catalog = ComponentCatalog::from_config(&config)?;
            let components = catalog.list_all()?;
            print_list(&components, cli.json)?;
        }

        Commands::Search { term } => {
            let catalog = ComponentCatalog::from_config(&config)?;
            let components = catalog.search(&term)?;
            print_list(&components, cli.json)?;
        }

        Commands::Show { id } => {
            let catalog = ComponentCatalog::from_config(&config)?;
            let component = catalog.get_details(&vocab::expand_id(&id))?;
            if cli.json {
                let json = serde_json::to_string_pretty(&component).into_diagnostic()?;
                println!("{json}");
            } else {
                print_details(&component);
            }
        }

        Commands::Count => {
            let catalog = ComponentCatalog::from_config(&config)?;
            println!("{}", catalog.count()?);
        }

        Commands::Check => {
            if let Some(endpoint) = &config.endpoint {
                let catalog = ComponentCatalog::from_config(&config)?;
                let count = catalog.count()?;
                println!("Endpoint {endpoint} reachable: {count} components");
            } else {
                let store = EmbeddedStore::in_memory()?;
                let report = loader::load_file(&store, &config.data_file)?;
                let count = ComponentCatalog::new(store).count()?;
                println!("Loaded {}", report.origin);
                println!("  statements: {}", report.statements);
                println!("  components: {count}");
            }
        }
    }

    Ok(())
}

fn print_list(components: &[Component], json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(components).into_diagnostic()?;
        println!("{json}");
        return Ok(());
    }

    if components.is_empty() {
        println!("No components found.");
        return Ok(());
    }
    println!("Found {} component(s):", components.len());
    for c in components {
        println!("  {} [{}] {}", c.label, c.class, vocab::local_name(&c.id));
        if let Some(description) = &c.description {
            println!("      {description}");
        }
    }
    Ok(())
}

fn print_details(c: &Component) {
    println!("Component: \"{}\"", c.label);
    println!("  id:          {}", c.id);
    println!("  class:       {}", c.class);
    if let Some(description) = &c.description {
        println!("  description: {description}");
    }
    if let Some(package) = &c.package {
        println!("  package:     {package}");
    }
    if let Some(node_type) = &c.node_type {
        println!("  node type:   {node_type}");
    }
    if let Some(rate) = &c.update_rate {
        println!("  update rate: {rate}");
    }
    for (key, value) in &c.attributes {
        println!("  {key}: {value}");
    }
    if !c.inputs.is_empty() {
        println!("  inputs ({}):", c.inputs.len());
        for msg in &c.inputs {
            println!("    <- {msg}");
        }
    }
    if !c.outputs.is_empty() {
        println!("  outputs ({}):", c.outputs.len());
        for msg in &c.outputs {
            println!("    -> {msg}");
        }
    }
}
