use std::path::{Path, PathBuf};

use amu_core::{FilterCatalog, FilterSession};
use amu_datasets::{load_views_str, resolve_view, DashboardConfig, SelectionStrategy, ViewRegistry};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "amu-cli",
    about = "Inspect AMU dashboard filter catalogs and view datasets."
)]
struct Args {
    /// JSON catalog to use instead of the Ghana AMU catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON view definitions to use instead of the built-in views.
    #[arg(long, global = true)]
    views: Option<PathBuf>,

    /// How a view picks its dataset: first_match or most_specific.
    #[arg(long, global = true, default_value = "first_match")]
    strategy: SelectionStrategy,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List filter dimensions.
    Types,
    /// List the options of one dimension.
    Values { kind: String },
    /// Print the chip label for a selection.
    Describe { kind: String, value: String },
    /// List dashboard views.
    Views,
    /// Show the dataset a view selects for the given filters.
    Show {
        view: String,
        /// Active filter as `type=value`; repeat for more.
        #[arg(short, long = "filter")]
        filters: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let catalog = match &args.catalog {
        Some(path) => FilterCatalog::from_json_str(&read(path)?)
            .with_context(|| format!("Invalid catalog {path:?}"))?,
        None => FilterCatalog::ghana_amu(),
    };

    match &args.command {
        Command::Types => print_options(&catalog.list_types(), args.json)?,
        Command::Values { kind } => {
            let values = catalog.list_values(kind);
            if values.is_empty() {
                info!("no options for filter type `{kind}`");
            }
            print_options(&values, args.json)?;
        }
        Command::Describe { kind, value } => println!("{}", catalog.describe(kind, value)),
        Command::Views => {
            let registry = load_registry(args.views.as_deref())?;
            for view in registry.views() {
                println!("{}\t{} ({} variants)", view.id, view.title, view.variants.len());
            }
        }
        Command::Show { view, filters } => {
            let registry = load_registry(args.views.as_deref())?;
            let session = build_session(&catalog, filters)?;
            let config = DashboardConfig {
                selection: args.strategy,
                palette: None,
            };
            let chart = resolve_view(&registry, view, session.active_filters(), &config)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
                return Ok(());
            }

            for filter in session.active_filters() {
                println!("[{}]", filter.label);
            }
            println!("{}", chart.title);
            for (index, label) in chart.labels.iter().enumerate() {
                let values: Vec<String> = chart
                    .series
                    .iter()
                    .map(|series| match series.values.get(index) {
                        Some(value) => format!("{}={value:.1}", series.name),
                        None => format!("{}=--", series.name),
                    })
                    .collect();
                println!("  {label}: {}", values.join(", "));
            }
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Cannot read file {path:?}"))
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<ViewRegistry> {
    match path {
        Some(path) => {
            load_views_str(&read(path)?).with_context(|| format!("Invalid views {path:?}"))
        }
        None => Ok(ViewRegistry::builtin()),
    }
}

fn build_session(catalog: &FilterCatalog, filters: &[String]) -> anyhow::Result<FilterSession> {
    let mut session = FilterSession::new();
    for filter in filters {
        let Some((kind, value)) = filter.split_once('=') else {
            bail!("Filter `{filter}` must look like type=value");
        };
        session.set_pending_type(kind);
        session.set_pending_value(value);
        let outcome = session.add_filter(catalog);
        info!("filter {filter}: {outcome:?}");
    }
    Ok(session)
}

fn print_options(options: &[amu_core::FilterOption], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
    } else {
        for option in options {
            println!("{}\t{}", option.value, option.label);
        }
    }
    Ok(())
}
