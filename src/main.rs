use clap::{Parser, Subcommand};
use dotenv::dotenv;
use flowdeck::core::error::FlowError;
use flowdeck::core::navigate::{flow_path, LogNavigator, Navigator};
use flowdeck::core::notify::LogNotifier;
use flowdeck::flow::agent::ChatAgent;
use flowdeck::flow::codec;
use flowdeck::flow::config::SyncConfig;
use flowdeck::flow::export::export_workflow;
use flowdeck::flow::state::FlowStore;
use flowdeck::flow::sync::{HttpFlowRemote, SyncCoordinator};

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the flows stored on the server
    List,
    /// Print a stored flow as YAML
    Show {
        /// Flow id
        #[arg(short, long)]
        id: String,
    },
    /// Create a new flow and save it to the server
    New {
        /// Agent YAML file to seed the flow from
        #[arg(short, long)]
        agent: Option<PathBuf>,
    },
    /// Replace a stored flow with the contents of a YAML file
    Import {
        /// Flow id
        #[arg(short, long)]
        id: String,

        /// Path to the workflow file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Export a stored flow to `<id>-workflow.yml`
    Export {
        /// Flow id
        #[arg(short, long)]
        id: String,

        /// Output directory (defaults to FLOW_EXPORT_DIR or ".")
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = SyncConfig::from_env()?;

    let navigator = Arc::new(LogNavigator::new());
    let notifier = Arc::new(LogNotifier);
    let remote = Arc::new(HttpFlowRemote::new(config.clone()));
    let sync = SyncCoordinator::new(remote, notifier.clone());
    let mut store = FlowStore::new(navigator.clone());

    match args.command {
        Commands::List => {
            sync.pull_merge(&mut store).await?;
            for (id, entry) in store.flows() {
                println!("{}\t{}", id, entry.flow.meta.title);
            }
        }
        Commands::Show { id } => {
            sync.pull_merge(&mut store).await?;
            if !store.contains(&id) {
                return Err(FlowError::not_found(id).into());
            }
            print!("{}", codec::encode(store.current_flow(Some(id.as_str())))?);
        }
        Commands::New { agent } => {
            let id = match agent {
                Some(path) => {
                    let agent = ChatAgent::load(&path)?;
                    store.create_flow_from_agent(&agent)
                }
                None => store.create_flow(),
            };
            let active = navigator.active_flow_id();
            sync.push(&store, active.as_deref()).await?;
            println!("{}", id);
        }
        Commands::Import { id, file } => {
            sync.pull_merge(&mut store).await?;
            if !store.contains(&id) {
                return Err(FlowError::not_found(id).into());
            }
            navigator.go_to(&flow_path(&id));

            let text = std::fs::read_to_string(&file)?;
            store.open_import_modal(&id);
            let imported = store.import_flow(&id, &text);
            store.close_import_modal(&id);
            imported?;

            let active = navigator.active_flow_id();
            sync.push(&store, active.as_deref()).await?;
            println!("Imported {} into {}", file.display(), id);
        }
        Commands::Export { id, dir } => {
            sync.pull_merge(&mut store).await?;
            navigator.go_to(&flow_path(&id));

            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let active = navigator.active_flow_id();
            match export_workflow(&store, active.as_deref(), &dir, notifier.as_ref())? {
                Some(path) => println!("Exported {}", path.display()),
                None => return Err(FlowError::not_found(id).into()),
            }
        }
    }

    Ok(())
}
