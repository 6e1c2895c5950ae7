mod console;
mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;
use todolist_core::config::data_dir;
use todolist_core::{ClientConfig, HttpTaskApi, Intent, TaskApi, TaskId, TaskListController};

use crate::console::ConsoleSurface;

const LOG_FILE_NAME: &str = "todolist.log";

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Client for a remote to-do list API", long_about = None)]
struct Cli {
    /// Base URL of the task API (overrides config file and TODOLIST_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file to use instead of ~/.todolist/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface
    Tui,
    /// List all tasks
    List,
    /// Add a new task (usage: add Buy milk)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Mark a task as done (the backend toggles it)
    Complete { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
    /// Check that the API is up
    Status,
}

async fn api_status<A: TaskApi>(api: &A, url: &Url) -> Result<String> {
    api.health()
        .await
        .with_context(|| format!("API at {} is not answering", url))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.set_api_base_url(url)?;
    }

    let runtime = tokio::runtime::Runtime::new()?;

    let intent = match cli.command {
        // The TUI is what people actually use, so it is the default.
        None | Some(Commands::Tui) => {
            logging::init_file(&data_dir()?.join(LOG_FILE_NAME))?;
            return tui::run(&runtime, &config);
        }
        Some(Commands::Status) => {
            logging::init_stderr()?;
            let api = HttpTaskApi::new(&config)?;
            let status = runtime.block_on(api_status(&api, &config.api_base_url))?;
            println!("{}: {}", config.api_base_url, status);
            return Ok(());
        }
        Some(Commands::List) => Intent::Refresh,
        Some(Commands::Add { args }) => Intent::Add(args.join(" ")),
        Some(Commands::Complete { id }) => Intent::Complete(id),
        Some(Commands::Delete { id }) => Intent::Delete(id),
    };

    logging::init_stderr()?;
    let api = HttpTaskApi::new(&config)?;
    let mut controller = TaskListController::new(api, ConsoleSurface::default())
        .with_policy(config.mutation_policy);
    runtime.block_on(controller.dispatch(intent));
    controller.surface().print();

    Ok(())
}
