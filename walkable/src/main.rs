use std::path::PathBuf;

use clap::{Parser, Subcommand};
use isochrone_api::IsochroneClient;
use tokio_util::sync::CancellationToken;
use ui_common::{AddressQuery, Completion, MapPanelState, WalkTime, DEFAULT_ADDRESS};
use walkable::{commands, config, server};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue)]
    debug: bool,

    /// Base URL of the isochrone backend, overrides ISOCHRONE_BACKEND_URL
    #[arg(short, long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and summarise the walkable area around an address
    Fetch {
        #[arg(short, long, default_value = DEFAULT_ADDRESS)]
        address: String,

        /// Walk time in minutes: 5, 10 or 15
        #[arg(short, long, default_value_t = WalkTime::Ten)]
        walk_time: WalkTime,

        /// Number of times to send the same request
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,

        /// Write the raw GeoJSON of the last isochrone to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask the backend to compute and store an isochrone
    Save {
        #[arg(short, long, default_value = DEFAULT_ADDRESS)]
        address: String,

        #[arg(short, long, default_value_t = WalkTime::Ten)]
        walk_time: WalkTime,
    },
    /// List isochrones stored by the backend
    List,
    /// Serve the web front-end
    Serve {
        /// Port to listen on, overrides HTTP_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
}

macro_rules! print_err_and_exit {
    () => {
        |e| {
            log::error!("{e:#}");
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    walkable::init_log(cli.debug);

    let mut env = config::load_env_vars().unwrap_or_else(print_err_and_exit!());
    if let Some(url) = cli.backend_url {
        env.backend_url =
            config::check_backend_url("--backend-url", url).unwrap_or_else(print_err_and_exit!());
    }

    match cli.command {
        Command::Fetch {
            address,
            walk_time,
            repeat,
            output,
        } => {
            let client = IsochroneClient::new(&env.backend_url).unwrap_or_else(print_err_and_exit!());
            let query = AddressQuery::new(address, walk_time);
            let mut panel = MapPanelState::default();

            let mut failed = false;
            for _ in 0..repeat.max(1) {
                failed = commands::fetch(&client, &mut panel, &query).await == Completion::Failed;
            }

            for line in commands::render_panel(&panel) {
                println!("{line}");
            }

            if let Some(path) = output {
                commands::write_last_geojson(&panel, &path)?;
            }

            if failed {
                std::process::exit(1);
            }
        }
        Command::Save { address, walk_time } => {
            let client = IsochroneClient::new(&env.backend_url).unwrap_or_else(print_err_and_exit!());
            let id = commands::save(&client, &AddressQuery::new(address, walk_time)).await?;
            println!("Isochrone saved with id {id}");
        }
        Command::List => {
            let client = IsochroneClient::new(&env.backend_url).unwrap_or_else(print_err_and_exit!());
            let rows = commands::list(&client).await?;
            if rows.is_empty() {
                println!("No stored isochrones");
            }
            for row in &rows {
                println!("{}", commands::format_stored(row));
            }
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                env.http_port = port;
            }

            let shutdown = CancellationToken::new();
            tokio::spawn({
                let shutdown = shutdown.clone();
                async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        log::error!("Cannot listen for Ctrl-C: {e}");
                        return;
                    }
                    shutdown.cancel();
                }
            });

            server::start(&env, shutdown).await?;
        }
    }

    Ok(())
}
