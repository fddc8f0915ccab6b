use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tracing::info;

use pokegrid::api::ApiClient;
use pokegrid::browser::Browser;
use pokegrid::config::Config;
use pokegrid::palette::type_color;

#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Render PokeAPI listings and details as HTML")]
struct Args {
    /// API root; overrides POKEGRID_API_BASE
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one page of the card grid
    Grid {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Skip the type badge pass
        #[arg(long)]
        no_hydrate: bool,
        /// Detail fetches in flight while hydrating
        #[arg(long)]
        concurrency: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render the detail overlay for one entry
    Detail {
        /// Numeric id, name, or full API url
        id_or_url: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List every type name with its badge color
    Types,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(base) = args.api_base {
        config.api_base = base;
    }
    let client = ApiClient::new(config.api_base.clone());

    match args.command {
        Command::Grid {
            limit,
            offset,
            no_hydrate,
            concurrency,
            out,
        } => {
            let mut browser = Browser::new(client, limit.unwrap_or(config.page_size));
            browser.load_page(offset).await;
            if !no_hydrate {
                let concurrency = concurrency.unwrap_or(config.hydrate_concurrency);
                browser.hydrate(concurrency).await;
            }
            write_output(out, &browser.render_page()).await
        }
        Command::Detail { id_or_url, out } => {
            let mut browser = Browser::new(client, config.page_size);
            if !browser.open_detail(&id_or_url).await {
                return Err(io::Error::other(format!(
                    "could not load details for {id_or_url}"
                )));
            }
            write_output(out, &browser.render_page()).await
        }
        Command::Types => {
            let types = client.fetch_all_type_names().await;
            let listing: String = types
                .iter()
                .map(|entry| format!("{}\t{}\n", entry.name, type_color(&entry.name)))
                .collect();
            write_output(None, &listing).await
        }
    }
}

async fn write_output(out: Option<PathBuf>, contents: &str) -> io::Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(&path, contents).await?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(contents.as_bytes()).await?;
            stdout.flush().await
        }
    }
}
