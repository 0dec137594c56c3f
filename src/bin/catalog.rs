use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use product_gateway::catalog::{
    build_views, render, verify_photos, Applied, CatalogClient, ClientError, ProductRecord,
    RenderOptions, SearchSession, SearchTicket,
};
use product_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Search products through the gateway and compare offers", long_about = None)]
struct Cli {
    #[command(flatten)]
    display: DisplayArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DisplayArgs {
    /// Gateway base URL
    #[arg(short, long, default_value = "http://localhost:8000", global = true)]
    gateway: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Probe photo URLs and show the default image for broken ones
    #[arg(long, global = true)]
    check_images: bool,

    /// Render links as terminal hyperlinks
    #[arg(long, global = true)]
    hyperlinks: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the comparison table
    Search {
        /// Free-text term; empty lists everything
        #[arg(default_value = "")]
        term: String,
    },
    /// Read search terms from stdin, one per line
    Interactive,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.display.log_level);

    let client = CatalogClient::new(&cli.display.gateway, Duration::from_secs(cli.display.timeout_secs))?;
    let mut session = SearchSession::new();

    match cli.command {
        Commands::Search { term } => {
            session.set_term(term);
            let applied = session.search(&client).await;
            show(&mut session, &client, &cli.display, applied).await;
            if applied == Applied::Failed {
                std::process::exit(1);
            }
        }
        Commands::Interactive => interactive(session, client, &cli.display).await?,
    }

    Ok(())
}

/// Each line starts a concurrent search; only the newest one is displayed.
async fn interactive(
    mut session: SearchSession,
    client: CatalogClient,
    display: &DisplayArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = std::sync::Arc::new(client);
    let (done_tx, mut done_rx) =
        mpsc::unbounded_channel::<(SearchTicket, Result<Vec<ProductRecord>, ClientError>)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut in_flight = 0usize;

    eprintln!("Type a search term and press Enter (Ctrl+D to quit).");

    while stdin_open || in_flight > 0 {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(term) => {
                        session.set_term(term.trim());
                        let ticket = session.begin_search();
                        let client = client.clone();
                        let done_tx = done_tx.clone();
                        in_flight += 1;
                        tokio::spawn(async move {
                            let outcome = client.search(ticket.query()).await;
                            let _ = done_tx.send((ticket, outcome));
                        });
                    }
                    None => stdin_open = false,
                }
            }
            Some((ticket, outcome)) = done_rx.recv() => {
                in_flight -= 1;
                let applied = session.apply(&ticket, outcome);
                if applied != Applied::Stale {
                    show(&mut session, &client, display, applied).await;
                }
            }
        }
    }

    Ok(())
}

async fn show(session: &mut SearchSession, client: &CatalogClient, display: &DisplayArgs, applied: Applied) {
    if applied == Applied::Failed {
        // Blocking notice: the previous table, if any, stays the current one.
        if let Some(notice) = session.take_notification() {
            eprintln!("{}", notice);
        }
        return;
    }

    let mut views = build_views(session.results());
    if display.check_images {
        verify_photos(&mut views, client.http(), Duration::from_secs(5)).await;
    }

    print!(
        "{}",
        render(
            &views,
            RenderOptions {
                hyperlinks: display.hyperlinks,
            }
        )
    );
}
