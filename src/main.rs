use clap::{Parser, Subcommand};
use std::sync::Arc;

use knowledge_hub::catalog_api::HttpCatalogClient;
use knowledge_hub::config::Config;
use knowledge_hub::domain::CatalogApi;
use knowledge_hub::infrastructure::logging::init_tracing;
use knowledge_hub::models::BookRecord;
use knowledge_hub::services::{CatalogSearchSession, DetailHost, DetailSnapshot, DetailState};

#[derive(Parser)]
#[command(name = "knowledge-hub", version, about = "Search the catalog and inspect books")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and print one page of results.
    Search {
        query: String,

        /// Page to show (1-based).
        #[arg(long, default_value = "1")]
        page: usize,

        /// Viewport width in pixels; derives the page size.
        #[arg(long)]
        width: Option<u32>,
    },

    /// Search, then open the detail view for one result.
    Detail {
        query: String,

        /// 1-based position of the result in the search response.
        position: usize,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let cli = Cli::parse();

    tracing::info!(
        "Knowledge Hub client (profile {}) using {}",
        config.profile,
        config.api_url
    );

    let api: Arc<dyn CatalogApi> = match HttpCatalogClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut session = CatalogSearchSession::new(api.clone(), config.default_page_size);

    match cli.command {
        Commands::Search { query, page, width } => {
            if let Some(width) = width {
                session.set_viewport_width(width);
            }
            session.search(query).await;
            session.go_to_page(page);
            print_page(&session);
        }
        Commands::Detail { query, position } => {
            session.search(query).await;
            let Some(base) = position.checked_sub(1).and_then(|i| session.select_at(i)) else {
                println!("No books found. Try another search.");
                return;
            };

            let host = DetailHost::new(api);
            let (_view_id, handle) = host.open(base);
            if let Err(e) = handle.await {
                tracing::error!("Detail reconciliation aborted: {}", e);
            }
            match host.snapshot() {
                Some(snapshot) => print_detail(&snapshot),
                None => println!("Book data missing. Go back and select again."),
            }
        }
    }
}

fn print_page(session: &CatalogSearchSession) {
    if session.is_empty() {
        println!("No books found. Try another search.");
        return;
    }

    let window = session.window();
    let offset = window.range(session.results().len()).start;
    for (i, book) in session.visible().iter().enumerate() {
        println!(
            "{:>3}. {} - {} ({}, {})",
            offset + i + 1,
            book.title,
            book.author,
            book.publisher,
            book.year
        );
    }
    if window.needs_navigation(session.results().len()) {
        println!("{}", session.page_label());
    }
}

fn print_detail(snapshot: &DetailSnapshot) {
    let book: &BookRecord = &snapshot.record;
    println!("{}", book.title);
    if let Some(advisory) = &snapshot.advisory {
        println!("! {}", advisory);
    }
    println!("Cover:     {}", snapshot.cover_url());
    println!("Author:    {}", book.author);
    println!("Publisher: {} ({})", book.publisher, book.year);
    println!("Language:  {}", book.language);
    println!("Format:    {}", book.extension);
    println!("File Size: {}", book.filesize);
    println!("Series:    {}", book.series);
    println!("ISSN:      {}", book.issn);
    if !book.description.is_empty() {
        println!();
        println!("{}", book.description);
    }

    println!();
    if snapshot.state == DetailState::Loading {
        return;
    }
    match &snapshot.links {
        Some(links) if !links.is_empty() => {
            for link in links {
                let marker = if link.primary { "*" } else { " " };
                println!("{} {}: {}", marker, link.label, link.url);
            }
        }
        _ => println!("No download links found."),
    }
}
