use clap::Parser;
use mapsweep::config;
use mapsweep::export;
use mapsweep::places::{PlacesClient, SearchError, SearchInvoker, SearchParams};
use std::path::PathBuf;

/// mapsweep — Google Maps search with CSV export.
///
/// Searches Google Maps places and writes the results to a dated CSV file.
///
/// Examples:
///   mapsweep "coffee shops"
///   mapsweep restaurants --zip 10001
///   mapsweep "hiking trails" --zip 94025 --distance 10
///   mapsweep pizza --max-results 50 --page 2
#[derive(Parser)]
#[command(name = "mapsweep", version, about, long_about = None)]
struct Cli {
    /// Search query (e.g. "coffee shops", "restaurants").
    query: String,

    /// ZIP code to search near (e.g. 10001).
    #[arg(long)]
    zip: Option<String>,

    /// Search radius in miles from the ZIP code (requires --zip).
    #[arg(long, requires = "zip", value_parser = clap::value_parser!(u32).range(1..))]
    distance: Option<u32>,

    /// Maximum number of results to keep.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    max_results: u32,

    /// Result page to fetch.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Places API key. Overrides MAPSWEEP_API_KEY and the config file.
    #[arg(long)]
    api_key: Option<String>,

    /// Directory the CSV file is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let api_key = config::resolve_api_key(cli.api_key.as_deref()).unwrap_or_else(|| {
        eprintln!("Error: {}", SearchError::MissingApiKey);
        std::process::exit(1);
    });

    let params = SearchParams {
        query: cli.query.clone(),
        zip: cli.zip.clone(),
        distance: cli.distance,
        max_results: cli.max_results as usize,
        page: cli.page as usize,
    };

    let invoker = SearchInvoker::new(PlacesClient::new(api_key));

    // ── Search ──────────────────────────────────────────────────

    let (records, search_error) = match invoker.search(&params) {
        Ok(records) => (records, None),
        Err(SearchError::Interrupted { records, cause }) => {
            eprintln!(
                "Warning: search interrupted, keeping {} record(s) collected so far: {}",
                records.len(),
                cause,
            );
            (records, Some(cause))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if records.is_empty() {
        eprintln!("No results found. Try adjusting your search query.");
        return;
    }

    // ── Export ──────────────────────────────────────────────────

    let path = export::write_csv(&records, &cli.query, &cli.output_dir).unwrap_or_else(|e| {
        eprintln!("Error writing CSV: {}", e);
        std::process::exit(1);
    });

    println!("Wrote {} record(s) to {}", records.len(), path.display());
    println!();
    for (i, record) in records.iter().take(5).enumerate() {
        println!("{}. {}", i + 1, record.name.as_deref().unwrap_or("(unnamed)"));
        if let Some(address) = &record.address {
            println!("   {}", address);
        }
        if let Some(rating) = record.rating {
            println!("   Rating: {:.1}/5.0", rating);
        }
    }
    if records.len() > 5 {
        println!("... and {} more record(s) in the CSV file", records.len() - 5);
    }

    // Partial output still gets written, but the failure is not swallowed.
    if search_error.is_some() {
        std::process::exit(1);
    }
}
