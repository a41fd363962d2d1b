use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;

use sales_analytics::{DbConfig, create_pool, insert_transactions, read_seed_file};

/// A utility for creating a test database for the REST API server of sales_analytics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// A JSON file in the same format as the remote seed feed.
    #[arg(long, short)]
    seed_file: PathBuf,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Reading seed data from {:#?}", args.seed_file);
    let records = read_seed_file(&args.seed_file)?;

    println!("Creating database at {output_path:#?}");
    let db_pool = create_pool(&DbConfig::file(output_path).pool_size(1))?;
    let connection = db_pool.get()?;

    println!("Inserting {} transactions...", records.len());
    let inserted = insert_transactions(records, &connection)?;

    println!("Success! Inserted {inserted} transactions.");

    Ok(())
}
