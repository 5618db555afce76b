use clap::Parser;
use serde_json::json;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vectordb::cli::args::{self, FieldFilter, RecordInput, UpdateInput};
use vectordb::cli::commands::{Cli, Commands};
use vectordb::{InMemoryVectorStore, Metadata, SearchEngine, VectorStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("VECTORDB_PATH").unwrap_or_else(|_| "./vectors.json".into());

    if let Err(e) = run_command(Path::new(&db_path), cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(db_path: &Path, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Init { name, dimension, force } => init(db_path, name, dimension, force),
        other => run_store_command(db_path, InMemoryVectorStore::open(db_path)?, other),
    }
}

fn init(
    db_path: &Path,
    name: String,
    dimension: Option<usize>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if db_path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", db_path.display()).into());
    }
    let store = match dimension {
        Some(dim) => InMemoryVectorStore::with_dimension(name, dim)?,
        None => InMemoryVectorStore::new(name),
    };
    store.save(db_path)?;
    println!("{}", serde_json::to_string_pretty(&store.get_stats())?);
    Ok(())
}

fn run_store_command(
    db_path: &Path,
    mut store: InMemoryVectorStore,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Init { .. } => {
            return Err(format!("{} is already initialized", db_path.display()).into());
        }
        Commands::Add { id, json } => {
            let input: RecordInput = serde_json::from_str(&json)?;
            store.add_vector(&id, input.vector, input.metadata)?;
            store.save(db_path)?;
            println!("Added {id}");
        }
        Commands::Import { json } => {
            let entries = args::parse_import(&json)?;
            let report = store.add_vectors(entries);
            store.save(db_path)?;
            let failed: Vec<_> = report
                .failed
                .iter()
                .map(|(id, e)| json!({ "id": id, "error": e.to_string() }))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "added": report.added, "failed": failed }))?
            );
        }
        Commands::Get { id } => {
            let record = store.get_vector(&id)?;
            println!("{}", serde_json::to_string_pretty(&json!({ "id": id, "record": record }))?);
        }
        Commands::Update { id, json } => {
            let input: UpdateInput = serde_json::from_str(&json)?;
            store.update_vector(&id, input.vector, input.metadata)?;
            store.save(db_path)?;
            println!("Updated {id}");
        }
        Commands::Delete { id } => {
            store.delete_vector(&id)?;
            store.save(db_path)?;
            println!("Deleted {id}");
        }
        Commands::List { filters } => {
            let filters = args::parse_filters(&filters)?;
            let pred = |m: &Metadata| args::matches_all(&filters, m);
            let records: serde_json::Map<_, _> = store
                .filter_by_metadata(&pred)
                .into_iter()
                .map(|(id, r)| serde_json::to_value(r).map(|v| (id, v)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Search { vector, top_k, filters } => {
            let query = args::parse_vector(&vector)?;
            let filters = args::parse_filters(&filters)?;
            let engine = SearchEngine::new(&store);
            let results = with_filter(&filters, |f| engine.search(&query, top_k, f))?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::BatchSearch { json, top_k } => {
            let queries: Vec<Vec<f32>> = serde_json::from_str(&json)?;
            let engine = SearchEngine::new(&store);
            let slots: Vec<_> = engine
                .batch_search(&queries, top_k, None)
                .into_iter()
                .map(|slot| match slot {
                    Ok(results) => json!({ "results": results }),
                    Err(e) => json!({ "error": e.to_string() }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Similar { id, top_k, filters } => {
            let filters = args::parse_filters(&filters)?;
            let engine = SearchEngine::new(&store);
            let results = with_filter(&filters, |f| engine.search_by_id(&id, top_k, f))?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Duplicates { threshold } => {
            let pairs = SearchEngine::new(&store).find_duplicates(threshold);
            println!("{}", serde_json::to_string_pretty(&pairs)?);
        }
        Commands::Stats => {
            println!("{}", serde_json::to_string_pretty(&store.get_stats())?);
        }
        Commands::Scores { vector } => {
            let query = args::parse_vector(&vector)?;
            let stats = SearchEngine::new(&store).get_statistics(&query)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

/// Calls `f` with `None` when there are no filters, otherwise with a
/// predicate requiring all of them.
fn with_filter<T>(
    filters: &[FieldFilter],
    f: impl FnOnce(Option<vectordb::MetadataFilter<'_>>) -> T,
) -> T {
    if filters.is_empty() {
        return f(None);
    }
    let pred = |m: &Metadata| args::matches_all(filters, m);
    f(Some(&pred))
}
