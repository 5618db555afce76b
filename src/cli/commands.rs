use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vectordb", about = "Vector store with cosine-similarity search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty store file
    Init {
        /// Store name
        name: String,
        /// Fix the dimension up front instead of taking it from the first vector
        #[arg(long)]
        dimension: Option<usize>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Add a vector
    Add {
        id: String,
        /// JSON with vector and optional metadata
        json: String,
    },
    /// Add many vectors; bad entries are reported and skipped
    Import {
        /// JSON object mapping id to {vector, metadata}
        json: String,
    },
    /// Show one record
    Get { id: String },
    /// Replace a record's vector and/or metadata
    Update {
        id: String,
        /// JSON with optional vector and optional metadata
        json: String,
    },
    /// Delete a record
    Delete { id: String },
    /// List records, optionally filtered by metadata
    List {
        /// Metadata filter (key=value), repeatable
        #[arg(long = "where")]
        filters: Vec<String>,
    },
    /// Top-k search for a query vector
    Search {
        /// Query vector as a JSON array
        vector: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
        /// Metadata filter (key=value), repeatable
        #[arg(long = "where")]
        filters: Vec<String>,
    },
    /// Search several query vectors at once
    BatchSearch {
        /// JSON array of query vectors
        json: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// Find records similar to a stored one
    Similar {
        id: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
        /// Metadata filter (key=value), repeatable
        #[arg(long = "where")]
        filters: Vec<String>,
    },
    /// Report near-duplicate pairs
    Duplicates {
        #[arg(long, default_value = "0.99")]
        threshold: f64,
    },
    /// Show store statistics
    Stats,
    /// Similarity score distribution for a query vector
    Scores {
        /// Query vector as a JSON array
        vector: String,
    },
}
