pub mod duplicates;
pub mod search;
pub mod stats;
