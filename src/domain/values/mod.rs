pub mod cosine;
pub mod metadata_value;
