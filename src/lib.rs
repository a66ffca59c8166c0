// dupdetect: duplicate and near-duplicate document screening
//
// This is the library root. Extraction and similarity form the core; export,
// output and web are the surfaces built on top of it.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod output;
pub mod similarity;

#[cfg(feature = "web")]
pub mod web;

pub use error::{DetectError, Result};
pub use similarity::{compute_similarity, SimilarityEngine, SimilarityReport};
