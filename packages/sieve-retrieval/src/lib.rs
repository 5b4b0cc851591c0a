pub mod hybrid;
pub mod rerank;

mod error;

pub use error::{Error, Result};
pub use hybrid::{HybridSearcher, normalize_scores};
pub use rerank::{ChatRanker, RankingOracle, Reranker};
