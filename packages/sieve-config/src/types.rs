use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub corpus: Corpus,
	pub providers: Providers,
	pub retrieval: Retrieval,
	pub service: Service,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	/// Line-delimited JSON source file; one document object per line.
	pub source: PathBuf,
	/// Directory holding the persisted index artifacts.
	pub workdir: PathBuf,
	#[serde(default = "default_min_content_chars")]
	pub min_content_chars: usize,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub ranker: RankerProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub batch_size: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RankerProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	/// Weight of the vector signal in the fused score; the lexical signal
	/// gets `1 - alpha`.
	pub alpha: f32,
	#[serde(default = "default_rerank_pool_multiplier")]
	pub rerank_pool_multiplier: u32,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

fn default_min_content_chars() -> usize {
	4
}

fn default_rerank_pool_multiplier() -> u32 {
	3
}
