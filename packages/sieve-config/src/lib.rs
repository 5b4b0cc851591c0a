mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Corpus, EmbeddingProviderConfig, Providers, RankerProviderConfig, Retrieval, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.corpus.source.as_os_str().is_empty() {
		return Err(Error::Validation { message: "corpus.source must be non-empty.".to_string() });
	}
	if cfg.corpus.workdir.as_os_str().is_empty() {
		return Err(Error::Validation { message: "corpus.workdir must be non-empty.".to_string() });
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.batch_size == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.batch_size must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.ranker.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.ranker.max_tokens must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.ranker.temperature.is_finite() || cfg.providers.ranker.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.ranker.temperature must be zero or greater.".to_string(),
		});
	}

	for (label, timeout) in [
		("embedding", cfg.providers.embedding.timeout_ms),
		("ranker", cfg.providers.ranker.timeout_ms),
	] {
		if timeout == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
	}
	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("ranker", &cfg.providers.ranker.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if !cfg.retrieval.alpha.is_finite() {
		return Err(Error::Validation {
			message: "retrieval.alpha must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.retrieval.alpha) {
		return Err(Error::Validation {
			message: "retrieval.alpha must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.retrieval.rerank_pool_multiplier == 0 {
		return Err(Error::Validation {
			message: "retrieval.rerank_pool_multiplier must be greater than zero.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for base in
		[&mut cfg.providers.embedding.api_base, &mut cfg.providers.ranker.api_base]
	{
		while base.ends_with('/') {
			base.pop();
		}
	}
}
