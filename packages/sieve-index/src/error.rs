pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Index not built. Call build or load first.")]
	NotBuilt,
	#[error("Cannot build an index over an empty corpus.")]
	EmptyCorpus,
	#[error("Got {texts} texts for {records} records.")]
	InputMismatch { texts: usize, records: usize },
	#[error("Embedding dimension {actual} does not match the configured {expected}.")]
	DimensionMismatch { expected: usize, actual: usize },
	#[error("Got {actual} embedding vectors for {expected} documents.")]
	VectorCountMismatch { expected: usize, actual: usize },
	#[error(transparent)]
	Provider(#[from] sieve_providers::Error),
	#[error(transparent)]
	Store(#[from] sieve_store::Error),
}
