pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	IndexMismatch { message: String },
	#[error(transparent)]
	Index(#[from] sieve_index::Error),
}
