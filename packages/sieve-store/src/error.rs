pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Corpus source not found at {path:?}.")]
	SourceNotFound { path: std::path::PathBuf },
	#[error("Missing index artifact at {path:?}. Run a build first.")]
	MissingArtifact { path: std::path::PathBuf },
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}
