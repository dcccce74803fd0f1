pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Backend error: {message}")]
	Backend { message: String },
	#[error("Failed to index wavelet {name}: {message}")]
	Index { name: String, message: String },
	#[error("An index rebuild is already in progress.")]
	RebuildInProgress,
	#[error("Index scheduler is stopped.")]
	SchedulerStopped,
	#[error("Store error: {message}")]
	Store { message: String },
}

impl From<crest_storage::Error> for Error {
	fn from(err: crest_storage::Error) -> Self {
		Self::Backend { message: err.to_string() }
	}
}
