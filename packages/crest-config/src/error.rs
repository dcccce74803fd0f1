pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read configuration from {path:?}.")]
	Read { path: std::path::PathBuf, source: std::io::Error },
	#[error("Malformed configuration in {path:?}.")]
	Parse { path: std::path::PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Invalid { message: String },
}
