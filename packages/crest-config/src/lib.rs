mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Search, Server, Solr};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.server.domain.is_empty() {
		return Err(Error::Invalid { message: "server.domain must be non-empty.".to_string() });
	}
	if cfg.server.domain.contains('@') {
		return Err(Error::Invalid { message: "server.domain must not contain '@'.".to_string() });
	}
	if cfg.server.log_level.trim().is_empty() {
		return Err(Error::Invalid {
			message: "server.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.solr.base_url.is_empty() {
		return Err(Error::Invalid { message: "solr.base_url must be non-empty.".to_string() });
	}
	if !cfg.solr.base_url.starts_with("http://") && !cfg.solr.base_url.starts_with("https://") {
		return Err(Error::Invalid {
			message: "solr.base_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.solr.timeout_ms == 0 {
		return Err(Error::Invalid {
			message: "solr.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.min_page_rows == 0 {
		return Err(Error::Invalid {
			message: "search.min_page_rows must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.server.domain = cfg.server.domain.trim().to_string();
	cfg.solr.base_url = cfg.solr.base_url.trim().trim_end_matches('/').to_string();
}
