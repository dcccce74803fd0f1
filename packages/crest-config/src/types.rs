use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub server: Server,
	pub solr: Solr,
	#[serde(default)]
	pub search: Search,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
	/// Wave server domain, e.g. "wave.example.com". Participant addresses are
	/// relative to this domain.
	pub domain: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Solr {
	/// Core URL without a trailing slash, e.g. "http://localhost:8983/solr".
	pub base_url: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub min_page_rows: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { min_page_rows: 10 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}
