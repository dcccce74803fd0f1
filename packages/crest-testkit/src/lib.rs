mod error;

pub use error::{Error, Result};

use std::{env, thread, time::Duration};

use reqwest::Client;
use serde_json::json;
use tokio::runtime::Builder;

pub fn env_solr_url() -> Option<String> {
	env::var("CREST_SOLR_URL").ok()
}

/// Scratch Solr core for one test. Purges every record on creation and again
/// on cleanup, so point it at a dedicated test core.
pub struct TestCore {
	base_url: String,
	client: Client,
	cleaned: bool,
}
impl TestCore {
	pub async fn new(base_url: &str) -> Result<Self> {
		let base_url = base_url.trim_end_matches('/').to_string();
		let client = Client::builder()
			.timeout(Duration::from_secs(10))
			.build()
			.map_err(|err| Error::Message(format!("Failed to build an HTTP client: {err}.")))?;
		let core = Self { base_url, client, cleaned: false };

		core.purge().await?;

		Ok(core)
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Deletes every record in the core and commits.
	pub async fn purge(&self) -> Result<()> {
		purge_core(&self.client, &self.base_url).await
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		purge_core(&self.client, &self.base_url).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestCore {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let client = self.client.clone();
		let base_url = self.base_url.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test core cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(purge_core(&client, &base_url)) {
				eprintln!("Test core cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

async fn purge_core(client: &Client, base_url: &str) -> Result<()> {
	let delete = client
		.post(format!("{base_url}/update?wt=json"))
		.json(&json!({ "delete": { "query": "*:*" }, "commit": {} }))
		.send()
		.await?;

	if !delete.status().is_success() {
		return Err(Error::Message(format!(
			"Failed to purge the test core: status {}.",
			delete.status()
		)));
	}

	Ok(())
}
