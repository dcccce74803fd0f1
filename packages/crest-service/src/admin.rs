//! Administrative index maintenance.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crest_storage::solr;

use crate::{
	CrestService,
	error::{Error, Result},
};

/// Outcome summary of a full index rebuild.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RebuildReport {
	pub rebuilt_count: usize,
	pub failed_count: usize,
}

struct RebuildGuard<'a> {
	active: &'a AtomicBool,
}
impl Drop for RebuildGuard<'_> {
	fn drop(&mut self) {
		self.active.store(false, Ordering::SeqCst);
	}
}

impl CrestService {
	/// Drops every index record, then reindexes all known wavelets and evicts
	/// their cached state. Only one rebuild may run at a time.
	///
	/// Per-wavelet failures are counted, not fatal. A failed clear is logged
	/// and the rebuild continues over the stale records.
	pub async fn rebuild_index(&self) -> Result<RebuildReport> {
		if self
			.rebuild_active
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_err()
		{
			return Err(Error::RebuildInProgress);
		}

		let _guard = RebuildGuard { active: &self.rebuild_active };

		tracing::info!("Rebuilding the search index.");

		if let Err(err) = self.clear_index().await {
			tracing::warn!(error = %err, "Failed to clear the index; stale records may linger.");
		}

		let names = self.wavelets.wavelet_names().await?;
		let mut report = RebuildReport { rebuilt_count: 0, failed_count: 0 };
		let handles = names
			.into_iter()
			.map(|name| (name.clone(), self.on_wavelet_created(name)))
			.collect::<Vec<_>>();

		for (name, handle) in handles {
			match handle.wait().await {
				Ok(()) => report.rebuilt_count += 1,
				Err(err) => {
					tracing::error!(error = %err, wavelet = %name, "Failed to reindex wavelet.");

					report.failed_count += 1;
				},
			}
		}

		self.wavelets.unload_all().await?;

		tracing::info!(
			rebuilt = report.rebuilt_count,
			failed = report.failed_count,
			"Index rebuild finished."
		);

		Ok(report)
	}

	/// Deletes every index record, queued behind in-flight index writes.
	pub async fn clear_index(&self) -> Result<()> {
		let index = self.index.clone();
		let handle = self.scheduler.submit(
			"clear index",
			Box::pin(async move {
				index.delete_by_query(&solr::FIELDS_PRESENT_QUERY).await?;
				index.commit().await
			}),
		);

		handle.wait().await
	}
}
