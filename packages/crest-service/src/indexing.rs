//! Wavelet lifecycle triggers and the snapshot-to-record flattening they
//! share. All index writes funnel through the scheduler.

use crest_domain::{DeltaSequence, WaveletName, WaveletSnapshot, collate_text};
use crest_storage::solr::IndexDoc;

use crate::{
	CrestService, SearchIndex, WaveletProvider,
	error::{Error, Result},
	lookup_snapshot,
	scheduler::TaskHandle,
};

/// Structural documents that never carry searchable body text.
const NON_BLIP_DOCUMENTS: &[&str] = &["conversation", "m/read"];
/// Folder every indexed record is filed under.
pub const INBOX_FOLDER: &str = "inbox";

/// Index record id for one blip.
fn record_id(wave_id: &str, doc_name: &str) -> String {
	format!("{wave_id}/~/conv+root/{doc_name}")
}

/// Flattens one snapshot into index records, one per blip with readable text.
pub fn build_index_docs(snapshot: &WaveletSnapshot) -> Vec<IndexDoc> {
	let with = snapshot
		.participants
		.iter()
		.map(|participant| participant.address().to_string())
		.collect::<Vec<_>>();

	snapshot
		.documents
		.iter()
		.filter(|(doc_name, _)| !NON_BLIP_DOCUMENTS.contains(&doc_name.as_str()))
		.filter_map(|(doc_name, doc_op)| {
			let text = collate_text(doc_op);

			if text.is_empty() {
				return None;
			}

			Some(IndexDoc {
				id: record_id(snapshot.wave_id.as_str(), doc_name),
				wave_id: snapshot.wave_id.as_str().to_string(),
				wavelet_id: snapshot.wavelet_id.as_str().to_string(),
				doc_name: doc_name.clone(),
				last_modified_time: snapshot.last_modified_time,
				with: with.clone(),
				with_fuzzy: with.clone(),
				creator: snapshot.creator.address().to_string(),
				text,
				folders: vec![INBOX_FOLDER.to_string()],
			})
		})
		.collect()
}

async fn upsert_snapshot(index: &dyn SearchIndex, snapshot: &WaveletSnapshot) -> Result<()> {
	let name = snapshot.name();
	let docs = build_index_docs(snapshot);

	if docs.is_empty() {
		tracing::debug!(wavelet = %name, "No indexable text; skipping upsert.");

		return Ok(());
	}

	index
		.upsert_docs(&docs)
		.await
		.map_err(|err| Error::Index { name: name.to_string(), message: err.to_string() })?;

	tracing::debug!(wavelet = %name, records = docs.len(), "Indexed wavelet.");

	Ok(())
}

async fn reindex(
	wavelets: &dyn WaveletProvider,
	index: &dyn SearchIndex,
	name: &WaveletName,
) -> Result<()> {
	let Some(snapshot) = lookup_snapshot(wavelets, name).await? else {
		return Err(Error::Store { message: format!("wavelet {name} not found in any registry") });
	};

	upsert_snapshot(index, &snapshot).await
}

impl CrestService {
	/// Indexes every readable blip of `snapshot`, replacing prior records.
	pub async fn index_snapshot(&self, snapshot: &WaveletSnapshot) -> Result<()> {
		upsert_snapshot(self.index.as_ref(), snapshot).await
	}

	/// Trigger for a freshly created wavelet. Fetches its snapshot and indexes
	/// it behind the queue.
	pub fn on_wavelet_created(&self, name: WaveletName) -> TaskHandle {
		let wavelets = self.wavelets.clone();
		let index = self.index.clone();
		let label = format!("index {name}");

		self.scheduler.submit(
			label,
			Box::pin(async move { reindex(wavelets.as_ref(), index.as_ref(), &name).await }),
		)
	}

	/// Trigger for a committed delta. Reindexes unless a newer commit has
	/// superseded `version` by the time the task runs.
	pub fn on_wavelet_committed(&self, name: WaveletName, version: i64) -> TaskHandle {
		let wavelets = self.wavelets.clone();
		let index = self.index.clone();
		let label = format!("commit {name} v{version}");

		self.scheduler.submit(
			label,
			Box::pin(async move {
				let Some(snapshot) = lookup_snapshot(wavelets.as_ref(), &name).await? else {
					return Err(Error::Store {
						message: format!("wavelet {name} not found in any registry"),
					});
				};

				if snapshot.version != version {
					tracing::debug!(
						wavelet = %name,
						committed = version,
						current = snapshot.version,
						"Skipping reindex of a superseded commit."
					);

					return Ok(());
				}

				upsert_snapshot(index.as_ref(), &snapshot).await
			}),
		)
	}

	/// Trigger for uncommitted delta streams. Records are only rewritten on
	/// commit, so this does nothing.
	pub fn on_wavelet_update(&self, _name: &WaveletName, _deltas: &DeltaSequence) {}
}
