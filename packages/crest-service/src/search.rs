//! Per-user full-text search over the index.

pub mod candidates;
pub mod query;

use crest_domain::{ParticipantId, WaveId, WaveViewData, WaveletId};
use crest_storage::solr::{self, SelectQuery};

use self::candidates::CandidateSet;
use crate::{CrestService, error::Result};

impl CrestService {
	/// Runs `query` for `user` and materializes the matching waves, skipping
	/// the first `start_at` index records.
	///
	/// Backend failures degrade to an empty result rather than an error.
	pub async fn search(
		&self,
		user: &ParticipantId,
		query: &str,
		start_at: u32,
		num_results: u32,
	) -> Vec<WaveViewData> {
		tracing::debug!(user = %user, query, start_at, num_results, "Running search.");

		let candidates = match self.collect_candidates(user, query, start_at, num_results).await {
			Ok(candidates) => candidates,
			Err(err) => {
				tracing::warn!(error = %err, query, "Failed to execute query.");

				return Vec::new();
			},
		};
		let views = self.reconcile(&candidates).await;

		tracing::info!(user = %user, query, waves = views.len(), "Search finished.");

		views
	}

	/// Pages through the index until `num_results` distinct waves have been
	/// seen or the backend runs out of records.
	pub async fn collect_candidates(
		&self,
		user: &ParticipantId,
		query: &str,
		start_at: u32,
		num_results: u32,
	) -> Result<CandidateSet> {
		let mut candidates = CandidateSet::new();

		if num_results == 0 {
			return Ok(candidates);
		}

		let filter = query::build_filter(query, user, &self.shared_participant);
		let rows = num_results.max(self.cfg.search.min_page_rows);
		let mut start = start_at;

		loop {
			let page = self
				.index
				.select(&SelectQuery {
					start,
					rows,
					query: solr::FIELDS_PRESENT_QUERY.clone(),
					filter: filter.clone(),
				})
				.await?;
			let page_len = page.docs.len();

			if page_len == 0 {
				break;
			}

			for doc in page.docs {
				candidates.insert(WaveId::new(doc.wave_id), WaveletId::new(doc.wavelet_id));

				if candidates.wave_count() >= num_results as usize {
					break;
				}
			}

			if candidates.wave_count() >= num_results as usize || page_len < rows as usize {
				break;
			}

			start += rows;
		}

		Ok(candidates)
	}
}
