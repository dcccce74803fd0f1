//! Cross-check of index matches against live wavelet state.
//!
//! The index lags the registries, so every candidate is re-read before it is
//! returned. A record whose wavelet has disappeared is dropped silently.

use indexmap::IndexMap;

use crest_domain::{WaveViewData, WaveletName};

use crate::{CrestService, lookup_snapshot, search::candidates::CandidateSet};

impl CrestService {
	/// Assembles per-wave views from live snapshots of `candidates`.
	///
	/// Waves whose wavelets have all disappeared produce no view. A registry
	/// read failure drops that wavelet and keeps the rest of the result.
	pub async fn reconcile(&self, candidates: &CandidateSet) -> Vec<WaveViewData> {
		let mut views = IndexMap::new();

		for (wave_id, wavelet_ids) in candidates.iter() {
			for wavelet_id in wavelet_ids {
				let name = WaveletName::of(wave_id.clone(), wavelet_id.clone());
				let snapshot = match lookup_snapshot(self.wavelets.as_ref(), &name).await {
					Ok(Some(snapshot)) => snapshot,
					Ok(None) => {
						tracing::debug!(wavelet = %name, "Wavelet not found in any registry.");

						continue;
					},
					Err(err) => {
						tracing::error!(
							error = %err,
							wavelet = %name,
							"Failed to load wavelet; dropping it from the results."
						);

						continue;
					},
				};

				views
					.entry(wave_id.clone())
					.or_insert_with(|| WaveViewData::new(wave_id.clone()))
					.add_wavelet(snapshot);
			}
		}

		views.into_values().collect()
	}
}
