//! Accumulator for index matches before they are checked against live state.

use crest_domain::{WaveId, WaveletId};
use indexmap::{IndexMap, IndexSet};

/// Wave and wavelet ids matched by a backend query, in first-seen order.
///
/// The index ranks records; keeping insertion order preserves that ranking
/// through reconciliation. Duplicate records collapse onto their first
/// occurrence.
#[derive(Debug, Default)]
pub struct CandidateSet {
	waves: IndexMap<WaveId, IndexSet<WaveletId>>,
}
impl CandidateSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one matched index record. Re-inserting never reorders.
	pub fn insert(&mut self, wave_id: WaveId, wavelet_id: WaveletId) {
		self.waves.entry(wave_id).or_default().insert(wavelet_id);
	}

	/// Number of distinct waves seen so far.
	pub fn wave_count(&self) -> usize {
		self.waves.len()
	}

	pub fn is_empty(&self) -> bool {
		self.waves.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&WaveId, &IndexSet<WaveletId>)> {
		self.waves.iter()
	}
}
