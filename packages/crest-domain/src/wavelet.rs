use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
	content::DocOp,
	id::{ParticipantId, WaveId, WaveletId, WaveletName},
};

/// Point-in-time copy of a wavelet as read from the primary store.
///
/// `last_modified_time` is epoch milliseconds. Documents are keyed by name;
/// the map order fixes the order index batches are assembled in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveletSnapshot {
	pub wave_id: WaveId,
	pub wavelet_id: WaveletId,
	pub creator: ParticipantId,
	pub participants: Vec<ParticipantId>,
	pub last_modified_time: i64,
	pub version: i64,
	pub documents: BTreeMap<String, DocOp>,
}
impl WaveletSnapshot {
	pub fn name(&self) -> WaveletName {
		WaveletName::of(self.wave_id.clone(), self.wavelet_id.clone())
	}
}

/// Wavelets of one wave collected for a search result, in merge order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveViewData {
	pub wave_id: WaveId,
	pub wavelets: Vec<WaveletSnapshot>,
}
impl WaveViewData {
	pub fn new(wave_id: WaveId) -> Self {
		Self { wave_id, wavelets: Vec::new() }
	}

	pub fn add_wavelet(&mut self, snapshot: WaveletSnapshot) {
		self.wavelets.push(snapshot);
	}
}

/// Summary of a contiguous run of deltas delivered with an update
/// notification. Update notifications never trigger indexing on their own,
/// so the pipeline treats this as opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaSequence {
	pub end_version: i64,
	pub delta_count: usize,
}
