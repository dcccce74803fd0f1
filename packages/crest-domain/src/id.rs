use serde::{Deserialize, Serialize};

/// Identity of a wave, held in its canonical serialized form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveId(String);
impl WaveId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl std::fmt::Display for WaveId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Identity of a wavelet within a wave.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveletId(String);
impl WaveletId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl std::fmt::Display for WaveletId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Fully qualified wavelet identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WaveletName {
	pub wave_id: WaveId,
	pub wavelet_id: WaveletId,
}
impl WaveletName {
	pub fn of(wave_id: WaveId, wavelet_id: WaveletId) -> Self {
		Self { wave_id, wavelet_id }
	}
}
impl std::fmt::Display for WaveletName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.wave_id, self.wavelet_id)
	}
}

/// Address of a participant, e.g. `alice@example.com`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);
impl ParticipantId {
	pub fn new(address: impl Into<String>) -> Self {
		Self(address.into())
	}

	/// The catch-all participant of a wave domain, addressed as `@domain`.
	/// Waves shared with the whole domain list it as a participant.
	pub fn shared_domain(domain: &str) -> Self {
		Self(format!("@{domain}"))
	}

	pub fn address(&self) -> &str {
		&self.0
	}
}
impl std::fmt::Display for ParticipantId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
