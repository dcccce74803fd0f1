pub mod content;
pub mod id;
pub mod wavelet;

pub use content::{Attributes, DocComponent, DocOp, collate_text};
pub use id::{ParticipantId, WaveId, WaveletId, WaveletName};
pub use wavelet::{DeltaSequence, WaveViewData, WaveletSnapshot};
