//! Wavetrim - Region-Based Audio Trimming Engine
//!
//! Wavetrim implements the core of an audio trimming tool: decode audio
//! bytes into an in-memory sample buffer, select a time region, render the
//! region to a new buffer, and serialize it into a byte-exact RIFF/WAVE
//! container (16-bit PCM) for playback or export.
//!
//! # Architecture
//!
//! The pipeline is Decoder -> Region Renderer -> Container Encoder,
//! orchestrated by an [`EditSession`] that owns the single mutable working
//! buffer:
//! - `engine::buffer` - planar f32 sample buffers
//! - `engine::decode` - the decoder collaborator boundary plus a WAV backend
//! - `engine::render` - offline extraction of a `[start, end)` region
//! - `engine::encode` - the bit-exact WAV wire contract
//! - `session` - load/select/cut orchestration and state machine
//!
//! Presentation concerns (waveform display, drag handles, playback
//! transport) live outside this crate and interact with it only through
//! plain values: file bytes in, [`Selection`] values in, encoded clips out.

pub mod engine;
pub mod error;
pub mod session;

pub use engine::{encode_wav, render_region, EncodedClip, SampleBuffer, WavDecoder};
pub use error::{Result, TrimError};
pub use session::{EditSession, LoadTicket, Selection};
