//! Audio Engine Module
//!
//! Core audio processing for Wavetrim:
//! - Sample buffer management
//! - Decoding (the collaborator boundary and a bundled WAV backend)
//! - Region rendering
//! - WAV container encoding

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod render;

pub use buffer::SampleBuffer;
pub use decode::{AudioDecoder, WavDecoder};
pub use encode::{encode_wav, quantize_sample, EncodedClip, WAV_HEADER_LEN, WAV_MIME_TYPE};
pub use render::render_region;
