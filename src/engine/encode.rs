//! Container Encoder
//!
//! Serializes a `SampleBuffer` into a canonical RIFF/WAVE container with a
//! 44-byte header and a frame-interleaved 16-bit signed little-endian PCM
//! payload. This is the one bit-exact wire contract of the system: the blob
//! is exactly `44 + frames * channels * 2` bytes.
//!
//! Pure function over the input buffer: no I/O, no shared state.

use log::debug;

use crate::engine::buffer::SampleBuffer;
use crate::error::{Result, TrimError};

/// MIME type of every clip this encoder produces
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Size of the RIFF/WAVE header in bytes
pub const WAV_HEADER_LEN: usize = 44;

/// An encoded audio clip, immutable once produced
///
/// Created by [`encode_wav`]; consumed by playback and export. The byte
/// blob and MIME type cannot be modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedClip {
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl EncodedClip {
    /// Get the MIME type (`"audio/wav"`)
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Get the encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the total size of the blob in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the blob is empty (never true for encoder output)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the clip, returning the raw bytes for export
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Quantize one float sample to signed 16-bit PCM
///
/// The sample is clamped to [-1.0, 1.0] first, then scaled asymmetrically:
/// negative values by 32768, non-negative by 32767, matching the signed
/// 16-bit range [-32768, 32767] that downstream decoders expect.
///
/// # Example
/// ```
/// use wavetrim::engine::quantize_sample;
///
/// assert_eq!(quantize_sample(1.0), 32767);
/// assert_eq!(quantize_sample(-1.0), -32768);
/// assert_eq!(quantize_sample(0.0), 0);
/// assert_eq!(quantize_sample(1.5), 32767); // clamps first
/// ```
#[inline]
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0).round() as i16
    } else {
        (clamped * 32767.0).round() as i16
    }
}

/// Encode a sample buffer into a RIFF/WAVE blob
///
/// Layout, all multi-byte fields little-endian:
///
/// | Offset | Content |
/// |--------|---------|
/// | 0      | `"RIFF"` |
/// | 4      | u32: `36 + frames * channels * 2` |
/// | 8      | `"WAVE"`, `"fmt "` |
/// | 16     | u32: 16 (format chunk length) |
/// | 20     | u16: 1 (linear PCM) |
/// | 22     | u16: channel count |
/// | 24     | u32: sample rate |
/// | 28     | u32: byte rate |
/// | 32     | u16: block align, u16: 16 bits per sample |
/// | 36     | `"data"`, u32: payload length |
/// | 44     | frame-interleaved i16 samples |
///
/// # Errors
/// * `UnsupportedChannelLayout` - if the buffer has zero channels (or more
///   than the format's u16 channel field can hold)
/// * `EncodingOverflow` - if the payload does not fit the container's
///   32-bit size fields
pub fn encode_wav(buffer: &SampleBuffer) -> Result<EncodedClip> {
    let channel_count = buffer.channel_count();
    if channel_count == 0 || channel_count > u16::MAX as usize {
        return Err(TrimError::UnsupportedChannelLayout);
    }

    let frame_count = buffer.frame_count();
    let data_bytes = frame_count as u64 * channel_count as u64 * 2;
    if data_bytes > u32::MAX as u64 - 36 {
        return Err(TrimError::EncodingOverflow { data_bytes });
    }

    let sample_rate = buffer.sample_rate();
    let byte_rate = sample_rate as u64 * channel_count as u64 * 2;
    if byte_rate > u32::MAX as u64 {
        return Err(TrimError::EncodingOverflow { data_bytes });
    }

    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + data_bytes as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_bytes as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16_u32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&(channel_count as u16).to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(byte_rate as u32).to_le_bytes());
    bytes.extend_from_slice(&((channel_count * 2) as u16).to_le_bytes());
    bytes.extend_from_slice(&16_u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data_bytes as u32).to_le_bytes());

    // Payload is frame-major: for each frame, one sample per channel
    for frame in 0..frame_count {
        for channel in buffer.iter_channels() {
            bytes.extend_from_slice(&quantize_sample(channel[frame]).to_le_bytes());
        }
    }

    debug!(
        "[ENCODE] {} ch, {} Hz, {} frames -> {} bytes",
        channel_count,
        sample_rate,
        frame_count,
        bytes.len()
    );

    Ok(EncodedClip {
        mime_type: WAV_MIME_TYPE,
        bytes,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn i16_at(bytes: &[u8], offset: usize) -> i16 {
        i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    // ------------------------------------------------------------------------
    // Quantization
    // ------------------------------------------------------------------------

    #[test_case(1.0, 32767 ; "positive full scale")]
    #[test_case(-1.0, -32768 ; "negative full scale")]
    #[test_case(0.0, 0 ; "zero")]
    #[test_case(1.5, 32767 ; "out of range positive clamps")]
    #[test_case(-2.0, -32768 ; "out of range negative clamps")]
    #[test_case(0.5, 16384 ; "positive half scale rounds")]
    #[test_case(-0.5, -16384 ; "negative half scale")]
    fn test_quantize_sample(input: f32, expected: i16) {
        assert_eq!(quantize_sample(input), expected);
    }

    #[test]
    fn test_quantize_out_of_range_matches_full_scale() {
        assert_eq!(quantize_sample(1.5), quantize_sample(1.0));
        assert_eq!(quantize_sample(-7.0), quantize_sample(-1.0));
    }

    // ------------------------------------------------------------------------
    // Header layout
    // ------------------------------------------------------------------------

    #[test]
    fn test_header_exactness() {
        // C=2, N=1000, R=44100 per the wire contract
        let buffer = SampleBuffer::silent(2, 1000, 44100);
        let clip = encode_wav(&buffer).unwrap();
        let bytes = clip.bytes();

        assert_eq!(clip.len(), 44 + 1000 * 2 * 2); // 4044 bytes total

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(bytes, 4), 36 + 4000);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(bytes, 16), 16);
        assert_eq!(u16_at(bytes, 20), 1); // linear PCM
        assert_eq!(bytes[22], 2); // low byte of channel count
        assert_eq!(u16_at(bytes, 22), 2);
        assert_eq!(u32_at(bytes, 24), 44100);
        assert_eq!(u32_at(bytes, 28), 44100 * 2 * 2); // byte rate
        assert_eq!(u16_at(bytes, 32), 4); // block align
        assert_eq!(u16_at(bytes, 34), 16); // bits per sample
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(bytes, 40), 4000);
    }

    #[test]
    fn test_empty_buffer_header_only() {
        let buffer = SampleBuffer::silent(1, 0, 48000);
        let clip = encode_wav(&buffer).unwrap();

        assert_eq!(clip.len(), WAV_HEADER_LEN);
        assert_eq!(u32_at(clip.bytes(), 40), 0);
        assert!(!clip.is_empty()); // the blob still carries the header
    }

    // ------------------------------------------------------------------------
    // Payload interleaving
    // ------------------------------------------------------------------------

    #[test]
    fn test_payload_frame_interleaved() {
        // Distinct values per channel and frame so ordering is visible
        let buffer = SampleBuffer::from_channels(
            vec![
                vec![0.0, 0.5],   // left:  frames 0, 1
                vec![-0.5, 1.0],  // right: frames 0, 1
            ],
            44100,
        )
        .unwrap();
        let clip = encode_wav(&buffer).unwrap();
        let bytes = clip.bytes();

        // frame 0: L then R, frame 1: L then R
        assert_eq!(i16_at(bytes, 44), 0);
        assert_eq!(i16_at(bytes, 46), -16384);
        assert_eq!(i16_at(bytes, 48), 16384);
        assert_eq!(i16_at(bytes, 50), 32767);
    }

    #[test]
    fn test_mono_payload() {
        let buffer = SampleBuffer::from_channels(vec![vec![1.0, -1.0, 0.0]], 8000).unwrap();
        let clip = encode_wav(&buffer).unwrap();
        let bytes = clip.bytes();

        assert_eq!(clip.len(), 44 + 6);
        assert_eq!(i16_at(bytes, 44), 32767);
        assert_eq!(i16_at(bytes, 46), -32768);
        assert_eq!(i16_at(bytes, 48), 0);
    }

    // ------------------------------------------------------------------------
    // Errors and properties
    // ------------------------------------------------------------------------

    #[test]
    fn test_zero_channels_rejected() {
        let buffer = SampleBuffer::silent(0, 100, 44100);
        let result = encode_wav(&buffer);
        assert!(matches!(result, Err(TrimError::UnsupportedChannelLayout)));
    }

    #[test]
    fn test_mime_type() {
        let buffer = SampleBuffer::silent(1, 10, 44100);
        let clip = encode_wav(&buffer).unwrap();
        assert_eq!(clip.mime_type(), "audio/wav");
    }

    #[test]
    fn test_deterministic() {
        let buffer = SampleBuffer::from_channels(vec![vec![0.25, -0.75, 0.1]], 22050).unwrap();
        let a = encode_wav(&buffer).unwrap();
        let b = encode_wav(&buffer).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_into_bytes() {
        let buffer = SampleBuffer::silent(1, 10, 44100);
        let clip = encode_wav(&buffer).unwrap();
        let len = clip.len();
        let bytes = clip.into_bytes();
        assert_eq!(bytes.len(), len);
        assert_eq!(&bytes[0..4], b"RIFF");
    }
}
