//! Sample Buffer Management
//!
//! Provides the core decoded-audio type for Wavetrim. Audio is stored as
//! non-interleaved 32-bit float samples, one `Vec<f32>` per channel, all
//! channels the same length. Sample values are not required to be clamped
//! to [-1.0, 1.0]; consumers clamp before quantization.

use crate::error::{Result, TrimError};

/// Core decoded-audio buffer for all processing in Wavetrim
///
/// Stores audio as non-interleaved 32-bit floating point samples.
/// Each channel is a separate `Vec<f32>` of exactly `frame_count()`
/// samples.
///
/// # Example
/// ```
/// use wavetrim::engine::SampleBuffer;
///
/// // One second of stereo silence at 44.1kHz
/// let buffer = SampleBuffer::silent(2, 44100, 44100);
/// assert_eq!(buffer.channel_count(), 2);
/// assert_eq!(buffer.frame_count(), 44100);
/// assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Sample data: outer Vec is channels, inner Vec is frames
    channels: Vec<Vec<f32>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer of silence with the given shape
    ///
    /// # Arguments
    /// * `channel_count` - Number of channels
    /// * `frame_count` - Number of frames (samples per channel)
    /// * `sample_rate` - Sample rate in Hz
    pub fn silent(channel_count: usize, frame_count: usize, sample_rate: u32) -> Self {
        Self {
            channels: vec![vec![0.0_f32; frame_count]; channel_count],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample data
    ///
    /// # Arguments
    /// * `channels` - One Vec of samples per channel
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// Returns `Decode` if the channel vectors have differing lengths,
    /// since producers of raw channel data are decoders.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if let Some(first) = channels.first() {
            let frame_count = first.len();
            if channels.iter().any(|ch| ch.len() != frame_count) {
                return Err(TrimError::Decode {
                    reason: "channel data has mismatched lengths".to_string(),
                    source: None,
                });
            }
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a buffer from interleaved sample data
    ///
    /// # Arguments
    /// * `interleaved` - Interleaved sample data (L, R, L, R, ... for stereo)
    /// * `channel_count` - Number of channels
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// Returns `Decode` if the data length is not divisible by the
    /// channel count.
    pub fn from_interleaved(
        interleaved: &[f32],
        channel_count: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if interleaved.is_empty() {
            return Ok(Self {
                channels: vec![Vec::new(); channel_count],
                sample_rate,
            });
        }

        if channel_count == 0 || interleaved.len() % channel_count != 0 {
            return Err(TrimError::Decode {
                reason: format!(
                    "interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    channel_count
                ),
                source: None,
            });
        }

        let frame_count = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frame_count); channel_count];

        for frame in interleaved.chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Convert the buffer to interleaved format
    ///
    /// # Returns
    /// A `Vec<f32>` with samples in frame-interleaved order
    /// (L, R, L, R, ... for stereo)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let channel_count = self.channel_count();
        let frame_count = self.frame_count();

        if channel_count == 0 || frame_count == 0 {
            return Vec::new();
        }

        let mut interleaved = Vec::with_capacity(channel_count * frame_count);

        for frame in 0..frame_count {
            for channel in &self.channels {
                interleaved.push(channel[frame]);
            }
        }

        interleaved
    }

    /// Get the number of channels
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Get the number of frames (samples per channel)
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Get the sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Iterate over the channels in order
    pub fn iter_channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Extract a copy of the frame range `[start_frame, end_frame)`
    ///
    /// Internal helper for the region renderer; callers validate the range.
    pub(crate) fn copy_frame_range(&self, start_frame: usize, end_frame: usize) -> Self {
        let channels = self
            .channels
            .iter()
            .map(|ch| ch[start_frame..end_frame].to_vec())
            .collect();
        Self {
            channels,
            sample_rate: self.sample_rate,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
