//! Region Renderer
//!
//! Extracts the sub-range `[start, end)` of a `SampleBuffer` as a new,
//! independent buffer. This is an offline, non-real-time render pass over a
//! fixed-size buffer: deterministic, no side effects, the input is read-only.

use log::debug;

use crate::engine::buffer::SampleBuffer;
use crate::error::{Result, TrimError};

/// Render the time range `[start_secs, end_secs)` of a buffer
///
/// The frame range is `[floor(start * rate), floor(end * rate))`. The output
/// buffer has the same channel count and sample rate as the input; its
/// per-channel data is a copy, not a view.
///
/// # Arguments
/// * `buffer` - Source buffer, unchanged by this call
/// * `start_secs` - Region start in seconds
/// * `end_secs` - Region end in seconds (exclusive)
///
/// # Errors
/// * `InvalidRange` - unless `0 <= start < end <= duration`
/// * `EmptyRange` - if the range rounds down to zero frames
///
/// # Example
/// ```
/// use wavetrim::engine::{render_region, SampleBuffer};
///
/// let buffer = SampleBuffer::silent(1, 44100, 44100);
/// let region = render_region(&buffer, 0.25, 0.75).unwrap();
/// assert_eq!(region.frame_count(), 22050);
/// assert_eq!(region.sample_rate(), 44100);
/// ```
pub fn render_region(buffer: &SampleBuffer, start_secs: f64, end_secs: f64) -> Result<SampleBuffer> {
    let duration = buffer.duration_secs();

    // NaN comparisons fail this check too
    if !(start_secs >= 0.0 && start_secs < end_secs && end_secs <= duration) {
        return Err(TrimError::InvalidRange {
            start: start_secs,
            end: end_secs,
            duration,
        });
    }

    let rate = buffer.sample_rate() as f64;
    let start_frame = (start_secs * rate).floor() as usize;
    // end == duration must mean the full tail even when duration * rate
    // rounds a hair below the frame count; overshoot is clamped
    let end_frame = if end_secs >= duration {
        buffer.frame_count()
    } else {
        ((end_secs * rate).floor() as usize).min(buffer.frame_count())
    };

    if end_frame <= start_frame {
        return Err(TrimError::EmptyRange {
            start: start_secs,
            end: end_secs,
        });
    }

    debug!(
        "[RENDER] [{:.3}s, {:.3}s) -> frames [{}, {}) of {}",
        start_secs,
        end_secs,
        start_frame,
        end_frame,
        buffer.frame_count()
    );

    Ok(buffer.copy_frame_range(start_frame, end_frame))
}

// ============================================================================
// Tests
// ============================================================================
