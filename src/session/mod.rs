//! Edit Session
//!
//! Orchestrates the decode -> render -> encode pipeline and owns the single
//! mutable working buffer plus the current selection.
//!
//! # Call serialization
//!
//! A session is not shared across concurrent operations: every operation
//! takes `&mut self`, so the borrow checker serializes calls against one
//! session instance and no runtime busy-rejection is needed. For callers
//! that run decoding elsewhere (a worker, an async task), the two-phase
//! [`EditSession::begin_load`] / [`EditSession::finish_load`] API tags each
//! in-flight load with a generation; a completion whose generation has been
//! superseded by a newer load is discarded, so the last call wins regardless
//! of which decode finishes first.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::engine::buffer::SampleBuffer;
use crate::engine::decode::{AudioDecoder, WavDecoder};
use crate::engine::encode::{encode_wav, EncodedClip};
use crate::engine::render::render_region;
use crate::error::{Result, TrimError};

/// A contiguous time range `[start, end)` chosen for extraction
///
/// Plain value type with no behavior beyond validation; the visual overlay
/// that produces it lives entirely in the presentation layer. Serializable
/// so the UI boundary can pass it as data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    start_secs: f64,
    end_secs: f64,
}

impl Selection {
    /// Create a selection validated against a buffer duration
    ///
    /// # Errors
    /// Returns `InvalidSelection` unless `0 <= start < end <= duration`.
    pub fn new(start_secs: f64, end_secs: f64, duration_secs: f64) -> Result<Self> {
        if !(start_secs >= 0.0 && start_secs < end_secs && end_secs <= duration_secs) {
            return Err(TrimError::InvalidSelection {
                start: start_secs,
                end: end_secs,
                duration: duration_secs,
            });
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// The full-range selection `[0, duration]`
    pub fn full(duration_secs: f64) -> Self {
        Self {
            start_secs: 0.0,
            end_secs: duration_secs,
        }
    }

    /// Selection start in seconds
    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    /// Selection end in seconds
    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    /// Selected length in seconds
    pub fn len_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Ticket identifying one in-flight load
///
/// Returned by [`EditSession::begin_load`]; redeem it with
/// [`EditSession::finish_load`] once decoding completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Loaded state: working buffer plus current selection
#[derive(Debug, Clone)]
struct SessionState {
    buffer: SampleBuffer,
    selection: Selection,
}

/// Orchestrator for the trim pipeline
///
/// Holds the current working buffer and selection, and coordinates
/// Decoder -> Renderer -> Encoder on each cut. The session starts
/// uninitialized; edits are rejected with `NotReady` until the first
/// successful [`load`](EditSession::load). A session never terminates and
/// is reusable indefinitely; loading a new file replaces the buffer
/// entirely.
///
/// # Example
/// ```no_run
/// use wavetrim::EditSession;
///
/// let mut session = EditSession::default();
/// let file_bytes: Vec<u8> = std::fs::read("take.wav").unwrap();
///
/// let duration = session.load(&file_bytes).unwrap();
/// session.set_selection(1.0, duration / 2.0).unwrap();
/// let clip = session.cut().unwrap();
/// assert_eq!(clip.mime_type(), "audio/wav");
/// ```
#[derive(Debug)]
pub struct EditSession<D: AudioDecoder = WavDecoder> {
    decoder: D,
    state: Option<SessionState>,
    latest_load: u64,
}

impl Default for EditSession<WavDecoder> {
    fn default() -> Self {
        Self::new(WavDecoder)
    }
}

impl<D: AudioDecoder> EditSession<D> {
    /// Create an uninitialized session around a decoder collaborator
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            state: None,
            latest_load: 0,
        }
    }

    /// Check whether the first decode has completed
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// Duration of the current buffer in seconds, if loaded
    pub fn duration_secs(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.buffer.duration_secs())
    }

    /// The current selection, if loaded
    pub fn selection(&self) -> Option<Selection> {
        self.state.as_ref().map(|s| s.selection)
    }

    /// The current working buffer, if loaded
    pub fn buffer(&self) -> Option<&SampleBuffer> {
        self.state.as_ref().map(|s| &s.buffer)
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Decode file bytes and make the result the working buffer
    ///
    /// On success the selection resets to the full new duration, which is
    /// returned. On failure the session keeps its prior state (or stays
    /// uninitialized if this was the first load).
    ///
    /// # Errors
    /// Propagates `Decode` from the decoder collaborator.
    pub fn load(&mut self, bytes: &[u8]) -> Result<f64> {
        // A synchronous load supersedes any ticket still outstanding
        self.latest_load = self.latest_load.wrapping_add(1);
        let buffer = self.decoder.decode(bytes)?;
        Ok(self.install_buffer(buffer))
    }

    /// Begin a load whose decode runs elsewhere
    ///
    /// Issues a ticket for the in-flight operation and supersedes all
    /// earlier tickets.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load = self.latest_load.wrapping_add(1);
        debug!("[SESSION] Load {} begun", self.latest_load);
        LoadTicket {
            generation: self.latest_load,
        }
    }

    /// Complete a load begun with [`begin_load`](EditSession::begin_load)
    ///
    /// If the ticket has been superseded by a newer load, the decode result
    /// is discarded and `Ok(None)` is returned; the superseded result never
    /// overwrites state written by a later call. Otherwise behaves like
    /// [`load`](EditSession::load) and returns `Ok(Some(duration))`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        decoded: Result<SampleBuffer>,
    ) -> Result<Option<f64>> {
        if ticket.generation != self.latest_load {
            warn!(
                "[SESSION] Discarding stale load {} (latest is {})",
                ticket.generation, self.latest_load
            );
            return Ok(None);
        }
        let buffer = decoded?;
        Ok(Some(self.install_buffer(buffer)))
    }

    fn install_buffer(&mut self, buffer: SampleBuffer) -> f64 {
        let duration = buffer.duration_secs();
        debug!(
            "[SESSION] Buffer installed: {} ch, {} Hz, {:.3}s",
            buffer.channel_count(),
            buffer.sample_rate(),
            duration
        );
        self.state = Some(SessionState {
            buffer,
            selection: Selection::full(duration),
        });
        duration
    }

    // ========================================================================
    // Edit
    // ========================================================================

    /// Set the selection to `[start_secs, end_secs)`
    ///
    /// Never touches the working buffer.
    ///
    /// # Errors
    /// * `NotReady` - before the first successful load
    /// * `InvalidSelection` - unless `0 <= start < end <= duration`
    pub fn set_selection(&mut self, start_secs: f64, end_secs: f64) -> Result<()> {
        let state = self.state.as_mut().ok_or(TrimError::NotReady)?;
        let duration = state.buffer.duration_secs();
        state.selection = Selection::new(start_secs, end_secs, duration)?;
        debug!(
            "[SESSION] Selection set to [{:.3}s, {:.3}s)",
            start_secs, end_secs
        );
        Ok(())
    }

    /// Render the current selection and encode it as a WAV clip
    ///
    /// On success the renderer's raw output (not a re-decode of the encoded
    /// bytes, which would add a lossy round-trip) becomes the working
    /// buffer, the selection resets to the full new duration, and the
    /// encoded clip is returned. On any failure the buffer and selection
    /// are left untouched.
    ///
    /// # Errors
    /// * `NotReady` - before the first successful load
    /// * Renderer and encoder errors propagate unchanged
    pub fn cut(&mut self) -> Result<EncodedClip> {
        let state = self.state.as_mut().ok_or(TrimError::NotReady)?;
        let selection = state.selection;

        let rendered = render_region(&state.buffer, selection.start_secs(), selection.end_secs())?;
        let clip = encode_wav(&rendered)?;

        // Both stages succeeded: atomically replace the working state
        let duration = rendered.duration_secs();
        debug!(
            "[SESSION] Cut [{:.3}s, {:.3}s) -> {:.3}s working buffer, {} byte clip",
            selection.start_secs(),
            selection.end_secs(),
            duration,
            clip.len()
        );
        state.buffer = rendered;
        state.selection = Selection::full(duration);

        Ok(clip)
    }
}

// ============================================================================
// Tests
// ============================================================================
