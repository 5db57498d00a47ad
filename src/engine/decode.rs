//! Audio decoding for Wavetrim
//!
//! The edit session talks to decoding through the `AudioDecoder` trait so
//! any backend can be substituted. The bundled `WavDecoder` reads WAV bytes
//! from memory via `hound`, converting 8/16/24/32-bit integer and 32-bit
//! float sources to the internal f32 format.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use log::debug;

use crate::engine::buffer::SampleBuffer;
use crate::error::{Result, TrimError};

/// Decoder collaborator boundary
///
/// Accepts raw file bytes and produces a decoded `SampleBuffer`, or fails
/// with `Decode` for malformed/unsupported input. Called once per session
/// load.
pub trait AudioDecoder {
    /// Decode raw file bytes into a sample buffer
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer>;
}

/// WAV decoder over in-memory bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<SampleBuffer> {
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| TrimError::Decode {
            reason: format!("failed to parse WAV data: {}", e),
            source: Some(Box::new(e)),
        })?;

        let spec = reader.spec();
        let channel_count = spec.channels as usize;
        if channel_count == 0 {
            return Err(TrimError::Decode {
                reason: "WAV data declares zero channels".to_string(),
                source: None,
            });
        }

        let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
        let buffer = SampleBuffer::from_interleaved(&samples, channel_count, spec.sample_rate)?;

        debug!(
            "[DECODE] {} ch, {} Hz, {} frames ({:.3}s)",
            buffer.channel_count(),
            buffer.sample_rate(),
            buffer.frame_count(),
            buffer.duration_secs()
        );

        Ok(buffer)
    }
}

/// Read samples from a WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| TrimError::Decode {
                reason: format!("failed to read float samples: {}", e),
                source: Some(Box::new(e)),
            }),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| TrimError::Decode {
                    reason: format!("failed to read 8-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| TrimError::Decode {
                    reason: format!("failed to read 16-bit samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            24 => {
                // 24-bit stored as i32 in hound
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / 8388608.0))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(|e| TrimError::Decode {
                        reason: format!("failed to read 24-bit samples: {}", e),
                        source: Some(Box::new(e)),
                    })
            }
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| TrimError::Decode {
                    reason: format!("failed to read 32-bit int samples: {}", e),
                    source: Some(Box::new(e)),
                }),
            other => Err(TrimError::Decode {
                reason: format!("unsupported bit depth: {}-bit integer audio", other),
                source: None,
            }),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    /// Write 16-bit PCM WAV bytes in memory
    fn wav_bytes_i16(channels: u16, sample_rate: u32, frames: &[Vec<i16>]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for frame in frames {
                for &sample in frame {
                    writer.write_sample(sample).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_stereo_16bit() {
        let bytes = wav_bytes_i16(
            2,
            44100,
            &[vec![0, 16384], vec![-16384, 32767], vec![-32768, 0]],
        );
        let buffer = WavDecoder.decode(&bytes).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.frame_count(), 3);

        // 16-bit values scale by 1/32768
        assert_eq!(buffer.channel(0)[0], 0.0);
        assert_eq!(buffer.channel(0)[1], -0.5);
        assert_eq!(buffer.channel(0)[2], -1.0);
        assert_eq!(buffer.channel(1)[0], 0.5);
        assert!((buffer.channel(1)[1] - 32767.0 / 32768.0).abs() < 1e-7);
    }

    #[test]
    fn test_decode_mono_duration() {
        let frames: Vec<Vec<i16>> = (0..8000).map(|_| vec![0]).collect();
        let bytes = wav_bytes_i16(1, 8000, &frames);
        let buffer = WavDecoder.decode(&bytes).unwrap();

        assert_eq!(buffer.channel_count(), 1);
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_float_wav() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &sample in &[0.25_f32, -0.75, 1.0] {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }

        let buffer = WavDecoder.decode(&cursor.into_inner()).unwrap();
        assert_eq!(buffer.channel(0), &[0.25, -0.75, 1.0]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = WavDecoder.decode(b"this is not audio");
        assert!(matches!(result, Err(TrimError::Decode { .. })));
    }

    #[test]
    fn test_decode_empty_input_fails() {
        let result = WavDecoder.decode(&[]);
        assert!(matches!(result, Err(TrimError::Decode { .. })));
    }

    #[test]
    fn test_decode_truncated_header_fails() {
        let bytes = wav_bytes_i16(1, 44100, &[vec![100], vec![200]]);
        let result = WavDecoder.decode(&bytes[..20]);
        assert!(matches!(result, Err(TrimError::Decode { .. })));
    }
}
