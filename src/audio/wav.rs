//! Raw PCM → WAV container packaging.
//!
//! The speech API returns headerless signed 16-bit little-endian mono PCM.
//! Browsers cannot play that directly, so [`pack_pcm`] prepends the canonical
//! 44-byte RIFF/WAVE header and copies the samples through untouched.
//!
//! ```text
//! offset  size  field
//!  0      4     "RIFF"
//!  4      4     36 + data_size
//!  8      4     "WAVE"
//! 12      4     "fmt "
//! 16      4     16           (fmt chunk size)
//! 20      2     1            (linear PCM)
//! 22      2     channels
//! 24      4     sample_rate
//! 28      4     byte_rate
//! 32      2     block_align
//! 34      2     bits_per_sample
//! 36      4     "data"
//! 40      4     data_size
//! 44      N     samples
//! ```
//!
//! # Example
//!
//! ```rust
//! use language_quiz::audio::{pack_pcm, WavFormat};
//!
//! let wav = pack_pcm(&[0x01, 0x02, 0x03, 0x04], &WavFormat::default()).unwrap();
//! assert_eq!(wav.len(), 48);
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the fixed RIFF/WAVE header written before the samples.
pub const WAV_HEADER_LEN: usize = 44;

/// Bytes of header that follow the `chunk size` field, excluding the payload.
const RIFF_OVERHEAD: u32 = 36;

// ---------------------------------------------------------------------------
// WavError
// ---------------------------------------------------------------------------

/// Reasons a PCM buffer cannot be packaged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WavError {
    /// The payload does not hold a whole number of sample frames.
    #[error("PCM length {len} is not a multiple of the {block_align}-byte frame size")]
    Misaligned { len: usize, block_align: u16 },

    /// `channels` is zero.
    #[error("channel count must be at least 1")]
    NoChannels,

    /// `bits_per_sample` is zero or not a whole number of bytes.
    #[error("bits per sample must be a positive multiple of 8 (got {0})")]
    InvalidBitDepth(u16),

    /// The frame size or byte rate does not fit its header field.
    #[error("format fields overflow the WAV header ({channels} ch, {bits_per_sample} bit, {sample_rate} Hz)")]
    FormatOverflow {
        channels: u16,
        bits_per_sample: u16,
        sample_rate: u32,
    },

    /// The payload is too large for the 32-bit size fields.
    #[error("PCM payload of {0} bytes exceeds the 4 GiB WAV limit")]
    TooLarge(usize),
}

// ---------------------------------------------------------------------------
// WavFormat
// ---------------------------------------------------------------------------

/// Sample layout of a PCM payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Speech API output: 24 kHz mono 16-bit.
    pub const SPEECH: WavFormat = WavFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
    };

    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Bytes per sample frame (`channels * bits_per_sample / 8`).
    pub fn block_align(&self) -> Result<u16, WavError> {
        self.check()?;
        let align = u32::from(self.channels) * u32::from(self.bits_per_sample / 8);
        u16::try_from(align).map_err(|_| self.overflow())
    }

    /// Bytes per second of audio (`sample_rate * block_align`).
    pub fn byte_rate(&self) -> Result<u32, WavError> {
        let align = self.block_align()?;
        self.sample_rate
            .checked_mul(u32::from(align))
            .ok_or_else(|| self.overflow())
    }

    /// Playback length of `data_len` payload bytes in seconds.
    pub fn duration_secs(&self, data_len: usize) -> f32 {
        match self.byte_rate() {
            Ok(rate) if rate > 0 => data_len as f32 / rate as f32,
            _ => 0.0,
        }
    }

    fn check(&self) -> Result<(), WavError> {
        if self.channels == 0 {
            return Err(WavError::NoChannels);
        }
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(WavError::InvalidBitDepth(self.bits_per_sample));
        }
        Ok(())
    }

    fn overflow(&self) -> WavError {
        WavError::FormatOverflow {
            channels: self.channels,
            bits_per_sample: self.bits_per_sample,
            sample_rate: self.sample_rate,
        }
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::SPEECH
    }
}

// ---------------------------------------------------------------------------
// Packaging
// ---------------------------------------------------------------------------

/// Wrap `pcm` in a WAV container described by `format`.
///
/// The payload length must be a whole number of frames; a misaligned buffer
/// is rejected instead of producing a header that misreports its size.
///
/// # Errors
///
/// - [`WavError::Misaligned`]: `pcm.len()` is not a multiple of the frame size.
/// - [`WavError::NoChannels`] / [`WavError::InvalidBitDepth`] /
///   [`WavError::FormatOverflow`]: `format` cannot be expressed in the header.
/// - [`WavError::TooLarge`]: `36 + pcm.len()` does not fit in a `u32`.
pub fn pack_pcm(pcm: &[u8], format: &WavFormat) -> Result<Vec<u8>, WavError> {
    let header = WavHeader::for_payload(pcm.len(), format)?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    header
        .write_to(&mut out)
        .and_then(|()| out.write_all(pcm))
        .expect("writing to a Vec cannot fail");

    log::debug!(
        "packed {} PCM bytes into WAV ({:.2}s @ {} Hz)",
        pcm.len(),
        format.duration_secs(pcm.len()),
        format.sample_rate
    );
    Ok(out)
}

/// Validated header fields for one payload.
struct WavHeader {
    format: WavFormat,
    block_align: u16,
    byte_rate: u32,
    data_size: u32,
}

impl WavHeader {
    fn for_payload(len: usize, format: &WavFormat) -> Result<Self, WavError> {
        let block_align = format.block_align()?;
        let byte_rate = format.byte_rate()?;

        if len % usize::from(block_align) != 0 {
            return Err(WavError::Misaligned { len, block_align });
        }

        let data_size = u32::try_from(len)
            .ok()
            .filter(|size| size.checked_add(RIFF_OVERHEAD).is_some())
            .ok_or(WavError::TooLarge(len))?;

        Ok(Self {
            format: *format,
            block_align,
            byte_rate,
            data_size,
        })
    }

    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        // RIFF header
        w.write_all(b"RIFF")?;
        w.write_all(&(RIFF_OVERHEAD + self.data_size).to_le_bytes())?;
        w.write_all(b"WAVE")?;

        // fmt chunk
        w.write_all(b"fmt ")?;
        w.write_all(&16u32.to_le_bytes())?;
        w.write_all(&1u16.to_le_bytes())?; // linear PCM
        w.write_all(&self.format.channels.to_le_bytes())?;
        w.write_all(&self.format.sample_rate.to_le_bytes())?;
        w.write_all(&self.byte_rate.to_le_bytes())?;
        w.write_all(&self.block_align.to_le_bytes())?;
        w.write_all(&self.format.bits_per_sample.to_le_bytes())?;

        // data chunk
        w.write_all(b"data")?;
        w.write_all(&self.data_size.to_le_bytes())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(buf[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn four_byte_payload_produces_48_byte_file() {
        let pcm = [0x01, 0x02, 0x03, 0x04];
        let wav = pack_pcm(&pcm, &WavFormat::new(24_000, 1, 16)).unwrap();

        assert_eq!(wav.len(), 48);
        assert_eq!(u32_at(&wav, 40), 4);
        assert_eq!(&wav[44..48], &pcm);
    }

    #[test]
    fn header_fields_match_speech_format() {
        let pcm = vec![0u8; 480];
        let wav = pack_pcm(&pcm, &WavFormat::SPEECH).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 480);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 24_000);
        assert_eq!(u32_at(&wav, 28), 48_000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 480);
    }

    #[test]
    fn size_fields_stay_consistent() {
        for len in [0usize, 2, 100, 4096] {
            let wav = pack_pcm(&vec![0x7f; len], &WavFormat::SPEECH).unwrap();
            assert_eq!(wav.len(), WAV_HEADER_LEN + len);
            assert_eq!(u32_at(&wav, 4), 36 + u32_at(&wav, 40));
            assert_eq!(u32_at(&wav, 40) as usize, len);
        }
    }

    #[test]
    fn empty_payload_is_valid() {
        let wav = pack_pcm(&[], &WavFormat::SPEECH).unwrap();
        assert_eq!(wav.len(), 44);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
    }

    #[test]
    fn payload_is_copied_verbatim() {
        let pcm: Vec<u8> = (0..=255u8).collect();
        let wav = pack_pcm(&pcm, &WavFormat::SPEECH).unwrap();
        assert_eq!(&wav[44..], pcm.as_slice());
    }

    #[test]
    fn stereo_format_computes_derived_fields() {
        let format = WavFormat::new(44_100, 2, 16);
        let wav = pack_pcm(&[0u8; 8], &format).unwrap();
        assert_eq!(u16_at(&wav, 22), 2);
        assert_eq!(u16_at(&wav, 32), 4);
        assert_eq!(u32_at(&wav, 28), 176_400);
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = pack_pcm(&[0x01, 0x02, 0x03], &WavFormat::SPEECH).unwrap_err();
        assert_eq!(
            err,
            WavError::Misaligned {
                len: 3,
                block_align: 2
            }
        );
    }

    #[test]
    fn stereo_frame_misalignment_is_rejected() {
        // 6 bytes = 3 mono samples but 1.5 stereo frames.
        let err = pack_pcm(&[0u8; 6], &WavFormat::new(24_000, 2, 16)).unwrap_err();
        assert!(matches!(err, WavError::Misaligned { len: 6, block_align: 4 }));
    }

    #[test]
    fn zero_channels_is_rejected() {
        let err = pack_pcm(&[], &WavFormat::new(24_000, 0, 16)).unwrap_err();
        assert_eq!(err, WavError::NoChannels);
    }

    #[test]
    fn fractional_bit_depth_is_rejected() {
        let err = pack_pcm(&[], &WavFormat::new(24_000, 1, 12)).unwrap_err();
        assert_eq!(err, WavError::InvalidBitDepth(12));
    }

    #[test]
    fn overflowing_byte_rate_is_rejected() {
        let err = pack_pcm(&[], &WavFormat::new(u32::MAX, 2, 16)).unwrap_err();
        assert!(matches!(err, WavError::FormatOverflow { .. }));
    }

    #[test]
    fn duration_of_one_second() {
        assert!((WavFormat::SPEECH.duration_secs(48_000) - 1.0).abs() < 1e-6);
    }
}
