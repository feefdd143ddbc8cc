//! Audio packaging: raw speech PCM to WAV container to base64 data URI.
//!
//! # Pipeline
//!
//! ```text
//! speech API (base64 PCM) → codec::decode → wav::pack_pcm → codec::to_data_uri
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use language_quiz::audio::{self, WavFormat};
//!
//! let pcm_b64 = audio::encode(&[0x00, 0x10, 0x00, 0xf0]);
//! let uri = audio::pcm_base64_to_wav_data_uri(&pcm_b64, &WavFormat::SPEECH).unwrap();
//! assert!(uri.starts_with("data:audio/wav;base64,UklGR"));
//! ```

pub mod codec;
pub mod wav;

use thiserror::Error;

pub use codec::{decode, encode, from_data_uri, to_data_uri, CodecError};
pub use wav::{pack_pcm, WavError, WavFormat, WAV_HEADER_LEN};

/// MIME type of packaged WAV audio.
pub const WAV_MIME: &str = "audio/wav";

/// Either half of the PCM → WAV data URI conversion failing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Wav(#[from] WavError),
}

/// Convert a base64 PCM payload from the speech API into a playable WAV data URI.
pub fn pcm_base64_to_wav_data_uri(pcm_base64: &str, format: &WavFormat) -> Result<String, AudioError> {
    let pcm = decode(pcm_base64)?;
    let wav = pack_pcm(&pcm, format)?;
    Ok(to_data_uri(WAV_MIME, &wav))
}
