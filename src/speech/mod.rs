//! Narration settings: preset voices, single vs. dialogue speakers, and
//! name-based voice assignment.

pub mod auto_voice;
pub mod voice;

pub use auto_voice::{auto_assign_voices, suggest_voice};
pub use voice::{Speaker, SpeakerConfig, TtsVoice, VoiceGender};
