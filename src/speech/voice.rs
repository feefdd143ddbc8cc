//! Preset narrator voices and speaker configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TtsVoice
// ---------------------------------------------------------------------------

/// Prebuilt voices offered by the speech model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TtsVoice {
    Kore,
    Puck,
    Charon,
    Fenrir,
    Zephyr,
}

/// Perceived gender of a voice or a speaker name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceGender {
    Female,
    Male,
}

impl TtsVoice {
    pub const ALL: [TtsVoice; 5] = [
        TtsVoice::Kore,
        TtsVoice::Charon,
        TtsVoice::Zephyr,
        TtsVoice::Puck,
        TtsVoice::Fenrir,
    ];

    pub const FEMALE: [TtsVoice; 3] = [TtsVoice::Kore, TtsVoice::Charon, TtsVoice::Zephyr];
    pub const MALE: [TtsVoice; 2] = [TtsVoice::Puck, TtsVoice::Fenrir];

    /// Name the speech API expects in `prebuiltVoiceConfig.voiceName`.
    pub fn api_name(&self) -> &'static str {
        match self {
            TtsVoice::Kore => "Kore",
            TtsVoice::Puck => "Puck",
            TtsVoice::Charon => "Charon",
            TtsVoice::Fenrir => "Fenrir",
            TtsVoice::Zephyr => "Zephyr",
        }
    }

    /// Label shown to educators.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            TtsVoice::Kore => "Female Voice 1",
            TtsVoice::Charon => "Female Voice 2",
            TtsVoice::Zephyr => "Female Voice 3",
            TtsVoice::Puck => "Male Voice 1",
            TtsVoice::Fenrir => "Male Voice 2",
        }
    }

    pub fn gender(&self) -> VoiceGender {
        if Self::MALE.contains(self) {
            VoiceGender::Male
        } else {
            VoiceGender::Female
        }
    }

    pub fn voices_for(gender: VoiceGender) -> &'static [TtsVoice] {
        match gender {
            VoiceGender::Female => &Self::FEMALE,
            VoiceGender::Male => &Self::MALE,
        }
    }
}

impl fmt::Display for TtsVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for TtsVoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TtsVoice::ALL
            .into_iter()
            .find(|v| v.api_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = TtsVoice::ALL.iter().map(|v| v.api_name()).collect();
                format!("unknown voice `{s}` (expected one of: {})", names.join(", "))
            })
    }
}

// ---------------------------------------------------------------------------
// SpeakerConfig
// ---------------------------------------------------------------------------

/// A named participant in a two-person dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Must match the speaker label used in the script (e.g. `Anna: Hi!`).
    pub name: String,
    pub voice: TtsVoice,
}

impl Speaker {
    pub fn new(name: impl Into<String>, voice: TtsVoice) -> Self {
        Self {
            name: name.into(),
            voice,
        }
    }
}

/// Who narrates the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SpeakerConfig {
    /// One narrator reads the whole script.
    Single { voice: TtsVoice },
    /// A dialogue between exactly two named speakers.
    Multi { speakers: [Speaker; 2] },
}

impl SpeakerConfig {
    pub fn single(voice: TtsVoice) -> Self {
        SpeakerConfig::Single { voice }
    }

    pub fn dialogue(first: Speaker, second: Speaker) -> Self {
        SpeakerConfig::Multi {
            speakers: [first, second],
        }
    }
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        SpeakerConfig::single(TtsVoice::Kore)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
