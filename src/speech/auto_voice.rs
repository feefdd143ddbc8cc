//! Pick dialogue voices that match the speakers' names.
//!
//! Each speaker name is classified as typically male or female. A known
//! gender gets a random voice from that gender's pool, avoiding the voice the
//! other speaker already has so the two stay distinguishable. Anything the
//! classifier cannot decide keeps the voice it had.

use rand::seq::SliceRandom;
use rand::Rng;

use super::voice::{SpeakerConfig, TtsVoice, VoiceGender};
use crate::genai::{GenderClassifier, NameGender};

/// Choose a voice for a speaker of `gender` that differs from `other` when possible.
///
/// Returns `None` for [`NameGender::Unknown`].
pub fn suggest_voice<R: Rng + ?Sized>(gender: NameGender, other: TtsVoice, rng: &mut R) -> Option<TtsVoice> {
    let gender = match gender {
        NameGender::Male => VoiceGender::Male,
        NameGender::Female => VoiceGender::Female,
        NameGender::Unknown => return None,
    };

    let pool = TtsVoice::voices_for(gender);
    let preferred: Vec<TtsVoice> = pool.iter().copied().filter(|v| *v != other).collect();
    if preferred.is_empty() {
        pool.choose(rng).copied()
    } else {
        preferred.choose(rng).copied()
    }
}

/// Reassign voices in a two-speaker config based on the speakers' names.
///
/// Speakers are handled in order, so the second speaker avoids the first
/// speaker's newly chosen voice. Single-speaker configs and blank names are
/// returned unchanged. Classification failures are logged and treated as
/// unknown.
pub async fn auto_assign_voices<R: Rng + Send + ?Sized>(
    config: SpeakerConfig,
    classifier: &dyn GenderClassifier,
    rng: &mut R,
) -> SpeakerConfig {
    let mut speakers = match config {
        SpeakerConfig::Multi { speakers } => speakers,
        single => return single,
    };

    for i in 0..speakers.len() {
        let name = speakers[i].name.trim().to_string();
        if name.is_empty() {
            continue;
        }

        let gender = match classifier.classify_name(&name).await {
            Ok(g) => g,
            Err(e) => {
                log::warn!("could not classify speaker name {name:?}: {e}");
                NameGender::Unknown
            }
        };

        let other = speakers[1 - i].voice;
        if let Some(voice) = suggest_voice(gender, other, rng) {
            log::info!("speaker {name:?} ({gender:?}) → {} ({})", voice, voice.friendly_name());
            speakers[i].voice = voice;
        }
    }

    SpeakerConfig::Multi { speakers }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
