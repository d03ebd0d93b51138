//! Voice identifiers and the voice selection setting.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Wire value of the "pick a random real voice" selection.
pub const RANDOM_VOICE_MARKER: &str = "random";

/// A concrete synthesis voice.
///
/// The set is closed: these are the only voices the synthesis engine is
/// asked to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    #[serde(rename = "ru-RU-SvetlanaNeural")]
    Svetlana,
    #[serde(rename = "ru-RU-DmitryNeural")]
    Dmitry,
}

impl Voice {
    /// Every concrete voice, in display order.
    pub const ALL: [Self; 2] = [Self::Svetlana, Self::Dmitry];

    /// Engine-facing identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Svetlana => "ru-RU-SvetlanaNeural",
            Self::Dmitry => "ru-RU-DmitryNeural",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Svetlana => "Светлана",
            Self::Dmitry => "Дмитрий",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A voice identifier outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown voice '{0}'")]
pub struct UnknownVoice(pub String);

impl FromStr for Voice {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|voice| voice.id() == s)
            .ok_or_else(|| UnknownVoice(s.to_string()))
    }
}

/// The configured voice: either a concrete voice or "random".
///
/// Serialized as the bare string (`"ru-RU-DmitryNeural"` or `"random"`).
/// Random is resolved once per accepted request, at the enqueue boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VoiceSelection {
    Concrete(Voice),
    Random,
}

impl VoiceSelection {
    /// Resolve to a concrete voice using the thread-local random source.
    pub fn resolve(self) -> Voice {
        self.resolve_with(&mut rand::thread_rng())
    }

    /// Resolve to a concrete voice using the given random source.
    ///
    /// Concrete selections are returned unchanged; `Random` draws uniformly
    /// from [`Voice::ALL`].
    pub fn resolve_with<R: Rng + ?Sized>(self, rng: &mut R) -> Voice {
        match self {
            Self::Concrete(voice) => voice,
            Self::Random => Voice::ALL[rng.gen_range(0..Voice::ALL.len())],
        }
    }

    /// Wire value of this selection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concrete(voice) => voice.id(),
            Self::Random => RANDOM_VOICE_MARKER,
        }
    }
}

impl Default for VoiceSelection {
    fn default() -> Self {
        Self::Concrete(Voice::Svetlana)
    }
}

impl From<Voice> for VoiceSelection {
    fn from(voice: Voice) -> Self {
        Self::Concrete(voice)
    }
}

impl fmt::Display for VoiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceSelection {
    type Err = UnknownVoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == RANDOM_VOICE_MARKER {
            Ok(Self::Random)
        } else {
            s.parse().map(Self::Concrete)
        }
    }
}

impl TryFrom<String> for VoiceSelection {
    type Error = UnknownVoice;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VoiceSelection> for String {
    fn from(selection: VoiceSelection) -> Self {
        selection.as_str().to_string()
    }
}

/// Resolve a selection to a concrete voice.
///
/// Identity on concrete selections.
pub fn resolve_voice(selection: VoiceSelection) -> Voice {
    selection.resolve()
}

/// One entry of the voice picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub value: String,
    pub label: String,
}

/// All selectable options: the concrete voices followed by "random".
pub fn voice_options() -> Vec<VoiceOption> {
    Voice::ALL
        .into_iter()
        .map(|voice| VoiceOption {
            value: voice.id().to_string(),
            label: voice.label().to_string(),
        })
        .chain(std::iter::once(VoiceOption {
            value: RANDOM_VOICE_MARKER.to_string(),
            label: "Рандомный голос".to_string(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn resolve_concrete_is_identity() {
        for voice in Voice::ALL {
            assert_eq!(resolve_voice(VoiceSelection::Concrete(voice)), voice);
        }
    }

    #[test]
    fn random_only_draws_real_voices() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(VoiceSelection::Random.resolve_with(&mut rng));
        }
        assert_eq!(seen.len(), Voice::ALL.len());
    }

    #[test]
    fn selection_round_trips_as_plain_string() {
        let json = serde_json::to_string(&VoiceSelection::Random).unwrap();
        assert_eq!(json, "\"random\"");

        let parsed: VoiceSelection = serde_json::from_str("\"ru-RU-DmitryNeural\"").unwrap();
        assert_eq!(parsed, VoiceSelection::Concrete(Voice::Dmitry));

        assert!(serde_json::from_str::<VoiceSelection>("\"en-US-Nobody\"").is_err());
    }

    #[test]
    fn options_end_with_random() {
        let options = voice_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "ru-RU-SvetlanaNeural");
        assert_eq!(options[2].value, "random");
    }
}
