use std::collections::HashMap;

use crate::api::types::{Feedback, SoundEvent};
use crate::assets::manifest::AssetManifest;

/// Feedback -> sound id table, built once from an [`AssetManifest`] and
/// handed to the runner by reference.
#[derive(Debug, Clone)]
pub struct SoundRegistry {
    sounds: HashMap<Feedback, SoundEvent>,
}

impl SoundRegistry {
    /// Every feedback mapped to its built-in id.
    pub fn new() -> Self {
        let sounds = Feedback::ALL
            .iter()
            .map(|f| (*f, f.default_sound()))
            .collect();
        Self { sounds }
    }

    /// Build a registry from a parsed AssetManifest. Feedback the manifest
    /// doesn't name, or names without an `event_id`, keeps its built-in id.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut registry = Self::new();
        for feedback in Feedback::ALL {
            if let Some(id) = manifest.sounds.get(feedback.name()).and_then(|s| s.event_id) {
                registry.sounds.insert(feedback, SoundEvent(id));
            }
        }
        for name in manifest.sounds.keys() {
            if !Feedback::ALL.iter().any(|f| f.name() == name.as_str()) {
                log::warn!("manifest sound '{}' matches no feedback", name);
            }
        }
        registry
    }

    pub fn sound_for(&self, feedback: Feedback) -> SoundEvent {
        self.sounds
            .get(&feedback)
            .copied()
            .unwrap_or_else(|| feedback.default_sound())
    }
}

impl Default for SoundRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_feedback() {
        let registry = SoundRegistry::new();
        for feedback in Feedback::ALL {
            assert_eq!(registry.sound_for(feedback), feedback.default_sound());
        }
    }

    #[test]
    fn manifest_overrides_named_sounds() {
        let manifest = AssetManifest::from_json(
            r#"{ "sounds": {
                "coin": { "path": "coin.ogg", "event_id": 40 },
                "kick": { "path": "kick.ogg" },
                "theme": { "path": "theme.ogg", "event_id": 99 }
            } }"#,
        )
        .unwrap();
        let registry = SoundRegistry::from_manifest(&manifest);
        assert_eq!(registry.sound_for(Feedback::Coin), SoundEvent(40));
        assert_eq!(registry.sound_for(Feedback::Kick), Feedback::Kick.default_sound());
    }
}
