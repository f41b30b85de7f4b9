use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the sounds a host ships for the game.
/// Loaded from a JSON file at runtime. Sprites and music stay on the host side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Keyed by feedback name (`"coin"`, `"stomp"`, ...).
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "coin": { "path": "coin.ogg", "event_id": 21 },
                "stomp": { "path": "stomp.ogg" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds["coin"].event_id, Some(21));
        assert_eq!(manifest.sounds["stomp"].path, "stomp.ogg");
        assert_eq!(manifest.sounds["stomp"].event_id, None);
    }

    #[test]
    fn empty_manifest() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert!(manifest.sounds.is_empty());
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(AssetManifest::from_json(r#"{ "sounds": 3 }"#).is_err());
    }
}
