//! Shared buffer layout.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Bodies: max_bodies × 8 floats]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::bridge::snapshot::BodyInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_BODIES: usize = 1;
pub const HEADER_BODY_COUNT: usize = 2;
pub const HEADER_MAX_SOUNDS: usize = 3;
pub const HEADER_SOUND_COUNT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub body_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_bodies: usize, max_sounds: usize, max_events: usize) -> Self {
        let body_data_offset = HEADER_FLOATS;
        let sound_data_offset = body_data_offset + max_bodies * BodyInstance::FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_bodies,
            max_sounds,
            max_events,
            body_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_bodies, config.max_sounds, config.max_events)
    }

    pub fn buffer_total_bytes(&self) -> usize {
        self.buffer_total_floats * 4
    }

    /// Header with capacities and per-frame counts filled in.
    pub fn header(&self, frame: u64, bodies: usize, sounds: usize, events: usize) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = bodies.min(self.max_bodies) as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_SOUND_COUNT] = sounds.min(self.max_sounds) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.min(self.max_events) as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.body_data_offset, 8);
        assert_eq!(layout.sound_data_offset, 8 + 512 * 8);
        assert_eq!(layout.event_data_offset, 8 + 512 * 8 + 32);
        assert_eq!(layout.buffer_total_floats, 8 + 512 * 8 + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes(), layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);
        assert_eq!(layout.body_data_offset, HEADER_FLOATS);
        assert_eq!(layout.sound_data_offset, layout.body_data_offset + 100 * 8);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + 10);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * 4);
    }

    #[test]
    fn header_clamps_counts_to_capacity() {
        let layout = ProtocolLayout::new(4, 2, 2);
        let header = layout.header(7, 10, 1, 5);
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_BODY_COUNT], 4.0);
        assert_eq!(header[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }
}
