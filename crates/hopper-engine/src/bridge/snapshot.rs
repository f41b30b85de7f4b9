use bytemuck::{Pod, Zeroable};

/// Per-body snapshot data written to the shared buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// One of [`body_kind`].
    pub kind: f32,
    /// Kind-specific state (see [`body_kind`]).
    pub state: f32,
    /// Facing: -1 left, 1 right, 0 none.
    pub facing: f32,
    /// Extra draw offset on y (bumping blocks).
    pub offset_y: f32,
}

/// Values written into `BodyInstance::kind`, with what `state` means for each.
pub mod body_kind {
    /// state: 0 small, 1 powered; +2 while invincible; +4 while happy; +8 dead.
    pub const PLAYER: f32 = 0.0;
    /// Mobs. state: 0 walking, 1 shell, 2 kicked shell, 3 dead.
    pub const GOOMBA: f32 = 1.0;
    pub const KOOPA: f32 = 2.0;
    pub const MUSHROOM: f32 = 3.0;
    pub const COIN: f32 = 4.0;
    /// state: 0 fresh, 1 used.
    pub const BLOCK: f32 = 5.0;
    pub const GOAL: f32 = 6.0;
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Snapshot of every visible body for one frame.
pub struct SnapshotBuffer {
    pub bodies: Vec<BodyInstance>,
    capacity: usize,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer that silently drops bodies past `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Returns false once the buffer is full.
    pub fn push(&mut self, body: BodyInstance) -> bool {
        if self.bodies.len() >= self.capacity {
            return false;
        }
        self.bodies.push(body);
        true
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    /// Raw pointer to body data for shared buffer reads.
    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.bodies)
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(BodyInstance::FLOATS, 8);
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = SnapshotBuffer::with_capacity(2);
        assert!(buf.push(BodyInstance::default()));
        assert!(buf.push(BodyInstance::default()));
        assert!(!buf.push(BodyInstance::default()));
        assert_eq!(buf.body_count(), 2);
    }

    #[test]
    fn floats_view_matches_layout() {
        let mut buf = SnapshotBuffer::new();
        buf.push(BodyInstance {
            x: 1.0,
            y: 2.0,
            kind: body_kind::COIN,
            ..BodyInstance::default()
        });
        let floats = buf.as_floats();
        assert_eq!(floats.len(), 8);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[1], 2.0);
        assert_eq!(floats[4], body_kind::COIN);
    }
}
