use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A sound event handed to the host audio layer.
/// The numeric value maps to a sound in the host's SoundManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// Something happened that the player should hear or see.
/// The core emits these and never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    Coin,
    Bump,
    Stomp,
    Kick,
    PowerUp,
    PowerUpAppear,
    /// Lost a power tier.
    Shrink,
    /// A mob was taken out.
    Kill,
    Jump,
    BrickBump,
    Death,
    Win,
}

impl Feedback {
    pub const ALL: [Feedback; 12] = [
        Feedback::Coin,
        Feedback::Bump,
        Feedback::Stomp,
        Feedback::Kick,
        Feedback::PowerUp,
        Feedback::PowerUpAppear,
        Feedback::Shrink,
        Feedback::Kill,
        Feedback::Jump,
        Feedback::BrickBump,
        Feedback::Death,
        Feedback::Win,
    ];

    /// Name used to look the sound up in an asset manifest.
    pub fn name(self) -> &'static str {
        match self {
            Feedback::Coin => "coin",
            Feedback::Bump => "bump",
            Feedback::Stomp => "stomp",
            Feedback::Kick => "kick",
            Feedback::PowerUp => "powerup",
            Feedback::PowerUpAppear => "powerup_appear",
            Feedback::Shrink => "shrink",
            Feedback::Kill => "kill",
            Feedback::Jump => "jump",
            Feedback::BrickBump => "brick_bump",
            Feedback::Death => "death",
            Feedback::Win => "win",
        }
    }

    /// Sound id used when the manifest doesn't name this feedback.
    pub fn default_sound(self) -> SoundEvent {
        SoundEvent(self as u32)
    }
}

/// A game event communicated from Rust to the host via a shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

/// Event kinds written into `GameEvent::kind`.
pub mod event_kind {
    /// a = points, b = coins
    pub const SCORE: f32 = 1.0;
    /// a = new power tier
    pub const POWER: f32 = 2.0;
    pub const GAME_OVER: f32 = 3.0;
    pub const WIN: f32 = 4.0;
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn score(points: u32, coins: u32) -> Self {
        Self {
            kind: event_kind::SCORE,
            a: points as f32,
            b: coins as f32,
            c: 0.0,
        }
    }

    pub fn power(tier: u8) -> Self {
        Self {
            kind: event_kind::POWER,
            a: tier as f32,
            ..Self::default()
        }
    }

    pub fn game_over() -> Self {
        Self {
            kind: event_kind::GAME_OVER,
            ..Self::default()
        }
    }

    pub fn win() -> Self {
        Self {
            kind: event_kind::WIN,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn default_sounds_are_distinct() {
        let mut ids: Vec<u32> = Feedback::ALL.iter().map(|f| f.default_sound().0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Feedback::ALL.len());
    }

    #[test]
    fn score_event_payload() {
        let e = GameEvent::score(1200, 7);
        assert_eq!(e.kind, event_kind::SCORE);
        assert_eq!(e.a, 1200.0);
        assert_eq!(e.b, 7.0);
    }
}
