use serde::{Deserialize, Serialize};

/// Gameplay constants. Distances are pixels, speeds pixels per tick, durations ticks.
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Edge length of a tile, and of every small entity.
    pub tile_size: f32,
    pub player_gravity: f32,
    pub mob_gravity: f32,
    /// Cap on downward speed. Kept below `tile_size` so nothing tunnels.
    pub terminal_velocity: f32,
    pub jump_impulse: f32,
    /// Apex height of a fully held jump.
    pub jump_height: f32,
    pub jump_max_hold_ticks: u32,
    pub walk_accel: f32,
    pub walk_decel: f32,
    pub walk_max_speed: f32,
    pub boost_max_speed: f32,
    pub patrol_speed: f32,
    /// Speed of a kicked Koopa shell.
    pub shell_speed: f32,
    pub bounce_impulse: f32,
    /// How deep a falling entity may sink into another and still count as landing on top.
    pub top_contact_tolerance: f32,
    /// Horizontal shove applied to a shell when it is kicked.
    pub kick_nudge: f32,
    pub shrink_invincibility_ticks: u32,
    pub power_up_invincibility_ticks: u32,
    pub happy_ticks: u32,
    pub goomba_death_ticks: u32,
    pub koopa_death_ticks: u32,
    /// How long a stomped Koopa stays in its shell before walking again.
    pub shell_sleep_ticks: u32,
    /// Rise (and then fall) duration of a bumped block.
    pub block_bump_ticks: u32,
    pub kill_points: u32,
    pub coin_points: u32,
    /// Entities further than this (horizontally) from the player are not ticked.
    pub activation_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            player_gravity: 0.8,
            mob_gravity: 1.25,
            terminal_velocity: 12.0,
            jump_impulse: 12.0,
            jump_height: 120.0,
            jump_max_hold_ticks: 12,
            walk_accel: 0.4,
            walk_decel: 0.25,
            walk_max_speed: 3.2,
            boost_max_speed: 5.0,
            patrol_speed: 1.0,
            shell_speed: 4.0,
            bounce_impulse: 5.0,
            top_contact_tolerance: 12.0,
            kick_nudge: 5.0,
            shrink_invincibility_ticks: 60,
            power_up_invincibility_ticks: 20,
            happy_ticks: 120,
            goomba_death_ticks: 50,
            koopa_death_ticks: 350,
            shell_sleep_ticks: 350,
            block_bump_ticks: 10,
            kill_points: 100,
            coin_points: 100,
            activation_range: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_velocity_below_tile_size() {
        let t = Tuning::default();
        assert!(t.terminal_velocity < t.tile_size);
    }

    #[test]
    fn partial_json_override() {
        let t: Tuning = serde_json::from_str(r#"{ "patrol_speed": 2.0 }"#).unwrap();
        assert_eq!(t.patrol_speed, 2.0);
        assert_eq!(t.tile_size, 32.0);
    }
}
