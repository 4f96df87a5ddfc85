//! Data-driven game balance
//!
//! Every number that shapes a match lives here so a JSON file can override
//! any subset of them. Missing fields fall back to the defaults below.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Balance constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Players ===
    pub player_health: f64,
    /// Horizontal distance per frame while a direction key is held
    pub step: f64,
    pub jump_velocity: f64,
    /// Jumps are only allowed with the centroid at or below this height
    pub jump_ceiling: f64,
    /// Seconds between shots
    pub fire_rate: f64,
    /// Players' horizontal velocity is zeroed this often (seconds)
    pub velocity_reset_interval: f64,
    /// Mass of every body
    pub body_mass: f64,

    // === Physics ===
    pub gravity: f64,
    /// Restitution of bullet hits on players
    pub elasticity: f64,

    // === Bullets ===
    pub bullet_speed: f64,
    /// Launch velocity of a right-facing bomb
    pub bomb_velocity: DVec2,
    /// Horizontal distance from the shooter's centroid to the spawned bullet
    pub muzzle_offset: f64,
    pub standard_damage: f64,
    pub bomb_damage: f64,

    // === Enemies ===
    pub enemy_interval: f64,
    pub enemy_speed: f64,
    pub enemy_spawn_height: f64,
    /// Ledge enemies land on
    pub enemy_floor: f64,
    pub enemy_damage: f64,

    // === Pickups ===
    pub pickup_interval: f64,
    pub max_pickups: usize,
    pub pickup_min_height: f64,
    pub pickup_max_height: f64,

    // === Power-ups ===
    pub power_duration: f64,
    pub health_boost_min: f64,
    pub health_boost_max: f64,
    /// Length of the reveal pause after a pickup
    pub freeze_duration: f64,
    /// A power granted this recently flickers during the freeze
    pub reveal_window: f64,
    /// How long the damaged sprite shows after a hit
    pub hit_flash: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_health: 100.0,
            step: 5.0,
            jump_velocity: 800.0,
            jump_ceiling: 141.0,
            fire_rate: 1.0,
            velocity_reset_interval: 0.2,
            body_mass: 1.0,

            gravity: 2000.0,
            elasticity: 0.5,

            bullet_speed: 800.0,
            bomb_velocity: DVec2::new(300.0, 900.0),
            muzzle_offset: 80.5,
            standard_damage: 10.0,
            bomb_damage: 34.0,

            enemy_interval: 10.0,
            enemy_speed: 25.0,
            enemy_spawn_height: 450.0,
            enemy_floor: 85.0,
            enemy_damage: 10.0,

            pickup_interval: 7.5,
            max_pickups: 2,
            pickup_min_height: 100.0,
            pickup_max_height: 300.0,

            power_duration: 10.0,
            health_boost_min: 5.0,
            health_boost_max: 30.0,
            freeze_duration: 1.0,
            reveal_window: 1.0,
            hit_flash: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate. Fields missing from `json` keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if !(self.body_mass.is_finite() && self.body_mass > 0.0) {
            return Err(format!("body_mass must be positive, got {}", self.body_mass));
        }
        let ranges = [
            ("health_boost", self.health_boost_min, self.health_boost_max),
            ("pickup height", self.pickup_min_height, self.pickup_max_height),
        ];
        for (name, lo, hi) in ranges {
            // Written so NaN fails too
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(format!("{name} range is empty: {lo}..={hi}"));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Damage dealt by a bullet of the given kind
    pub fn bullet_damage(&self, bomb: bool) -> f64 {
        if bomb { self.bomb_damage } else { self.standard_damage }
    }
}
