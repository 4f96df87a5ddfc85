//! Arena Duel - A two-player arena shooter simulation core
//!
//! Core modules:
//! - `sim`: Simulation (polygon physics, collisions, characters, game state)
//! - `renderer`: Render-call surface (sprites, text, buttons)
//! - `audio`: Sound playback surface
//! - `platform`: Input schemes and frame clock
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::DVec2;

/// World configuration constants
pub mod consts {
    use glam::DVec2;

    /// World bounds (bottom-left and top-right corners, y points up)
    pub const WORLD_MIN: DVec2 = DVec2::new(0.0, 0.0);
    pub const WORLD_MAX: DVec2 = DVec2::new(1000.0, 500.0);

    /// Player start positions (also their landing floors)
    pub const START_POSITIONS: [DVec2; 2] = [DVec2::new(100.0, 98.0), DVec2::new(900.0, 102.0)];

    /// Win screen placement
    pub const WINNER_POSITION: DVec2 = DVec2::new(400.0, 100.0);
    pub const LOSER_POSITION: DVec2 = DVec2::new(600.0, 100.0);

    /// Body outlines
    pub const PLAYER_RADIUS: f64 = 50.0;
    pub const SMALL_RADIUS: f64 = 30.0; // bullets, enemies, pickups
    pub const OUTLINE_POINTS: usize = 20;

    /// Largest frame delta fed to the simulation (prevents tunneling after stalls)
    pub const MAX_FRAME_DT: f64 = 0.1;
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Rotate `point` by `angle` radians (counter-clockwise) about `pivot`
#[inline]
pub fn rotate_about(point: DVec2, angle: f64, pivot: DVec2) -> DVec2 {
    DVec2::from_angle(angle).rotate(point - pivot) + pivot
}
