//! Simulation module
//!
//! All gameplay logic lives here:
//! - Polygon bodies integrated with the trapezoidal rule
//! - Separating-axis collision between convex outlines
//! - Deferred removal (flag now, sweep on the next physics step)
//! - Injectable RNG, no rendering or platform dependencies

pub mod body;
pub mod character;
pub mod collision;
pub mod forces;
pub mod polygon;
pub mod scene;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId};
pub use character::{Ability, BulletKind, Character, CharacterKind, Facing, PlayerSlot};
pub use collision::{CollisionInfo, find_collision, find_collision_points};
pub use forces::{
    CollisionForce, CollisionResponse, ForceGenerator, Gravity, apply_gravity,
    apply_impulse_response,
};
pub use polygon::{Color, Polygon, ellipse};
pub use scene::Scene;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{PlayerControls, TickInput, tick};
