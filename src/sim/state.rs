//! Game state and core simulation types
//!
//! The scene owns every body; `characters` gives some of them gameplay
//! meaning. The two players are pinned by body id, not by their position in
//! either collection.

use std::fmt;

use glam::DVec2;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use super::character::{Ability, BulletKind, Character, CharacterKind, Facing, PlayerSlot};
use super::polygon::{Color, ellipse};
use super::scene::Scene;
use super::tick::TickInput;
use crate::Tuning;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start signal
    Loading,
    /// Active gameplay
    Playing,
    /// Power-up reveal pause; bodies do not move
    Frozen,
    /// Match over, waiting for reset
    Won { winner: PlayerSlot },
}

/// Something the host may want to react to (sound, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted { bombs_only: bool },
    Jumped(PlayerSlot),
    Fired { shooter: PlayerSlot, kind: BulletKind },
    Hurt(PlayerSlot),
    Died(PlayerSlot),
    PowerUp { player: PlayerSlot, ability: Ability },
    EnemySpawned,
    PickupSpawned,
    Reset,
}

/// Complete state of one match
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub scene: Scene,
    /// Players first, then everything else in spawn order
    pub characters: Vec<Character>,
    /// Seconds since the core was built; runs in every phase
    pub clock: f64,
    pub enemy_timer: f64,
    pub pickup_timer: f64,
    pub velocity_timer: f64,
    /// Seconds of freeze remaining
    pub freeze_timer: f64,
    pub bombs_only: bool,
    /// Events pushed this frame and not yet drained by the host
    pub events: Vec<GameEvent>,
    pub(crate) prev_input: TickInput,
    /// Body of each player, indexed by `PlayerSlot::index`
    players: [BodyId; 2],
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("clock", &self.clock)
            .field("bombs_only", &self.bombs_only)
            .field("characters", &self.characters.len())
            .field("bodies", &self.scene.len())
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Create a new game state drawing randomness from `rng`
    pub fn with_rng(tuning: Tuning, rng: impl RngCore + 'static) -> Self {
        let mut state = Self {
            tuning,
            phase: GamePhase::Loading,
            scene: Scene::new(),
            characters: Vec::new(),
            clock: 0.0,
            enemy_timer: 0.0,
            pickup_timer: 0.0,
            velocity_timer: 0.0,
            freeze_timer: 0.0,
            bombs_only: false,
            events: Vec::new(),
            prev_input: TickInput::default(),
            players: [BodyId(0); 2],
            rng: Box::new(rng),
        };
        state.spawn_players();
        state
    }

    /// Rebuild the whole match. Tuning and the random source carry over.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Loading;
        self.scene = Scene::new();
        self.characters.clear();
        self.clock = 0.0;
        self.enemy_timer = 0.0;
        self.pickup_timer = 0.0;
        self.velocity_timer = 0.0;
        self.freeze_timer = 0.0;
        self.bombs_only = false;
        self.prev_input = TickInput::default();
        self.spawn_players();
        self.events.push(GameEvent::Reset);
        log::info!("Match reset");
    }

    /// Take the events pushed since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn spawn_players(&mut self) {
        for slot in PlayerSlot::BOTH {
            let id = self.spawn_character(
                CharacterKind::Player(slot),
                START_POSITIONS[slot.index()],
                DVec2::ZERO,
            );
            self.players[slot.index()] = id;
            // Players jump into the arena once physics starts
            self.scene[id].set_velocity(DVec2::new(0.0, self.tuning.jump_velocity));
        }
    }

    /// Add a body and its character. Returns the new body's id.
    pub fn spawn_character(
        &mut self,
        kind: CharacterKind,
        center: DVec2,
        velocity: DVec2,
    ) -> BodyId {
        let radius = match kind {
            CharacterKind::Player(_) => PLAYER_RADIUS,
            _ => SMALL_RADIUS,
        };
        let mut body = Body::with_tag(
            ellipse(DVec2::ZERO, radius, radius, OUTLINE_POINTS),
            self.tuning.body_mass,
            body_color(kind),
            kind,
        );
        body.set_centroid(center);
        body.set_velocity(velocity);
        let id = self.scene.add_body(body);

        let character = match kind {
            CharacterKind::Player(slot) => {
                let facing = match slot {
                    PlayerSlot::One => Facing::Right,
                    PlayerSlot::Two => Facing::Left,
                };
                Character::new(id, kind, self.tuning.player_health, self.tuning.step, facing)
            }
            _ => {
                let facing = if velocity.x < 0.0 { Facing::Left } else { Facing::Right };
                Character::new(id, kind, 0.0, 0.0, facing)
            }
        };
        self.characters.push(character);
        id
    }

    /// Drop an enemy from the spawn height at a random x, walking either way
    pub fn spawn_enemy(&mut self) -> BodyId {
        let x = self.rng.random_range(WORLD_MIN.x..WORLD_MAX.x);
        let speed = if self.rng.random_bool(0.5) {
            self.tuning.enemy_speed
        } else {
            -self.tuning.enemy_speed
        };
        let center = DVec2::new(x, self.tuning.enemy_spawn_height);
        let id = self.spawn_character(CharacterKind::Enemy, center, DVec2::new(speed, 0.0));
        self.events.push(GameEvent::EnemySpawned);
        log::debug!("Enemy spawned at ({x:.0}, {:.0})", center.y);
        id
    }

    /// Place a pickup at a random x inside the pickup height band
    pub fn spawn_pickup(&mut self) -> BodyId {
        let x = self.rng.random_range(WORLD_MIN.x..WORLD_MAX.x);
        let y = self
            .rng
            .random_range(self.tuning.pickup_min_height..=self.tuning.pickup_max_height);
        let id = self.spawn_character(CharacterKind::Pickup, DVec2::new(x, y), DVec2::ZERO);
        self.events.push(GameEvent::PickupSpawned);
        log::debug!("Pickup spawned at ({x:.0}, {y:.0})");
        id
    }

    /// Draw a power-up. `BombOnly` is left out of the pool in bombs-only matches.
    pub fn roll_power(&mut self) -> Ability {
        let all: &'static [Ability] = &Ability::POWER_UPS;
        let pool = if self.bombs_only { &all[..all.len() - 1] } else { all };
        pool[self.rng.random_range(0..pool.len())]
    }

    /// Whole-number health bonus within the tuned range
    pub fn roll_health_bonus(&mut self) -> f64 {
        let (lo, hi) = (self.tuning.health_boost_min, self.tuning.health_boost_max);
        self.rng.random_range(lo..=hi).round()
    }

    /// Body id of a player; stable until the next reset
    pub fn player_id(&self, slot: PlayerSlot) -> BodyId {
        self.players[slot.index()]
    }

    /// Position of a player in `characters`
    ///
    /// Players are never retired, so losing one is a broken invariant.
    fn player_index(&self, slot: PlayerSlot) -> usize {
        let id = self.player_id(slot);
        // Spawned first, so this is almost always a direct hit
        let hint = slot.index();
        if self.characters.get(hint).is_some_and(|c| c.body == id) {
            return hint;
        }
        match self.characters.iter().position(|c| c.body == id) {
            Some(index) => index,
            None => panic!("{slot:?} (body {}) is not in the character list", id.0),
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &Character {
        &self.characters[self.player_index(slot)]
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Character {
        let index = self.player_index(slot);
        &mut self.characters[index]
    }

    pub fn player_body(&self, slot: PlayerSlot) -> &Body {
        &self.scene[self.player_id(slot)]
    }

    pub fn player_body_mut(&mut self, slot: PlayerSlot) -> &mut Body {
        let id = self.player_id(slot);
        &mut self.scene[id]
    }

    /// Character bound to `body`, if it is still alive
    pub fn character_of(&self, body: BodyId) -> Option<&Character> {
        self.characters.iter().find(|c| c.body == body && !c.retired)
    }

    /// Live pickups
    pub fn pickup_count(&self) -> usize {
        self.characters
            .iter()
            .filter(|c| c.kind == CharacterKind::Pickup && !c.retired)
            .count()
    }

    /// Live characters of the given kind
    pub fn count_of(&self, kind: CharacterKind) -> usize {
        self.characters
            .iter()
            .filter(|c| c.kind == kind && !c.retired)
            .count()
    }
}

fn body_color(kind: CharacterKind) -> Color {
    match kind {
        CharacterKind::Player(PlayerSlot::One) => Color::new(0.9, 0.1, 0.1),
        CharacterKind::Player(PlayerSlot::Two) => Color::new(0.2, 0.6, 0.1),
        CharacterKind::Bullet(BulletKind::Standard) => Color::new(1.0, 0.5, 0.0),
        CharacterKind::Bullet(BulletKind::Bomb) => Color::new(0.1, 0.1, 0.1),
        CharacterKind::Enemy => Color::new(0.5, 0.3, 0.1),
        CharacterKind::Pickup => Color::new(1.0, 0.8, 0.0),
    }
}
