//! Gameplay entities
//!
//! A character gives a body its meaning: who controls it, how much health it
//! has, which power it carries. Characters refer to their body by id and never
//! own it; the scene does.

use serde::{Deserialize, Serialize};

use super::body::BodyId;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Position in the character list and the scene (players are added first)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Projectile profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BulletKind {
    /// Flies straight
    #[default]
    Standard,
    /// Lobbed under gravity, hits harder
    Bomb,
}

/// What a character is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Player(PlayerSlot),
    Bullet(BulletKind),
    Enemy,
    /// Mystery power-up box
    Pickup,
}

impl CharacterKind {
    pub fn is_player(self) -> bool {
        matches!(self, CharacterKind::Player(_))
    }

    pub fn is_bullet(self) -> bool {
        matches!(self, CharacterKind::Bullet(_))
    }
}

/// Power-up carried by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ability {
    #[default]
    None,
    Speed,
    HealthBoost,
    Invincibility,
    BombOnly,
}

impl Ability {
    /// Pickup pool; `BombOnly` is last so it can be sliced off
    pub const POWER_UPS: [Ability; 4] = [
        Ability::Speed,
        Ability::HealthBoost,
        Ability::Invincibility,
        Ability::BombOnly,
    ];

    /// HUD label
    pub fn label(self) -> &'static str {
        match self {
            Ability::None => "NONE",
            Ability::Speed => "SPEED",
            Ability::HealthBoost => "HEALTH",
            Ability::Invincibility => "INVINCIBILITY",
            Ability::BombOnly => "BOMB",
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A gameplay entity bound to a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub body: BodyId,
    pub kind: CharacterKind,
    /// May dip below zero before the win check runs
    pub health: f64,
    /// Horizontal distance moved per frame while a direction is held
    pub step: f64,
    pub facing: Facing,
    pub can_fire: bool,
    /// Seconds since the last shot
    pub fire_timer: f64,
    pub ability: Ability,
    /// Game clock when `ability` was granted
    pub power_time: f64,
    /// Kind of bullet this character shoots
    pub bullet: BulletKind,
    /// Game clock of the last damaging hit
    pub last_hit: Option<f64>,
    /// Set for the frame(s) that show the health-gained heart
    pub health_boost: bool,
    /// Body has been flagged; dropped at the end of the collision pass
    #[serde(skip)]
    pub(crate) retired: bool,
}

impl Character {
    pub fn new(body: BodyId, kind: CharacterKind, health: f64, step: f64, facing: Facing) -> Self {
        Self {
            body,
            kind,
            health,
            step,
            facing,
            can_fire: kind.is_player(),
            fire_timer: 0.0,
            ability: Ability::None,
            power_time: 0.0,
            bullet: BulletKind::Standard,
            last_hit: None,
            health_boost: false,
            retired: false,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.ability == Ability::Invincibility
    }

    /// Apply a health delta. Invincible characters ignore damage but still heal.
    pub fn change_health(&mut self, delta: f64) {
        if !self.is_invincible() || delta >= 0.0 {
            self.health += delta;
        }
    }

    /// Advance the fire recharge timer; re-arms once `fire_rate` has elapsed
    pub fn recharge(&mut self, dt: f64, fire_rate: f64) {
        self.fire_timer += dt;
        if self.fire_timer >= fire_rate {
            self.can_fire = true;
        }
    }

    /// Consume the fire flag (call when a shot leaves)
    pub fn spend_shot(&mut self) {
        self.can_fire = false;
        self.fire_timer = 0.0;
    }

    /// Drop any active power and restore base movement/bullets
    pub fn clear_power(&mut self, base_step: f64) {
        self.ability = Ability::None;
        self.step = base_step;
        self.bullet = BulletKind::Standard;
    }

    /// Replace the current power with `ability`, granted at `now`
    ///
    /// `health_bonus` is only used by `HealthBoost`.
    pub fn grant_power(&mut self, ability: Ability, now: f64, base_step: f64, health_bonus: f64) {
        self.clear_power(base_step);
        self.ability = ability;
        self.power_time = now;
        match ability {
            Ability::Speed => self.step = base_step * 2.0,
            Ability::HealthBoost => {
                self.change_health(health_bonus);
                self.health_boost = true;
            }
            Ability::BombOnly => self.bullet = BulletKind::Bomb,
            Ability::Invincibility | Ability::None => {}
        }
    }

    /// True once a timed power has been held longer than `duration`
    pub fn power_expired(&self, now: f64, duration: f64) -> bool {
        self.ability != Ability::None && now - self.power_time > duration
    }

    /// True while the damage flash should show
    pub fn is_flashing(&self, now: f64, window: f64) -> bool {
        self.last_hit.is_some_and(|t| now < t + window)
    }
}
