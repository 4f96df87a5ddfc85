//! Texture selection
//!
//! Maps game state to logical asset paths. Nothing is loaded here.

use crate::Settings;
use crate::sim::{Ability, BulletKind, CharacterKind, Facing, GamePhase, GameState, PlayerSlot};

use super::BoundingBox;

/// Health gained marker
pub const HEART: &str = "assets/plus_health.png";

/// Freeze-timer thresholds at which the power reveal flips sprites
const REVEAL_FLIPS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Every texture a player can wear
#[derive(Debug, Clone, Copy)]
pub struct PlayerSkin {
    /// Indexed left, right
    pub normal: [&'static str; 2],
    pub powered: [&'static str; 2],
    pub damaged: [&'static str; 2],
    pub victory: &'static str,
    pub loser: &'static str,
}

impl PlayerSkin {
    pub const ONE: Self = Self {
        normal: ["assets/player_one_left.png", "assets/player_one_right.png"],
        powered: ["assets/player_one_powered_left.png", "assets/player_one_powered_right.png"],
        damaged: ["assets/player_one_damaged.png", "assets/player_one_damaged.png"],
        victory: "assets/player_one_winner.png",
        loser: "assets/player_one_loser.png",
    };

    pub const TWO: Self = Self {
        normal: ["assets/player_two_left.png", "assets/player_two_right.png"],
        powered: ["assets/player_two_powered_left.png", "assets/player_two_powered_right.png"],
        damaged: ["assets/player_two_damaged_left.png", "assets/player_two_damaged_right.png"],
        victory: "assets/player_two_winner.png",
        loser: "assets/player_two_loser.png",
    };

    pub fn of(slot: PlayerSlot) -> &'static Self {
        match slot {
            PlayerSlot::One => &Self::ONE,
            PlayerSlot::Two => &Self::TWO,
        }
    }
}

fn facing_index(facing: Facing) -> usize {
    match facing {
        Facing::Left => 0,
        Facing::Right => 1,
    }
}

/// Clickable buttons on the loading and win screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    BombsOnly,
    Restart,
}

impl Button {
    pub fn texture(self) -> &'static str {
        match self {
            Button::Start => "assets/start_button.png",
            Button::BombsOnly => "assets/bombs_only_button.png",
            Button::Restart => "assets/restart_button.png",
        }
    }

    /// Screen-space hit box
    pub fn bounds(self) -> BoundingBox {
        match self {
            Button::Start => BoundingBox::new(300.0, 170.0, 400.0, 160.0),
            Button::BombsOnly => BoundingBox::new(350.0, 350.0, 300.0, 75.0),
            Button::Restart => BoundingBox::new(425.0, 25.0, 150.0, 150.0),
        }
    }

    /// Whether a screen-space click lands on this button
    pub fn contains(self, x: f64, y: f64) -> bool {
        let b = self.bounds();
        x >= b.x && x <= b.x + b.w && y >= b.y && y <= b.y + b.h
    }
}

pub fn background(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Loading => "assets/loading.png",
        _ => "assets/background.png",
    }
}

/// Texture for a non-player character
pub fn character_texture(kind: CharacterKind, facing: Facing) -> &'static str {
    match (kind, facing) {
        (CharacterKind::Bullet(BulletKind::Standard), Facing::Left) => "assets/fireball_left.png",
        (CharacterKind::Bullet(BulletKind::Standard), Facing::Right) => "assets/fireball_right.png",
        (CharacterKind::Bullet(BulletKind::Bomb), Facing::Left) => "assets/bomb_left.png",
        (CharacterKind::Bullet(BulletKind::Bomb), Facing::Right) => "assets/bomb_right.png",
        (CharacterKind::Enemy, _) => "assets/enemy.png",
        (CharacterKind::Pickup, _) => "assets/mystery_box.png",
        (CharacterKind::Player(slot), facing) => PlayerSkin::of(slot).normal[facing_index(facing)],
    }
}

/// Texture for a player this frame
///
/// Win skins take priority, then the power reveal flicker during a freeze,
/// then the damage flash, then the powered or plain sprite.
pub fn player_texture(state: &GameState, slot: PlayerSlot, settings: &Settings) -> &'static str {
    let skin = PlayerSkin::of(slot);
    let player = state.player(slot);
    let side = facing_index(player.facing);
    let tuning = &state.tuning;

    if let GamePhase::Won { winner } = state.phase {
        return if winner == slot { skin.victory } else { skin.loser };
    }

    let revealing = state.phase == GamePhase::Frozen
        && player.ability != Ability::None
        && player.power_time + tuning.reveal_window >= state.clock
        && settings.effective_power_reveal();
    if revealing {
        let flips = REVEAL_FLIPS
            .iter()
            .filter(|&&t| state.freeze_timer >= t)
            .count();
        return if flips % 2 == 0 { skin.powered[side] } else { skin.normal[side] };
    }

    if settings.effective_damage_flash() && player.is_flashing(state.clock, tuning.hit_flash) {
        return skin.damaged[side];
    }

    if player.ability == Ability::None {
        skin.normal[side]
    } else {
        skin.powered[side]
    }
}
