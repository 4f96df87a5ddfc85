//! Render-call surface
//!
//! The simulation never touches pixels. Each frame `render_frame` walks the
//! game state and issues sprite, text and button calls against a host
//! `Renderer`, naming textures by logical asset path.

pub mod sprites;

use glam::DVec2;

use crate::Settings;
use crate::consts::*;
use crate::sim::{Body, CharacterKind, Color, GamePhase, GameState, PlayerSlot};

pub use sprites::{Button, HEART, PlayerSkin, background, character_texture, player_texture};

/// Screen-space rectangle (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The whole world
    pub fn screen() -> Self {
        let size = WORLD_MAX - WORLD_MIN;
        Self::new(0.0, 0.0, size.x, size.y)
    }

    /// Screen box enclosing a body's outline
    pub fn of_body(body: &Body) -> Self {
        let (lo, hi) = body.vertices().iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        Self::new(lo.x - WORLD_MIN.x, WORLD_MAX.y - hi.y, hi.x - lo.x, hi.y - lo.y)
    }

    /// Box of the given size centred on a world point
    pub fn around(center: DVec2, w: f64, h: f64) -> Self {
        Self::new(
            center.x - WORLD_MIN.x - w / 2.0,
            WORLD_MAX.y - center.y - h / 2.0,
            w,
            h,
        )
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Host drawing backend
pub trait Renderer {
    fn draw_sprite(&mut self, texture: &str, bounds: BoundingBox);
    fn draw_text(&mut self, text: &str, bounds: BoundingBox, color: Color);
    fn draw_button(&mut self, button: Button, bounds: BoundingBox);
}

const HEART_OFFSET: f64 = 70.0;
const HEART_SIZE: f64 = 60.0;
const HEALTH_LABEL: BoundingBox = BoundingBox::new(0.0, 30.0, 50.0, 40.0);
const POWER_LABEL: BoundingBox = BoundingBox::new(0.0, 50.0, 50.0, 40.0);
const POWER_COLOR: Color = Color::new(1.0, 1.0, 0.0);

fn label_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => Color::new(1.0, 0.0, 0.0),
        PlayerSlot::Two => Color::new(0.0, 1.0, 0.0),
    }
}

/// Issue every draw call for the current frame
pub fn render_frame(state: &GameState, settings: &Settings, renderer: &mut impl Renderer) {
    renderer.draw_sprite(background(state.phase), BoundingBox::screen());

    match state.phase {
        GamePhase::Loading => {
            renderer.draw_button(Button::Start, Button::Start.bounds());
            renderer.draw_button(Button::BombsOnly, Button::BombsOnly.bounds());
        }
        GamePhase::Won { .. } => {
            for slot in PlayerSlot::BOTH {
                let bounds = BoundingBox::of_body(state.player_body(slot));
                renderer.draw_sprite(player_texture(state, slot, settings), bounds);
            }
            renderer.draw_button(Button::Restart, Button::Restart.bounds());
        }
        GamePhase::Playing | GamePhase::Frozen => {
            for character in &state.characters {
                let bounds = BoundingBox::of_body(&state.scene[character.body]);
                let texture = match character.kind {
                    CharacterKind::Player(slot) => player_texture(state, slot, settings),
                    kind => character_texture(kind, character.facing),
                };
                renderer.draw_sprite(texture, bounds);
            }

            for slot in PlayerSlot::BOTH {
                let player = state.player(slot);
                let center = state.player_body(slot).centroid();

                if state.phase == GamePhase::Frozen && player.health_boost {
                    let above = center + DVec2::new(0.0, HEART_OFFSET);
                    renderer.draw_sprite(HEART, BoundingBox::around(above, HEART_SIZE, HEART_SIZE));
                }

                if settings.show_labels {
                    let x = center.x - WORLD_MIN.x - HEALTH_LABEL.w / 2.0;
                    let health = BoundingBox { x, ..HEALTH_LABEL };
                    renderer.draw_text(&format!("{:.0}", player.health), health, label_color(slot));
                    let power = BoundingBox { x, ..POWER_LABEL };
                    renderer.draw_text(player.ability.label(), power, POWER_COLOR);
                }
            }
        }
    }
}
