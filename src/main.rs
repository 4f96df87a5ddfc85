//! Arena Duel - headless demo
//!
//! Plays a match between two scripted bots and logs what happens. Run with
//! `RUST_LOG=debug` to see every spawn and shot.
//!
//! The step is a fixed 1/60 s rather than `platform::FrameClock` so that a
//! given seed and tuning always replay the same match.
//!
//! Usage: `arena-duel [tuning.json] [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use arena_duel::{
    Settings, Tuning,
    audio::{AudioManager, LogSink},
    renderer::{BoundingBox, Button, Renderer, render_frame},
    sim::{Color, Facing, GamePhase, GameState, PlayerControls, PlayerSlot, TickInput, tick},
};

/// 60 frames per second
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f64 = 1.0 / 60.0;

/// Give up after three minutes of game time
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 180;

/// Counts draw calls instead of drawing
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct CountingRenderer {
    sprites: usize,
    texts: usize,
    buttons: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl Renderer for CountingRenderer {
    fn draw_sprite(&mut self, _texture: &str, _bounds: BoundingBox) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _text: &str, _bounds: BoundingBox, _color: Color) {
        self.texts += 1;
    }

    fn draw_button(&mut self, _button: Button, _bounds: BoundingBox) {
        self.buttons += 1;
    }
}

/// Walk toward the opponent, turn to face them, shoot and hop
#[cfg(not(target_arch = "wasm32"))]
fn bot_controls(state: &GameState, slot: PlayerSlot, frame: u64) -> PlayerControls {
    let me = state.player_body(slot).centroid();
    let them = state.player_body(slot.other()).centroid();
    let dx = them.x - me.x;
    let facing_right = state.player(slot).facing == Facing::Right;
    let keep_distance = dx.abs() < 250.0;

    PlayerControls {
        left: dx < 0.0 && (!keep_distance || facing_right),
        right: dx > 0.0 && (!keep_distance || !facing_right),
        jump: (frame + slot.index() as u64 * 20) % 50 == 0,
        fire: frame % 2 == 0,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {path}: {e}; using defaults");
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read tuning from {path}: {e}; using defaults");
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arena Duel (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let tuning = load_tuning(args.get(1).map(String::as_str));
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0xA2E4A);
    log::info!("Seed {seed}");

    let settings = match args.get(3) {
        Some(path) => Settings::load(Path::new(path)),
        None => Settings::default(),
    };
    let mut audio = AudioManager::new(LogSink);
    audio.apply_settings(&settings);
    let mut renderer = CountingRenderer::default();
    let mut state = GameState::new(tuning, seed);

    for frame in 0..MAX_FRAMES {
        let mut input = TickInput {
            start: frame == 1,
            ..Default::default()
        };
        if state.phase == GamePhase::Playing {
            for slot in PlayerSlot::BOTH {
                *input.controls_mut(slot) = bot_controls(&state, slot, frame);
            }
        }

        tick(&mut state, &input, FRAME_DT);
        audio.handle_events(&state.drain_events());
        render_frame(&state, &settings, &mut renderer);

        if let GamePhase::Won { winner } = state.phase {
            log::info!(
                "{winner:?} won after {:.1}s ({} sprites, {} labels, {} buttons drawn)",
                state.clock,
                renderer.sprites,
                renderer.texts,
                renderer.buttons
            );
            return;
        }
    }

    log::info!(
        "No winner after {:.0}s: health {:.0} / {:.0}",
        state.clock,
        state.player(PlayerSlot::One).health,
        state.player(PlayerSlot::Two).health
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core has no browser entry point
}
