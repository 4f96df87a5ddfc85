//! Per-frame simulation tick
//!
//! One call per rendered frame with the real elapsed time. Inside `Playing`
//! a frame runs: input, timers, spawners, collision dispatch, gravity and
//! wrapping, off-screen bullet sweep. The physics step runs last, in every
//! phase except `Loading` and `Frozen`.

use glam::DVec2;

use super::body::Body;
use super::character::{Ability, BulletKind, CharacterKind, Facing, PlayerSlot};
use super::collision::find_collision;
use super::forces::{CollisionResponse, Gravity, apply_gravity};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Held controls for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered
    pub jump: bool,
    /// Edge-triggered
    pub fire: bool,
}

/// Input state for a single frame
///
/// Everything is "currently held"; `tick` derives presses by comparing with
/// the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by `PlayerSlot::index`
    pub players: [PlayerControls; 2],
    /// Start button on the loading screen
    pub start: bool,
    /// Start in bombs-only mode
    pub bombs_only: bool,
    /// Restart button
    pub reset: bool,
}

impl TickInput {
    pub fn controls(&self, slot: PlayerSlot) -> PlayerControls {
        self.players[slot.index()]
    }

    pub fn controls_mut(&mut self, slot: PlayerSlot) -> &mut PlayerControls {
        &mut self.players[slot.index()]
    }

    /// Inputs that went from released to held since `prev`
    fn pressed_since(&self, prev: &TickInput) -> TickInput {
        let edge = |now: bool, before: bool| now && !before;
        let mut pressed = TickInput {
            start: edge(self.start, prev.start),
            bombs_only: edge(self.bombs_only, prev.bombs_only),
            reset: edge(self.reset, prev.reset),
            ..*self
        };
        for (p, before) in pressed.players.iter_mut().zip(prev.players) {
            p.jump = edge(p.jump, before.jump);
            p.fire = edge(p.fire, before.fire);
        }
        pressed
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    let pressed = input.pressed_since(&state.prev_input);
    if pressed.reset {
        state.reset();
        // Keys held through the reset need a fresh press to count again
        state.prev_input = *input;
        return;
    }
    state.prev_input = *input;

    state.clock += dt;

    match state.phase {
        GamePhase::Loading => {
            if pressed.start || pressed.bombs_only {
                begin_match(state, pressed.bombs_only);
            }
        }
        GamePhase::Playing => play_frame(state, &pressed, dt),
        GamePhase::Frozen => {
            state.freeze_timer -= dt;
            if state.freeze_timer <= 0.0 {
                state.freeze_timer = 0.0;
                state.phase = GamePhase::Playing;
                log::debug!("Freeze over");
            }
        }
        GamePhase::Won { winner } => win_animation(state, winner),
    }

    if !matches!(state.phase, GamePhase::Loading | GamePhase::Frozen) {
        state.scene.tick(dt);
    }
}

fn begin_match(state: &mut GameState, bombs_only: bool) {
    state.phase = GamePhase::Playing;
    state.bombs_only = bombs_only;
    state.events.push(GameEvent::MatchStarted { bombs_only });
    if bombs_only {
        log::info!("Match started (bombs only)");
    } else {
        log::info!("Match started");
    }
}

fn play_frame(state: &mut GameState, pressed: &TickInput, dt: f64) {
    // The heart was shown during the freeze; gone once play resumes
    for slot in PlayerSlot::BOTH {
        state.player_mut(slot).health_boost = false;
    }

    for slot in PlayerSlot::BOTH {
        handle_controls(state, slot, pressed.controls(slot));
    }

    advance_timers(state, dt);
    run_spawners(state);
    expire_powers(state);

    if state.velocity_timer >= state.tuning.velocity_reset_interval {
        for slot in PlayerSlot::BOTH {
            let body = state.player_body_mut(slot);
            let v = body.velocity();
            body.set_velocity(DVec2::new(0.0, v.y));
        }
        state.velocity_timer = 0.0;
    }

    dispatch_collisions(state);
    if matches!(state.phase, GamePhase::Won { .. }) {
        return;
    }

    apply_world_gravity(state);
    sweep_bullets(state);
    for slot in PlayerSlot::BOTH {
        let id = state.player(slot).body;
        wrap_edges(&mut state.scene[id]);
    }
}

fn handle_controls(state: &mut GameState, slot: PlayerSlot, controls: PlayerControls) {
    let step = state.player(slot).step;
    if controls.left {
        state.player_body_mut(slot).translate(DVec2::new(-step, 0.0));
        state.player_mut(slot).facing = Facing::Left;
    }
    if controls.right {
        state.player_body_mut(slot).translate(DVec2::new(step, 0.0));
        state.player_mut(slot).facing = Facing::Right;
    }
    if controls.jump {
        try_jump(state, slot, true);
    }
    if controls.fire {
        fire(state, slot);
    }
}

/// Launch upward if standing still vertically and low enough
fn try_jump(state: &mut GameState, slot: PlayerSlot, audible: bool) {
    let (jump_velocity, ceiling) = (state.tuning.jump_velocity, state.tuning.jump_ceiling);
    let body = state.player_body_mut(slot);
    let v = body.velocity();
    if v.y == 0.0 && body.centroid().y <= ceiling {
        body.set_velocity(DVec2::new(v.x, jump_velocity));
        if audible {
            state.events.push(GameEvent::Jumped(slot));
        }
    }
}

fn fire(state: &mut GameState, slot: PlayerSlot) {
    let shooter = state.player(slot);
    if !shooter.can_fire {
        return;
    }
    let kind = if shooter.bullet == BulletKind::Bomb || state.bombs_only {
        BulletKind::Bomb
    } else {
        BulletKind::Standard
    };
    let sign = shooter.facing.sign();

    let tuning = &state.tuning;
    let origin = state.player_body(slot).centroid() + DVec2::new(sign * tuning.muzzle_offset, 0.0);
    let velocity = match kind {
        BulletKind::Standard => DVec2::new(sign * tuning.bullet_speed, 0.0),
        BulletKind::Bomb => DVec2::new(sign * tuning.bomb_velocity.x, tuning.bomb_velocity.y),
    };
    let gravity = Gravity {
        acceleration: tuning.gravity,
        floor: WORLD_MIN.y,
    };

    let id = state.spawn_character(CharacterKind::Bullet(kind), origin, velocity);
    if kind == BulletKind::Bomb {
        state.scene.add_force(gravity, vec![id]);
    }
    state.player_mut(slot).spend_shot();
    state.events.push(GameEvent::Fired { shooter: slot, kind });
    log::debug!("{slot:?} fired {kind:?}");
}

fn advance_timers(state: &mut GameState, dt: f64) {
    state.enemy_timer += dt;
    state.pickup_timer += dt;
    state.velocity_timer += dt;
    let fire_rate = state.tuning.fire_rate;
    for slot in PlayerSlot::BOTH {
        state.player_mut(slot).recharge(dt, fire_rate);
    }
}

fn run_spawners(state: &mut GameState) {
    if state.enemy_timer >= state.tuning.enemy_interval {
        state.spawn_enemy();
        state.enemy_timer = 0.0;
    }
    if state.pickup_timer >= state.tuning.pickup_interval {
        if state.pickup_count() < state.tuning.max_pickups {
            state.spawn_pickup();
        }
        state.pickup_timer = 0.0;
    }
}

fn expire_powers(state: &mut GameState) {
    let (now, duration, step) = (state.clock, state.tuning.power_duration, state.tuning.step);
    for slot in PlayerSlot::BOTH {
        let player = state.player_mut(slot);
        if player.power_expired(now, duration) {
            log::debug!("{slot:?} lost {}", player.ability.label());
            player.clear_power(step);
        }
    }
}

/// Pairwise collision pass over live characters
///
/// Characters whose bodies get flagged are retired in place and dropped at
/// the end of the pass; their bodies go on the next scene sweep.
fn dispatch_collisions(state: &mut GameState) {
    let n = state.characters.len();
    'outer: for i in 0..n {
        for j in (i + 1)..n {
            if matches!(state.phase, GamePhase::Won { .. }) {
                break 'outer;
            }
            let (a, b) = (&state.characters[i], &state.characters[j]);
            if a.retired || b.retired {
                continue;
            }
            let info = find_collision(state.scene[a.body].polygon(), state.scene[b.body].polygon());
            if info.collided {
                resolve(state, i, j);
            }
        }
    }
    state.characters.retain(|c| !c.retired);
}

fn resolve(state: &mut GameState, i: usize, j: usize) {
    match (state.characters[i].kind, state.characters[j].kind) {
        (CharacterKind::Bullet(_), CharacterKind::Enemy)
        | (CharacterKind::Enemy, CharacterKind::Bullet(_)) => {
            retire(state, i);
            retire(state, j);
        }
        (CharacterKind::Player(_), CharacterKind::Player(_)) => {}
        (CharacterKind::Player(slot), _) => player_contact(state, slot, j),
        (_, CharacterKind::Player(slot)) => player_contact(state, slot, i),
        _ => {}
    }
}

fn retire(state: &mut GameState, index: usize) {
    let character = &mut state.characters[index];
    character.retired = true;
    state.scene.mark_removed(character.body);
}

fn player_contact(state: &mut GameState, slot: PlayerSlot, other: usize) {
    let player_body = state.player(slot).body;
    let other_body = state.characters[other].body;

    match state.characters[other].kind {
        CharacterKind::Pickup => {
            state.scene.add_collision(
                player_body,
                other_body,
                CollisionResponse::Physics { elasticity: 0.0 },
            );
            retire(state, other);

            let ability = state.roll_power();
            let bonus = if ability == Ability::HealthBoost {
                state.roll_health_bonus()
            } else {
                0.0
            };
            let (now, step) = (state.clock, state.tuning.step);
            state.player_mut(slot).grant_power(ability, now, step, bonus);

            state.phase = GamePhase::Frozen;
            state.freeze_timer = state.tuning.freeze_duration;
            state.events.push(GameEvent::PowerUp { player: slot, ability });
            log::info!("{slot:?} picked up {}", ability.label());
        }
        CharacterKind::Bullet(kind) => {
            retire(state, other);
            let damage = state.tuning.bullet_damage(kind == BulletKind::Bomb);
            let invincible = hurt(state, slot, damage);
            if state.player(slot).health <= 0.0 {
                declare_winner(state, slot.other());
            } else if !invincible {
                let elasticity = state.tuning.elasticity;
                state.scene.add_collision(
                    player_body,
                    other_body,
                    CollisionResponse::Physics { elasticity },
                );
            }
        }
        CharacterKind::Enemy => {
            state.scene.add_collision(
                player_body,
                other_body,
                CollisionResponse::Physics { elasticity: 0.0 },
            );
            retire(state, other);

            // Landing on top of a grounded enemy is free
            let player_vy = state.scene[player_body].velocity().y;
            let enemy_vy = state.scene[other_body].velocity().y;
            if player_vy >= 0.0 || enemy_vy != 0.0 {
                let damage = state.tuning.enemy_damage;
                hurt(state, slot, damage);
            }
            if state.player(slot).health <= 0.0 {
                declare_winner(state, slot.other());
            }
        }
        CharacterKind::Player(_) => {}
    }
}

/// Apply damage; returns whether the player was invincible
fn hurt(state: &mut GameState, slot: PlayerSlot, damage: f64) -> bool {
    let now = state.clock;
    let player = state.player_mut(slot);
    let invincible = player.is_invincible();
    player.change_health(-damage);
    if !invincible {
        player.last_hit = Some(now);
        state.events.push(GameEvent::Hurt(slot));
    }
    invincible
}

fn declare_winner(state: &mut GameState, winner: PlayerSlot) {
    let loser = winner.other();
    state.phase = GamePhase::Won { winner };

    let winner_body = state.player_body_mut(winner);
    winner_body.set_centroid(WINNER_POSITION);
    winner_body.set_velocity(DVec2::ZERO);
    let loser_body = state.player_body_mut(loser);
    loser_body.set_centroid(LOSER_POSITION);
    loser_body.set_velocity(DVec2::ZERO);

    state.events.push(GameEvent::Died(loser));
    log::info!("{winner:?} wins");
}

/// Winner hops in place; loser settles on its own floor
fn win_animation(state: &mut GameState, winner: PlayerSlot) {
    let loser = winner.other();
    let gravity = state.tuning.gravity;
    try_jump(state, winner, false);
    apply_gravity(state.player_body_mut(winner), gravity, WINNER_POSITION.y);
    apply_gravity(state.player_body_mut(loser), gravity, START_POSITIONS[loser.index()].y);
}

/// Players fall to their start height; enemies to their ledge, wrapping as they go
fn apply_world_gravity(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    for slot in PlayerSlot::BOTH {
        apply_gravity(state.player_body_mut(slot), gravity, START_POSITIONS[slot.index()].y);
    }

    let floor = state.tuning.enemy_floor;
    for character in &state.characters {
        if character.kind == CharacterKind::Enemy {
            let body = &mut state.scene[character.body];
            apply_gravity(body, gravity, floor);
            wrap_edges(body);
        }
    }
}

/// Remove bullets that left the sides or fell through the floor
fn sweep_bullets(state: &mut GameState) {
    let scene = &mut state.scene;
    state.characters.retain(|c| {
        if !c.kind.is_bullet() {
            return true;
        }
        let p = scene[c.body].centroid();
        let gone = p.x > WORLD_MAX.x || p.x < WORLD_MIN.x || p.y < WORLD_MIN.y;
        if gone {
            scene.mark_removed(c.body);
        }
        !gone
    });
}

/// Teleport to the opposite edge once the centroid leaves the world
fn wrap_edges(body: &mut Body) {
    let c = body.centroid();
    if c.x > WORLD_MAX.x {
        body.set_centroid(DVec2::new(WORLD_MIN.x, c.y));
    } else if c.x < WORLD_MIN.x {
        body.set_centroid(DVec2::new(WORLD_MAX.x, c.y));
    } else if c.y > WORLD_MAX.y {
        body.set_centroid(DVec2::new(c.x, WORLD_MIN.y));
    } else if c.y < WORLD_MIN.y {
        body.set_centroid(DVec2::new(c.x, WORLD_MAX.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    const DT: f64 = 1.0 / 60.0;

    /// A match in progress with both players standing still on their floors
    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), seed);
        state.phase = GamePhase::Playing;
        for slot in PlayerSlot::BOTH {
            state.player_body_mut(slot).set_velocity(DVec2::ZERO);
        }
        state
    }

    fn press(slot: PlayerSlot, f: impl FnOnce(&mut PlayerControls)) -> TickInput {
        let mut input = TickInput::default();
        f(input.controls_mut(slot));
        input
    }

    #[test]
    fn test_loading_waits_for_start() {
        let mut state = GameState::new(Tuning::default(), 1);
        let before = state.player_body(PlayerSlot::One).centroid();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.phase, GamePhase::Loading);
        assert_eq!(state.player_body(PlayerSlot::One).centroid(), before);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.bombs_only);
        // Players rise into the arena on the first physics step
        assert!(state.player_body(PlayerSlot::One).centroid().y > before.y);
        assert!(state.events.contains(&GameEvent::MatchStarted { bombs_only: false }));
    }

    #[test]
    fn test_bombs_only_start() {
        let mut state = GameState::new(Tuning::default(), 1);
        let input = TickInput {
            bombs_only: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bombs_only);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut state = playing(1);
        let input = press(PlayerSlot::Two, |c| c.right = true);
        let x0 = state.player_body(PlayerSlot::Two).centroid().x;
        for _ in 0..3 {
            tick(&mut state, &input, DT);
        }
        let x1 = state.player_body(PlayerSlot::Two).centroid().x;
        assert!((x1 - x0 - 15.0).abs() < 1e-6);
        assert_eq!(state.player(PlayerSlot::Two).facing, Facing::Right);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut state = playing(1);
        let input = press(PlayerSlot::One, |c| c.jump = true);
        tick(&mut state, &input, DT);
        let jumps = |s: &GameState| {
            s.events
                .iter()
                .filter(|e| **e == GameEvent::Jumped(PlayerSlot::One))
                .count()
        };
        assert_eq!(jumps(&state), 1);
        assert!(state.player_body(PlayerSlot::One).velocity().y > 0.0);

        // Held: no second jump even once the player has landed
        for _ in 0..120 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(jumps(&state), 1);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut state = playing(1);
        state
            .player_body_mut(PlayerSlot::One)
            .set_velocity(DVec2::new(0.0, -100.0));
        state
            .player_body_mut(PlayerSlot::One)
            .set_centroid(DVec2::new(100.0, 300.0));
        tick(&mut state, &press(PlayerSlot::One, |c| c.jump = true), DT);
        assert!(!state.events.contains(&GameEvent::Jumped(PlayerSlot::One)));
    }

    #[test]
    fn test_fire_spawns_bullet_in_facing_direction() {
        let mut state = playing(1);
        tick(&mut state, &press(PlayerSlot::Two, |c| c.fire = true), DT);

        let bullet = state.characters.last().unwrap();
        assert_eq!(bullet.kind, CharacterKind::Bullet(BulletKind::Standard));
        let body = &state.scene[bullet.body];
        assert_eq!(body.velocity(), DVec2::new(-800.0, 0.0));
        assert!(body.centroid().x < START_POSITIONS[1].x - 80.0);
        assert!(!state.player(PlayerSlot::Two).can_fire);
    }

    #[test]
    fn test_fire_recharges() {
        let mut state = playing(1);
        let fire = press(PlayerSlot::One, |c| c.fire = true);
        let idle = TickInput::default();
        tick(&mut state, &fire, DT);
        tick(&mut state, &idle, DT);
        tick(&mut state, &fire, DT);
        assert_eq!(state.count_of(CharacterKind::Bullet(BulletKind::Standard)), 1);

        for _ in 0..70 {
            tick(&mut state, &idle, DT);
        }
        tick(&mut state, &fire, DT);
        assert!(!state.player(PlayerSlot::One).can_fire);
        let fired = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Fired { .. }))
            .count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_bombs_only_mode_fires_bombs() {
        let mut state = playing(1);
        state.bombs_only = true;
        tick(&mut state, &press(PlayerSlot::One, |c| c.fire = true), DT);
        let bullet = state.characters.last().unwrap();
        assert_eq!(bullet.kind, CharacterKind::Bullet(BulletKind::Bomb));
        // Bomb rides a gravity binding until it is swept
        assert_eq!(state.scene.binding_count(), 1);
        assert!(state.scene[bullet.body].velocity().y < 900.0);
    }

    #[test]
    fn test_bullet_kills_player_same_frame() {
        let mut state = playing(1);
        state.player_mut(PlayerSlot::Two).health = 10.0;
        let target = state.player_body(PlayerSlot::Two).centroid();
        state.spawn_character(
            CharacterKind::Bullet(BulletKind::Standard),
            target - DVec2::new(60.0, 0.0),
            DVec2::new(800.0, 0.0),
        );

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(
            state.phase,
            GamePhase::Won {
                winner: PlayerSlot::One
            }
        );
        assert!(state.player(PlayerSlot::Two).health <= 0.0);
        assert!(state.events.contains(&GameEvent::Died(PlayerSlot::Two)));
        assert_eq!(state.characters.len(), 2);
    }

    #[test]
    fn test_bullet_hit_pushes_player() {
        let mut state = playing(1);
        let target = state.player_body(PlayerSlot::Two).centroid();
        let bullet = state.spawn_character(
            CharacterKind::Bullet(BulletKind::Standard),
            target - DVec2::new(60.0, 0.0),
            DVec2::new(800.0, 0.0),
        );

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player(PlayerSlot::Two).health, 90.0);
        assert_eq!(state.player(PlayerSlot::Two).last_hit, Some(state.clock));
        assert!(!state.scene.contains(bullet));
        assert!(state.player_body(PlayerSlot::Two).velocity().x > 0.0);
    }

    #[test]
    fn test_invincible_player_shrugs_off_bomb() {
        let mut state = playing(1);
        state
            .player_mut(PlayerSlot::One)
            .grant_power(Ability::Invincibility, 0.0, 5.0, 0.0);
        let target = state.player_body(PlayerSlot::One).centroid();
        state.spawn_character(
            CharacterKind::Bullet(BulletKind::Bomb),
            target + DVec2::new(60.0, 0.0),
            DVec2::new(-300.0, 0.0),
        );

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.player(PlayerSlot::One).health, 100.0);
        assert_eq!(state.player(PlayerSlot::One).last_hit, None);
        assert_eq!(state.characters.len(), 2);
        assert_eq!(state.scene.binding_count(), 0);
    }

    #[test]
    fn test_bullet_and_enemy_destroy_each_other() {
        let mut state = playing(1);
        let enemy =
            state.spawn_character(CharacterKind::Enemy, DVec2::new(500.0, 85.0), DVec2::ZERO);
        let bullet = state.spawn_character(
            CharacterKind::Bullet(BulletKind::Standard),
            DVec2::new(455.0, 85.0),
            DVec2::new(800.0, 0.0),
        );
        let bystander =
            state.spawn_character(CharacterKind::Pickup, DVec2::new(700.0, 400.0), DVec2::ZERO);

        tick(&mut state, &TickInput::default(), DT);

        assert!(!state.scene.contains(enemy));
        assert!(!state.scene.contains(bullet));
        assert!(state.scene.contains(bystander));
        assert_eq!(state.count_of(CharacterKind::Enemy), 0);
        assert_eq!(state.pickup_count(), 1);
    }

    #[test]
    fn test_stomping_grounded_enemy_is_free() {
        let mut state = playing(1);
        let p = state.player_body(PlayerSlot::One).centroid();
        state
            .player_body_mut(PlayerSlot::One)
            .set_velocity(DVec2::new(0.0, -200.0));
        state.spawn_character(CharacterKind::Enemy, p + DVec2::new(0.0, -70.0), DVec2::ZERO);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.player(PlayerSlot::One).health, 100.0);
        assert_eq!(state.count_of(CharacterKind::Enemy), 0);
    }

    #[test]
    fn test_walking_into_enemy_hurts() {
        let mut state = playing(1);
        let p = state.player_body(PlayerSlot::One).centroid();
        state.spawn_character(
            CharacterKind::Enemy,
            p + DVec2::new(70.0, 0.0),
            DVec2::new(-25.0, 0.0),
        );

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.player(PlayerSlot::One).health, 90.0);
        assert!(state.events.contains(&GameEvent::Hurt(PlayerSlot::One)));
    }

    #[test]
    fn test_pickup_freezes_and_grants_power() {
        let mut state = playing(8);
        let p = state.player_body(PlayerSlot::One).centroid();
        let pickup =
            state.spawn_character(CharacterKind::Pickup, p + DVec2::new(60.0, 0.0), DVec2::ZERO);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::Frozen);
        assert!(Ability::POWER_UPS.contains(&state.player(PlayerSlot::One).ability));
        assert_eq!(state.pickup_count(), 0);
        // Bodies hold still while frozen; the pickup body waits for the next sweep
        assert!(state.scene.contains(pickup));
        let frozen_at = state.player_body(PlayerSlot::One).centroid();

        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), 0.25);
        }
        assert_eq!(state.phase, GamePhase::Frozen);
        assert_eq!(state.player_body(PlayerSlot::One).centroid(), frozen_at);

        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.scene.contains(pickup));
    }

    #[test]
    fn test_power_expires_after_duration() {
        let mut state = playing(1);
        state
            .player_mut(PlayerSlot::Two)
            .grant_power(Ability::Speed, 0.0, 5.0, 0.0);
        assert_eq!(state.player(PlayerSlot::Two).step, 10.0);
        state.clock = 10.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player(PlayerSlot::Two).ability, Ability::None);
        assert_eq!(state.player(PlayerSlot::Two).step, 5.0);
    }

    #[test]
    fn test_health_boost_flag_clears_on_resume() {
        let mut state = playing(1);
        state
            .player_mut(PlayerSlot::One)
            .grant_power(Ability::HealthBoost, 0.0, 5.0, 20.0);
        assert!(state.player(PlayerSlot::One).health_boost);
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.player(PlayerSlot::One).health_boost);
        assert_eq!(state.player(PlayerSlot::One).health, 120.0);
    }

    #[test]
    fn test_enemy_spawner_interval() {
        let mut state = playing(1);
        state.tuning.pickup_interval = f64::INFINITY;
        for _ in 0..99 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert_eq!(state.count_of(CharacterKind::Enemy), 0);
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert_eq!(state.count_of(CharacterKind::Enemy), 1);
    }

    #[test]
    fn test_pickup_cap() {
        let mut state = playing(1);
        state.tuning.enemy_interval = f64::INFINITY;
        // Well above the players so nothing gets picked up
        state.tuning.pickup_min_height = 400.0;
        state.tuning.pickup_max_height = 450.0;
        for _ in 0..5 {
            state.pickup_timer = state.tuning.pickup_interval;
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.pickup_count(), 2);
        let spawned = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::PickupSpawned)
            .count();
        assert_eq!(spawned, 2);
    }

    #[test]
    fn test_velocity_reset_zeroes_horizontal() {
        let mut state = playing(1);
        state
            .player_body_mut(PlayerSlot::One)
            .set_velocity(DVec2::new(120.0, 0.0));
        state.velocity_timer = 0.2;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player_body(PlayerSlot::One).velocity().x, 0.0);
    }

    #[test]
    fn test_offscreen_bullets_swept() {
        let mut state = playing(1);
        let id = state.spawn_character(
            CharacterKind::Bullet(BulletKind::Standard),
            DVec2::new(1010.0, 300.0),
            DVec2::new(800.0, 0.0),
        );
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.scene.contains(id));
        assert_eq!(state.characters.len(), 2);
    }

    #[test]
    fn test_enemy_lands_on_ledge() {
        let mut state = playing(1);
        state.tuning.pickup_interval = f64::INFINITY;
        let floor = state.tuning.enemy_floor;
        let id = state.spawn_character(
            CharacterKind::Enemy,
            DVec2::new(500.0, state.tuning.enemy_spawn_height),
            DVec2::new(25.0, 0.0),
        );

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let body = &state.scene[id];
        assert_eq!(body.velocity(), DVec2::new(25.0, 0.0));
        let y = body.centroid().y;
        assert!(y <= floor, "resting at {y}");
        // One frame of overshoot at most, well clear of the world floor
        assert!(y > floor - state.tuning.gravity * DT, "resting at {y}");
        assert!(body.centroid().x > 500.0);
    }

    #[test]
    fn test_enemy_wraps_during_play() {
        let mut state = playing(1);
        state.tuning.pickup_interval = f64::INFINITY;
        let floor = state.tuning.enemy_floor;
        let id = state.spawn_character(
            CharacterKind::Enemy,
            DVec2::new(WORLD_MAX.x - 0.1, floor),
            DVec2::new(25.0, 0.0),
        );

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.scene[id].centroid().x > WORLD_MAX.x);
        tick(&mut state, &TickInput::default(), DT);

        let c = state.scene[id].centroid();
        assert!(c.x >= WORLD_MIN.x && c.x < WORLD_MIN.x + 1.0, "x = {}", c.x);
        assert!(c.y <= floor + 1e-9 && c.y > floor - 1.0, "y = {}", c.y);
        assert_eq!(state.count_of(CharacterKind::Enemy), 1);
    }

    #[test]
    fn test_wrap_is_one_axis_per_call() {
        let mut state = playing(1);
        let corner = DVec2::new(1001.0, 501.0);
        let id = state.spawn_character(CharacterKind::Pickup, corner, DVec2::ZERO);
        let body = &mut state.scene[id];
        wrap_edges(body);
        assert!((body.centroid() - DVec2::new(0.0, 501.0)).length() < 1e-9);
        wrap_edges(body);
        assert!((body.centroid() - DVec2::new(0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_winner_hops_loser_rests() {
        let mut state = playing(1);
        declare_winner(&mut state, PlayerSlot::Two);
        let mut max_height: f64 = 0.0;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
            max_height = max_height.max(state.player_body(PlayerSlot::Two).centroid().y);
        }
        assert!(max_height > 200.0);
        let loser = state.player_body(PlayerSlot::One).centroid();
        assert!((loser.x - LOSER_POSITION.x).abs() < 1e-6);
        assert!(loser.y <= LOSER_POSITION.y + 1e-9);
        // Winner's hops are silent
        assert!(!state.events.contains(&GameEvent::Jumped(PlayerSlot::Two)));
    }

    #[test]
    fn test_reset_from_win_screen() {
        let mut state = playing(1);
        declare_winner(&mut state, PlayerSlot::One);
        let input = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Loading);
        assert_eq!(state.characters.len(), 2);
    }
}
