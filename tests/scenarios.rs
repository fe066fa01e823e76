use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use sky_fighter::persistence::{MemoryStorage, Storage};
use sky_fighter::sim::{
    AchievementId, Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameSession, Viewport,
    tick,
};
use sky_fighter::{Command, Game, HighScore, Settings};

const DT: u32 = 16;

fn playing() -> (GameSession, Pcg32) {
    let mut state = GameSession::new(Viewport::default(), 0);
    state.start();
    (state, Pcg32::seed_from_u64(2024))
}

fn basic_at(x: f32, y: f32) -> Enemy {
    let mut e = Enemy::spawn(EnemyKind::Basic, 1, 390.0, 0.0);
    e.pos = Vec2::new(x, y);
    e
}

// ── Simulation scenarios ────────────────────────────────────────────────────

#[test]
fn fresh_game_tick_stays_empty() {
    let (mut state, mut rng) = playing();
    tick(&mut state, &mut rng, DT);
    assert!(state.enemies.is_empty());
    assert!(state.bullets.is_empty());
    assert!(state.power_ups.is_empty());
    assert_eq!(state.score, 0);
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn bullet_on_basic_enemy_scores_a_kill() {
    let (mut state, mut rng) = playing();
    state.move_player(100.0, 100.0);
    state.enemies.push(basic_at(100.0, 100.0));
    state
        .bullets
        .push(Bullet::player(Vec2::new(100.0, 100.0), Vec2::new(0.0, -15.0)));

    tick(&mut state, &mut rng, DT);

    assert!(state.bullets.is_empty());
    assert!(state.enemies.is_empty());
    assert_eq!(state.score, 10);
    assert_eq!(state.enemies_killed, 1);
    assert!(state.achievements.get(AchievementId::FirstBlood).unlocked);
}

#[test]
fn shield_takes_the_hit() {
    let (mut state, mut rng) = playing();
    state.move_player(200.0, 600.0);
    state.player.has_shield = true;
    state.enemies.push(basic_at(200.0, 600.0));

    tick(&mut state, &mut rng, DT);

    assert!(!state.player.has_shield);
    assert!(state.enemies.is_empty());
    assert_eq!(state.player.health, 3);
}

#[test]
fn last_hit_point_ends_the_game() {
    let (mut state, mut rng) = playing();
    state.move_player(200.0, 600.0);
    state.player.health = 1;
    state.enemies.push(basic_at(200.0, 600.0));

    tick(&mut state, &mut rng, DT);

    assert_eq!(state.player.health, 0);
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn enemy_draw_on_threshold_picks_next_kind() {
    assert_eq!(EnemyKind::from_roll(0.6), EnemyKind::Fast);
    assert_eq!(EnemyKind::from_roll(0.95), EnemyKind::Heavy);
}

#[test]
fn crossing_level_threshold() {
    let (mut state, mut rng) = playing();
    state.score = 199;
    state.enemies.push(basic_at(200.0, 200.0));
    state
        .bullets
        .push(Bullet::player(Vec2::new(200.0, 200.0), Vec2::ZERO));

    tick(&mut state, &mut rng, DT);

    assert_eq!(state.score, 209);
    assert_eq!(state.level, 2);
    assert_eq!(state.achievements.get(AchievementId::AcePilot).progress, 2);
}

#[test]
fn escapes_never_push_score_negative() {
    let (mut state, mut rng) = playing();
    let h = state.viewport.height;
    for n in 0..5 {
        state.enemies.push(basic_at(40.0 + n as f32 * 60.0, h + 39.0));
    }
    tick(&mut state, &mut rng, DT);
    assert_eq!(state.score, 0);
    assert!(state.enemies.is_empty());
}

// ── Facade ──────────────────────────────────────────────────────────────────

fn quiet_settings(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        auto_fire: false,
        ..Settings::default()
    }
}

#[test]
fn survivor_unlocks_after_a_minute() {
    let (mut state, _) = playing();
    for _ in 0..59 {
        state.survive_second();
    }
    let survivor = state.achievements.get(AchievementId::Survivor);
    assert_eq!(survivor.progress, 59);
    assert!(!survivor.unlocked);

    state.survive_second();
    let survivor = state.achievements.get(AchievementId::Survivor);
    assert_eq!(survivor.progress, 60);
    assert!(survivor.unlocked);
    assert!(state.drain_events().contains(&GameEvent::AchievementUnlocked {
        id: AchievementId::Survivor
    }));
}

#[test]
fn survival_seconds_follow_play_time() {
    let mut game = Game::new(quiet_settings(5), MemoryStorage::new());
    game.start();
    for _ in 0..30 {
        game.apply(Command::Advance { dt_ms: 100 });
    }
    assert_eq!(game.phase(), GamePhase::Playing);
    let session = game.session();
    assert_eq!(session.survival_secs, 3);
    assert_eq!(
        session.achievements.get(AchievementId::Survivor).progress,
        3
    );
}

#[test]
fn high_score_survives_between_games() {
    let mut storage = MemoryStorage::new();
    storage.set_value(HighScore::STORAGE_KEY, "75").unwrap();

    let mut game = Game::new(quiet_settings(9), storage);
    assert_eq!(game.session().high_score, 75);
    game.start();
    game.end();
    game.start();
    assert_eq!(game.session().high_score, 75);
    assert_eq!(game.session().score, 0);

    let storage = game.into_storage();
    assert_eq!(
        storage.get_value(HighScore::STORAGE_KEY),
        Ok(Some("75".to_string()))
    );
}

#[test]
fn paused_game_is_frozen() {
    let mut game = Game::new(quiet_settings(11), MemoryStorage::new());
    game.start();
    for _ in 0..40 {
        game.advance(100);
    }
    game.pause();
    let before = game.session().clone();
    for _ in 0..100 {
        game.advance(100);
        game.move_player(10.0, 10.0);
        game.shoot_bullet();
    }
    let after = game.session();
    assert_eq!(after.enemies, before.enemies);
    assert_eq!(after.bullets, before.bullets);
    assert_eq!(after.player, before.player);
    assert_eq!(after.time_ms, before.time_ms);
    assert_eq!(after.survival_secs, before.survival_secs);
}
