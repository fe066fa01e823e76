//! Fixed timestep simulation tick
//!
//! Advances every entity one step. The order of the phases below matters:
//! collisions always see post-movement positions, and a fatal hit ends the
//! tick before power-ups, particles and levelling are processed.

use rand::Rng;

use super::achievements::AchievementId;
use super::collision::collides;
use super::spawn::explosion;
use super::state::{Enemy, GameEvent, GameSession, PowerUpKind};
use crate::consts::*;

/// Advance the session by one fixed timestep of `dt_ms`
pub fn tick<R: Rng + ?Sized>(state: &mut GameSession, rng: &mut R, dt_ms: u32) {
    if !state.is_playing() {
        return;
    }

    state.time_ms += u64::from(dt_ms);
    state.player.expire_effects(state.time_ms);

    move_bullets(state);
    move_enemies(state);
    resolve_bullet_hits(state, rng);

    if resolve_player_contacts(state, rng) {
        // Game over: nothing else happens this tick
        return;
    }

    move_power_ups(state);
    collect_power_ups(state);
    age_particles(state);
    check_level_up(state);
}

fn move_bullets(state: &mut GameSession) {
    let height = state.viewport.height;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
    state
        .bullets
        .retain(|b| b.pos.y > -BULLET_MARGIN && b.pos.y < height + BULLET_MARGIN);
}

/// Move enemies, then charge the escape penalty for any that left the bottom
fn move_enemies(state: &mut GameSession) {
    let height = state.viewport.height;
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel;
    }

    let mut escaped = Vec::new();
    state.enemies.retain(|e| {
        let gone = e.pos.y > height + e.size;
        if gone {
            escaped.push(e.kind);
        }
        !gone
    });

    for kind in escaped {
        state.lose_points(ESCAPE_PENALTY);
        state.push_event(GameEvent::EnemyEscaped { kind });
    }
}

/// Player bullets against enemies, newest bullet first.
/// Each bullet hits at most one enemy: the first overlapping one in spawn order.
fn resolve_bullet_hits<R: Rng + ?Sized>(state: &mut GameSession, rng: &mut R) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        if !state.bullets[i].from_player {
            continue;
        }

        let bullet = &state.bullets[i];
        let Some(j) = state.enemies.iter().position(|e| collides(bullet, e)) else {
            continue;
        };

        let bullet = state.bullets.remove(i);
        state.enemies[j].health -= bullet.damage;
        let sparks = explosion(bullet.pos, HIT_PARTICLES, rng);
        state.add_particles(sparks);

        if state.enemies[j].health <= 0 {
            let enemy = state.enemies.remove(j);
            kill_enemy(state, enemy, rng);
        }
    }
}

fn kill_enemy<R: Rng + ?Sized>(state: &mut GameSession, enemy: Enemy, rng: &mut R) {
    let burst = explosion(enemy.pos, EXPLOSION_PARTICLES, rng);
    state.add_particles(burst);

    state.score += enemy.score;
    state.enemies_killed += 1;
    state.combo += 1;

    state.record_achievement(AchievementId::FirstBlood, 1);
    state.record_achievement(AchievementId::Destroyer, state.enemies_killed);
    state.record_achievement(AchievementId::Unstoppable, state.combo);

    state.push_event(GameEvent::EnemyDestroyed {
        kind: enemy.kind,
        pos: enemy.pos,
        score: enemy.score,
    });
}

/// Enemies ramming the player. Returns true if the player died.
fn resolve_player_contacts<R: Rng + ?Sized>(state: &mut GameSession, rng: &mut R) -> bool {
    // Checked once for the whole pass
    if state.player.invincible() {
        return false;
    }

    // Newest enemy first
    for i in (0..state.enemies.len()).rev() {
        if !collides(&state.player, &state.enemies[i]) {
            continue;
        }

        let enemy = state.enemies.remove(i);
        let burst = explosion(enemy.pos, EXPLOSION_PARTICLES, rng);
        state.add_particles(burst);

        if state.player.has_shield {
            state.player.has_shield = false;
            state.push_event(GameEvent::ShieldAbsorbed);
            continue;
        }

        let player = &mut state.player;
        player.health = player.health.saturating_sub(1);
        player.invincible_until = Some(state.time_ms + INVINCIBILITY_MS);
        state.combo = 0;
        state.push_event(GameEvent::PlayerHit {
            health: state.player.health,
        });

        if state.player.health == 0 {
            log::info!("Player destroyed at score {}", state.score);
            state.end();
            return true;
        }
    }
    false
}

fn move_power_ups(state: &mut GameSession) {
    let height = state.viewport.height;
    for power_up in &mut state.power_ups {
        power_up.pos += power_up.vel;
    }
    state.power_ups.retain(|p| p.pos.y <= height + p.size);
}

fn collect_power_ups(state: &mut GameSession) {
    let mut collected = Vec::new();
    let player = &state.player;
    state.power_ups.retain(|p| {
        let hit = collides(player, p);
        if hit {
            collected.push(p.kind);
        }
        !hit
    });

    for kind in collected {
        match kind {
            PowerUpKind::TripleShot => {
                state.player.triple_shot_until = Some(state.time_ms + TRIPLE_SHOT_MS);
            }
            PowerUpKind::Shield => {
                state.player.has_shield = true;
            }
        }
        log::debug!("Collected {:?}", kind);
        state.push_event(GameEvent::PowerUpCollected { kind });
    }
}

fn age_particles(state: &mut GameSession) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

/// At most one level per tick
fn check_level_up(state: &mut GameSession) {
    if state.score >= state.level * POINTS_PER_LEVEL {
        state.level += 1;
        log::info!("Level up: {}", state.level);
        state.record_achievement(AchievementId::AcePilot, state.level);
        state.push_event(GameEvent::LevelUp { level: state.level });
    }
}
