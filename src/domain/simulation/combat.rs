//! Per-tick combat resolution: movement integration, attacks, bullet
//! flight and impact, and player-player separation. Runs only while the
//! phase is `Fighting`.

use bevy::math::Vec2;

use super::catalog::{ArmKind, LEG_TIERS};
use super::state::{Bullet, InputSnapshot, MatchEvent, MatchState};

const THRUST_SCALE: f32 = 0.7;
const FRICTION: f32 = 0.85;
/// Velocity magnitude cap as a multiple of the leg tier's speed.
const MAX_VEL_FACTOR: f32 = 1.8;
const BOUND_MARGIN: f32 = 20.0;

/// Armless fallback attack. Intentionally ignores target armor.
const BITE_COOLDOWN_MS: f64 = 700.0;
const BITE_DAMAGE: f32 = 6.0;
const BITE_RANGE: f32 = 28.0;

/// Melee arms reach slightly past their listed range.
const MELEE_REACH_BONUS: f32 = 6.0;

const BULLET_MUZZLE_OFFSET: f32 = 18.0;
const BULLET_SPEED: f32 = 8.0;
const BULLET_LIFE_TICKS: i32 = 60;
const BULLET_HIT_RADIUS: f32 = 18.0;

/// Fighters closer than this get pushed apart symmetrically.
const SEPARATION_DISTANCE: f32 = 30.0;

pub(crate) fn fight_tick(
    state: &mut MatchState,
    input: &InputSnapshot,
    events: &mut Vec<MatchEvent>,
) {
    move_fighters(state, input);
    resolve_attacks(state, input, events);
    update_bullets(state, events);
    separate_fighters(state);
}

fn move_fighters(state: &mut MatchState, input: &InputSnapshot) {
    let arena = state.arena;
    for (i, f) in state.fighters.iter_mut().enumerate() {
        if !f.alive {
            continue;
        }
        let keys = input.for_fighter(i);
        let mut dir = Vec2::ZERO;
        if keys.left {
            dir.x -= 1.0;
        }
        if keys.right {
            dir.x += 1.0;
        }
        if keys.up {
            dir.y -= 1.0;
        }
        if keys.down {
            dir.y += 1.0;
        }

        let speed = LEG_TIERS[f.legs].speed;
        if dir != Vec2::ZERO {
            f.vel += dir.normalize() * speed * THRUST_SCALE;
        } else {
            f.vel *= FRICTION;
        }
        // Tier 0 has speed 0, so legless fighters clamp to a standstill.
        f.vel = f.vel.clamp_length_max(speed * MAX_VEL_FACTOR);
        f.pos += f.vel;
        if f.vel.length_squared() > 1e-8 {
            f.angle = f.vel.y.atan2(f.vel.x);
        }
        f.pos.x = f.pos.x.clamp(BOUND_MARGIN, arena.x - BOUND_MARGIN);
        f.pos.y = f.pos.y.clamp(BOUND_MARGIN, arena.y - BOUND_MARGIN);
    }
}

fn resolve_attacks(state: &mut MatchState, input: &InputSnapshot, events: &mut Vec<MatchEvent>) {
    for i in 0..state.fighters.len() {
        if state.fighters[i].alive && input.for_fighter(i).attack {
            attempt_attack(state, i, events);
        }
    }
}

fn attempt_attack(state: &mut MatchState, i: usize, events: &mut Vec<MatchEvent>) {
    let now = state.clock_ms;
    let (pos, angle, first_arm, last_attack, ammo) = {
        let f = &state.fighters[i];
        (f.pos, f.angle, f.arms.first().copied(), f.last_attack_ms, f.ammo)
    };

    let Some(key) = first_arm else {
        // No arms: weak bite.
        if now - last_attack < BITE_COOLDOWN_MS {
            return;
        }
        state.fighters[i].last_attack_ms = now;
        for j in 0..state.fighters.len() {
            if j == i || !state.fighters[j].alive {
                continue;
            }
            if state.fighters[j].pos.distance(pos) < BITE_RANGE {
                apply_damage(state, j, BITE_DAMAGE, Some(i), events);
            }
        }
        return;
    };

    // Only the first-acquired arm is ever used, however many were bought.
    let arm = key.spec();
    if now - last_attack < arm.cooldown_ms {
        return;
    }
    match arm.kind {
        ArmKind::Melee => {
            state.fighters[i].last_attack_ms = now;
            for j in 0..state.fighters.len() {
                if j == i || !state.fighters[j].alive {
                    continue;
                }
                if state.fighters[j].pos.distance(pos) < arm.range + MELEE_REACH_BONUS {
                    let dmg = arm.damage * (1.0 - state.fighters[j].armor);
                    apply_damage(state, j, dmg, Some(i), events);
                }
            }
        }
        ArmKind::Projectile => {
            if ammo == 0 {
                // Dry fire: no shot, and the cooldown is left alone.
                events.push(MatchEvent::NoAmmo { shooter: i });
                return;
            }
            state.fighters[i].last_attack_ms = now;
            state.fighters[i].ammo -= 1;
            let dir = Vec2::from_angle(angle);
            state.bullets.push(Bullet {
                pos: pos + dir * BULLET_MUZZLE_OFFSET,
                vel: dir * BULLET_SPEED,
                damage: arm.damage,
                owner: i,
                life: BULLET_LIFE_TICKS,
            });
        }
    }
}

/// Subtract damage from a living target, with a floor of 1 point per hit.
/// Downs the target at 0 HP and credits the attacker's score.
pub(crate) fn apply_damage(
    state: &mut MatchState,
    target: usize,
    amount: f32,
    attacker: Option<usize>,
    events: &mut Vec<MatchEvent>,
) {
    if !state.fighters[target].alive {
        return;
    }
    let dealt = (amount.round() as i32).max(1);
    let downed = {
        let f = &mut state.fighters[target];
        f.hp -= dealt;
        if f.hp <= 0 {
            f.hp = 0;
            f.alive = false;
            true
        } else {
            false
        }
    };
    if downed {
        if let Some(a) = attacker {
            state.fighters[a].score += 1;
        }
        events.push(MatchEvent::Downed { target, attacker });
    }
}

fn update_bullets(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let arena = state.arena;
    let mut i = 0;
    while i < state.bullets.len() {
        {
            let b = &mut state.bullets[i];
            b.pos += b.vel;
            b.life -= 1;
        }
        let b = state.bullets[i];
        if b.life <= 0 || b.pos.x < 0.0 || b.pos.y < 0.0 || b.pos.x > arena.x || b.pos.y > arena.y
        {
            state.bullets.remove(i);
            continue;
        }
        // At most one fighter hit per bullet: first match in index order.
        let mut hit = None;
        for (j, f) in state.fighters.iter().enumerate() {
            if !f.alive || j == b.owner {
                continue;
            }
            if f.pos.distance(b.pos) < BULLET_HIT_RADIUS {
                hit = Some((j, b.damage * (1.0 - f.armor)));
                break;
            }
        }
        if let Some((j, dmg)) = hit {
            apply_damage(state, j, dmg, Some(b.owner), events);
            state.bullets.remove(i);
        } else {
            i += 1;
        }
    }
}

fn separate_fighters(state: &mut MatchState) {
    let n = state.fighters.len();
    for i in 0..n {
        for j in i + 1..n {
            if !state.fighters[i].alive || !state.fighters[j].alive {
                continue;
            }
            let delta = state.fighters[j].pos - state.fighters[i].pos;
            let d = delta.length();
            if d > 0.0 && d < SEPARATION_DISTANCE {
                // Half the overlap each; the midpoint stays fixed.
                let push = delta / d * ((SEPARATION_DISTANCE - d) * 0.5);
                state.fighters[i].pos -= push;
                state.fighters[j].pos += push;
            }
        }
    }
}
