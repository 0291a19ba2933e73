//! Round state machine: buy -> fight -> round_end -> buy. The round-end
//! pause is an explicit elapsed counter advanced by the tick, so the whole
//! machine stays a pure function of elapsed time.

use bevy::math::Vec2;
use rand::Rng;

use super::state::{MatchEvent, MatchState, Phase, ROUND_END_DELAY_SECS, WINNER_PARTIAL_HEAL};

/// Buying -> Fighting. Everyone is revived, spread across the arena, and
/// floored to 1 HP if they spent themselves to zero or below.
pub fn start_fight(state: &mut MatchState, rng: &mut impl Rng, events: &mut Vec<MatchEvent>) {
    state.phase = Phase::Fighting;
    state.bullets.clear();
    let arena = state.arena;
    for (i, f) in state.fighters.iter_mut().enumerate() {
        f.pos = Vec2::new(
            80.0 + i as f32 * 120.0 + rng.gen_range(-40.0..40.0),
            rng.gen_range(80.0..arena.y - 80.0),
        );
        f.vel = Vec2::ZERO;
        f.alive = true;
        if f.hp <= 0 {
            f.hp = 1;
        }
    }
    events.push(MatchEvent::FightStarted { round: state.round });
}

/// Fighting -> RoundEnd, in the same tick the living count drops to <= 1.
pub fn check_round_end(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    if state.phase == Phase::Fighting && state.alive_count() <= 1 {
        end_round(state, events);
    }
}

fn end_round(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    state.phase = Phase::RoundEnd { elapsed: 0.0 };
    // A mutual elimination leaves no winner; everyone is treated as a loser.
    let winner = (state.alive_count() == 1)
        .then(|| state.fighters.iter().position(|f| f.alive))
        .flatten();
    for (i, f) in state.fighters.iter_mut().enumerate() {
        if Some(i) == winner {
            f.hp = (f.hp + WINNER_PARTIAL_HEAL).min(f.max_hp);
        } else {
            // Losers heal fully but lose most of their loadout. The utility
            // record keeps stale entries; only the armor effect is zeroed.
            f.hp = f.max_hp;
            f.arms.truncate(1);
            f.legs = 0;
            f.armor = 0.0;
            f.ammo = 0;
            f.hp_boost_applied = false;
        }
    }
    if let Some(w) = winner {
        state.fighters[w].score += 1;
        events.push(MatchEvent::RoundWon { winner: w, round: state.round });
    }
}

/// RoundEnd -> Buying after the fixed pause. Downed fighters come back so
/// they can shop again.
pub fn advance_round_end(state: &mut MatchState, dt: f32, events: &mut Vec<MatchEvent>) {
    let Phase::RoundEnd { elapsed } = &mut state.phase else {
        return;
    };
    *elapsed += dt;
    if *elapsed < ROUND_END_DELAY_SECS {
        return;
    }
    state.round += 1;
    state.phase = Phase::Buying;
    state.active_buyer = 0;
    for f in &mut state.fighters {
        f.alive = true;
    }
    events.push(MatchEvent::BuyPhaseStarted { round: state.round });
}
