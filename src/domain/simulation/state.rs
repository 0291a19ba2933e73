//! Authoritative match state: fighters, bullets, phase, and the per-frame
//! tick entry point. Everything lives in one explicit [`MatchState`] value
//! so the whole simulation can run headless (tests pass a seeded RNG and an
//! input snapshot, no windowing required).

use bevy::prelude::*;
use rand::Rng;

use super::catalog::{ArmKey, UtilityKey};
use super::{combat, rounds};

pub const START_MAX_HP: i32 = 100;
pub const WINNER_PARTIAL_HEAL: i32 = 30;
/// Idle time between a round ending and the next buy phase opening.
pub const ROUND_END_DELAY_SECS: f32 = 1.1;
pub const ARENA_SIZE: Vec2 = Vec2::new(900.0, 560.0);

pub fn fighter_color(id: usize) -> Color {
    match id % 4 {
        0 => Color::srgb(1.0, 0.47, 0.47),
        1 => Color::srgb(0.4, 0.93, 1.0),
        2 => Color::srgb(1.0, 0.87, 0.4),
        _ => Color::srgb(0.8, 0.53, 1.0),
    }
}

/// One local player. HP doubles as the shop currency: purchases drain it
/// during the buy phase, combat drains it during the fight phase.
#[derive(Clone, Debug, PartialEq)]
pub struct Fighter {
    pub id: usize,
    pub name: String,
    pub color: Color,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing in radians, arena coordinates (y grows downward).
    pub angle: f32,
    pub alive: bool,
    pub max_hp: i32,
    pub hp: i32,
    /// Index into [`super::catalog::LEG_TIERS`].
    pub legs: usize,
    /// Purchase order matters: only `arms[0]` is ever swung or fired.
    pub arms: Vec<ArmKey>,
    pub utility: Vec<UtilityKey>,
    /// Damage-reduction fraction. Overwritten by armor purchases, zeroed by
    /// a round loss; the `utility` record is deliberately left alone.
    pub armor: f32,
    pub ammo: u32,
    pub last_attack_ms: f64,
    pub hp_boost_applied: bool,
    pub score: u32,
}

impl Fighter {
    pub fn new(id: usize, pos: Vec2) -> Self {
        Self {
            id,
            name: format!("P{}", id + 1),
            color: fighter_color(id),
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            alive: true,
            max_hp: START_MAX_HP,
            hp: START_MAX_HP,
            legs: 0,
            arms: Vec::new(),
            utility: Vec::new(),
            armor: 0.0,
            ammo: 0,
            // Never attacked: the first attack must not be cooldown-gated.
            last_attack_ms: f64::NEG_INFINITY,
            hp_boost_applied: false,
            score: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// Index of the firing fighter; excluded from hits, credited for kills.
    pub owner: usize,
    /// Remaining lifetime in ticks.
    pub life: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Buying,
    Fighting,
    /// Short pause before the next buy phase; `elapsed` is advanced by the
    /// regular tick rather than a deferred timer callback.
    RoundEnd { elapsed: f32 },
}

/// Directional and attack bits for one fighter, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FighterInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

/// Per-tick view of every fighter's held keys, indexed by fighter id.
#[derive(Resource, Clone, Debug, Default)]
pub struct InputSnapshot {
    pub fighters: Vec<FighterInput>,
}

impl InputSnapshot {
    pub fn for_fighter(&self, id: usize) -> FighterInput {
        self.fighters.get(id).copied().unwrap_or_default()
    }
}

/// Narration and error notices surfaced by the core; the presentation layer
/// turns these into transient banner text.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchEvent {
    InsufficientFunds { buyer: usize, item: &'static str },
    AlreadyApplied { buyer: usize },
    NoAmmo { shooter: usize },
    Downed { target: usize, attacker: Option<usize> },
    RoundWon { winner: usize, round: u32 },
    FightStarted { round: u32 },
    BuyPhaseStarted { round: u32 },
}

#[derive(Resource, Clone, Debug)]
pub struct MatchState {
    pub fighters: Vec<Fighter>,
    pub bullets: Vec<Bullet>,
    pub round: u32,
    pub phase: Phase,
    /// The one fighter currently allowed to spend during [`Phase::Buying`].
    pub active_buyer: usize,
    /// Simulation clock in milliseconds, advanced by `tick`. Attack
    /// cooldowns compare against this, never against the wall clock.
    pub clock_ms: f64,
    pub arena: Vec2,
}

impl MatchState {
    pub fn new(player_count: usize, arena: Vec2, rng: &mut impl Rng) -> Self {
        let fighters = (0..player_count)
            .map(|i| {
                let pos = Vec2::new(
                    rng.gen_range(80.0..arena.x - 80.0),
                    rng.gen_range(80.0..arena.y - 80.0),
                );
                Fighter::new(i, pos)
            })
            .collect();
        Self {
            fighters,
            bullets: Vec::new(),
            round: 1,
            phase: Phase::Buying,
            active_buyer: 0,
            clock_ms: 0.0,
            arena,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.fighters.iter().filter(|f| f.alive).count()
    }

    /// Advance the simulation by one frame. `dt` is the frame delta in
    /// seconds. Returns the notices raised this tick.
    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> Vec<MatchEvent> {
        self.clock_ms += f64::from(dt) * 1000.0;
        let mut events = Vec::new();
        match self.phase {
            Phase::Fighting => {
                combat::fight_tick(self, input, &mut events);
                rounds::check_round_end(self, &mut events);
            }
            Phase::RoundEnd { .. } => rounds::advance_round_end(self, dt, &mut events),
            Phase::Buying => {}
        }
        events
    }

    /// Default banner line for the current phase.
    pub fn status_line(&self) -> String {
        match self.phase {
            Phase::Buying => format!("Round {} — Buying limbs", self.round),
            Phase::Fighting => format!("Round {} — Fight!", self.round),
            Phase::RoundEnd { .. } => String::new(),
        }
    }

    pub fn phase_label(&self) -> &'static str {
        match self.phase {
            Phase::Buying => "buy",
            Phase::Fighting => "fight",
            Phase::RoundEnd { .. } => "round_end",
        }
    }
}
