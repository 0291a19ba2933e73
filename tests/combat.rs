//! Fight-phase tests driven through the public tick: movement, bites,
//! melee, pistols, bullets, and body separation.

use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use limb_arena::domain::simulation::catalog::ArmKey;
use limb_arena::domain::simulation::shop;
use limb_arena::domain::simulation::state::{
    Bullet, FighterInput, InputSnapshot, MatchEvent, MatchState, Phase, ARENA_SIZE,
};

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_fight(players: usize) -> MatchState {
    let mut state = MatchState::new(players, ARENA_SIZE, &mut seeded_rng());
    let mut rng = seeded_rng();
    let mut events = Vec::new();
    while state.phase == Phase::Buying {
        shop::end_turn(&mut state, &mut rng, &mut events);
    }
    state
}

fn idle(players: usize) -> InputSnapshot {
    InputSnapshot {
        fighters: vec![FighterInput::default(); players],
    }
}

fn attack_only(players: usize, id: usize) -> InputSnapshot {
    let mut snap = idle(players);
    snap.fighters[id].attack = true;
    snap
}

fn place(state: &mut MatchState, id: usize, x: f32, y: f32) {
    state.fighters[id].pos = Vec2::new(x, y);
    state.fighters[id].vel = Vec2::ZERO;
}

// ---- bite (no arms) ----

#[test]
fn armless_fighters_bite_for_six() {
    let mut state = make_fight(2);
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 94);
}

#[test]
fn bite_respects_its_cooldown() {
    let mut state = make_fight(2);
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 94);

    // Separation pushed them apart; reposition and attack again at once.
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 94);

    // Let 750 ms pass, then the bite lands again.
    state.tick(&idle(2), 0.75);
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 88);
}

#[test]
fn bite_ignores_armor() {
    let mut state = make_fight(2);
    state.fighters[1].armor = 0.9;
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 94);
}

#[test]
fn bite_misses_outside_its_range() {
    let mut state = make_fight(2);
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 240.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 100);
}

// ---- melee arms ----

#[test]
fn melee_damage_is_reduced_by_armor() {
    let mut state = make_fight(2);
    state.fighters[0].arms = vec![ArmKey::Chainsaw];
    state.fighters[1].armor = 0.15;
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    // round(18 * 0.85) = 15
    assert_eq!(state.fighters[1].hp, 85);
}

#[test]
fn a_connecting_hit_always_deals_at_least_one() {
    let mut state = make_fight(2);
    state.fighters[0].arms = vec![ArmKey::Chainsaw];
    state.fighters[1].armor = 0.99;
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.fighters[1].hp, 99);
}

#[test]
fn only_the_first_arm_bought_is_used() {
    let mut state = make_fight(2);
    state.fighters[0].arms = vec![ArmKey::Fist, ArmKey::Chainsaw];
    place(&mut state, 0, 200.0, 200.0);
    place(&mut state, 1, 220.0, 200.0);
    state.tick(&attack_only(2, 0), DT);
    // Fist damage, not chainsaw.
    assert_eq!(state.fighters[1].hp, 92);
}

// ---- pistol and bullets ----

#[test]
fn pistol_fires_until_ammo_runs_out() {
    let mut state = make_fight(2);
    state.fighters[0].arms = vec![ArmKey::Pistol];
    state.fighters[0].ammo = 6;
    place(&mut state, 0, 100.0, 100.0);
    place(&mut state, 1, 700.0, 400.0);

    for _ in 0..6 {
        state.tick(&attack_only(2, 0), DT);
        // Pass the 700 ms cooldown between shots.
        state.tick(&idle(2), 0.75);
    }
    assert_eq!(state.fighters[0].ammo, 0);
    assert_eq!(state.bullets.len(), 6);

    let before = state.fighters[0].last_attack_ms;
    let events = state.tick(&attack_only(2, 0), DT);
    assert!(events.contains(&MatchEvent::NoAmmo { shooter: 0 }));
    assert_eq!(state.bullets.len(), 6);
    // Dry fire must not burn the cooldown.
    assert_eq!(state.fighters[0].last_attack_ms, before);
}

#[test]
fn bullets_travel_and_hit_with_armor_reduction() {
    let mut state = make_fight(2);
    state.fighters[0].arms = vec![ArmKey::Pistol];
    state.fighters[0].ammo = 1;
    state.fighters[0].angle = 0.0;
    state.fighters[1].armor = 0.15;
    place(&mut state, 0, 200.0, 280.0);
    place(&mut state, 1, 300.0, 280.0);

    state.tick(&attack_only(2, 0), DT);
    assert_eq!(state.bullets.len(), 1);
    for _ in 0..10 {
        state.tick(&idle(2), DT);
    }
    // round(12 * 0.85) = 10
    assert_eq!(state.fighters[1].hp, 90);
    assert!(state.bullets.is_empty());
}

#[test]
fn bullets_never_hit_their_owner_and_expire() {
    let mut state = make_fight(2);
    place(&mut state, 0, 150.0, 150.0);
    place(&mut state, 1, 600.0, 400.0);
    state.bullets.push(Bullet {
        pos: Vec2::new(150.0, 150.0),
        vel: Vec2::ZERO,
        damage: 12.0,
        owner: 0,
        life: 60,
    });
    for _ in 0..61 {
        state.tick(&idle(2), DT);
    }
    assert_eq!(state.fighters[0].hp, 100);
    assert!(state.bullets.is_empty());
}

#[test]
fn bullets_leaving_the_arena_are_removed() {
    let mut state = make_fight(2);
    place(&mut state, 0, 150.0, 150.0);
    place(&mut state, 1, 600.0, 400.0);
    state.bullets.push(Bullet {
        pos: Vec2::new(896.0, 280.0),
        vel: Vec2::new(8.0, 0.0),
        damage: 12.0,
        owner: 0,
        life: 60,
    });
    state.tick(&idle(2), DT);
    assert!(state.bullets.is_empty());
}

// ---- movement ----

#[test]
fn legless_fighters_cannot_move() {
    let mut state = make_fight(2);
    place(&mut state, 0, 200.0, 300.0);
    place(&mut state, 1, 700.0, 300.0);
    let mut input = idle(2);
    input.fighters[0].up = true;
    input.fighters[0].right = true;
    for _ in 0..5 {
        state.tick(&input, DT);
    }
    assert_eq!(state.fighters[0].pos, Vec2::new(200.0, 300.0));
}

#[test]
fn velocity_is_capped_at_a_multiple_of_leg_speed() {
    let mut state = make_fight(2);
    state.fighters[0].legs = 2;
    place(&mut state, 0, 100.0, 280.0);
    place(&mut state, 1, 700.0, 500.0);
    let mut input = idle(2);
    input.fighters[0].right = true;
    for _ in 0..50 {
        state.tick(&input, DT);
    }
    // Swift legs: 1.8 * 1.8 cap.
    assert!((state.fighters[0].vel.length() - 3.24).abs() < 1e-3);
}

#[test]
fn friction_decays_velocity_when_no_key_is_held() {
    let mut state = make_fight(2);
    state.fighters[0].legs = 2;
    place(&mut state, 0, 300.0, 280.0);
    place(&mut state, 1, 700.0, 500.0);
    state.fighters[0].vel = Vec2::new(2.0, 0.0);
    state.tick(&idle(2), DT);
    assert!((state.fighters[0].vel.x - 1.7).abs() < 1e-5);
    assert!((state.fighters[0].pos.x - 301.7).abs() < 1e-4);
}

#[test]
fn facing_holds_while_standing_still() {
    let mut state = make_fight(2);
    state.fighters[0].angle = 1.0;
    place(&mut state, 0, 300.0, 280.0);
    place(&mut state, 1, 700.0, 500.0);
    for _ in 0..5 {
        state.tick(&idle(2), DT);
    }
    assert_eq!(state.fighters[0].angle, 1.0);
}

#[test]
fn positions_clamp_to_the_arena_margin() {
    let mut state = make_fight(2);
    state.fighters[0].legs = 2;
    place(&mut state, 0, 30.0, 280.0);
    place(&mut state, 1, 700.0, 500.0);
    let mut input = idle(2);
    input.fighters[0].left = true;
    for _ in 0..30 {
        state.tick(&input, DT);
    }
    assert_eq!(state.fighters[0].pos.x, 20.0);
}

// ---- separation ----

#[test]
fn overlapping_fighters_are_pushed_apart_symmetrically() {
    let mut state = make_fight(2);
    place(&mut state, 0, 300.0, 200.0);
    place(&mut state, 1, 310.0, 200.0);
    state.tick(&idle(2), DT);
    assert_eq!(state.fighters[0].pos, Vec2::new(290.0, 200.0));
    assert_eq!(state.fighters[1].pos, Vec2::new(320.0, 200.0));
}

#[test]
fn downed_fighters_do_not_separate() {
    let mut state = make_fight(3);
    state.fighters[2].alive = false;
    place(&mut state, 0, 300.0, 200.0);
    place(&mut state, 1, 310.0, 200.0);
    place(&mut state, 2, 305.0, 200.0);
    state.tick(&idle(3), DT);
    assert_eq!(state.fighters[2].pos, Vec2::new(305.0, 200.0));
    assert_eq!(state.fighters[0].pos, Vec2::new(290.0, 200.0));
    assert_eq!(state.fighters[1].pos, Vec2::new(320.0, 200.0));
}

// ---- invariants under sustained chaos ----

#[test]
fn hp_stays_within_bounds_over_many_ticks() {
    let mut state = make_fight(3);
    state.fighters[0].arms = vec![ArmKey::Chainsaw];
    state.fighters[1].arms = vec![ArmKey::Pistol];
    state.fighters[1].ammo = 6;
    state.fighters[0].legs = 2;
    state.fighters[1].legs = 1;

    let mut input = idle(3);
    for f in &mut input.fighters {
        f.attack = true;
        f.up = true;
        f.left = true;
    }
    for n in 0..200 {
        let dt = if n % 10 == 0 { 0.3 } else { DT };
        state.tick(&input, dt);
        for f in &state.fighters {
            assert!(f.hp >= 0 && f.hp <= f.max_hp);
        }
    }
}
