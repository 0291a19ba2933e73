//! Simulation plugin: owns the [`MatchState`] resource, drives the core
//! tick from Bevy's frame loop, processes shop commands, and keeps the
//! sprite entities in sync with the headless state.

pub mod catalog;
pub mod combat;
pub mod rounds;
pub mod shop;
pub mod state;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

use self::shop::{PurchaseError, ShopCommand};
use self::state::{InputSnapshot, MatchEvent, MatchState, Phase, ARENA_SIZE};

pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaSettings>()
            .add_event::<ShopCommand>()
            .add_event::<MatchEvent>()
            .add_event::<ResetEvent>()
            .add_systems(Startup, setup_match)
            .add_systems(
                Update,
                (
                    handle_reset,
                    apply_shop_commands,
                    drive_match,
                    sync_fighter_sprites,
                    sync_hp_bars,
                    sync_bullet_sprites,
                )
                    .chain(),
            );
    }
}

/// Match-level options tweakable from the roster panel.
#[derive(Resource, Clone)]
pub struct ArenaSettings {
    pub player_count: usize,
    /// Seed the spawn RNG so restarted matches lay out identically.
    pub deterministic: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            player_count: 2,
            deterministic: false,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

#[derive(Resource)]
pub struct SeededRng(pub StdRng);

#[derive(Event, Default)]
pub struct ResetEvent;

#[derive(Component)]
struct FighterSprite(usize);

#[derive(Component)]
struct HpBar(usize);

#[derive(Component)]
struct BulletSprite;

const FIGHTER_SPRITE_SIZE: Vec2 = Vec2::new(36.0, 28.0);
const HP_BAR_WIDTH: f32 = 56.0;
const HP_BAR_HEIGHT: f32 = 6.0;
/// Vertical offset of the HP bar above a fighter, arena units.
const HP_BAR_OFFSET: f32 = 30.0;

/// Arena coordinates have y growing downward (like the shop/panel text
/// ordering); Bevy world space has y up, origin at the arena center.
fn world_pos(arena: Vec2, p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x - arena.x * 0.5, arena.y * 0.5 - p.y, z)
}

fn setup_match(mut commands: Commands, settings: Res<ArenaSettings>) {
    let mut rng = thread_rng();
    let state = MatchState::new(settings.player_count, ARENA_SIZE, &mut rng);

    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgb(0.05, 0.06, 0.09),
            custom_size: Some(state.arena),
            ..default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..default()
    });
    spawn_fighter_sprites(&mut commands, &state);
    commands.insert_resource(state);
}

fn spawn_fighter_sprites(commands: &mut Commands, state: &MatchState) {
    for (i, f) in state.fighters.iter().enumerate() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: f.color,
                    custom_size: Some(FIGHTER_SPRITE_SIZE),
                    ..default()
                },
                transform: Transform::from_translation(world_pos(state.arena, f.pos, 1.0)),
                ..default()
            },
            FighterSprite(i),
        ));
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgb(1.0, 0.43, 0.43),
                    custom_size: Some(Vec2::new(HP_BAR_WIDTH, HP_BAR_HEIGHT)),
                    ..default()
                },
                transform: Transform::from_translation(world_pos(
                    state.arena,
                    f.pos - Vec2::new(0.0, HP_BAR_OFFSET),
                    3.0,
                )),
                ..default()
            },
            HpBar(i),
        ));
    }
}

/// Full match restart: rebuild the state for the configured player count
/// and respawn the per-fighter entities.
fn handle_reset(
    mut commands: Commands,
    mut ev_reset: EventReader<ResetEvent>,
    settings: Res<ArenaSettings>,
    mut state: ResMut<MatchState>,
    seeded: Option<Res<SeededRng>>,
    sprites: Query<Entity, Or<(With<FighterSprite>, With<HpBar>, With<BulletSprite>)>>,
) {
    if ev_reset.is_empty() {
        return;
    }
    ev_reset.clear();

    let mut thread = thread_rng();
    let mut rng: Box<dyn RngCore> = if settings.deterministic {
        Box::new(StdRng::seed_from_u64(0))
    } else {
        Box::new(&mut thread)
    };
    *state = MatchState::new(settings.player_count, ARENA_SIZE, &mut rng);

    // Keep the fight-start RNG resource in step with the toggle.
    if settings.deterministic {
        commands.insert_resource(SeededRng(StdRng::seed_from_u64(0)));
    } else if seeded.is_some() {
        commands.remove_resource::<SeededRng>();
    }

    for e in &sprites {
        commands.entity(e).despawn();
    }
    spawn_fighter_sprites(&mut commands, &state);
}

fn apply_shop_commands(
    mut shop_evr: EventReader<ShopCommand>,
    mut state: ResMut<MatchState>,
    mut events: EventWriter<MatchEvent>,
    mut seeded: Option<ResMut<SeededRng>>,
) {
    if shop_evr.is_empty() {
        return;
    }
    let mut thread = thread_rng();
    let mut rng: Box<dyn RngCore> = if let Some(seeded) = seeded.as_mut() {
        Box::new(&mut seeded.0)
    } else {
        Box::new(&mut thread)
    };

    for cmd in shop_evr.read() {
        // The shop is only open during the buy phase; anything else is a
        // stray click and gets dropped.
        if !matches!(state.phase, Phase::Buying) {
            continue;
        }
        match *cmd {
            ShopCommand::Purchase(item) => {
                let buyer = state.active_buyer;
                match shop::purchase(&mut state, item) {
                    Ok(()) => {}
                    Err(PurchaseError::InsufficientFunds) => {
                        events.send(MatchEvent::InsufficientFunds {
                            buyer,
                            item: item.display_name(),
                        });
                    }
                    Err(PurchaseError::AlreadyApplied) => {
                        events.send(MatchEvent::AlreadyApplied { buyer });
                    }
                    Err(PurchaseError::UnknownItem) => {
                        debug!("ignoring purchase of unknown item {:?}", item);
                    }
                }
            }
            ShopCommand::EndTurn => {
                let mut out = Vec::new();
                shop::end_turn(&mut state, &mut rng, &mut out);
                for e in out {
                    events.send(e);
                }
            }
        }
    }
}

fn drive_match(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    mut state: ResMut<MatchState>,
    mut events: EventWriter<MatchEvent>,
) {
    let out = state.tick(&input, time.delta_seconds());
    for e in out {
        events.send(e);
    }
}

fn sync_fighter_sprites(
    state: Res<MatchState>,
    mut q: Query<(&FighterSprite, &mut Transform, &mut Sprite)>,
) {
    for (marker, mut t, mut s) in &mut q {
        let Some(f) = state.fighters.get(marker.0) else {
            continue;
        };
        t.translation = world_pos(state.arena, f.pos, 1.0);
        // Arena angles are y-down; world space is y-up.
        t.rotation = Quat::from_rotation_z(-f.angle);
        s.color = if f.alive {
            f.color
        } else {
            f.color.with_alpha(0.25)
        };
    }
}

fn sync_hp_bars(state: Res<MatchState>, mut q: Query<(&HpBar, &mut Transform, &mut Sprite)>) {
    for (marker, mut t, mut s) in &mut q {
        let Some(f) = state.fighters.get(marker.0) else {
            continue;
        };
        t.translation = world_pos(state.arena, f.pos - Vec2::new(0.0, HP_BAR_OFFSET), 3.0);
        let frac = (f.hp.max(0) as f32 / f.max_hp as f32).clamp(0.0, 1.0);
        s.custom_size = Some(Vec2::new(HP_BAR_WIDTH * frac, HP_BAR_HEIGHT));
    }
}

/// Reconcile one sprite entity per live bullet: reuse what exists, spawn
/// the shortfall, despawn the surplus.
fn sync_bullet_sprites(
    mut commands: Commands,
    state: Res<MatchState>,
    mut q: Query<(Entity, &mut Transform), With<BulletSprite>>,
) {
    let mut sprites = q.iter_mut();
    for b in &state.bullets {
        if let Some((_, mut t)) = sprites.next() {
            t.translation = world_pos(state.arena, b.pos, 2.0);
        } else {
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::srgb(1.0, 1.0, 0.87),
                        custom_size: Some(Vec2::splat(6.0)),
                        ..default()
                    },
                    transform: Transform::from_translation(world_pos(state.arena, b.pos, 2.0)),
                    ..default()
                },
                BulletSprite,
            ));
        }
    }
    for (e, _) in sprites {
        commands.entity(e).despawn();
    }
}
