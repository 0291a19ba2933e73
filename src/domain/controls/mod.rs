use crate::domain::simulation::state::{FighterInput, InputSnapshot, MatchState};
use crate::domain::simulation::{ArenaSettings, ResetEvent};
use bevy::prelude::*;

/// One local player's key set. Four fixed sets share the keyboard, assigned
/// by fighter id.
#[derive(Clone, Copy)]
pub struct Keybinds {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub attack: KeyCode,
}

#[derive(Resource)]
pub struct ControlSets(pub [Keybinds; 4]);

impl Default for ControlSets {
    fn default() -> Self {
        Self([
            Keybinds {
                up: KeyCode::KeyW,
                down: KeyCode::KeyS,
                left: KeyCode::KeyA,
                right: KeyCode::KeyD,
                attack: KeyCode::KeyF,
            },
            Keybinds {
                up: KeyCode::ArrowUp,
                down: KeyCode::ArrowDown,
                left: KeyCode::ArrowLeft,
                right: KeyCode::ArrowRight,
                attack: KeyCode::KeyL,
            },
            Keybinds {
                up: KeyCode::KeyI,
                down: KeyCode::KeyK,
                left: KeyCode::KeyJ,
                right: KeyCode::KeyL,
                attack: KeyCode::KeyU,
            },
            Keybinds {
                up: KeyCode::Numpad8,
                down: KeyCode::Numpad5,
                left: KeyCode::Numpad4,
                right: KeyCode::Numpad6,
                attack: KeyCode::Numpad0,
            },
        ])
    }
}

impl ControlSets {
    pub fn for_fighter(&self, id: usize) -> Keybinds {
        self.0[id % self.0.len()]
    }

    pub fn describe(&self, id: usize) -> String {
        let b = self.for_fighter(id);
        format!(
            "{:?}/{:?}/{:?}/{:?} + {:?}",
            b.up, b.left, b.down, b.right, b.attack
        )
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlSets>()
            .init_resource::<InputSnapshot>()
            .add_systems(
                Update,
                (collect_input, reset_trigger, help_toggle, diagnostics_toggle),
            );
    }
}

/// Sample held keys into the per-tick snapshot the simulation consumes.
fn collect_input(
    keys: Res<ButtonInput<KeyCode>>,
    sets: Res<ControlSets>,
    state: Res<MatchState>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    snapshot.fighters.clear();
    for i in 0..state.fighters.len() {
        let b = sets.for_fighter(i);
        snapshot.fighters.push(FighterInput {
            up: keys.pressed(b.up),
            down: keys.pressed(b.down),
            left: keys.pressed(b.left),
            right: keys.pressed(b.right),
            attack: keys.pressed(b.attack),
        });
    }
}

fn reset_trigger(mut ev_reset: EventWriter<ResetEvent>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyR) {
        ev_reset.send(ResetEvent::default());
    }
}

fn help_toggle(mut settings: ResMut<ArenaSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(mut settings: ResMut<ArenaSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}
