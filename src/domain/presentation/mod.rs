use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::ControlSets;
use crate::domain::simulation::shop::ShopCommand;
use crate::domain::simulation::state::{MatchEvent, MatchState};
use crate::domain::simulation::{ArenaSettings, ResetEvent};

pub mod panels;

/// How long a notice banner stays up.
const FLASH_SECS: f32 = 1.2;

/// The most recent notice text, replacing any earlier one still showing.
#[derive(Resource, Default)]
pub struct FlashMessage {
    pub text: Option<String>,
    pub remaining: f32,
}

impl FlashMessage {
    fn set(&mut self, text: String) {
        self.text = Some(text);
        self.remaining = FLASH_SECS;
    }
}

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<FlashMessage>()
            .add_systems(Update, (collect_flash, ui_system, panels::banners::show_banners).chain());
    }
}

/// Turn simulation notices into banner text.
fn collect_flash(
    time: Res<Time>,
    state: Res<MatchState>,
    mut events: EventReader<MatchEvent>,
    mut flash: ResMut<FlashMessage>,
) {
    flash.remaining -= time.delta_seconds();
    if flash.remaining <= 0.0 {
        flash.text = None;
    }

    let name = |id: usize| state.fighters.get(id).map(|f| f.name.clone()).unwrap_or_default();
    for ev in events.read() {
        match *ev {
            MatchEvent::InsufficientFunds { buyer, item } => {
                flash.set(format!("{} cannot afford {}", name(buyer), item));
            }
            MatchEvent::AlreadyApplied { buyer } => {
                flash.set(format!("{}: HP Boost already applied", name(buyer)));
            }
            MatchEvent::NoAmmo { shooter } => {
                flash.set(format!("{}: no pistol ammo", name(shooter)));
            }
            MatchEvent::Downed { target, attacker } => match attacker {
                Some(a) => flash.set(format!("{} downed by {}!", name(target), name(a))),
                None => flash.set(format!("{} was downed!", name(target))),
            },
            MatchEvent::RoundWon { winner, round } => {
                flash.set(format!("{} wins round {}! Partial heal +30", name(winner), round));
            }
            MatchEvent::FightStarted { .. } => flash.set("Fight!".to_string()),
            MatchEvent::BuyPhaseStarted { .. } => {}
        }
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<ArenaSettings>,
    state: Res<MatchState>,
    sets: Res<ControlSets>,
    diagnostics: Res<DiagnosticsStore>,
    mut shop_cmds: EventWriter<ShopCommand>,
    mut ev_reset: EventWriter<ResetEvent>,
) {
    let ctx = contexts.ctx_mut();
    panels::shop_panel::show_shop_panel(ctx, &state, &mut shop_cmds);
    panels::roster_panel::show_roster_panel(ctx, &state, &mut settings, &mut ev_reset);
    panels::help_panel::show_help_panel(ctx, &settings, &sets, state.fighters.len());
    panels::diagnostics_panel::show_diagnostics_panel(ctx, &diagnostics, &settings);
}
