use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::domain::simulation::catalog::LEG_TIERS;
use crate::domain::simulation::state::MatchState;
use crate::domain::simulation::{ArenaSettings, ResetEvent};

/// Scoreboard plus match options. The player-count slider takes effect on
/// the next restart.
pub fn show_roster_panel(
    ctx: &mut egui::Context,
    state: &MatchState,
    settings: &mut ArenaSettings,
    ev_reset: &mut EventWriter<ResetEvent>,
) {
    egui::Window::new("Match").show(ctx, |ui| {
        ui.label(format!("Round: {} · Phase: {}", state.round, state.phase_label()));
        ui.separator();

        for f in &state.fighters {
            ui.horizontal(|ui| {
                let status = if f.alive { "" } else { " (down)" };
                ui.label(format!("{}{}  wins: {}", f.name, status, f.score));
                ui.add(
                    egui::ProgressBar::new(f.hp.max(0) as f32 / f.max_hp as f32)
                        .text(format!("{} / {}", f.hp, f.max_hp)),
                );
            });
            let arm = f
                .arms
                .first()
                .map(|k| k.spec().name)
                .unwrap_or("bite only");
            ui.label(format!(
                "  {} | {} legs | armor {:.0}% | ammo {}",
                arm,
                LEG_TIERS[f.legs].name,
                f.armor * 100.0,
                f.ammo
            ));
            if !f.utility.is_empty() {
                let util: Vec<&str> = f.utility.iter().map(|u| u.spec().name).collect();
                ui.label(format!("  util: {}", util.join(", ")));
            }
        }

        ui.separator();
        ui.add(egui::Slider::new(&mut settings.player_count, 2..=4).text("Players (on restart)"));
        ui.checkbox(&mut settings.deterministic, "Deterministic spawns");
        if ui.button("Restart Match").clicked() {
            ev_reset.send(ResetEvent::default());
        }
    });
}
