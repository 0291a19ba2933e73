use bevy_egui::egui;

use crate::domain::controls::ControlSets;
use crate::domain::simulation::ArenaSettings;

pub fn show_help_panel(
    ctx: &mut egui::Context,
    settings: &ArenaSettings,
    sets: &ControlSets,
    player_count: usize,
) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            for i in 0..player_count {
                ui.label(format!("P{}: {}", i + 1, sets.describe(i)));
            }
            ui.separator();
            ui.label("Buy limbs with HP, then fight.");
            ui.label("No arms? You can still bite.");
            ui.label("R: Restart Match");
            ui.label("H: Toggle Help");
            ui.label("F3: Toggle Diagnostics");
        });
    }
}
