use bevy::prelude::*;
use bevy_egui::{
    egui::{self, Align2, Color32, FontId, RichText},
    EguiContexts,
};

use crate::domain::presentation::FlashMessage;
use crate::domain::simulation::state::MatchState;

/// Status line at the top of the arena, preempted by any active flash
/// notice.
pub fn show_banners(
    mut contexts: EguiContexts,
    state: Res<MatchState>,
    flash: Res<FlashMessage>,
) {
    let ctx = contexts.ctx_mut();
    if let Some(text) = &flash.text {
        show_flash_banner(ctx, text);
        return;
    }
    let status = state.status_line();
    if !status.is_empty() {
        show_status_banner(ctx, &status);
    }
}

fn show_status_banner(ctx: &mut egui::Context, text: &str) {
    egui::Area::new("status_banner".into())
        .anchor(Align2::CENTER_TOP, egui::Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            let text = RichText::new(text)
                .font(FontId::proportional(24.0))
                .color(Color32::LIGHT_GRAY);
            ui.label(text);
        });
}

fn show_flash_banner(ctx: &mut egui::Context, text: &str) {
    egui::Area::new("flash_banner".into())
        .anchor(Align2::CENTER_TOP, egui::Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            let text = RichText::new(text)
                .font(FontId::proportional(28.0))
                .color(Color32::GOLD);
            ui.label(text);
        });
}
