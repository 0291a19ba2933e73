use bevy::prelude::EventWriter;
use bevy_egui::egui;

use crate::domain::simulation::catalog::{ArmKey, UtilityKey, LEG_TIERS};
use crate::domain::simulation::shop::{ShopCommand, ShopItem};
use crate::domain::simulation::state::{MatchState, Phase};

/// Buy-phase shop for the active buyer. Hidden outside [`Phase::Buying`].
pub fn show_shop_panel(
    ctx: &mut egui::Context,
    state: &MatchState,
    shop_cmds: &mut EventWriter<ShopCommand>,
) {
    if state.phase != Phase::Buying {
        return;
    }
    let Some(buyer) = state.fighters.get(state.active_buyer) else {
        return;
    };

    egui::Window::new("Limb Shop").show(ctx, |ui| {
        ui.label(format!(
            "{} is buying. HP is currency: {} / {}",
            buyer.name, buyer.hp, buyer.max_hp
        ));
        ui.separator();

        ui.label("Legs (absolute tier, buying lower downgrades)");
        for (tier, leg) in LEG_TIERS.iter().enumerate().skip(1) {
            let label = format!("{} legs: speed {:.1} (cost {} HP)", leg.name, leg.speed, leg.cost);
            if ui.button(label).clicked() {
                shop_cmds.send(ShopCommand::Purchase(ShopItem::Legs(tier)));
            }
        }

        ui.separator();
        ui.label("Arms (only the first one bought is used)");
        for key in ArmKey::ALL {
            let spec = key.spec();
            let label = if spec.ammo > 0 {
                format!(
                    "{}: dmg {:.0}, {} rounds (cost {} HP)",
                    spec.name, spec.damage, spec.ammo, spec.cost
                )
            } else {
                format!(
                    "{}: dmg {:.0}, range {:.0} (cost {} HP)",
                    spec.name, spec.damage, spec.range, spec.cost
                )
            };
            if ui.button(label).clicked() {
                shop_cmds.send(ShopCommand::Purchase(ShopItem::Arm(key)));
            }
        }

        ui.separator();
        ui.label("Utility");
        for key in UtilityKey::ALL {
            let spec = key.spec();
            let label = match key {
                UtilityKey::Armor => format!(
                    "{}: {:.0}% damage reduction (cost {} HP)",
                    spec.name,
                    spec.damage_reduction * 100.0,
                    spec.cost
                ),
                UtilityKey::HpBoost => format!(
                    "{}: +{} max HP, once per round (cost {} HP)",
                    spec.name, spec.add_max_hp, spec.cost
                ),
            };
            if ui.button(label).clicked() {
                shop_cmds.send(ShopCommand::Purchase(ShopItem::Utility(key)));
            }
        }

        ui.separator();
        if ui.button("Done buying").clicked() {
            shop_cmds.send(ShopCommand::EndTurn);
        }
    });
}
