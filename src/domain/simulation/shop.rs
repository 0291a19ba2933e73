//! Economy: purchases paid in HP, applied to the active buyer. All failures
//! are returned to the caller and leave the fighter untouched.

use bevy::prelude::Event;
use rand::Rng;

use super::catalog::{ArmKey, ArmKind, UtilityKey, LEG_TIERS};
use super::rounds;
use super::state::{MatchEvent, MatchState};

/// A discrete shop request, sent by the UI and processed against the match
/// state. Keeping these as plain messages means the shop can be driven
/// headless in tests.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopCommand {
    Purchase(ShopItem),
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopItem {
    /// Absolute leg tier: buying a lower tier after a higher one downgrades.
    Legs(usize),
    Arm(ArmKey),
    Utility(UtilityKey),
}

impl ShopItem {
    pub fn display_name(self) -> &'static str {
        match self {
            ShopItem::Legs(tier) => LEG_TIERS.get(tier).map(|l| l.name).unwrap_or("?"),
            ShopItem::Arm(key) => key.spec().name,
            ShopItem::Utility(key) => key.spec().name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseError {
    /// Cost exceeds the buyer's current HP.
    InsufficientFunds,
    /// One-time item already owned (HP boost before the flag is cleared).
    AlreadyApplied,
    /// Malformed request (leg tier outside the catalog). Ignored upstream
    /// with no notification.
    UnknownItem,
}

/// Apply a purchase to the active buyer. On any error the fighter record is
/// left exactly as it was.
pub fn purchase(state: &mut MatchState, item: ShopItem) -> Result<(), PurchaseError> {
    let buyer = state.active_buyer;
    let Some(f) = state.fighters.get_mut(buyer) else {
        return Err(PurchaseError::UnknownItem);
    };
    match item {
        ShopItem::Legs(tier) => {
            let leg = LEG_TIERS.get(tier).ok_or(PurchaseError::UnknownItem)?;
            if f.hp < leg.cost {
                return Err(PurchaseError::InsufficientFunds);
            }
            f.hp -= leg.cost;
            f.legs = tier;
        }
        ShopItem::Arm(key) => {
            let spec = key.spec();
            if f.hp < spec.cost {
                return Err(PurchaseError::InsufficientFunds);
            }
            f.hp -= spec.cost;
            f.arms.push(key);
            if spec.kind == ArmKind::Projectile {
                f.ammo += spec.ammo;
            }
        }
        ShopItem::Utility(key) => {
            let spec = key.spec();
            if f.hp < spec.cost {
                return Err(PurchaseError::InsufficientFunds);
            }
            match key {
                UtilityKey::Armor => {
                    f.hp -= spec.cost;
                    f.armor = spec.damage_reduction;
                    f.utility.push(key);
                }
                UtilityKey::HpBoost => {
                    if f.hp_boost_applied {
                        return Err(PurchaseError::AlreadyApplied);
                    }
                    // Net spendable HP is unchanged; only the ceiling rises.
                    f.hp -= spec.cost;
                    f.max_hp += spec.add_max_hp;
                    f.hp += spec.add_max_hp;
                    f.hp_boost_applied = true;
                    f.utility.push(key);
                }
            }
        }
    }
    Ok(())
}

/// End the active buyer's turn. After the last fighter is done, the fight
/// starts (positions re-randomized, which is why this needs an RNG).
pub fn end_turn(state: &mut MatchState, rng: &mut impl Rng, events: &mut Vec<MatchEvent>) {
    state.active_buyer += 1;
    if state.active_buyer >= state.fighters.len() {
        rounds::start_fight(state, rng, events);
    }
}
