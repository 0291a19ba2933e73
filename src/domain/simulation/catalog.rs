//! Limb catalog: pure lookup tables shared by the shop and the combat
//! engine. Entries are immutable and referenced by key; fighters never
//! copy or mutate them.

/// A leg upgrade level. Tier 0 is "no legs": speed 0, cannot move.
pub struct LegTier {
    pub name: &'static str,
    pub speed: f32,
    pub cost: i32,
}

pub const LEG_TIERS: [LegTier; 3] = [
    LegTier { name: "None", speed: 0.0, cost: 0 },
    LegTier { name: "Twitch Legs", speed: 0.8, cost: 15 },
    LegTier { name: "Swift Legs", speed: 1.8, cost: 30 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmKind {
    Melee,
    Projectile,
}

pub struct ArmSpec {
    pub name: &'static str,
    pub kind: ArmKind,
    pub damage: f32,
    pub range: f32,
    pub cost: i32,
    pub cooldown_ms: f64,
    /// Rounds of starting ammo granted per purchase. Zero for melee arms.
    pub ammo: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmKey {
    Fist,
    Chainsaw,
    Pistol,
}

static FIST: ArmSpec = ArmSpec {
    name: "Fist",
    kind: ArmKind::Melee,
    damage: 8.0,
    range: 26.0,
    cost: 5,
    cooldown_ms: 400.0,
    ammo: 0,
};

static CHAINSAW: ArmSpec = ArmSpec {
    name: "Chainsaw",
    kind: ArmKind::Melee,
    damage: 18.0,
    range: 30.0,
    cost: 20,
    cooldown_ms: 300.0,
    ammo: 0,
};

static PISTOL: ArmSpec = ArmSpec {
    name: "Pistol",
    kind: ArmKind::Projectile,
    damage: 12.0,
    range: 400.0,
    cost: 18,
    cooldown_ms: 700.0,
    ammo: 6,
};

impl ArmKey {
    pub const ALL: [ArmKey; 3] = [ArmKey::Fist, ArmKey::Chainsaw, ArmKey::Pistol];

    pub fn spec(self) -> &'static ArmSpec {
        match self {
            ArmKey::Fist => &FIST,
            ArmKey::Chainsaw => &CHAINSAW,
            ArmKey::Pistol => &PISTOL,
        }
    }
}

pub struct UtilitySpec {
    pub name: &'static str,
    pub cost: i32,
    pub damage_reduction: f32,
    pub add_max_hp: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UtilityKey {
    Armor,
    HpBoost,
}

static ARMOR: UtilitySpec = UtilitySpec {
    name: "Armor Plate",
    cost: 22,
    damage_reduction: 0.15,
    add_max_hp: 0,
};

static HP_BOOST: UtilitySpec = UtilitySpec {
    name: "HP Boost",
    cost: 25,
    damage_reduction: 0.0,
    add_max_hp: 20,
};

impl UtilityKey {
    pub const ALL: [UtilityKey; 2] = [UtilityKey::Armor, UtilityKey::HpBoost];

    pub fn spec(self) -> &'static UtilitySpec {
        match self {
            UtilityKey::Armor => &ARMOR,
            UtilityKey::HpBoost => &HP_BOOST,
        }
    }
}
