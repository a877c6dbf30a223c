//! Weapons, armor, ammunition and consumables.

use delve_core::combat::Element;
use delve_core::state::{
    Ammo, AmmoKind, Armor, Consumable, ConsumableEffect, Container, DamageDice, Item, ItemKind,
    Tick, Weapon, WeaponCategory,
};

use super::{effects, skills};

fn weapon(name: &str, weapon: Weapon) -> Item {
    Item::new(name, ItemKind::Weapon(weapon))
}

pub fn dagger() -> Item {
    weapon(
        "Dagger",
        Weapon::new(WeaponCategory::Dagger, Element::Normal, DamageDice::new(1, 6, 0)),
    )
}

pub fn iron_sword() -> Item {
    weapon(
        "Iron Sword",
        Weapon::new(WeaponCategory::Sword, Element::Normal, DamageDice::new(2, 6, 0)),
    )
}

pub fn wooden_bow() -> Item {
    weapon(
        "Wooden Bow",
        Weapon::new(WeaponCategory::Bow, Element::Normal, DamageDice::new(1, 2, 0)).with_range(5),
    )
}

pub fn wooden_crossbow() -> Item {
    weapon(
        "Wooden Crossbow",
        Weapon::new(WeaponCategory::Crossbow, Element::Normal, DamageDice::new(2, 3, 0))
            .with_range(10)
            .with_capacity(1),
    )
}

pub fn pistol() -> Item {
    weapon(
        "Pistol",
        Weapon::new(WeaponCategory::Gun, Element::Normal, DamageDice::new(1, 3, 0))
            .with_range(7)
            .with_capacity(3),
    )
}

pub fn staff() -> Item {
    weapon(
        "Staff",
        Weapon::new(WeaponCategory::Staff, Element::Normal, DamageDice::new(1, 4, 0))
            .with_range(6)
            .with_mp_cost(2),
    )
}

pub fn mage_orb() -> Item {
    weapon(
        "Mage Orb",
        Weapon::new(WeaponCategory::Orb, Element::Light, DamageDice::new(2, 3, 0))
            .with_range(8)
            .with_mp_cost(3),
    )
}

pub fn fireball_wand() -> Item {
    weapon(
        "Fireball Wand",
        Weapon::new(WeaponCategory::Wand, Element::Fire, DamageDice::fixed(0))
            .with_skills(vec![skills::fireball(), skills::power_shot()]),
    )
}

pub fn quiver() -> Item {
    Item::new(
        "Quiver",
        ItemKind::Container(Container {
            accepts: AmmoKind::Arrow,
            capacity: 10,
            contents: None,
        }),
    )
}

pub fn leather_armor() -> Item {
    Item::new("Leather Armor", ItemKind::Armor(Armor { defense: 2 }))
}

pub fn chainmail() -> Item {
    Item::new("Chainmail", ItemKind::Armor(Armor { defense: 4 }))
}

fn ammo(name: &str, kind: AmmoKind, damage: i32, quantity: u32) -> Item {
    Item::new(
        name,
        ItemKind::Ammo(Ammo {
            kind,
            name: name.to_owned(),
            quantity,
            damage,
            element: Element::Normal,
        }),
    )
}

pub fn arrows(quantity: u32) -> Item {
    ammo("Arrow", AmmoKind::Arrow, 4, quantity)
}

pub fn bolts(quantity: u32) -> Item {
    ammo("Bolt", AmmoKind::Bolt, 4, quantity)
}

pub fn bullets(quantity: u32) -> Item {
    ammo("Bullet", AmmoKind::Bullet, 3, quantity)
}

fn consumable(name: &str, time_cost: Tick, effect: ConsumableEffect) -> Item {
    Item::new(name, ItemKind::Consumable(Consumable { time_cost, effect }))
}

pub fn healing_draught() -> Item {
    consumable(
        "Healing Draught",
        Tick::whole(1),
        ConsumableEffect::Heal {
            amount: 4,
            effect: None,
        },
    )
}

pub fn lightning_scroll() -> Item {
    consumable(
        "Lightning Scroll",
        Tick::whole(3),
        ConsumableEffect::Lightning {
            damage: 20,
            range: 5,
        },
    )
}

pub fn confusion_scroll() -> Item {
    consumable(
        "Confusion Scroll",
        Tick::tenths(15),
        ConsumableEffect::Confuse { turns: 10 },
    )
}

pub fn fireball_scroll() -> Item {
    consumable(
        "Fireball Scroll",
        Tick::whole(5),
        ConsumableEffect::Fireball {
            damage: 12,
            radius: 3,
        },
    )
}

pub fn health_potion() -> Item {
    consumable(
        "Health Potion",
        Tick::whole(1),
        ConsumableEffect::Apply(effects::health_potion()),
    )
}

pub fn regeneration_potion() -> Item {
    consumable(
        "Regeneration Potion",
        Tick::whole(1),
        ConsumableEffect::Apply(effects::regeneration()),
    )
}

/// Looks an item up by its display name. Ammunition comes back as a stack of
/// one.
pub fn item(name: &str) -> Option<Item> {
    let found = match name {
        "Dagger" => dagger(),
        "Iron Sword" => iron_sword(),
        "Wooden Bow" => wooden_bow(),
        "Wooden Crossbow" => wooden_crossbow(),
        "Pistol" => pistol(),
        "Staff" => staff(),
        "Mage Orb" => mage_orb(),
        "Fireball Wand" => fireball_wand(),
        "Quiver" => quiver(),
        "Leather Armor" => leather_armor(),
        "Chainmail" => chainmail(),
        "Arrow" => arrows(1),
        "Bolt" => bolts(1),
        "Bullet" => bullets(1),
        "Healing Draught" => healing_draught(),
        "Lightning Scroll" => lightning_scroll(),
        "Confusion Scroll" => confusion_scroll(),
        "Fireball Scroll" => fireball_scroll(),
        "Health Potion" => health_potion(),
        "Regeneration Potion" => regeneration_potion(),
        _ => return None,
    };
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_display_names() {
        for name in ["Dagger", "Pistol", "Quiver", "Fireball Scroll", "Bolt"] {
            assert_eq!(item(name).unwrap().name, name);
        }
        assert!(item("Excalibur").is_none());
    }

    #[test]
    fn ranged_weapons_carry_their_reach() {
        let crossbow = wooden_crossbow();
        let crossbow = crossbow.weapon().unwrap();
        assert_eq!((crossbow.range, crossbow.capacity), (10, 1));
        assert!(crossbow.loaded.is_none());

        let wand = fireball_wand();
        assert_eq!(wand.weapon().unwrap().skills.len(), 2);
    }
}
