//! Equipment slots.
//!
//! Slots own their items outright; equipping moves an item out of the
//! inventory and the displaced item back into it.

use crate::state::types::{Container, Item, ItemKind, Weapon};

/// Which slot an item occupies once equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Weapon,
    Armor,
    Container,
}

impl EquipSlot {
    pub fn for_item(item: &Item) -> Option<Self> {
        match item.kind {
            ItemKind::Weapon(_) => Some(Self::Weapon),
            ItemKind::Armor(_) => Some(Self::Armor),
            ItemKind::Container(_) => Some(Self::Container),
            ItemKind::Ammo(_) | ItemKind::Consumable(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    /// Quiver or similar ammunition holder.
    pub container: Option<Item>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Container => self.container.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Container => &mut self.container,
        }
    }

    /// Puts `item` in its slot and returns whatever was there. Items that
    /// cannot be equipped are handed back unchanged as `Err`.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match EquipSlot::for_item(&item) {
            Some(slot) => Ok(self.slot_mut(slot).replace(item)),
            None => Err(item),
        }
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref().and_then(Item::weapon)
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.weapon.as_mut().and_then(Item::weapon_mut)
    }

    pub fn quiver(&self) -> Option<&Container> {
        self.container.as_ref().and_then(Item::container)
    }

    pub fn quiver_mut(&mut self) -> Option<&mut Container> {
        match self.container.as_mut().map(|item| &mut item.kind) {
            Some(ItemKind::Container(container)) => Some(container),
            _ => None,
        }
    }

    /// Flat defense granted by worn armor.
    pub fn defense(&self) -> i32 {
        match self.armor.as_ref().map(|item| &item.kind) {
            Some(ItemKind::Armor(armor)) => armor.defense,
            _ => 0,
        }
    }
}
