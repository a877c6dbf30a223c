//! Carried items.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::{Item, ItemKind};

/// Bounded list of carried items. Ammunition stacks of the same kind merge.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<Item, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Whether `item` fits, either into a free slot or onto an existing stack.
    pub fn can_accept(&self, item: &Item) -> bool {
        !self.is_full() || self.stack_index(item).is_some()
    }

    fn stack_index(&self, item: &Item) -> Option<usize> {
        let ItemKind::Ammo(incoming) = &item.kind else {
            return None;
        };
        self.items.iter().position(|held| match &held.kind {
            ItemKind::Ammo(ammo) => ammo.stacks_with(incoming),
            _ => false,
        })
    }

    /// Adds an item, merging ammunition stacks. Returns the item if there is
    /// no room for it.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if let Some(index) = self.stack_index(&item) {
            if let (ItemKind::Ammo(held), ItemKind::Ammo(incoming)) =
                (&mut self.items[index].kind, &item.kind)
            {
                held.quantity += incoming.quantity;
                return Ok(());
            }
        }
        self.items.try_push(item).map_err(|err| err.element())
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// First index whose item satisfies `predicate`.
    pub fn position(&self, predicate: impl Fn(&Item) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }
}
