//! Equipped item references

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::JEWELRY_SLOTS;
use crate::ecs::EntityId;

/// An equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    /// Jewelry slot index, `0..JEWELRY_SLOTS`
    Jewelry(usize),
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => f.write_str("weapon"),
            Self::Armor => f.write_str("armor"),
            Self::Jewelry(i) => write!(f, "jewelry {i}"),
        }
    }
}

/// Items currently equipped, stored as entity references
///
/// Referenced items may be destroyed independently; callers re-resolve them
/// through the world and treat a miss as an empty slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentComponent {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
    pub jewelry: [Option<EntityId>; JEWELRY_SLOTS],
}

impl EquipmentComponent {
    pub fn get(&self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
            EquipSlot::Jewelry(i) => self.jewelry.get(i).copied().flatten(),
        }
    }

    /// Put `item` into `slot`, returning what was there
    ///
    /// Out-of-range jewelry slots are ignored and hand `item` back.
    pub fn equip(&mut self, slot: EquipSlot, item: EntityId) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon.replace(item),
            EquipSlot::Armor => self.armor.replace(item),
            EquipSlot::Jewelry(i) => match self.jewelry.get_mut(i) {
                Some(entry) => entry.replace(item),
                None => Some(item),
            },
        }
    }

    /// Empty `slot`, returning its item
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<EntityId> {
        match slot {
            EquipSlot::Weapon => self.weapon.take(),
            EquipSlot::Armor => self.armor.take(),
            EquipSlot::Jewelry(i) => self.jewelry.get_mut(i).and_then(Option::take),
        }
    }

    /// First empty jewelry slot
    pub fn free_jewelry_slot(&self) -> Option<EquipSlot> {
        self.jewelry
            .iter()
            .position(Option::is_none)
            .map(EquipSlot::Jewelry)
    }

    /// Slot currently holding `item`
    pub fn slot_of(&self, item: EntityId) -> Option<EquipSlot> {
        self.all_slots()
            .into_iter()
            .find(|slot| self.get(*slot) == Some(item))
    }

    /// Every slot, weapon first
    pub fn all_slots(&self) -> Vec<EquipSlot> {
        let mut slots = vec![EquipSlot::Weapon, EquipSlot::Armor];
        slots.extend((0..JEWELRY_SLOTS).map(EquipSlot::Jewelry));
        slots
    }

    /// Ids of all equipped items, weapon first
    pub fn all_equipped(&self) -> Vec<EntityId> {
        self.all_slots()
            .into_iter()
            .filter_map(|slot| self.get(slot))
            .collect()
    }
}
