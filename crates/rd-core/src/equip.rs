//! Equipping items and deriving stats from equipment
//!
//! Stats are never patched incrementally: every change to what an entity
//! wears is followed by [`recalculate_stats`], which rebuilds them from the
//! character base and the equipped items.

use tracing::debug;

use crate::components::{
    EquipSlot, EquipmentComponent, InventoryComponent, ItemComponent, ItemType, PlayerComponent,
    Stats,
};
use crate::data::{CharacterId, CharacterTemplate};
use crate::ecs::{ComponentKind, EntityId, World};
use crate::error::EquipError;
use crate::{
    BASE_ATTACK_SPEED, BASE_CRIT_CHANCE, BASE_CRIT_MULTIPLIER, BASE_DAMAGE, BASE_DEFENSE,
    BASE_MAX_HP, MAX_DODGE, MAX_RESISTANCE, MIN_ATTACK_SPEED,
};

/// Running totals while folding item bonuses over the character base
#[derive(Debug, Clone, PartialEq)]
struct StatTotals {
    max_hp: u32,
    base_damage: f64,
    attack_speed: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    true_damage: f64,
    life_steal: f64,
    cleave: f64,
    defense: u32,
    resistance: f64,
    dodge_chance: f64,
}

impl StatTotals {
    fn base(template: &CharacterTemplate) -> Self {
        Self {
            max_hp: (BASE_MAX_HP * template.hp_mult) as u32,
            base_damage: BASE_DAMAGE * template.damage_mult,
            attack_speed: BASE_ATTACK_SPEED * template.attack_speed_mult,
            crit_chance: BASE_CRIT_CHANCE * template.crit_chance_mult,
            crit_multiplier: BASE_CRIT_MULTIPLIER * template.crit_damage_mult,
            true_damage: 0.0,
            life_steal: template.life_steal_base,
            cleave: 0.0,
            defense: (BASE_DEFENSE * template.defense_mult) as u32,
            resistance: 0.0,
            dodge_chance: 0.0,
        }
    }

    fn add(&mut self, item: &ItemComponent) {
        self.max_hp = self.max_hp.saturating_add(item.hp_bonus);
        self.base_damage += item.damage_bonus;
        self.attack_speed += item.attack_speed_bonus;
        self.crit_chance += item.crit_chance_bonus;
        self.crit_multiplier += item.crit_multiplier_bonus;
        self.true_damage += item.true_damage_bonus;
        self.life_steal += item.life_steal_bonus;
        self.cleave += item.cleave_bonus;
        self.defense = self.defense.saturating_add(item.defense_bonus);
        self.resistance += item.resistance_bonus;
        self.dodge_chance += item.dodge_bonus;
    }

    /// Write clamped totals into `stats`, keeping the HP fraction
    fn apply(&self, stats: &mut Stats) {
        let old_fraction = stats.hp_fraction();

        stats.max_hp = self.max_hp.max(1);
        stats.current_hp =
            ((stats.max_hp as f64 * old_fraction).round() as u32).clamp(1, stats.max_hp);
        stats.base_damage = self.base_damage.max(1.0);
        stats.attack_speed = self.attack_speed.max(MIN_ATTACK_SPEED);
        stats.crit_chance = self.crit_chance.clamp(0.0, 1.0);
        stats.crit_multiplier = self.crit_multiplier.max(1.0);
        stats.true_damage = self.true_damage.max(0.0);
        stats.life_steal = self.life_steal.clamp(0.0, 1.0);
        stats.cleave = self.cleave.clamp(0.0, 1.0);
        stats.defense = self.defense;
        stats.resistance = self.resistance.clamp(0.0, MAX_RESISTANCE);
        stats.dodge_chance = self.dodge_chance.clamp(0.0, MAX_DODGE);
    }
}

fn character_of(world: &World, entity: EntityId) -> CharacterId {
    world
        .get_component::<PlayerComponent>(entity)
        .map(|p| p.character)
        .unwrap_or_default()
}

fn missing(entity: EntityId, component: ComponentKind) -> EquipError {
    EquipError::MissingComponent { entity, component }
}

/// Rebuild `entity`'s stats from its character base and equipped items
///
/// A no-op when the entity has no [`Stats`] or no [`EquipmentComponent`].
pub fn recalculate_stats(world: &mut World, entity: EntityId) {
    let Some(equipped) = world
        .get_component::<EquipmentComponent>(entity)
        .map(EquipmentComponent::all_equipped)
    else {
        return;
    };
    if !world.has_component::<Stats>(entity) {
        return;
    }

    let template = character_of(world, entity).template();
    let mut totals = StatTotals::base(&template);
    for item in equipped
        .iter()
        .filter_map(|&id| world.get_component::<ItemComponent>(id))
    {
        totals.add(item);
    }

    if let Some(stats) = world.get_component_mut::<Stats>(entity) {
        totals.apply(stats);
        debug!(%entity, max_hp = stats.max_hp, damage = stats.base_damage, "stats recalculated");
    }
}

/// Move `item` from `entity`'s inventory into the matching slot
///
/// Returns whatever the slot held before, which goes back into the
/// inventory.
pub fn equip_item(
    world: &mut World,
    entity: EntityId,
    item: EntityId,
) -> Result<Option<EntityId>, EquipError> {
    let item_type = world
        .get_component::<ItemComponent>(item)
        .map(|i| i.item_type)
        .ok_or(EquipError::NotAnItem(item))?;

    let slot = {
        let equipment = world
            .get_component::<EquipmentComponent>(entity)
            .ok_or_else(|| missing(entity, ComponentKind::Equipment))?;
        match item_type {
            ItemType::Weapon => EquipSlot::Weapon,
            ItemType::Armor => EquipSlot::Armor,
            ItemType::Jewelry => equipment
                .free_jewelry_slot()
                .unwrap_or(EquipSlot::Jewelry(0)),
        }
    };

    if slot == EquipSlot::Armor && !character_of(world, entity).template().can_equip_armor {
        return Err(EquipError::ArmorForbidden);
    }

    let inventory = world
        .get_component_mut::<InventoryComponent>(entity)
        .ok_or_else(|| missing(entity, ComponentKind::Inventory))?;
    if !inventory.remove_item(item) {
        return Err(EquipError::NotInInventory {
            owner: entity,
            item,
        });
    }

    let displaced = world
        .get_component_mut::<EquipmentComponent>(entity)
        .and_then(|equipment| equipment.equip(slot, item));
    if let Some(old) = displaced {
        if let Some(inventory) = world.get_component_mut::<InventoryComponent>(entity) {
            inventory.add_item(old);
        }
    }

    debug!(%entity, %item, %slot, "item equipped");
    recalculate_stats(world, entity);
    Ok(displaced)
}

/// Move the item in `slot` back into `entity`'s inventory
pub fn unequip_item(
    world: &mut World,
    entity: EntityId,
    slot: EquipSlot,
) -> Result<EntityId, EquipError> {
    let inventory = world
        .get_component::<InventoryComponent>(entity)
        .ok_or_else(|| missing(entity, ComponentKind::Inventory))?;
    if inventory.is_full() {
        return Err(EquipError::InventoryFull(entity));
    }

    let item = world
        .get_component_mut::<EquipmentComponent>(entity)
        .ok_or_else(|| missing(entity, ComponentKind::Equipment))?
        .unequip(slot)
        .ok_or(EquipError::SlotEmpty(slot))?;

    if let Some(inventory) = world.get_component_mut::<InventoryComponent>(entity) {
        inventory.add_item(item);
    }

    debug!(%entity, %item, %slot, "item unequipped");
    recalculate_stats(world, entity);
    Ok(item)
}
