//! Building a player and monsters for one simulated fight

use anyhow::{Context, Result};

use rd_core::components::{
    CombatState, Element, EquipmentComponent, InventoryComponent, ItemComponent, ItemType,
    MonsterComponent, PlayerComponent, Rarity, Stats, Theme,
};
use rd_core::data::CharacterId;
use rd_core::equip::{equip_item, recalculate_stats};
use rd_core::{EntityId, World};

const MONSTER_NAMES: [&str; 5] = ["Goblin", "Skeleton", "Orc", "Wraith", "Troll"];

#[derive(Debug, Clone)]
pub struct Scenario {
    pub character: CharacterId,
    pub monsters: usize,
    pub monster_hp: u32,
    pub monster_damage: f64,
    pub monster_speed: f64,
    pub theme: Option<Theme>,
    pub element: Option<Element>,
    pub rarity: Rarity,
}

impl Scenario {
    /// Spawn the player (with optional themed weapon) and the monsters
    pub fn build(&self, world: &mut World) -> Result<(EntityId, Vec<EntityId>)> {
        let player = world.create_entity();
        world.add_component(player, Stats::default());
        world.add_component(player, CombatState::default());
        world.add_component(player, EquipmentComponent::default());
        world.add_component(player, InventoryComponent::default());
        world.add_component(
            player,
            PlayerComponent {
                character: self.character,
                ..Default::default()
            },
        );
        recalculate_stats(world, player);

        if let Some(theme) = self.theme {
            let weapon = world.create_entity();
            world.add_component(
                weapon,
                ItemComponent {
                    name: format!("{theme} Blade"),
                    item_type: ItemType::Weapon,
                    rarity: self.rarity,
                    damage_bonus: 4.0 * self.rarity.multiplier(),
                    theme,
                    element: self.element,
                    ..Default::default()
                },
            );
            if let Some(inventory) = world.get_component_mut::<InventoryComponent>(player) {
                inventory.add_item(weapon);
            }
            equip_item(world, player, weapon).context("equipping starting weapon")?;
        }

        let monsters = (0..self.monsters)
            .map(|i| {
                let id = world.create_entity();
                world.add_component(
                    id,
                    Stats {
                        max_hp: self.monster_hp,
                        current_hp: self.monster_hp,
                        base_damage: self.monster_damage,
                        attack_speed: self.monster_speed,
                        ..Stats::default()
                    },
                );
                world.add_component(
                    id,
                    MonsterComponent {
                        name: MONSTER_NAMES[i % MONSTER_NAMES.len()].to_string(),
                        sprite_name: MONSTER_NAMES[i % MONSTER_NAMES.len()].to_lowercase(),
                        ..Default::default()
                    },
                );
                id
            })
            .collect();

        Ok((player, monsters))
    }
}
