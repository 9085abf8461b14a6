//! Combatant stat block and formula bindings

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::combatant::attack::CostKind;

/// The four primary attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub luck: i32,
}

impl Attributes {
    pub fn new(strength: i32, dexterity: i32, intelligence: i32, luck: i32) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            luck,
        }
    }
}

/// Mutable combat stats. Health and mana never go below zero; a
/// combatant with zero current health is dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub level: i32,
    pub max_health: i32,
    pub health: i32,
    pub max_mana: i32,
    pub mana: i32,
    pub attributes: Attributes,
}

impl StatBlock {
    /// New stat block at full health and mana
    pub fn new(level: i32, max_health: i32, max_mana: i32, attributes: Attributes) -> Self {
        Self {
            level,
            max_health,
            health: max_health,
            max_mana,
            mana: max_mana,
            attributes,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Subtract damage, saturating at zero
    pub fn apply_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    /// Spend a resource, clamping at zero. Overspending is tolerated
    /// (the UI layer gates affordability before a decision is submitted).
    pub fn spend(&mut self, kind: CostKind, amount: i32) {
        let amount = amount.max(0);
        match kind {
            CostKind::Health => self.health = (self.health - amount).max(0),
            CostKind::Mana => self.mana = (self.mana - amount).max(0),
        }
    }

    /// Read-only snapshot of current stats as formula bindings.
    ///
    /// Carries the canonical identifier set (`level`, `health`,
    /// `currentHealth`, `mana`, `currentMana`, `strength`, `dexterity`,
    /// `intelligence`, `luck`) plus the short aliases attack data
    /// commonly uses (`LVL`, `HP`, `MP`, `STR`, `DEX`, `INT`, `LCK`).
    pub fn bindings(&self) -> HashMap<String, f64> {
        let a = self.attributes;
        [
            ("level", self.level),
            ("health", self.max_health),
            ("currentHealth", self.health),
            ("mana", self.max_mana),
            ("currentMana", self.mana),
            ("strength", a.strength),
            ("dexterity", a.dexterity),
            ("intelligence", a.intelligence),
            ("luck", a.luck),
            ("LVL", self.level),
            ("HP", self.health),
            ("MP", self.mana),
            ("STR", a.strength),
            ("DEX", a.dexterity),
            ("INT", a.intelligence),
            ("LCK", a.luck),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v as f64))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatBlock {
        StatBlock::new(5, 30, 10, Attributes::new(7, 12, 3, 2))
    }

    #[test]
    fn test_damage_saturates_at_zero() {
        let mut s = block();
        s.apply_damage(25);
        assert_eq!(s.health, 5);
        s.apply_damage(999);
        assert_eq!(s.health, 0);
        assert!(s.is_dead());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut s = block();
        s.apply_damage(-10);
        assert_eq!(s.health, 30);
    }

    #[test]
    fn test_overspending_mana_clamps_to_zero() {
        let mut s = block();
        s.spend(CostKind::Mana, 999);
        assert_eq!(s.mana, 0);
    }

    #[test]
    fn test_health_cost_can_kill() {
        let mut s = block();
        s.spend(CostKind::Health, 30);
        assert!(s.is_dead());
    }

    #[test]
    fn test_bindings_expose_current_and_max_values() {
        let mut s = block();
        s.apply_damage(10);
        let b = s.bindings();
        assert_eq!(b["health"], 30.0);
        assert_eq!(b["currentHealth"], 20.0);
        assert_eq!(b["STR"], 7.0);
        assert_eq!(b["strength"], 7.0);
    }
}
