//! Immutable attack definitions

use serde::{Deserialize, Serialize};

/// Which resource an attack consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostKind {
    Health,
    Mana,
}

/// Resource cost of using an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub kind: CostKind,
    pub amount: i32,
}

impl Cost {
    pub fn mana(amount: i32) -> Self {
        Self {
            kind: CostKind::Mana,
            amount,
        }
    }

    pub fn health(amount: i32) -> Self {
        Self {
            kind: CostKind::Health,
            amount,
        }
    }

    pub fn free() -> Self {
        Self {
            kind: CostKind::Mana,
            amount: 0,
        }
    }
}

/// How many targets an attack touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetScope {
    /// The chosen target only
    Single,
    /// The chosen target plus its roster neighbours at index ±1
    Adjacent,
    /// Every live member of the opposing side
    All,
}

/// Status effect attached to an attack, applied to struck targets on a
/// successful chance roll. Ticking semantics live in the status
/// subsystem; the engine only carries the data through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    /// Duration in turns
    pub duration: u32,
    /// Application probability in `[0, 1]`
    pub chance: f32,
}

/// An immutable action definition. The damage formula is a string
/// expression over the acting combatant's stat names, evaluated at use
/// time so it sees runtime-current stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub formula: String,
    pub cost: Cost,
    pub scope: TargetScope,
    pub effect: Option<StatusEffect>,
}

impl Attack {
    /// Basic cost-free single-target attack
    pub fn strike(name: impl Into<String>, formula: impl Into<String>, scope: TargetScope) -> Self {
        Self {
            name: name.into(),
            formula: formula.into(),
            cost: Cost::free(),
            scope,
            effect: None,
        }
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// The empty-slot sentinel. Never selectable and never executed.
    pub fn none() -> Self {
        Self {
            name: String::new(),
            formula: "0".to_string(),
            cost: Cost::free(),
            scope: TargetScope::Single,
            effect: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }
}
