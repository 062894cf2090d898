use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Company-level stats tracked across the run.
/// `cash` is thousands of dollars and may go negative (debt);
/// the other four live on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub cash: i32,
    pub team: i32,
    pub product: i32,
    pub traction: i32,
    pub stress: i32,
}

impl Default for GameStats {
    fn default() -> Self {
        // Seed round: $100k, a tiny team, a prototype, no users.
        Self {
            cash: 100,
            team: 10,
            product: 10,
            traction: 0,
            stress: 0,
        }
    }
}

impl GameStats {
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Cash => self.cash,
            StatKey::Team => self.team,
            StatKey::Product => self.product,
            StatKey::Traction => self.traction,
            StatKey::Stress => self.stress,
        }
    }

    fn set(&mut self, key: StatKey, value: i32) {
        match key {
            StatKey::Cash => self.cash = value,
            StatKey::Team => self.team = value,
            StatKey::Product => self.product = value,
            StatKey::Traction => self.traction = value,
            StatKey::Stress => self.stress = value,
        }
    }

    /// Add a sparse delta, then re-establish the bounds: team, product,
    /// traction and stress are clamped to 0..=100, cash is left free
    /// (negative cash is debt, not an error).
    pub fn apply(&mut self, delta: &StatDelta) {
        for (key, amount) in delta.iter() {
            self.set(key, self.get(key).saturating_add(amount));
        }
        self.clamp_bounded();
    }

    /// Score shown at the end of a run. A company with no cash in the
    /// bank is worth nothing, whatever the traction says.
    pub fn valuation(&self) -> i64 {
        if self.cash > 0 {
            self.traction as i64 * self.product as i64 * 100
        } else {
            0
        }
    }

    fn clamp_bounded(&mut self) {
        for key in [
            StatKey::Team,
            StatKey::Product,
            StatKey::Traction,
            StatKey::Stress,
        ] {
            self.set(key, self.get(key).clamp(0, 100));
        }
    }
}

/// The closed set of stat names. The narrator reply is only allowed to
/// touch these; anything else is dropped at the decode boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Cash,
    Team,
    Product,
    Traction,
    Stress,
}

impl StatKey {
    pub const ALL: [StatKey; 5] = [
        StatKey::Cash,
        StatKey::Team,
        StatKey::Product,
        StatKey::Traction,
        StatKey::Stress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Cash => "cash",
            StatKey::Team => "team",
            StatKey::Product => "product",
            StatKey::Traction => "traction",
            StatKey::Stress => "stress",
        }
    }

    pub fn parse(name: &str) -> Option<StatKey> {
        StatKey::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// Sparse stat change, keyed by the closed stat set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta(BTreeMap<StatKey, i32>);

impl StatDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(entries: &[(StatKey, i32)]) -> Self {
        Self(entries.iter().copied().collect())
    }

    pub fn set(&mut self, key: StatKey, amount: i32) {
        self.0.insert(key, amount);
    }

    pub fn get(&self, key: StatKey) -> Option<i32> {
        self.0.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, i32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// Founder aptitudes, allocated by the player from a 10 point budget
/// before the run starts. Each value stays within 0..=10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FounderStats {
    pub tech: i32,
    pub vision: i32,
    pub charisma: i32,
}

impl FounderStats {
    pub fn get(&self, key: FounderStatKey) -> i32 {
        match key {
            FounderStatKey::Tech => self.tech,
            FounderStatKey::Vision => self.vision,
            FounderStatKey::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, key: FounderStatKey, value: i32) {
        match key {
            FounderStatKey::Tech => self.tech = value,
            FounderStatKey::Vision => self.vision = value,
            FounderStatKey::Charisma => self.charisma = value,
        }
    }

    pub fn total(&self) -> i32 {
        self.tech + self.vision + self.charisma
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FounderStatKey {
    Tech,
    Vision,
    Charisma,
}

impl FounderStatKey {
    pub const ALL: [FounderStatKey; 3] = [
        FounderStatKey::Tech,
        FounderStatKey::Vision,
        FounderStatKey::Charisma,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FounderStatKey::Tech => "Tech",
            FounderStatKey::Vision => "Vision",
            FounderStatKey::Charisma => "Charisma",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_application_clamps_bounded_stats() {
        let mut stats = GameStats::default();
        stats.apply(&StatDelta::of(&[
            (StatKey::Team, 250),
            (StatKey::Stress, -40),
            (StatKey::Traction, 30),
        ]));

        assert_eq!(stats.team, 100);
        assert_eq!(stats.stress, 0);
        assert_eq!(stats.traction, 30);
        assert_eq!(stats.product, 10);
    }

    #[test]
    fn cash_may_go_negative() {
        let mut stats = GameStats { cash: 180, ..GameStats::default() };
        stats.apply(&StatDelta::of(&[(StatKey::Cash, -200)]));
        assert_eq!(stats.cash, -20);
    }

    #[test]
    fn stat_key_round_trips_through_names() {
        for key in StatKey::ALL {
            assert_eq!(StatKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(StatKey::parse("valuation"), None);
    }
}
