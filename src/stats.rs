//! Species and type distribution over the loaded characters.

use serde::{Deserialize, Serialize};

use crate::state::Character;

pub const TOP_ENTRIES: usize = 10;

/// Label counts in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn add(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest counts first; equal counts keep first-seen order.
    pub fn top(&self, total: usize, limit: usize) -> Vec<StatBar> {
        let mut sorted: Vec<&(String, usize)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
            .into_iter()
            .take(limit)
            .map(|(label, count)| StatBar {
                label: label.clone(),
                count: *count,
                percent: percent(*count, total),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatBar {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

impl StatBar {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub species: FrequencyTable,
    pub types: FrequencyTable,
    pub total: usize,
}

impl StatsSnapshot {
    /// Full recount; characters without a type are left out of the type table.
    pub fn compute(characters: &[Character]) -> Self {
        let mut snapshot = StatsSnapshot {
            total: characters.len(),
            ..Default::default()
        };
        for character in characters {
            snapshot.species.add(&character.species);
            if let Some(kind) = character.kind() {
                snapshot.types.add(kind);
            }
        }
        snapshot
    }

    pub fn top_species(&self) -> Vec<StatBar> {
        self.species.top(self.total, TOP_ENTRIES)
    }

    pub fn top_types(&self) -> Vec<StatBar> {
        self.types.top(self.total, TOP_ENTRIES)
    }
}

/// `count / total` as a percentage rounded to one decimal.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}
