//! Bounded, human-readable move log.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{ActionKind, Pos};
use crate::unit::Unit;

/// One recorded action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: ActionKind,
    pub text: String,
}

/// Keeps the most recent `limit` entries, dropping the oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl MoveHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entry texts, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }
}

pub fn describe_move(unit: &Unit, from: Pos, to: Pos) -> String {
    format!("{} moved ({}-{})", unit.label(), from.to_coord(), to.to_coord())
}

pub fn describe_attack(unit: &Unit, target: &Unit, from: Pos, to: Pos) -> String {
    format!(
        "{} attacked {} ({}x{})",
        unit.label(),
        target.label(),
        from.to_coord(),
        to.to_coord()
    )
}

pub fn describe_castle_attack(unit: &Unit, from: Pos, to: Pos) -> String {
    format!(
        "{} attacked enemy castle ({}x{})",
        unit.label(),
        from.to_coord(),
        to.to_coord()
    )
}
