use crate::domain::model::Participant;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// 目前名單：所有功能共用的參加者集合
#[derive(Debug, Default, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

/// Split a pasted block or raw file content into individual names.
/// Newlines, commas and semicolons are interchangeable separators;
/// entries are trimmed and empties dropped.
pub fn split_names(text: &str) -> Vec<String> {
    let separators = Regex::new(r"[\r\n,;]+").unwrap();
    separators
        .split(text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut roster = Self::new();
        roster.ingest(text);
        roster
    }

    /// 批次加入名單，回傳本次新增的人數
    pub fn ingest(&mut self, text: &str) -> usize {
        let names = split_names(text);
        let added = names.len();
        self.participants
            .extend(names.into_iter().map(Participant::new));

        tracing::debug!("Ingested {} participants (total {})", added, self.len());
        added
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Remove a single entry by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Occurrence count per display name.
    pub fn name_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for participant in &self.participants {
            *counts.entry(participant.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Names appearing more than once, with their counts.
    pub fn duplicate_names(&self) -> Vec<(String, usize)> {
        let mut duplicates: Vec<(String, usize)> = self
            .name_counts()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        duplicates.sort();
        duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        self.name_counts().values().any(|count| *count > 1)
    }

    /// Keep only the first entry (current order) for each distinct name.
    /// Not reversible. Returns the number of entries dropped.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.participants.len();
        let mut seen = HashSet::new();
        self.participants.retain(|p| seen.insert(p.name.clone()));
        before - self.participants.len()
    }

    /// 範例名單：14 筆、含兩組重複姓名，方便快速試用
    pub fn demo() -> Self {
        Self::from_text(concat!(
            "陳小明\n林怡君\n張偉傑\n王雅婷\n李志豪\n",
            "陳小明\n",
            "黃雅慧\n林俊宏\n陳建志\n張心怡\n",
            "林怡君\n",
            "吳宗憲\n楊佳穎\n劉家豪",
        ))
    }
}
