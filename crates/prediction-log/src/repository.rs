//! Repository Implementation

use crate::LogError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::info;

/// One served prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub timestamp_ms: i64,
    pub operator: String,
    pub flight_type: String,
    pub month: u32,
    /// 0 = on-time, 1 = delayed
    pub label: u8,
}

/// Bounded in-memory log of served predictions.
pub struct Repository {
    records: Mutex<VecDeque<PredictionRecord>>,
    max_records: usize,
    next_id: Mutex<i64>,
}

impl Repository {
    /// Default retention.
    const DEFAULT_CAPACITY: usize = 10_000;

    /// Create a repository with default retention.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a repository retaining at most `max_records` entries.
    pub fn with_capacity(max_records: usize) -> Self {
        info!(max_records, "creating in-memory prediction log");
        Self {
            records: Mutex::new(VecDeque::with_capacity(max_records.min(1024))),
            max_records,
            next_id: Mutex::new(1),
        }
    }

    /// Append a prediction, evicting the oldest entry past capacity.
    pub fn insert(&self, mut record: PredictionRecord) -> Result<i64, LogError> {
        let mut next_id = self
            .next_id
            .lock()
            .map_err(|e| LogError::Poisoned(e.to_string()))?;
        record.id = *next_id;
        *next_id += 1;

        let mut records = self
            .records
            .lock()
            .map_err(|e| LogError::Poisoned(e.to_string()))?;
        // pop_front() is checked so a zero-capacity log degrades to
        // keeping only the newest entry instead of looping forever.
        while records.len() >= self.max_records && records.pop_front().is_some() {}
        let id = record.id;
        records.push_back(record);
        Ok(id)
    }

    /// Most recent entries, newest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, LogError> {
        let records = self
            .records
            .lock()
            .map_err(|e| LogError::Poisoned(e.to_string()))?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    /// Number of retained entries.
    pub fn count(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, label: u8) -> PredictionRecord {
        PredictionRecord {
            id: 0,
            timestamp_ms: 0,
            operator: "Grupo LATAM".to_string(),
            flight_type: "N".to_string(),
            month,
            label,
        }
    }

    #[test]
    fn test_insert_assigns_ids() {
        let repo = Repository::new();
        assert_eq!(repo.insert(record(1, 0)).unwrap(), 1);
        assert_eq!(repo.insert(record(2, 1)).unwrap(), 2);
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let repo = Repository::new();
        for month in 1..=3 {
            repo.insert(record(month, 0)).unwrap();
        }
        let recent = repo.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].month, 3);
        assert_eq!(recent[1].month, 2);
    }

    #[test]
    fn test_capacity_one_keeps_newest() {
        let repo = Repository::with_capacity(1);
        for month in 1..=3 {
            repo.insert(record(month, 0)).unwrap();
        }
        assert_eq!(repo.count(), 1);
        assert_eq!(repo.recent(10).unwrap()[0].month, 3);
    }

    #[test]
    fn test_zero_capacity_insert_returns() {
        let repo = Repository::with_capacity(0);
        assert_eq!(repo.insert(record(1, 0)).unwrap(), 1);
        assert_eq!(repo.insert(record(2, 1)).unwrap(), 2);
        // Never retains more than the newest entry.
        assert!(repo.count() <= 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let repo = Repository::with_capacity(2);
        for month in 1..=4 {
            repo.insert(record(month, 0)).unwrap();
        }
        assert_eq!(repo.count(), 2);
        let recent = repo.recent(10).unwrap();
        assert_eq!(recent[0].month, 4);
        assert_eq!(recent[1].month, 3);
    }
}
