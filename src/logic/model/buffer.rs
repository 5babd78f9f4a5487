//! History Buffer - Bounded FIFO of recent training samples
//!
//! Holds the signal vectors fed to the network together with the health
//! label they were trained on. Feeds the statistical anomaly detector.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::logic::signals::{Signal, SignalVector};

/// Default number of retained entries
pub const HISTORY_CAPACITY: usize = 100;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub temperature: f32,
    pub vibration: f32,
    pub current: f32,
    pub health: f32,
}

impl HistoryEntry {
    pub fn new(values: &SignalVector, health: f32) -> Self {
        Self {
            temperature: values[Signal::Temperature.index()],
            vibration: values[Signal::Vibration.index()],
            current: values[Signal::Current.index()],
            health,
        }
    }

    pub fn get(&self, signal: Signal) -> f32 {
        match signal {
            Signal::Temperature => self.temperature,
            Signal::Vibration => self.vibration,
            Signal::Current => self.current,
        }
    }
}

/// Buffer status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferStatus {
    pub current_size: usize,
    pub capacity: usize,
    pub fill_percent: f32,
}

// ============================================================================
// BUFFER
// ============================================================================

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, dropping the oldest entry when full
    pub fn push(&mut self, entry: HistoryEntry) {
        while self.entries.len() >= self.capacity {
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

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// One signal's column, oldest first
    pub fn values(&self, signal: Signal) -> impl Iterator<Item = f32> + Clone + '_ {
        self.entries.iter().map(move |e| e.get(signal))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn status(&self) -> BufferStatus {
        BufferStatus {
            current_size: self.entries.len(),
            capacity: self.capacity,
            fill_percent: (self.entries.len() as f32 / self.capacity as f32 * 100.0).min(100.0),
        }
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
