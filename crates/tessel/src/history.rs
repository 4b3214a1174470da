// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::config::HistoryConfig;
use crate::logging::log_history_event;
use crate::visual::Visual;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Deep copy of the placed visuals at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub visuals: Vec<Visual>,
    pub timestamp: DateTime<Utc>,
}
impl Snapshot {
    pub fn capture(visuals: &[Visual]) -> Self {
        Self {
            visuals: visuals.to_vec(),
            timestamp: Utc::now(),
        }
    }
}

/// Holds back the latest state until `delay` passes without a newer one, so a
/// burst of edits lands in history as a single snapshot.
#[derive(Debug, Clone)]
pub struct CoalescingTimer {
    delay: Duration,
    pending: Option<(Vec<Visual>, Instant)>,
}
impl CoalescingTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }
    /// Replaces any pending state and restarts the delay from `now`.
    pub fn schedule(&mut self, state: Vec<Visual>, now: Instant) {
        self.pending = Some((state, now + self.delay));
    }
    /// The pending state once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<Visual>> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.flush(),
            _ => None,
        }
    }
    pub fn flush(&mut self) -> Option<Vec<Visual>> {
        self.pending.take().map(|(state, _)| state)
    }
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Bounded undo/redo stacks. The top of `past` is always the current state.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: VecDeque<Snapshot>,
    capacity: usize,
    timer: CoalescingTimer,
}
impl Default for History {
    fn default() -> Self {
        Self::with_config(&HistoryConfig::default())
    }
}
impl History {
    pub fn new(capacity: usize, delay: Duration) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            capacity: capacity.max(1),
            timer: CoalescingTimer::new(delay),
        }
    }
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity, Duration::from_millis(config.debounce_ms))
    }

    /// Records `visuals` as the new current state and drops the redo branch.
    pub fn push_state(&mut self, visuals: &[Visual]) {
        self.push_past(Snapshot::capture(visuals));
        self.future.clear();
        log_history_event("push", self.past.len(), self.future.len());
    }
    /// Debounced [`History::push_state`].
    pub fn schedule_push(&mut self, visuals: &[Visual], now: Instant) {
        self.timer.schedule(visuals.to_vec(), now);
    }
    /// Commits a pending push whose delay has elapsed. Returns whether one was.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer.poll(now) {
            Some(state) => {
                self.push_state(&state);
                true
            }
            None => false,
        }
    }
    /// Commits a pending push immediately.
    pub fn flush(&mut self) -> bool {
        match self.timer.flush() {
            Some(state) => {
                self.push_state(&state);
                true
            }
            None => false,
        }
    }

    /// Steps back one snapshot, or `None` when only the current state remains.
    pub fn undo(&mut self) -> Option<Vec<Visual>> {
        self.flush();
        if self.past.len() <= 1 {
            return None;
        }
        let current = self.past.pop_back()?;
        self.future.push_front(current);
        log_history_event("undo", self.past.len(), self.future.len());
        self.past.back().map(|snapshot| snapshot.visuals.clone())
    }
    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> Option<Vec<Visual>> {
        self.flush();
        let next = self.future.pop_front()?;
        let visuals = next.visuals.clone();
        self.push_past(next);
        log_history_event("redo", self.past.len(), self.future.len());
        Some(visuals)
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1 || (self.timer.is_pending() && !self.past.is_empty())
    }
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty() && !self.timer.is_pending()
    }
    pub fn current(&self) -> Option<&Snapshot> {
        self.past.back()
    }
    pub fn past_len(&self) -> usize {
        self.past.len()
    }
    pub fn future_len(&self) -> usize {
        self.future.len()
    }
    pub fn has_pending(&self) -> bool {
        self.timer.is_pending()
    }
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.timer.flush();
        log_history_event("clear", 0, 0);
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}
