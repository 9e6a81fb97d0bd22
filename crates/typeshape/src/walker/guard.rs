// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-pass tracking of record types already reached.

use std::collections::HashMap;

/// Where a record type stands in the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Referenced and queued, not yet walked.
    Scheduled,
    /// Fields are being classified.
    InProgress,
    /// Schema inserted into the set.
    Complete,
}

/// Remembers every record type a pass has reached so each is walked once.
///
/// A name enters the guard when it is first scheduled and never leaves, so
/// self- and mutually-referential records terminate.
#[derive(Debug, Default)]
pub struct CycleGuard {
    states: HashMap<String, VisitState>,
}

impl CycleGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for a walk. Returns `false` if it is already known.
    pub fn try_schedule(&mut self, name: &str) -> bool {
        if self.states.contains_key(name) {
            return false;
        }
        self.states.insert(name.to_string(), VisitState::Scheduled);
        true
    }

    /// Mark `name` as being walked.
    pub fn begin(&mut self, name: &str) {
        self.states.insert(name.to_string(), VisitState::InProgress);
    }

    /// Mark `name` as finished.
    pub fn complete(&mut self, name: &str) {
        self.states.insert(name.to_string(), VisitState::Complete);
    }

    pub fn state(&self, name: &str) -> Option<VisitState> {
        self.states.get(name).copied()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Names currently being walked.
    pub fn in_progress(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|(_, state)| **state == VisitState::InProgress)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of distinct names seen in this pass.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
