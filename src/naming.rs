// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::sync::atomic::{AtomicU64, Ordering};

/// Source of object type names.
///
/// Every object type produced by the reflector is named by appending a suffix
/// to a caller supplied base name. Implementations must never hand out the same
/// name twice for the same base.
pub trait NameGenerator: Send + Sync {
    fn next_name(&self, base: &str) -> String;
}

// Shared by every reflection in the process. Never reset.
static GLOBAL_TYPE_NAME_ORDER: AtomicU64 = AtomicU64::new(0);

/// Appends the value of the process-wide counter to the base name.
///
/// Names are unique for the lifetime of the process, across all reflections and
/// all threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalNameGenerator;

impl NameGenerator for GlobalNameGenerator {
    fn next_name(&self, base: &str) -> String {
        let order = GLOBAL_TYPE_NAME_ORDER.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{base}{order}")
    }
}

/// A counter owned by the generator. Deterministic across runs, which makes it
/// suitable for tests and for callers that keep separate schema namespaces.
#[derive(Debug, Default)]
pub struct SequentialNameGenerator {
    order: AtomicU64,
}

impl SequentialNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first generated name will carry `start + 1`.
    pub fn starting_at(start: u64) -> Self {
        SequentialNameGenerator {
            order: AtomicU64::new(start),
        }
    }
}

impl NameGenerator for SequentialNameGenerator {
    fn next_name(&self, base: &str) -> String {
        let order = self.order.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{base}{order}")
    }
}
