// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! The marker pattern categories.
//!
//! Each category binds a literal marker, a severity level and a visibility
//! scope: all machines, a single machine, or one parity class.

use std::borrow::Cow;

use crate::config::Counts;
use crate::identity::{Machine, Parity};
use crate::writer::Level;

/// A marker pattern category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A couple of occurrences, on every machine.
    Rare,
    /// A small batch, on every machine.
    Medium,
    /// The bulk of the injected occurrences, on every machine.
    Frequent,
    /// Occurrences visible on a single machine.
    Specific,
    /// Occurrences visible on odd numbered machines only.
    Odd,
    /// Occurrences visible on even numbered machines only.
    Even,
}

impl Category {
    /// Every category, in sampling order.
    pub const ALL: [Category; 6] = [
        Category::Rare,
        Category::Medium,
        Category::Frequent,
        Category::Specific,
        Category::Odd,
        Category::Even,
    ];

    /// The literal marker of this category on the given machine.
    pub fn pattern(self, machine: &Machine) -> Cow<'static, str> {
        match self {
            Category::Rare => "RARE_PATTERN_ALL_MACHINES".into(),
            Category::Medium => "MED_PATTERN_ALL_MACHINES".into(),
            Category::Frequent => "FREQUENT_PATTERN_ALL_MACHINES".into(),
            Category::Specific => format!("PATTERN_ONLY_ON_MACHINE_{}", machine.id()).into(),
            Category::Odd => "PATTERN_ONLY_ON_ODD_MACHINE_NOS".into(),
            Category::Even => "PATTERN_ONLY_ON_EVEN_MACHINE_NOS".into(),
        }
    }

    /// The severity of the lines carrying this category.
    pub fn level(self) -> Level {
        match self {
            Category::Rare => Level::Critical,
            Category::Medium => Level::Warning,
            Category::Frequent => Level::Info,
            Category::Specific | Category::Odd | Category::Even => Level::Error,
        }
    }

    /// How many occurrences the given machine must end up with.
    pub fn expected_count(self, machine: &Machine, counts: &Counts) -> usize {
        match self {
            Category::Rare => counts.rare,
            Category::Medium => counts.med,
            Category::Frequent => counts.frequent,
            Category::Specific => counts.specific,
            Category::Odd if machine.parity() == Parity::Odd => counts.odd,
            Category::Even if machine.parity() == Parity::Even => counts.even,
            Category::Odd | Category::Even => 0,
        }
    }
}
