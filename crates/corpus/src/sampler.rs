// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module partitions line numbers into disjoint category buckets.

use rand::prelude::*;
use std::collections::HashSet;

use crate::category::Category;
use crate::config::Counts;
use crate::identity::Parity;
use crate::{Error, Result};

/// The line numbers assigned to each category.
///
/// The populated buckets are pairwise disjoint: they are sliced from a single
/// shuffled permutation of `0..n_lines`. Only the bucket matching the machine
/// parity is populated, the other one stays empty.
#[derive(Debug, Default)]
pub struct Assignment {
    /// Lines carrying the rare marker.
    pub rare: HashSet<usize>,
    /// Lines carrying the medium marker.
    pub medium: HashSet<usize>,
    /// Lines carrying the frequent marker.
    pub frequent: HashSet<usize>,
    /// Lines carrying the machine specific marker.
    pub specific: HashSet<usize>,
    /// Lines carrying the odd machines marker.
    pub odd: HashSet<usize>,
    /// Lines carrying the even machines marker.
    pub even: HashSet<usize>,
}

impl Assignment {
    /// The bucket of a category.
    pub fn get(&self, category: Category) -> &HashSet<usize> {
        match category {
            Category::Rare => &self.rare,
            Category::Medium => &self.medium,
            Category::Frequent => &self.frequent,
            Category::Specific => &self.specific,
            Category::Odd => &self.odd,
            Category::Even => &self.even,
        }
    }

    /// Total number of assigned lines.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// True when no line is assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `0..n_lines` into disjoint category buckets.
///
/// The permutation is consumed as a sequential cursor, so no line number can
/// land in two buckets. The capacity is checked upfront: over-allocated
/// counts fail instead of silently under-filling the last buckets.
pub fn sample(
    n_lines: usize,
    counts: &Counts,
    parity: Parity,
    rng: &mut impl Rng,
) -> Result<Assignment> {
    let requested = counts.requested(parity);
    if requested > n_lines {
        return Err(Error::CapacityExceeded {
            requested,
            available: n_lines,
        });
    }

    let mut numbers: Vec<usize> = (0..n_lines).collect();
    numbers.shuffle(rng);
    let mut cursor = numbers.into_iter();
    let mut slice = |count: usize| cursor.by_ref().take(count).collect::<HashSet<usize>>();

    let mut assignment = Assignment {
        rare: slice(counts.rare),
        medium: slice(counts.med),
        frequent: slice(counts.frequent),
        specific: slice(counts.specific),
        ..Assignment::default()
    };
    match parity {
        Parity::Odd => assignment.odd = slice(counts.odd),
        Parity::Even => assignment.even = slice(counts.even),
    }
    Ok(assignment)
}
