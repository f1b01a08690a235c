// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! Random logfile line generator
//!
//! The main function is [gen_line]:
//!
//! ```rust
//! # use logfleet_generate::{gen_lines, LINE_WIDTH};
//! assert_eq!(gen_lines(LINE_WIDTH).next().map(|l| l.len()), Some(LINE_WIDTH))
//! ```

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Default width of a generated line.
pub const LINE_WIDTH: usize = 80;

const SEED: u64 = 42;

fn fixed_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

/// Generate a single line of `width` alphanumeric chars.
pub fn gen_line(rng: &mut impl Rng, width: usize) -> String {
    rng.sample_iter(&rand::distr::Alphanumeric)
        .take(width)
        .map(char::from)
        .collect()
}

struct RandomLine {
    rng: ChaCha8Rng,
    width: usize,
}

impl Iterator for RandomLine {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        Some(gen_line(&mut self.rng, self.width))
    }
}

/// An infinite stream of lines from a fixed seed, for tests and benchmarks.
pub fn gen_lines(width: usize) -> impl Iterator<Item = String> {
    RandomLine {
        rng: fixed_rng(),
        width,
    }
}
