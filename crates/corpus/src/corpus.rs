// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! This library generates per-machine log files with a known number of marker
//! pattern occurrences. The resulting corpus is the ground truth used to
//! validate a distributed log search system: a query for a marker scoped to a
//! machine must return exactly the configured count.
//!
//! The main function is [generate]:
//!
//! ```rust
//! use logfleet_corpus::{generate, Config, Machine};
//! use rand::SeedableRng;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut config = Config::new(200);
//! config.dir = dir.path().into();
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let summary = generate(&config, &Machine::new(3), &mut rng).unwrap();
//! assert_eq!(summary.lines, 200);
//! ```

use rand::Rng;
use std::path::PathBuf;
use thiserror::Error;

pub mod category;
pub mod config;
pub mod identity;
pub mod inject;
pub mod sampler;
pub mod writer;

pub use category::Category;
pub use config::{Config, ConfigFile, Counts};
pub use identity::{Machine, Parity};
pub use writer::Level;

/// The errors that can abort a generator run.
#[derive(Error, Debug)]
pub enum Error {
    /// The hostname does not carry a numeric machine token.
    #[error("malformed hostname {0:?}: no numeric machine token")]
    MalformedHostname(String),

    /// More pattern lines were requested than lines to generate.
    #[error("capacity exceeded: {requested} pattern lines requested, {available} available")]
    CapacityExceeded {
        /// Sum of the requested category counts.
        requested: usize,
        /// The configured number of lines.
        available: usize,
    },

    /// A pattern does not fit in the base line.
    #[error("pattern {0:?} does not fit in a {1} chars line")]
    PatternTooLong(String, usize),

    /// The output file or the configuration file is not accessible.
    #[error("invalid file: {0}")]
    BadFile(#[from] std::io::Error),

    /// The configuration file is not valid json.
    #[error("invalid json: {0}")]
    BadJSON(#[from] serde_json::Error),

    /// The configuration file is not valid yaml.
    #[error("invalid yaml: {0}")]
    BadYAML(#[from] serde_yaml::Error),

    /// The configuration file extension is not supported.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// The corpus generator result type.
pub type Result<T> = std::result::Result<T, Error>;

/// What a [generate] run produced.
#[derive(Debug)]
pub struct Summary {
    /// The emitted log file.
    pub path: PathBuf,
    /// Total lines written.
    pub lines: usize,
    /// Total pattern occurrences injected.
    pub injected: usize,
}

/// Generate the log file of a single machine.
///
/// The category assignment and the pattern widths are validated before the
/// output file is created: a failing run leaves no partial file behind.
#[tracing::instrument(level = "debug", skip(rng))]
pub fn generate(config: &Config, machine: &Machine, rng: &mut impl Rng) -> Result<Summary> {
    let assignment = sampler::sample(config.lines, &config.counts, machine.parity(), rng)?;
    for category in Category::ALL {
        let pattern = category.pattern(machine);
        if category.expected_count(machine, &config.counts) > 0 && pattern.len() > config.width {
            return Err(Error::PatternTooLong(pattern.into_owned(), config.width));
        }
    }

    let path = config.dir.join(machine.log_name());
    let mut writer = writer::LogWriter::create(&path)?;
    let mut injected = 0;
    for nr in 0..config.lines {
        let mut line = logfleet_generate::gen_line(rng, config.width);
        let level = if assignment.frequent.contains(&nr) {
            line = inject::inject(rng, &line, &Category::Frequent.pattern(machine))?;
            injected += 1;
            Level::Info
        } else if assignment.medium.contains(&nr) {
            line = inject::inject(rng, &line, &Category::Medium.pattern(machine))?;
            injected += 1;
            Level::Warning
        } else if assignment.rare.contains(&nr) {
            line = inject::inject(rng, &line, &Category::Rare.pattern(machine))?;
            injected += 1;
            Level::Critical
        } else if assignment.specific.contains(&nr)
            || assignment.odd.contains(&nr)
            || assignment.even.contains(&nr)
        {
            // The splices compose, a later offset may overwrite an earlier
            // marker. The buckets are disjoint so a line gets a single one.
            for category in [Category::Specific, Category::Odd, Category::Even] {
                if assignment.get(category).contains(&nr) {
                    line = inject::inject(rng, &line, &category.pattern(machine))?;
                    injected += 1;
                }
            }
            Level::Error
        } else {
            Level::Info
        };
        writer.append(level, &line)?;
    }
    writer.flush()?;
    tracing::debug!(lines = config.lines, injected, "Wrote {:?}", path);
    Ok(Summary {
        path,
        lines: config.lines,
        injected,
    })
}
