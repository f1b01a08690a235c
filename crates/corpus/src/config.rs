// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module provides the generator configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::identity::Parity;
use crate::{Error, Result};

/// Default width of the random base lines.
pub const DEFAULT_WIDTH: usize = logfleet_generate::LINE_WIDTH;

/// How many lines of each category to inject.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Counts {
    /// Rare marker lines.
    pub rare: usize,
    /// Medium marker lines.
    pub med: usize,
    /// Frequent marker lines.
    pub frequent: usize,
    /// Machine specific marker lines.
    pub specific: usize,
    /// Odd machines marker lines.
    pub odd: usize,
    /// Even machines marker lines.
    pub even: usize,
}

impl Default for Counts {
    fn default() -> Counts {
        Counts {
            rare: 1,
            med: 10,
            frequent: 100,
            specific: 5,
            odd: 5,
            even: 5,
        }
    }
}

impl Counts {
    /// The capacity consumed on a machine of the given parity. The two
    /// parity counts are never both consumed.
    pub fn requested(&self, parity: Parity) -> usize {
        let parity_count = match parity {
            Parity::Odd => self.odd,
            Parity::Even => self.even,
        };
        self.rare + self.med + self.frequent + self.specific + parity_count
    }
}

/// A full generator configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of lines to emit.
    pub lines: usize,
    /// Width of the random base lines.
    pub width: usize,
    /// Pattern counts.
    pub counts: Counts,
    /// Output directory, resolved by the caller.
    pub dir: PathBuf,
}

impl Config {
    /// A default configuration writing `lines` lines in the current
    /// directory.
    pub fn new(lines: usize) -> Config {
        Config {
            lines,
            width: DEFAULT_WIDTH,
            counts: Counts::default(),
            dir: PathBuf::from("."),
        }
    }
}

/// The settings loaded from a user provided file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pattern counts.
    #[serde(default)]
    pub counts: Counts,
    /// Base line width.
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

impl Default for ConfigFile {
    fn default() -> ConfigFile {
        ConfigFile {
            counts: Counts::default(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl ConfigFile {
    /// Load the settings from a yaml or json file.
    pub fn from_path(path: &Path) -> Result<ConfigFile> {
        let file = std::fs::File::open(path)?;
        ConfigFile::from_reader(path, file)
    }

    fn from_reader<R: std::io::Read>(path: &Path, file: R) -> Result<ConfigFile> {
        let reader = std::io::BufReader::new(file);
        match path.extension().and_then(std::ffi::OsStr::to_str) {
            Some("yaml") => Ok(serde_yaml::from_reader(reader)?),
            Some("json") => Ok(serde_json::from_reader(reader)?),
            m_ext => Err(Error::UnknownFormat(
                m_ext.map(|s| s.to_string()).unwrap_or("".to_string()),
            )),
        }
    }
}
