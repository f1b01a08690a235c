// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module contains the logic for the check command.
//!
//! It replays the consumer side expectations: a query for a category marker
//! must return exactly the configured count on the machines the category is
//! scoped to.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

use logfleet_corpus::{Category, Config, Machine};

lazy_static! {
    static ref RECORD_RE: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} (INFO|WARNING|ERROR|CRITICAL) .+$")
            .unwrap();
}

/// Compare a generated log file with its expected pattern counts.
pub fn check_corpus(config: &Config, machine: &Machine) -> Result<()> {
    let path = config.dir.join(machine.log_name());
    println!("[+] Validating: {:?}", path);
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let mut fail_count = 0;

    let line_count = content.lines().count();
    if line_count != config.lines {
        println!("-> line count: expected {}, got {}", config.lines, line_count);
        fail_count += 1;
    }

    for (nr, line) in content.lines().enumerate() {
        if !RECORD_RE.is_match(line) {
            println!("-> line {}: bad record {:?}", nr, line);
            fail_count += 1;
        }
    }

    for category in Category::ALL {
        let pattern = category.pattern(machine);
        let expected = category.expected_count(machine, &config.counts);
        let found = content.matches(pattern.as_ref()).count();
        if found != expected {
            println!(
                "-> {:?}: expected {} {:?}, got {}",
                category, expected, pattern, found
            );
            fail_count += 1;
        }
        let level = format!(" {} ", category.level());
        for line in content.lines().filter(|l| l.contains(pattern.as_ref())) {
            if !line.contains(&level) {
                println!("-> {:?}: bad level on {:?}", category, line);
                fail_count += 1;
            }
        }
    }

    if fail_count > 0 {
        Err(anyhow::anyhow!(
            "{}: {} checks failed",
            path.display(),
            fail_count
        ))
    } else {
        println!("-> OK");
        Ok(())
    }
}
