// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

use lazy_static::lazy_static;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regex::Regex;

use logfleet_corpus::{generate, Category, Config, Counts, Error, Machine};

lazy_static! {
    static ref RECORD_RE: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} (INFO|WARNING|ERROR|CRITICAL) [0-9A-Za-z_]+$")
            .unwrap();
}

fn generate_lines(config: &Config, machine: &Machine, seed: u64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let summary = generate(config, machine, &mut rng).unwrap();
    std::fs::read_to_string(&summary.path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

fn count(lines: &[String], pattern: &str) -> usize {
    lines.iter().map(|l| l.matches(pattern).count()).sum()
}

#[test]
fn it_generates_exact_counts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(300);
    config.dir = dir.path().into();
    let machine = Machine::new(3);
    let lines = generate_lines(&config, &machine, 42);

    assert_eq!(lines.len(), 300);
    for line in &lines {
        assert!(RECORD_RE.is_match(line), "bad record: {}", line);
    }
    assert_eq!(count(&lines, "RARE_PATTERN_ALL_MACHINES"), 1);
    assert_eq!(count(&lines, "MED_PATTERN_ALL_MACHINES"), 10);
    assert_eq!(count(&lines, "FREQUENT_PATTERN_ALL_MACHINES"), 100);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_MACHINE_3"), 5);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_ODD_MACHINE_NOS"), 5);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_EVEN_MACHINE_NOS"), 0);
}

#[test]
fn it_tags_levels_per_category() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(250);
    config.dir = dir.path().into();
    let machine = Machine::new(7);
    let lines = generate_lines(&config, &machine, 7);

    for category in Category::ALL {
        let pattern = category.pattern(&machine);
        let level = format!(" {} ", category.level());
        for line in lines.iter().filter(|l| l.contains(pattern.as_ref())) {
            assert!(line.contains(&level), "bad level on {}", line);
        }
    }
}

#[test]
fn it_reproduces_with_a_seed() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(200);
    config.dir = dir.path().into();
    let machine = Machine::new(2);

    // The timestamp prefix tracks the wall clock, compare the record bodies
    let body = |lines: Vec<String>| -> Vec<String> {
        lines.into_iter().map(|l| l[20..].to_string()).collect()
    };
    let first = body(generate_lines(&config, &machine, 42));
    let again = body(generate_lines(&config, &machine, 42));
    let other = body(generate_lines(&config, &machine, 43));
    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[test]
fn it_fails_fast_on_capacity() {
    let dir = tempfile::tempdir().unwrap();
    // Default counts request 121 lines
    let mut config = Config::new(50);
    config.dir = dir.path().into();
    let machine = Machine::new(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    match generate(&config, &machine, &mut rng) {
        Err(Error::CapacityExceeded { requested, .. }) => assert_eq!(requested, 121),
        other => panic!("expected capacity error, got {:?}", other),
    }
    // No partial file is left behind
    assert!(!dir.path().join(machine.log_name()).exists());
}

#[test]
fn it_fails_fast_on_narrow_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(300);
    config.dir = dir.path().into();
    config.width = 10;
    let machine = Machine::new(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(matches!(
        generate(&config, &machine, &mut rng),
        Err(Error::PatternTooLong(_, 10))
    ));
    assert!(!dir.path().join(machine.log_name()).exists());
}

#[test]
fn it_partitions_fully_when_counts_match() {
    let dir = tempfile::tempdir().unwrap();
    // 1 + 10 + 100 + 5 + 5 on an odd machine
    let mut config = Config::new(121);
    config.dir = dir.path().into();
    let machine = Machine::new(5);
    let lines = generate_lines(&config, &machine, 1);

    let patterns = Category::ALL.map(|c| c.pattern(&machine));
    let unmatched = lines
        .iter()
        .filter(|line| !patterns.iter().any(|p| line.contains(p.as_ref())))
        .count();
    assert_eq!(unmatched, 0);
}

#[test]
fn it_honors_zero_counts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(100);
    config.dir = dir.path().into();
    config.counts = Counts {
        rare: 0,
        med: 3,
        frequent: 5,
        specific: 2,
        odd: 1,
        even: 1,
    };
    let lines = generate_lines(&config, &Machine::new(4), 9);

    assert_eq!(count(&lines, "RARE_PATTERN_ALL_MACHINES"), 0);
    assert_eq!(count(&lines, "MED_PATTERN_ALL_MACHINES"), 3);
    // An even machine never sees the odd marker
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_ODD_MACHINE_NOS"), 0);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_EVEN_MACHINE_NOS"), 1);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_MACHINE_4"), 2);
}

#[test]
fn it_resolves_hostnames_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(130);
    config.dir = dir.path().into();
    let machine = Machine::resolve("fa25-cs425-1208.cs.illinois.edu").unwrap();
    let lines = generate_lines(&config, &machine, 3);

    assert!(dir.path().join("machine.08.log").exists());
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_MACHINE_8"), 5);
    assert_eq!(count(&lines, "PATTERN_ONLY_ON_EVEN_MACHINE_NOS"), 5);
}
