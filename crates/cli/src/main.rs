// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module is the entrypoint of the logfleet command line.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use logfleet_corpus::{generate, Category, Config, ConfigFile, Counts, Machine, Summary};

mod check;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_subcommand = true)]
struct Cli {
    #[clap(long, help = "Counts configuration", value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(long, help = "Output directory", value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    #[clap(long, help = "Seed the random source", value_name = "N")]
    seed: Option<u64>,

    #[clap(long, help = "Base line width", value_name = "CHARS")]
    width: Option<usize>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CountsArgs {
    #[clap(long, help = "Number of rare pattern lines")]
    rare_count: Option<usize>,

    #[clap(long, help = "Number of medium pattern lines")]
    med_count: Option<usize>,

    #[clap(long, help = "Number of frequent pattern lines")]
    frequent_count: Option<usize>,

    #[clap(long, help = "Number of machine specific pattern lines")]
    specific_count: Option<usize>,

    #[clap(long, help = "Number of odd machine pattern lines")]
    odd_count: Option<usize>,

    #[clap(long, help = "Number of even machine pattern lines")]
    even_count: Option<usize>,
}

impl CountsArgs {
    fn apply(&self, mut counts: Counts) -> Counts {
        if let Some(count) = self.rare_count {
            counts.rare = count
        }
        if let Some(count) = self.med_count {
            counts.med = count
        }
        if let Some(count) = self.frequent_count {
            counts.frequent = count
        }
        if let Some(count) = self.specific_count {
            counts.specific = count
        }
        if let Some(count) = self.odd_count {
            counts.odd = count
        }
        if let Some(count) = self.even_count {
            counts.even = count
        }
        counts
    }
}

#[derive(Subcommand)]
enum Commands {
    #[clap(about = "Generate the log file of a single machine")]
    Generate {
        #[clap(help = "Number of lines to generate")]
        n_lines: usize,

        #[clap(help = "Hostname, e.g. fa25-cs425-1203.cs.illinois.edu")]
        hostname: String,

        #[clap(flatten)]
        counts: CountsArgs,
    },

    #[clap(about = "Generate the log files of a whole fleet")]
    Fleet {
        #[clap(help = "Number of machines")]
        machines: u32,

        #[clap(help = "Number of lines per machine")]
        n_lines: usize,

        #[clap(flatten)]
        counts: CountsArgs,
    },

    #[clap(about = "Verify the pattern counts of a generated log file")]
    Check {
        #[clap(help = "Number of lines expected")]
        n_lines: usize,

        #[clap(help = "Hostname of the machine")]
        hostname: String,

        #[clap(flatten)]
        counts: CountsArgs,
    },

    // Secret options to debug specific part of the process
    #[clap(hide = true, about = "Print random base lines")]
    DebugLine {
        #[clap(long, default_value = "1")]
        count: usize,
    },

    #[clap(hide = true, about = "Print a category assignment")]
    DebugSample {
        n_lines: usize,
        hostname: String,

        #[clap(flatten)]
        counts: CountsArgs,
    },
}

impl Cli {
    fn run(self) -> Result<()> {
        let settings = match &self.config {
            Some(path) => ConfigFile::from_path(path)?,
            None => ConfigFile::default(),
        };
        let width = self.width.unwrap_or(settings.width);
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => rand::make_rng::<ChaCha8Rng>(),
        };
        let make_config = |lines: usize, counts: &CountsArgs| Config {
            lines,
            width,
            counts: counts.apply(settings.counts.clone()),
            dir: self.dir.clone(),
        };
        match &self.command {
            Commands::Generate {
                n_lines,
                hostname,
                counts,
            } => {
                let machine = Machine::resolve(hostname)?;
                let summary = generate(&make_config(*n_lines, counts), &machine, &mut rng)?;
                print_summary(&summary);
                Ok(())
            }

            Commands::Fleet {
                machines,
                n_lines,
                counts,
            } => {
                let config = make_config(*n_lines, counts);
                for id in 1..=*machines {
                    tracing::debug!("Generating machine {}", id);
                    let summary = generate(&config, &Machine::new(id), &mut rng)?;
                    print_summary(&summary);
                }
                Ok(())
            }

            Commands::Check {
                n_lines,
                hostname,
                counts,
            } => {
                let machine = Machine::resolve(hostname)?;
                check::check_corpus(&make_config(*n_lines, counts), &machine)
            }

            // Debug handlers
            Commands::DebugLine { count } => {
                for line in logfleet_generate::gen_lines(width).take(*count) {
                    println!("{}", line);
                }
                Ok(())
            }

            Commands::DebugSample {
                n_lines,
                hostname,
                counts,
            } => {
                let machine = Machine::resolve(hostname)?;
                let config = make_config(*n_lines, counts);
                let assignment = logfleet_corpus::sampler::sample(
                    config.lines,
                    &config.counts,
                    machine.parity(),
                    &mut rng,
                )?;
                for category in Category::ALL {
                    let numbers = assignment.get(category).iter().sorted().join(", ");
                    println!("{:?}: {}", category, numbers);
                }
                Ok(())
            }
        }
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "{}: wrote {} lines ({} patterns)",
        summary.path.display(),
        summary.lines,
        summary.injected
    );
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let logger = tracing_subscriber::Registry::default();

    match std::env::var_os("LOGFLEET_LOG") {
        None => {
            // Default INFO stdout logger
            logger
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .compact()
                        .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
                )
                .init();
        }
        Some(_level) => {
            // Tracing spans
            logger
                .with(
                    tracing_tree::HierarchicalLayer::new(1)
                        .with_targets(true)
                        .with_bracketed_fields(true)
                        .with_filter(tracing_subscriber::filter::EnvFilter::from_env(
                            "LOGFLEET_LOG",
                        )),
                )
                .init();
        }
    };
    Cli::parse().run()
}
