//! Cache Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, trace reading, and summary output.
//!
//! # Usage
//!
//! ```text
//! cachesim -s <set bits> -E <lines per set> -b <block bits> -t <trace> [-v]
//! ```
//!
//! Geometry can also come from a TOML file passed with `--config`; flags given
//! on the command line take precedence over the file.

use clap::Parser;
use std::process;

extern crate cachesim;

use cachesim::common::Error;
use cachesim::config::Config;
use cachesim::sim::loader;
use cachesim::sim::Simulator;

/// Command-line arguments for the cache simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Set-Associative LRU Cache Simulator")]
struct Args {
    /// Number of set index bits (S = 2^s sets)
    #[arg(short = 's')]
    set_bits: Option<u32>,

    /// Number of lines per set (associativity)
    #[arg(short = 'E')]
    lines: Option<usize>,

    /// Number of block offset bits (B = 2^b bytes per block)
    #[arg(short = 'b')]
    block_bits: Option<u32>,

    /// Trace file to replay
    #[arg(short = 't', long = "trace")]
    trace: String,

    /// Print each data access with its outcome
    #[arg(short, long)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the final statistics as JSON
    #[arg(long)]
    json: bool,

    /// Print a detailed statistics report after the summary
    #[arg(long)]
    report: bool,

    /// Write `hits misses evictions` to this file
    #[arg(long)]
    results: Option<String>,
}

impl Args {
    /// Applies command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(s) = self.set_bits {
            config.cache.set_bits = s;
        }
        if let Some(e) = self.lines {
            config.cache.lines_per_set = e;
        }
        if let Some(b) = self.block_bits {
            config.cache.block_bits = b;
        }
        config.output.verbose |= self.verbose;
        config.output.json |= self.json;
        config.output.report |= self.report;
        if self.results.is_some() {
            config.output.results_file = self.results.clone();
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);

    let geometry = config.cache;
    let mut sim = Simulator::new(&geometry)?;
    log::info!(
        "geometry: s={} E={} b={} ({} sets, {} bytes)",
        geometry.set_bits,
        geometry.lines_per_set,
        geometry.block_bits,
        geometry.num_sets(),
        geometry.capacity_bytes()
    );

    let trace = loader::open_trace(&args.trace)?;
    for event in trace {
        let event = event?;
        if let Some(result) = sim.process(&event) {
            if config.output.verbose {
                println!("{} {}", event, result);
            }
        }
    }

    let stats = sim.into_stats();
    if config.output.json {
        println!("{}", stats.to_json()?);
    } else {
        println!("{}", stats.summary_line());
    }
    if config.output.report {
        stats.print();
    }
    if let Some(path) = &config.output.results_file {
        stats.write_results(path)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    }
}
