use std::path::{Path, PathBuf};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use mifgen::{
    export, import,
    pattern::{self, PatternArg, DEFAULT_ADDRESS_WIDTH, DEFAULT_WORD_WIDTH},
    MifGenError, MifGenResult,
};

const DEFAULT_SIZE: usize = 1000;
const DEFAULT_OUT_FILE: &str = "mem.mif";

fn main_result() -> MifGenResult<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // load config
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let run = args.merge(config);

    let seed = run.seed.unwrap_or_else(|| rand::rng().random());
    info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    // generate pattern
    let pattern = pattern::generate(run.arg, &mut rng)?;
    info!(
        "{} addresses, {} address bits, {} datum bits, depth {}",
        run.arg.size, run.arg.address_width, run.arg.datum_width(), pattern.depth()
    );

    // write mif
    export::write_mif(&pattern, &run.out_file)?;

    if run.verify {
        let listing = import::read_mif(&run.out_file)?;
        let decoded = listing.verify(&run.arg)?;
        if decoded.memory != *pattern.memory() {
            return Err(MifGenError::msg("listing does not match generated pattern"));
        }
        info!("verified {} addresses in {:?}", decoded.read_order.len(), run.out_file);
    }

    Ok(())
}

fn main() {
    if let Err(e) = main_result() {
        eprint!("Err: {}\n", e);
        std::process::exit(1);
    }
}

/// Generate random read/write patterns for a memory controller
#[derive(Parser, Debug)]
#[command(name = "mifgen")]
#[command(about = "Generate random read/write patterns for Memory Controller", long_about = None)]
struct Args {
    /// Number of unique addresses
    n: Option<usize>,

    /// Number of DRAM address bits
    #[arg(short, long)]
    bits: Option<usize>,

    /// Packed word width
    #[arg(short, long)]
    word_width: Option<usize>,

    /// Output file
    #[arg(short, long)]
    out_file: Option<PathBuf>,

    /// Seed of the random source, drawn at random when absent
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to a json configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the written file back and check it
    #[arg(long)]
    verify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }

    /// Flags given on the command line win over the config file.
    pub fn merge(self, config: Config) -> Run {
        let arg = PatternArg::new(
            self.n.or(config.n).unwrap_or(DEFAULT_SIZE),
            self.bits.or(config.address_bits).unwrap_or(DEFAULT_ADDRESS_WIDTH),
        ).with_word_width(self.word_width.or(config.word_width).unwrap_or(DEFAULT_WORD_WIDTH));

        Run {
            arg,
            out_file: self.out_file.or(config.out_file).unwrap_or_else(|| DEFAULT_OUT_FILE.into()),
            seed: self.seed.or(config.seed),
            verify: self.verify || config.verify.unwrap_or(false),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub n: Option<usize>,
    pub address_bits: Option<usize>,
    pub word_width: Option<usize>,
    pub out_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub verify: Option<bool>,
}

impl Config {
    pub fn load(path: &Path) -> MifGenResult<Self> {
        info!("load config {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[derive(Debug)]
pub struct Run {
    pub arg: PatternArg,
    pub out_file: PathBuf,
    pub seed: Option<u64>,
    pub verify: bool,
}
