use anyhow::Result;
use clap::{Parser, ValueEnum};
use prime_cache::nt_funcs::evaluate_with;
use prime_cache::{
    BaselineCache, CacheConfig, GrowthTarget, IncrementalCache, PrimalityTestConfig, PrimeCache,
    SieveCache,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "prime-cache",
    about = "Determine whether some number is (likely) prime or composite."
)]
struct Cli {
    /// The number to check for primality
    #[arg(value_name = "NUM")]
    number: u64,

    /// Prime cache used for trial division
    #[arg(long, value_enum, default_value_t = CacheKind::Incremental)]
    cache: CacheKind,

    /// Ceiling of the sieve cache
    #[arg(long, env = "PRIME_CACHE_SIEVE_CEILING", default_value_t = 1000)]
    sieve_ceiling: u64,

    /// Grow the incremental cache up to NUM itself instead of its square root
    #[arg(long)]
    grow_to_candidate: bool,

    /// Number of Fermat rounds
    #[arg(long, default_value_t = 8)]
    rounds: u32,

    /// Candidates up to this value are decided by Wilson's theorem instead
    #[arg(long, default_value_t = 10_000)]
    wilson_limit: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum CacheKind {
    Baseline,
    Incremental,
    Sieve,
}

fn build_cache(cli: &Cli) -> Box<dyn PrimeCache> {
    let config = CacheConfig {
        growth: if cli.grow_to_candidate {
            GrowthTarget::Candidate
        } else {
            GrowthTarget::SquareRoot
        },
        sieve_ceiling: cli.sieve_ceiling,
    };
    match cli.cache {
        CacheKind::Baseline => Box::new(BaselineCache::new()),
        CacheKind::Incremental => Box::new(IncrementalCache::with_config(config)),
        CacheKind::Sieve => Box::new(SieveCache::with_config(config)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let n = cli.number;

    let cache = build_cache(&cli);
    match cache.first_factor(n)? {
        None => println!("{} appears to be prime!", n),
        Some(f) => println!("{} is divisible by {}", n, f),
    }
    info!(
        policy = ?cache.growth_policy(),
        highest_tested = cache.highest_tested(),
        cached = cache.count(),
        "trial division done"
    );

    let config = PrimalityTestConfig {
        fermat_rounds: cli.rounds,
        wilson_limit: cli.wilson_limit,
        ..PrimalityTestConfig::default()
    };
    let verdict = evaluate_with(n, config, &mut rand::thread_rng())?;
    println!("probabilistic test: {}", verdict);
    Ok(())
}
