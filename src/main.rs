use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_knapsack::batch::{
    comparisons, modulus_for_density, BatchDriver, BatchPlan, BatchReport, BatchSpec,
};
use u_knapsack::ga::{GaConfig, REFERENCE_TIME};
use u_knapsack::generate::{generate, GeneratorConfig};
use u_knapsack::io::{write_problems, write_vectors};
use u_knapsack::pool::PoolConfig;
use u_knapsack::random::create_rng;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "u-knapsack")]
#[command(about = "Parallel subset-sum benchmarking: exhaustive enumeration and genetic search")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Solver family for a `run`
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    /// Enumerate every subset
    Exact,
    /// Genetic algorithm
    Heuristic,
}

#[derive(Args, Debug)]
struct SolverArgs {
    /// Worker threads (defaults to the hardware concurrency)
    #[arg(long, short = 'j')]
    workers: Option<usize>,
    /// Base random seed; worker k uses seed + k
    #[arg(long)]
    seed: Option<u64>,

    // --- Genetic algorithm options ---
    /// Individuals per generation (must be even)
    #[arg(long, default_value = "10000")]
    population_size: usize,
    /// Generation cap
    #[arg(long, default_value = "1000")]
    max_generations: usize,
    /// Per-bit flip probability
    #[arg(long, default_value = "0.03")]
    mutation_rate: f64,
    /// Candidates drawn per tournament
    #[arg(long, default_value = "3")]
    tournament_size: usize,
    /// Generations without improvement before giving up (0 disables)
    #[arg(long, default_value = "2")]
    stall_limit: usize,
    /// Reference time in seconds; the time budget is twice this
    #[arg(long)]
    reference_time: Option<f64>,
    /// Evaluate fitness in parallel inside each GA run
    #[arg(long)]
    parallel_fitness: bool,
}

impl SolverArgs {
    fn pool_config(&self) -> PoolConfig {
        PoolConfig::default()
            .with_workers_option(self.workers)
            .with_seed_option(self.seed)
    }

    fn ga_config(&self) -> Result<GaConfig> {
        let reference = match self.reference_time {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid reference time {secs}"))?,
            None => REFERENCE_TIME,
        };
        let config = GaConfig::default()
            .with_population_size(self.population_size)
            .with_max_generations(self.max_generations)
            .with_mutation_rate(self.mutation_rate)
            .with_tournament_size(self.tournament_size)
            .with_stall_limit(self.stall_limit)
            .with_reference_time(reference)
            .with_parallel(self.parallel_fitness);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one or more problem files
    Run {
        /// Problem files, one problem per line
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Solver family
        #[arg(long, value_enum, default_value = "exact")]
        mode: CliMode,
        /// Reduce sums and target modulo this value (exact mode)
        #[arg(long, conflicts_with = "density")]
        modulus: Option<i64>,
        /// Reduce modulo floor(2^(24 / density)) (exact mode)
        #[arg(long)]
        density: Option<f64>,
        /// Directory for result files (defaults to each input's directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Skip the per-problem table
        #[arg(long)]
        no_table: bool,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Run the standard benchmark layout found in a directory
    Plan {
        /// Directory holding knapsack_problems_{1..8}.csv
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Only list the batches
        #[arg(long)]
        dry_run: bool,
        /// Skip the per-problem table
        #[arg(long)]
        no_table: bool,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Generate random problems with reachable targets
    Generate {
        /// Destination problem file
        #[arg(long)]
        output: PathBuf,
        /// Also write the bare weight vectors here
        #[arg(long)]
        vectors_output: Option<PathBuf>,
        /// Number of weight vectors
        #[arg(long, default_value = "50")]
        vectors: usize,
        /// Items per vector
        #[arg(long, default_value = "24")]
        length: usize,
        /// Smallest weight
        #[arg(long, default_value = "1")]
        min_weight: i64,
        /// Largest weight (overridden by --density)
        #[arg(long, default_value = "1073741824")]
        max_weight: i64,
        /// Cap weights and reduce targets by floor(2^(24 / density))
        #[arg(long)]
        density: Option<f64>,
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

// --- Logging ---

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

// --- Commands ---

fn output_path(input: &Path, output_dir: Option<&Path>, mode: CliMode) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "problems".to_string());
    let name = match mode {
        CliMode::Exact => format!("{stem}_solutions.csv"),
        CliMode::Heuristic => format!("genetic_{stem}_solutions.csv"),
    };
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(name)
}

fn print_report(report: &BatchReport, table: bool) {
    println!("== {} ({}) ==", report.spec.name, report.spec.input.display());
    if table && !report.records.is_empty() {
        print!("{}", report.records.table());
    }
    print!("{}", report.summary);
    println!("results: {}", report.spec.output.display());
    println!();
}

fn execute(plan: &BatchPlan, solver: &SolverArgs, table: bool, compare: bool) -> Result<()> {
    let driver = BatchDriver::new(solver.pool_config(), solver.ga_config()?);
    let outcomes = driver.run_all_with(plan, |outcome| {
        if let Ok(report) = outcome {
            print_report(report, table);
        }
    });

    if compare {
        for (input, comparison) in comparisons(&outcomes) {
            println!("== exact vs heuristic: {} ==", input.display());
            print!("{comparison}");
            println!();
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    if failed > 0 {
        bail!("{failed} of {} batches failed", plan.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    enable_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            mode,
            modulus,
            density,
            output_dir,
            no_table,
            solver,
        } => {
            let modulus = modulus.or(density.map(modulus_for_density));
            let mut plan = BatchPlan::new();
            for input in &inputs {
                let output = output_path(input, output_dir.as_deref(), mode);
                let name = input.display().to_string();
                let spec = match mode {
                    CliMode::Exact => BatchSpec::exact(name, input, output),
                    CliMode::Heuristic => BatchSpec::heuristic(name, input, output),
                };
                plan = plan.with_batch(BatchSpec { modulus, ..spec });
            }
            execute(&plan, &solver, !no_table, false)
        }
        Commands::Plan {
            dir,
            dry_run,
            no_table,
            solver,
        } => {
            let plan = BatchPlan::standard(&dir);
            if dry_run {
                for spec in &plan.batches {
                    let modulus = spec.modulus.map_or_else(|| "-".to_string(), |m| m.to_string());
                    println!(
                        "{:<12} {:<9} {:>10}  {} -> {}",
                        spec.name,
                        spec.mode,
                        modulus,
                        spec.input.display(),
                        spec.output.display()
                    );
                }
                return Ok(());
            }
            execute(&plan, &solver, !no_table, true)
        }
        Commands::Generate {
            output,
            vectors_output,
            vectors,
            length,
            min_weight,
            max_weight,
            density,
            seed,
        } => {
            let mut config = GeneratorConfig::default()
                .with_vectors(vectors)
                .with_length(length)
                .with_weight_range(min_weight, max_weight);
            if let Some(d) = density {
                config = config.with_density(d);
            }

            let mut rng = create_rng(seed);
            let (weight_vectors, problems) = generate(&config, &mut rng)?;
            write_problems(&output, &problems)?;
            if let Some(path) = vectors_output {
                write_vectors(&path, &weight_vectors)?;
            }
            info!(
                problems = problems.len(),
                vectors = weight_vectors.len(),
                output = %output.display(),
                "problems generated"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_path_naming() {
        let input = Path::new("data/knapsack_problems_3.csv");
        assert_eq!(
            output_path(input, None, CliMode::Exact),
            Path::new("data/knapsack_problems_3_solutions.csv")
        );
        assert_eq!(
            output_path(input, Some(Path::new("out")), CliMode::Heuristic),
            Path::new("out/genetic_knapsack_problems_3_solutions.csv")
        );
    }

    #[test]
    fn test_ga_config_from_args() {
        let cli = Cli::parse_from([
            "u-knapsack",
            "run",
            "--mode",
            "heuristic",
            "--population-size",
            "20",
            "--reference-time",
            "0.5",
            "in.csv",
        ]);
        let Commands::Run { solver, mode, .. } = cli.command else {
            panic!("expected run");
        };
        assert!(matches!(mode, CliMode::Heuristic));
        let ga = solver.ga_config().unwrap();
        assert_eq!(ga.population_size, 20);
        assert_eq!(ga.time_budget, Duration::from_secs(1));
    }

    #[test]
    fn test_odd_population_rejected() {
        let cli = Cli::parse_from(["u-knapsack", "plan", "--population-size", "7"]);
        let Commands::Plan { solver, .. } = cli.command else {
            panic!("expected plan");
        };
        assert!(solver.ga_config().is_err());
    }
}
