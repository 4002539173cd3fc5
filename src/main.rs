//! viajante CLI: solve, compare, and generate symmetric TSP instances.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use viajante::solver::optimality_gap;
use viajante::{
    AdaptiveSolver, HeldKarp, LocalSearch, MstApproximation, NearestNeighbor, TspError,
    TspInstance, TspSolver,
};

#[derive(Parser)]
#[command(name = "viajante")]
#[command(about = "Symmetric TSP solving: construction, exact search, and 2-opt refinement")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance with the adaptive strategy
    Solve {
        /// TSPLIB instance file
        instance: PathBuf,

        /// Random seed for the escape moves
        #[arg(long)]
        seed: Option<u64>,

        /// Refinement iteration cap (default scales with instance size)
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Random swaps per escape attempt
        #[arg(long, default_value = "3")]
        escape_moves: usize,

        /// Best known tour cost, for gap reporting
        #[arg(long)]
        best_known: Option<f64>,
    },

    /// Solve an instance exactly with Held-Karp dynamic programming
    Exact {
        /// TSPLIB instance file
        instance: PathBuf,

        /// Capacity ceiling (values above 30 are clamped)
        #[arg(long, default_value = "22")]
        max_cities: usize,

        /// Best known tour cost, for gap reporting
        #[arg(long)]
        best_known: Option<f64>,
    },

    /// Run every solver on one instance and tabulate the results
    Compare {
        /// TSPLIB instance file
        instance: PathBuf,

        /// Random seed for the escape moves
        #[arg(long)]
        seed: Option<u64>,

        /// Refinement iteration cap (default scales with instance size)
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Best known tour cost, for gap reporting
        #[arg(long)]
        best_known: Option<f64>,
    },

    /// Generate a random Euclidean instance as a TSPLIB file
    Generate {
        /// Number of cities
        n: usize,

        /// Side length of the coordinate square
        #[arg(long, default_value = "100.0")]
        side: f64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file
        #[arg(short, long, default_value = "instance.tsp")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            instance,
            seed,
            iterations,
            escape_moves,
            best_known,
        } => cmd_solve(&instance, seed, iterations, escape_moves, best_known),
        Commands::Exact {
            instance,
            max_cities,
            best_known,
        } => cmd_exact(&instance, max_cities, best_known),
        Commands::Compare {
            instance,
            seed,
            iterations,
            best_known,
        } => cmd_compare(&instance, seed, iterations, best_known),
        Commands::Generate {
            n,
            side,
            seed,
            output,
        } => cmd_generate(n, side, seed, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_instance(
    path: &Path,
    best_known: Option<f64>,
) -> Result<TspInstance, Box<dyn std::error::Error>> {
    let mut instance = TspInstance::load(path)?;
    if let Some(cost) = best_known {
        instance = instance.with_best_known(cost);
    }
    Ok(instance)
}

fn refinement_engine(
    seed: Option<u64>,
    iterations: Option<usize>,
    escape_moves: usize,
) -> LocalSearch {
    let mut engine = LocalSearch::new().with_escape_moves(escape_moves);
    if let Some(s) = seed {
        engine = engine.with_seed(s);
    }
    if let Some(cap) = iterations {
        engine = engine.with_max_iterations(cap);
    }
    engine
}

fn cmd_solve(
    path: &Path,
    seed: Option<u64>,
    iterations: Option<usize>,
    escape_moves: usize,
    best_known: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = load_instance(path, best_known)?;

    println!("Adaptive TSP Solve");
    println!("==================");
    println!("Instance:     {}", instance.name);
    println!("Cities:       {}", instance.dimension());

    let controller = AdaptiveSolver::new();
    let (seed_tour, strategy) = controller.select_seed(&instance.matrix)?;
    let seed_cost = instance.matrix.tour_cost(&seed_tour);
    println!("Seed:         {} ({seed_cost:.2})", strategy.as_str());
    println!();

    let engine = refinement_engine(seed, iterations, escape_moves);
    let start = Instant::now();
    let solution = engine.refine(&instance.matrix, &seed_tour)?;
    let elapsed = start.elapsed();

    println!("Tour cost:        {:.2}", solution.cost);
    println!(
        "Iterations:       {} ({})",
        solution.iterations,
        solution.termination.as_str()
    );
    println!("Computation time: {:.3}s", elapsed.as_secs_f64());
    if let Some(optimal) = instance.best_known {
        println!(
            "Gap:              {:.2}%",
            optimality_gap(solution.cost, optimal)
        );
    }
    println!(
        "Tour: {} -> ... -> {}",
        solution.tour.first().unwrap_or(&0),
        solution.tour.last().unwrap_or(&0)
    );

    Ok(())
}

fn cmd_exact(
    path: &Path,
    max_cities: usize,
    best_known: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = load_instance(path, best_known)?;

    println!("Exact TSP Solve (Held-Karp)");
    println!("===========================");
    println!("Instance:     {}", instance.name);
    println!("Cities:       {}", instance.dimension());
    println!();

    let mut solver = HeldKarp::new().with_max_cities(max_cities);
    let start = Instant::now();
    match solver.solve(&instance.matrix) {
        Ok(solution) => {
            let elapsed = start.elapsed();
            println!("Optimal cost:     {:.2}", solution.cost);
            println!("Computation time: {:.3}s", elapsed.as_secs_f64());
            if let Some(optimal) = instance.best_known {
                println!(
                    "Gap:              {:.2}%",
                    optimality_gap(solution.cost, optimal)
                );
            }
            println!("Tour: {:?}", solution.tour);
        }
        Err(TspError::CapacityExceeded { cities, ceiling }) => {
            println!("Skipped: {cities} cities exceeds the exact ceiling of {ceiling}");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn cmd_compare(
    path: &Path,
    seed: Option<u64>,
    iterations: Option<usize>,
    best_known: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let instance = load_instance(path, best_known)?;

    println!("Solver Comparison");
    println!("=================");
    println!("Instance: {} ({} cities)", instance.name, instance.dimension());
    println!();
    println!("{:<24} {:>12} {:>9} {:>10}", "Solver", "Cost", "Gap", "Time");
    println!("{}", "-".repeat(58));

    let print_row = |name: &str, cost: f64, secs: f64| {
        let gap = match instance.best_known {
            Some(optimal) => format!("{:.1}%", optimality_gap(cost, optimal)),
            None => "n/a".to_string(),
        };
        println!("{name:<24} {cost:>12.2} {gap:>9} {secs:>9.3}s");
    };

    let start = Instant::now();
    let mst_tour = MstApproximation::new().approximate(&instance.matrix)?;
    let mst_cost = instance.matrix.tour_cost(&mst_tour);
    print_row("MST Approximation", mst_cost, start.elapsed().as_secs_f64());

    let start = Instant::now();
    let nn_tour = NearestNeighbor::new().construct(&instance.matrix);
    let nn_cost = instance.matrix.tour_cost(&nn_tour);
    print_row("Nearest Neighbor", nn_cost, start.elapsed().as_secs_f64());

    let engine = refinement_engine(seed, iterations, 3);
    let start = Instant::now();
    let refined = engine.refine(&instance.matrix, &mst_tour)?;
    print_row(
        "Local Search (MST seed)",
        refined.cost,
        start.elapsed().as_secs_f64(),
    );

    let mut adaptive = AdaptiveSolver::new();
    if let Some(s) = seed {
        adaptive = adaptive.with_seed(s);
    }
    if let Some(cap) = iterations {
        adaptive = adaptive.with_max_iterations(cap);
    }
    let start = Instant::now();
    let solution = adaptive.solve(&instance.matrix)?;
    print_row("Adaptive", solution.cost, start.elapsed().as_secs_f64());

    let start = Instant::now();
    match HeldKarp::new().solve(&instance.matrix) {
        Ok(exact) => print_row("Held-Karp", exact.cost, start.elapsed().as_secs_f64()),
        Err(TspError::CapacityExceeded { cities, ceiling }) => {
            println!("{:<24} skipped ({cities} cities > ceiling {ceiling})", "Held-Karp");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn cmd_generate(
    n: usize,
    side: f64,
    seed: u64,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if side <= 0.0 {
        return Err(format!("side must be positive, got {side}").into());
    }

    let instance = TspInstance::random_euclidean(n, side, seed)?;
    let coords = instance
        .coords
        .as_ref()
        .ok_or("generated instance has no coordinates")?;

    let mut content = String::new();
    content.push_str(&format!("NAME: {}\n", instance.name));
    content.push_str(&format!("COMMENT: random euclidean instance, seed {seed}\n"));
    content.push_str("TYPE: TSP\n");
    content.push_str(&format!("DIMENSION: {n}\n"));
    content.push_str("EDGE_WEIGHT_TYPE: EUC_2D\n");
    content.push_str("NODE_COORD_SECTION\n");
    for (i, (x, y)) in coords.iter().enumerate() {
        content.push_str(&format!("{} {x:.4} {y:.4}\n", i + 1));
    }
    content.push_str("EOF\n");

    std::fs::write(output, content)?;
    println!(
        "Wrote {} ({} cities) to {}",
        instance.name,
        n,
        output.display()
    );

    Ok(())
}
