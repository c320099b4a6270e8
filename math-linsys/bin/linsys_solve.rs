//! Dense linear system solver
//!
//! Solves Ax = b with forward substitution, backward substitution or
//! Gaussian elimination, and reports the error norm against a reference
//! solution together with a condition estimate.
//!
//! Usage:
//!   cargo run --release --bin linsys-solve -- --hilbert 3
//!   cargo run --release --bin linsys-solve -- --system configs/system.json --method gauss --json
//!   cargo run --release --bin linsys-solve -- --help

use clap::{Parser, ValueEnum};
use math_audio_linsys::direct::{
    solve_lower_triangular_with_epsilon, solve_upper_triangular_with_epsilon,
};
use math_audio_linsys::{
    DenseSystemSolver, LinearSystem, MatrixNorm, SolverConfig, backward_error, residual,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "linsys-solve")]
#[command(about = "Solve a dense linear system and report its error norm and condition estimate")]
struct Args {
    /// JSON file with "a", "b" and optional "reference"
    #[arg(short, long, conflicts_with = "hilbert")]
    system: Option<PathBuf>,

    /// Use the n×n Hilbert matrix with the all-ones vector as exact solution
    #[arg(long)]
    hilbert: Option<usize>,

    /// Solution method
    #[arg(short, long, value_enum, default_value = "gauss")]
    method: CliMethod,

    /// Solver configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relative pivot threshold (times the largest entry) below which the matrix is singular
    #[arg(long)]
    epsilon: Option<f64>,

    /// Norm used for the condition estimate
    #[arg(long, value_enum)]
    norm: Option<CliNorm>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMethod {
    Forward,
    Backward,
    Gauss,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNorm {
    Proxy,
    Frobenius,
    Infinity,
    One,
}

impl From<CliNorm> for MatrixNorm {
    fn from(norm: CliNorm) -> Self {
        match norm {
            CliNorm::Proxy => MatrixNorm::RowSumOfSquares,
            CliNorm::Frobenius => MatrixNorm::Frobenius,
            CliNorm::Infinity => MatrixNorm::Infinity,
            CliNorm::One => MatrixNorm::One,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(epsilon) = args.epsilon {
        config.pivot_epsilon = epsilon;
    }
    if let Some(norm) = args.norm {
        config.condition_norm = norm.into();
    }
    config.validate()?;

    let system = if let Some(path) = &args.system {
        log::info!("Loading system from: {}", path.display());
        LinearSystem::from_file(path)?
    } else if let Some(n) = args.hilbert {
        LinearSystem::hilbert(n)
    } else {
        LinearSystem::demo()
    };
    let arrays = system.to_arrays()?;

    match args.method {
        CliMethod::Gauss => {
            let result =
                DenseSystemSolver::new(config).solve(&arrays.a, &arrays.b, &arrays.reference)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Output x: {:?}", result.x.to_vec());
                println!("Error norm: {:.6e}", result.error_norm);
                println!(
                    "Condition estimate ({}): {:.6e}",
                    config.condition_norm.name(),
                    result.condition_estimate
                );
            }
        }
        CliMethod::Forward | CliMethod::Backward => {
            let (a, b, epsilon) = (&arrays.a, &arrays.b, config.pivot_epsilon);
            let x = if matches!(args.method, CliMethod::Forward) {
                solve_lower_triangular_with_epsilon(a, b, epsilon)?
            } else {
                solve_upper_triangular_with_epsilon(a, b, epsilon)?
            };
            let error_norm = residual(&x, &arrays.reference)?;
            let max_residual = backward_error(&arrays.a, &x, &arrays.b)?;
            if args.json {
                let json = serde_json::json!({
                    "x": x.to_vec(),
                    "error_norm": error_norm,
                    "backward_error": max_residual,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!("Output x: {:?}", x.to_vec());
                println!("Error norm: {:.6e}", error_norm);
                println!("max |Ax - b|: {:.6e}", max_residual);
            }
        }
    }

    Ok(())
}
