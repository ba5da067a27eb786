use kopt_tsp::feasibility::is_feasible;
use kopt_tsp::fileio;
use kopt_tsp::finder::Finder;
use kopt_tsp::geometry::Domain;
use kopt_tsp::quadtree::PointIndex;
use kopt_tsp::settings::Settings;
use kopt_tsp::tour::Tour;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

struct Args {
    coordinates_path: PathBuf,
    tour_in_path: Option<PathBuf>,
    tour_out_path: PathBuf,
    kmax: usize,
    max_tree_depth: u32,
    iteration_budget: Option<usize>,
}

fn parse_args() -> Result<Args, String> {
    let mut coordinates_path = None;
    let mut tour_in_path = None;
    let mut tour_out_path = None;
    let mut kmax = kopt_tsp::settings::DEFAULT_KMAX;
    let mut max_tree_depth = kopt_tsp::settings::DEFAULT_MAX_TREE_DEPTH;
    let mut iteration_budget = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--points" => coordinates_path = args.next().map(PathBuf::from),
            "--tour-in" => tour_in_path = args.next().map(PathBuf::from),
            "--tour-out" => tour_out_path = args.next().map(PathBuf::from),
            "--kmax" => {
                kmax = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--kmax requires an integer value")?;
            }
            "--max-tree-depth" => {
                max_tree_depth = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--max-tree-depth requires an integer value")?;
            }
            "--iterations" => {
                iteration_budget = Some(
                    args.next()
                        .and_then(|v| v.parse().ok())
                        .ok_or("--iterations requires an integer value")?,
                );
            }
            other => return Err(format!("unrecognized argument: {other}")),
        }
    }

    Ok(Args {
        coordinates_path: coordinates_path.ok_or("--points <file> is required")?,
        tour_in_path,
        tour_out_path: tour_out_path.ok_or("--tour-out <file> is required")?,
        kmax,
        max_tree_depth,
        iteration_budget,
    })
}

fn run(args: Args) -> Result<(), String> {
    let settings = Settings::new(args.kmax, args.max_tree_depth, args.iteration_budget, None)
        .map_err(|e| e.to_string())?;

    let points = fileio::read_coordinates(&args.coordinates_path).map_err(|e| {
        error!(path = %args.coordinates_path.display(), %e, "failed to read coordinates");
        e.to_string()
    })?;
    let domain = Domain::from_points(&points);
    let index =
        PointIndex::build(&points, &domain, settings.max_tree_depth()).map_err(|e| e.to_string())?;

    let initial_order = fileio::initial_tour(points.len(), args.tour_in_path.as_ref())
        .map_err(|e| e.to_string())?;
    let mut tour = Tour::from_order(initial_order);
    tour.validate().map_err(|e| e.to_string())?;

    info!(points = points.len(), kmax = settings.kmax(), "starting search");

    let mut iterations = 0usize;
    loop {
        if let Some(budget) = settings.iteration_budget() {
            if iterations >= budget {
                info!(iterations, "iteration budget reached");
                break;
            }
        }

        let finder = Finder::new(&tour, &points, &index, settings.kmax());
        let Some(kmove) = finder.find_best() else {
            info!(iterations, "no further improvement found");
            break;
        };

        if !is_feasible(&tour, &kmove) {
            error!("finder emitted an infeasible move");
            return Err("internal invariant violation: infeasible move".to_string());
        }

        tour.swap(&kmove).map_err(|e| {
            error!(%e, "swap failed on a move the feasibility oracle accepted");
            e.to_string()
        })?;
        tour.validate().map_err(|e| e.to_string())?;

        iterations += 1;
        debug!(iterations, "applied improving move");
    }

    fileio::write_ordered_points(&tour.to_order(), &args.tour_out_path).map_err(|e| {
        error!(path = %args.tour_out_path.display(), %e, "failed to write tour");
        e.to_string()
    })?;
    info!(iterations, output = %args.tour_out_path.display(), "search finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!(
                "usage: kopt-tsp --points <file> --tour-out <file> [--tour-in <file>] [--kmax <n>] [--max-tree-depth <n>] [--iterations <n>]"
            );
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "run failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
