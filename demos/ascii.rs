//! Terminal demo: generate a grid, search it with every algorithm and print
//! the result as ASCII.
//!
//! Run: cargo run --bin gridpath-demo -- [rows] [cols] [pattern] [weights] [seed]
//!
//! `pattern` is one of the generator patterns or `random`; `weights` is
//! `uniform` or `random`.

use std::collections::HashSet;
use std::process;

use gridpath_core::{Grid, Point};
use gridpath_gen::{ObstacleGen, Pattern, WeightMode};
use gridpath_paths::{Algorithm, Explorer, Graph, Role};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Args {
    rows: i32,
    cols: i32,
    pattern: Option<Pattern>,
    weights: WeightMode,
    seed: u64,
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| argv.get(i).map(String::as_str);
    let num = |i: usize, default: i32| -> Result<i32, String> {
        arg(i).map_or(Ok(default), |s| {
            s.parse().map_err(|_| format!("not a number: {s}"))
        })
    };
    let pattern = match arg(2) {
        None | Some("random") => None,
        Some(s) => Some(s.parse::<Pattern>().map_err(|e| e.to_string())?),
    };
    let weights = arg(3).map_or(Ok(WeightMode::Uniform), str::parse)?;
    let seed = match arg(4) {
        Some(s) => s.parse().map_err(|_| format!("not a seed: {s}"))?,
        None => 0,
    };
    Ok(Args {
        rows: num(0, 15)?,
        cols: num(1, 30)?,
        pattern,
        weights,
        seed,
    })
}

fn render(grid: &Grid, start: Point, end: Point, path: &[Point], explored: &HashSet<Point>) {
    let on_path: HashSet<Point> = path.iter().copied().collect();
    for y in 0..grid.rows() {
        let line: String = (0..grid.cols())
            .map(|x| {
                let p = Point::new(x, y);
                if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if grid.is_obstacle(p) {
                    '#'
                } else if on_path.contains(&p) {
                    '*'
                } else if explored.contains(&p) {
                    '.'
                } else {
                    ' '
                }
            })
            .collect();
        println!("{line}");
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut grid = Grid::new(args.rows, args.cols);
    let start = Point::new(0, 0);
    let end = Point::new(args.cols - 1, args.rows - 1);

    let mut mg = ObstacleGen::new(StdRng::seed_from_u64(args.seed));
    let pattern = args.pattern.unwrap_or_else(|| mg.random_pattern());
    let (obstacles, report) = mg
        .generate_connected(&grid, start, end, pattern)
        .map_err(|e| e.to_string())?;
    grid.set_obstacles(&obstacles).map_err(|e| e.to_string())?;
    mg.apply_weights(&mut grid, args.weights, start, end)
        .map_err(|e| e.to_string())?;

    println!(
        "{}x{} grid, {pattern} pattern, {} weights, {} obstacles ({:?} after {} repair rounds)",
        grid.rows(),
        grid.cols(),
        args.weights,
        obstacles.len(),
        report.outcome,
        report.rounds,
    );

    let graph = Graph::build(&grid);
    for algorithm in Algorithm::ALL {
        let mut explorer = Explorer::new(algorithm, &graph, start, end);
        let explored: HashSet<Point> = explorer
            .by_ref()
            .filter(|e| e.role == Role::Visited)
            .map(|e| e.pos)
            .collect();
        let result = explorer.finish();
        println!();
        match result.path() {
            Some(path) => {
                println!(
                    "{algorithm}: {} steps, cost {}, weighted cost {}, {} cells explored",
                    result.steps(),
                    result.cost().unwrap_or_default(),
                    graph.path_cost(path).unwrap_or_default(),
                    explored.len(),
                );
                render(&grid, start, end, path, &explored);
            }
            None => {
                println!("{algorithm}: no path, {} cells explored", explored.len());
                render(&grid, start, end, &[], &explored);
            }
        }
    }
    Ok(())
}

fn main() {
    let result = parse_args().and_then(|args| {
        if args.rows < 1 || args.cols < 1 {
            return Err("grid needs at least one row and one column".to_string());
        }
        run(args)
    });
    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
