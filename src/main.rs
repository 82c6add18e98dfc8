use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_neighbors::config::SearchParams;
use grid_neighbors::grid::Grid;
use grid_neighbors::render::{self, AsciiOptions};
use grid_neighbors::search::{NeighborSearch, Search};
use grid_neighbors::{Algorithm, DistanceType};

/// Find every cell within a distance of the nearest positive cell.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file holding a 2D number array, or `-` for stdin.
    grid: PathBuf,

    #[arg(short, long, default_value_t = 3)]
    distance: i64,

    /// brute_force or bfs
    #[arg(short, long, default_value = "brute_force")]
    algorithm: Algorithm,

    #[arg(long)]
    wrap_rows: bool,

    #[arg(long)]
    wrap_cols: bool,

    /// manhattan or chebyshev
    #[arg(long, default_value = "manhattan")]
    distance_type: DistanceType,

    /// Print an ASCII table of the neighborhood to stderr.
    #[arg(long)]
    ascii: bool,

    /// Save a distance heat map PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG.
    #[arg(long, default_value_t = 16)]
    scale: usize,

    /// Run both engines, report timings and check they agree.
    #[arg(long)]
    compare: bool,
}

fn read_matrix(path: &Path) -> anyhow::Result<Vec<Vec<f64>>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&text).context("grid must be a JSON array of number arrays")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = read_matrix(&args.grid)?;

    let params = SearchParams {
        distance: args.distance,
        algorithm: args.algorithm,
        wrap_rows: args.wrap_rows,
        wrap_cols: args.wrap_cols,
        distance_type: args.distance_type,
    };

    let out = grid_neighbors::neighborhood(&data, &params)?;

    eprintln!("Timings:");
    for t in &out.timings {
        eprintln!("  {:20} {:8.3} ms", t.name, t.ms);
    }

    if args.ascii || args.png.is_some() || args.compare {
        let grid = Grid::new(&data, params.grid_config())?;

        if args.ascii {
            eprintln!(
                "{}",
                render::ascii_table(&grid, out.max_distance, &out.cells, &AsciiOptions::default())
            );
        }

        if let Some(path) = &args.png {
            let (rows, cols) = grid.shape();
            let dist = render::distance_map(rows, cols, &out.cells);
            let rgba = render::render_distance(&dist, out.max_distance, args.scale);
            let scale = args.scale.max(1);
            image::save_buffer(
                path,
                &rgba,
                (cols * scale) as u32,
                (rows * scale) as u32,
                image::ColorType::Rgba8,
            )
            .with_context(|| format!("saving {}", path.display()))?;
            eprintln!("Saved {}", path.display());
        }

        if args.compare {
            let mut outputs = Vec::new();
            for algorithm in Algorithm::ALL {
                let search = Search::new(algorithm, &grid, params.distance)?;
                let start = std::time::Instant::now();
                let mut found: Vec<(i32, i32, u32)> = search
                    .find_neighbors()
                    .iter()
                    .map(|c| (c.row, c.col, c.value))
                    .collect();
                let ms = start.elapsed().as_secs_f64() * 1000.0;
                found.sort_unstable();
                eprintln!("  {:20} {:8.3} ms  {} cells", algorithm.as_str(), ms, found.len());
                outputs.push(found);
            }
            if outputs[0] != outputs[1] {
                bail!("brute_force and bfs disagree on {}", grid);
            }
            info!("engines agree");
        }
    }

    println!("{}", serde_json::to_string_pretty(&out.result)?);
    Ok(())
}
