//! Step-time benchmark across grid sizes, tile sizes and schedules

use std::time::Instant;
use compute_life::{Grid, Schedule, Stepper, domain::seed::random_cells};
use rand::{SeedableRng, rngs::StdRng};

fn random_grid(size: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    random_cells(size, size, 0.2, &mut rng)
        .and_then(|cells| Grid::from_cells(size, size, cells))
        .unwrap_or_else(|_| Grid::new(size, size))
}

/// Average milliseconds per generation
fn benchmark(stepper: &Stepper, size: usize, iterations: u32) -> f64 {
    let mut buffers = [random_grid(size), Grid::new(size, size)];
    let mut current = 0;

    let start = Instant::now();
    for _ in 0..iterations {
        let [first, second] = &mut buffers;
        let (source, target) = if current == 0 { (&*first, second) } else { (&*second, first) };
        if let Err(err) = stepper.step(source, target) {
            eprintln!("step failed: {err}");
            return f64::NAN;
        }
        current = 1 - current;
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Tiled Life Step Benchmark ===\n");

    let sizes = [100, 500, 1000, 2000, 5000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "Size", "Serial", "Tile 16", "Tile 30", "Tile 128", "Speedup");
    println!("{:-<74}", "");

    for size in sizes {
        let serial_ms = benchmark(&Stepper::new(30, Schedule::Serial), size, iterations);
        let tiled: Vec<f64> = [16, 30, 128]
            .into_iter()
            .map(|tile| benchmark(&Stepper::new(tile, Schedule::Tiled), size, iterations))
            .collect();
        let fastest = tiled.iter().copied().fold(f64::INFINITY, f64::min);

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            tiled[0],
            tiled[1],
            tiled[2],
            serial_ms / fastest
        );
    }

    println!("\n=== Thread Scaling (2000x2000, tile 30) ===\n");

    let cells = 2000 * 2000;
    for threads in [1, 2, 4, 8] {
        let stepper = match Stepper::new(30, Schedule::Tiled).with_threads(threads) {
            Ok(stepper) => stepper,
            Err(err) => {
                eprintln!("cannot build a {threads}-thread pool: {err}");
                continue;
            }
        };
        let ms = benchmark(&stepper, 2000, iterations);
        println!("{:>2} threads: {:>8.2} ms/gen, {:.1}M cells/sec",
            threads, ms, (cells as f64) / (ms / 1000.0) / 1_000_000.0);
    }
}
