use data_loader::{SimilarityIndex, SimilarityStore};
use std::path::Path;
use std::time::Instant;

fn main() {
    let model_dir = Path::new("model");

    println!("Loading similarity model...\n");

    let start = Instant::now();
    let index = SimilarityIndex::load_from_files(model_dir)
        .expect("Failed to load similarity model");
    let elapsed = start.elapsed();

    let movies = index.len();
    let cells = movies * movies;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Matrix cells: {}", cells);
    println!("Max asymmetry: {:.6}", index.max_asymmetry());
    println!("\nPerformance: {:.0} cells/second",
             cells as f64 / elapsed.as_secs_f64());
}
