use data_loader::ModelContext;
use std::path::Path;
use std::time::Instant;

fn main() {
    let model_dir = Path::new("model");

    println!("Loading recommendation model...\n");

    let start = Instant::now();
    let model = ModelContext::load_from_dir(model_dir)
        .expect("Failed to load model");
    let elapsed = start.elapsed();

    let (movies, size) = model.counts();
    let cells = size * size;

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Matrix: {}x{}", size, size);
    println!("\nPerformance: {:.0} scores/second",
             cells as f64 / elapsed.as_secs_f64());
}
