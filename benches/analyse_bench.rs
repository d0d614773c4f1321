// Performance benchmarks for hanzi-stats analysis

use hanzi_stats::{filter_text, partition_hanzi, Analyser, DataLoader, GradeCatalog};
use std::time::Instant;

const SIMPLIFIED: &str = "这是我们的爱车。我们今天一起去学校，老师说话很好听。";
const TRADITIONAL: &str = "這是我們的愛車。我們今天一起去學校，老師說話很好聽。";

fn main() {
    println!("🏃 Hanzi-Stats Performance Benchmarks\n");

    let start = Instant::now();
    let analyser = Analyser::bundled().expect("Failed to load catalog");
    println!(
        "Catalog loaded: {} entries in {:.3}ms\n",
        analyser.catalog().len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    // Warmup
    let _ = analyser.analyse_text(SIMPLIFIED);

    bench_extract();
    bench_partition(analyser.catalog());
    bench_analyse(&analyser);
    bench_batch(&analyser);

    println!("\n✅ Benchmarks completed!");
}

fn bench_extract() {
    println!("🔤 EXTRACT (Han filter)");
    println!("───────────────────────");

    for repeat in [1, 100, 1000] {
        let text = SIMPLIFIED.repeat(repeat);
        let start = Instant::now();
        let hanzi = filter_text(&text);
        let duration = start.elapsed();

        println!(
            "  x{:<6} → {} hanzi in {:.3}ms",
            repeat,
            hanzi.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_partition(catalog: &GradeCatalog) {
    println!("📍 PARTITION (column lookup)");
    println!("────────────────────────────");

    for repeat in [1, 100, 1000] {
        let hanzi = filter_text(&TRADITIONAL.repeat(repeat));
        let start = Instant::now();
        let partition = partition_hanzi(&hanzi, catalog);
        let duration = start.elapsed();

        println!(
            "  x{:<6} → {} traditional in {:.3}ms",
            repeat,
            partition.traditional.len(),
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_analyse(analyser: &Analyser) {
    println!("🧮 FULL PIPELINE");
    println!("────────────────");

    for (name, text) in [("simplified", SIMPLIFIED), ("traditional", TRADITIONAL)] {
        let text = text.repeat(1000);
        let start = Instant::now();
        let analysis = analyser.analyse_text(&text);
        let duration = start.elapsed();

        println!(
            "  {:<12} → {} in {:.3}ms",
            name,
            analysis.variant,
            duration.as_secs_f64() * 1000.0
        );
    }
    println!();
}

fn bench_batch(analyser: &Analyser) {
    println!("📦 BATCH OPERATIONS");
    println!("─────────────────────");

    let texts: Vec<String> = (0..64)
        .map(|i| {
            if i % 2 == 0 {
                SIMPLIFIED.repeat(100)
            } else {
                TRADITIONAL.repeat(100)
            }
        })
        .collect();

    let start = Instant::now();
    for text in &texts {
        let _ = analyser.analyse_text(text);
    }
    let sequential = start.elapsed();

    let start = Instant::now();
    let results = analyser.analyse_batch(&texts);
    let parallel = start.elapsed();

    println!(
        "  {} texts sequential in {:.3}ms, parallel in {:.3}ms",
        results.len(),
        sequential.as_secs_f64() * 1000.0,
        parallel.as_secs_f64() * 1000.0
    );

    let info = DataLoader::info();
    println!("\n📊 Bundled Data");
    println!("─────────────────────────");
    println!("  Catalog: {} bytes", info.catalog_size);
    println!("  Ambiguous mappings: {} bytes", info.ambiguous_size);
}
