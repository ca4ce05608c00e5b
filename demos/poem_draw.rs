//! Draws a few poems from the recorded nine-qubit poem circuit and prints
//! the most likely ones.

use haiqu::logging::{self, LoggingConfig};
use haiqu::metrics::{self, Report, ReportConfig};
use haiqu::{PoemGenerator, WeightedSampler};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::try_init(&LoggingConfig::default())?;

    let generator = PoemGenerator::bundled()?;
    let config = ReportConfig::default();
    let mut rng = StdRng::seed_from_u64(9);

    println!("{}", generator.decoder());

    for i in 1..=3 {
        let poem = generator.draw(&mut rng)?;
        println!("--- Poem {} ---\n{}\n", i, poem);
    }

    println!("--- Top {} poems by probability ---", config.top_n);
    for (entry, poem) in generator.top_poems(config.top_n)? {
        println!(
            "#{:<2} |{}> {}%  {}",
            entry.rank,
            entry.key,
            metrics::format_percentage(entry.probability, config.decimals),
            poem.lines().join(" / ")
        );
    }

    let sampler = WeightedSampler::new(generator.table());
    let sample = sampler.sample(&mut rng);
    println!("\nSingle draw report: {}", Report::from_sample(&sample, &config));
    Ok(())
}
