//! Entangled first/last poem lines: fix one side, let the recorded Bell
//! pair counts choose the other, and see how often noise breaks the pair.

use haiqu::logging::{self, LoggingConfig};
use haiqu::{Axis, PoemGenerator, metrics};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::try_init(&LoggingConfig::default())?;

    let generator = PoemGenerator::bundled()?;
    let matrix = generator.matrix();
    let mut rng = StdRng::seed_from_u64(42);

    println!("Bell pair joint counts:\n{}", matrix);
    println!(
        "Correlation held in {}% of recorded shots\n",
        metrics::format_percentage(metrics::correlation_rate(matrix), 2)
    );

    for (i, axis) in [Axis::Row(0), Axis::Row(3), Axis::Column(6)].into_iter().enumerate() {
        let poem = generator.correlated(axis, i, &mut rng)?;
        println!("{:?}:\n{}\n", axis, poem);
    }

    let trials = 10_000;
    let mut held = 0u64;
    for _ in 0..trials {
        if matrix.derive(Axis::Row(0), &mut rng)?.held {
            held += 1;
        }
    }
    println!(
        "Row 0 held in {}% of {} simulated draws",
        metrics::format_percentage(metrics::probability(held, trials), 2),
        trials
    );
    Ok(())
}
