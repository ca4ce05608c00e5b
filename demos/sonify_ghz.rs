//! Prints the chord timeline for GHZ measurements of growing size, then
//! cancels playback halfway through.

use haiqu::logging::{self, LoggingConfig};
use haiqu::sonification::{SonificationConfig, sonify_samples};
use haiqu::{WeightedSampler, data};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::try_init(&LoggingConfig::default())?;

    let config = SonificationConfig::default();
    let mut rng = StdRng::seed_from_u64(3);

    for qubits in 2..=4 {
        let table = data::ghz_for_qubits(qubits)?;
        let sampler = WeightedSampler::new(&table);
        let schedule = sonify_samples(&sampler, 8, &config, &mut rng);

        println!("--- GHZ, {} qubits ({:?} total) ---", qubits, schedule.total_duration());
        for task in schedule.tasks() {
            println!("  +{:>5}ms  {}", task.offset.as_millis(), task.chord);
        }

        let halfway = schedule.total_duration() / 2;
        println!("  sounding at {:?}: {}", halfway, schedule.sounding_at(halfway).len());
        schedule.cancel();
        println!("  after cancel: {}", schedule.sounding_at(halfway).len());
        schedule.dispose();
    }
    Ok(())
}
