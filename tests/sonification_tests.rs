// tests/sonification_tests.rs

use haiqu::sonification::{SonificationConfig, chord_for, chords_from_distribution, sonify_samples};
use haiqu::{HaiquError, WeightedSampler, data};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

#[test]
fn test_ghz_playback_only_uses_recorded_chords() -> Result<(), HaiquError> {
    let table = data::dist_ghz()?;
    let config = SonificationConfig::default();
    let sampler = WeightedSampler::new(&table);
    let mut rng = StdRng::seed_from_u64(3);

    let schedule = sonify_samples(&sampler, 32, &config, &mut rng);
    assert_eq!(schedule.len(), 32);

    let known: Vec<_> = table.entries().iter().map(|(k, _)| chord_for(k, &config)).collect();
    assert!(schedule.tasks().iter().all(|t| known.contains(&t.chord)));

    let step = config.note_duration + config.gap;
    assert_eq!(schedule.total_duration(), step * 31 + config.note_duration);
    Ok(())
}

#[test]
fn test_cancel_silences_whole_schedule() -> Result<(), HaiquError> {
    let table = data::dist_ghz()?;
    let config = SonificationConfig::default();
    let schedule = haiqu::PlaybackSchedule::sequence(
        chords_from_distribution(&table, &config).into_iter().map(|(_, chord)| chord),
        &config,
    );
    let elapsed = config.note_duration + config.gap + Duration::from_millis(10);
    assert_eq!(schedule.sounding_at(elapsed).len(), 1);

    let stop = schedule.token();
    stop.cancel();
    assert!(schedule.sounding_at(elapsed).is_empty());
    assert!(schedule.tasks().iter().all(|t| !t.is_live()));
    Ok(())
}
