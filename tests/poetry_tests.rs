// tests/poetry_tests.rs

use haiqu::{
    Axis, BitOrder, Bitstring, CorrelationMatrix, Decoder, HaiquError, PoemGenerator, check_binding_coverage, data,
    metrics,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bundled_decoder() -> Result<Decoder, HaiquError> {
    Decoder::uniform(BitOrder::HighToLow, data::poem_word_banks()?)
}

#[test]
fn test_decode_example_bits() -> Result<(), HaiquError> {
    let decoder = bundled_decoder()?;
    let bits = Bitstring::parse("000011010")?;
    assert_eq!(decoder.indices(&bits)?, vec![0, 3, 2]);
    let artifact = decoder.decode(&bits)?;
    assert_eq!(artifact.field("line2"), Some(data::MIDDLE_LINES[3]));
    Ok(())
}

#[test]
fn test_decoding_every_outcome_is_deterministic() -> Result<(), HaiquError> {
    let decoder = bundled_decoder()?;
    for value in 0..512 {
        let bits = Bitstring::from_index(value, 9)?;
        assert_eq!(decoder.decode(&bits)?, decoder.decode(&bits)?);
    }
    Ok(())
}

#[test]
fn test_bundled_bindings_cover_every_bit_once() -> Result<(), HaiquError> {
    for order in [BitOrder::HighToLow, BitOrder::LowToHigh] {
        let decoder = Decoder::uniform(order, data::poem_word_banks()?)?;
        let ranges: Vec<_> = decoder.bindings().iter().map(|b| b.range).collect();
        check_binding_coverage(decoder.width(), &ranges)?;
        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a, b);
            }
        }
    }
    Ok(())
}

#[test]
fn test_diagonal_row_held_rate() -> Result<(), HaiquError> {
    let matrix = data::bell_pair_matrix()?;
    assert_eq!(matrix.row(0)?, &[487, 25, 14, 2, 21, 0, 2, 0]);

    let mut rng = StdRng::seed_from_u64(487);
    let trials = 50_000;
    let mut held = 0;
    for _ in 0..trials {
        if matrix.derive(Axis::Row(0), &mut rng)?.held {
            held += 1;
        }
    }
    let expected = 487.0 / 551.0;
    let rate = held as f64 / trials as f64;
    assert!((rate - expected).abs() < 0.01, "held rate {} vs expected {}", rate, expected);
    Ok(())
}

#[test]
fn test_row_and_column_draws_agree_on_symmetric_matrix() -> Result<(), HaiquError> {
    let matrix = data::bell_pair_matrix()?;
    assert!(haiqu::is_symmetric(&matrix));
    let mut rng = StdRng::seed_from_u64(8);
    let trials = 20_000;

    for i in 0..matrix.size() {
        let mut from_row = vec![0u64; matrix.size()];
        let mut from_column = vec![0u64; matrix.size()];
        for _ in 0..trials {
            from_row[matrix.derive(Axis::Row(i), &mut rng)?.last] += 1;
            from_column[matrix.derive(Axis::Column(i), &mut rng)?.first] += 1;
        }
        for j in 0..matrix.size() {
            let diff = metrics::probability(from_row[j], trials) - metrics::probability(from_column[j], trials);
            assert!(diff.abs() < 0.02, "index {} -> {}: row/column frequencies differ by {}", i, j, diff);
        }
    }
    Ok(())
}

#[test]
fn test_zero_mass_line_never_errors() -> Result<(), HaiquError> {
    let matrix = CorrelationMatrix::new(vec![vec![0, 0, 0], vec![0, 4, 1], vec![0, 1, 4]])?;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..100 {
        let draw = matrix.derive(Axis::Row(0), &mut rng)?;
        assert_eq!((draw.first, draw.last), (0, 0));
        let draw = matrix.derive(Axis::Column(0), &mut rng)?;
        assert_eq!((draw.first, draw.last), (0, 0));
    }
    Ok(())
}

#[test]
fn test_poem_generator_end_to_end() -> Result<(), HaiquError> {
    haiqu::logging::try_init(&haiqu::logging::LoggingConfig::for_tests()).ok();
    let generator = PoemGenerator::bundled()?;
    let mut rng = StdRng::seed_from_u64(2025);

    let poem = generator.draw(&mut rng)?;
    println!("{}", poem);
    assert_eq!(generator.poem_for(poem.key())?, poem);

    let correlated = generator.correlated(Axis::Column(7), 4, &mut rng)?;
    println!("{}", correlated);
    assert_eq!(correlated.draw.last, 7);
    assert_eq!(correlated.artifact.field("line3"), Some(data::LAST_LINES[7]));

    let top = generator.top_poems(10)?;
    assert_eq!(top.len(), 10);
    for window in top.windows(2) {
        let (a, b) = (&window[0].0, &window[1].0);
        assert!(a.count > b.count || (a.count == b.count && a.key < b.key));
    }
    Ok(())
}
