//! Synthetic trajectory used when no token file is given.

use glam::Vec3;
use rand::prelude::*;
use trails_core::TokenRecord;

const INPUT_WORDS: &[&str] = &["The", " quick", " brown", " fox"];
const OUTPUT_WORDS: &[&str] = &[" jumps", " over", " the", " lazy", " dog", "."];
const STEP_SCALE: f32 = 0.8;

// Outputs at these indices reuse the previous destination, giving a
// zero-length run whose labels merge into one.
const STACKED_OUTPUTS: std::ops::Range<usize> = 2..4;

/// Seeded random walk: a few input tokens, then output tokens. The third and
/// fourth outputs stay on the second output's point, so their labels render
/// as one merged label there.
pub fn demo_records(seed: u64) -> Vec<TokenRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Vec3::ZERO;
    let mut records = Vec::with_capacity(INPUT_WORDS.len() + OUTPUT_WORDS.len());

    for word in INPUT_WORDS {
        pos += random_step(&mut rng);
        records.push(TokenRecord::new(*word, pos, true));
    }
    for (i, word) in OUTPUT_WORDS.iter().enumerate() {
        if !STACKED_OUTPUTS.contains(&i) {
            pos += random_step(&mut rng);
        }
        records.push(TokenRecord::new(*word, pos, false));
    }
    records
}

fn random_step(rng: &mut StdRng) -> Vec3 {
    let v = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    // avoid accidental zero-length arrows
    v.try_normalize().unwrap_or(Vec3::X) * STEP_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use trails_core::{layout_labels, DEFAULT_FONT_SIZE};

    #[test]
    fn same_seed_same_trajectory() {
        assert_eq!(demo_records(7), demo_records(7));
        assert_ne!(demo_records(7), demo_records(8));
    }

    #[test]
    fn inputs_precede_outputs_with_one_stacked_run() {
        let records = demo_records(42);
        let inputs = records.iter().take_while(|r| r.is_input).count();
        assert_eq!(inputs, INPUT_WORDS.len());
        assert!(records[inputs..].iter().all(|r| !r.is_input));

        let outputs = &records[inputs..];
        assert_eq!(outputs[1].destination, outputs[2].destination);
        assert_eq!(outputs[2].destination, outputs[3].destination);
        let zero_length = records
            .windows(2)
            .filter(|pair| pair[0].destination == pair[1].destination)
            .count();
        assert_eq!(zero_length, STACKED_OUTPUTS.len());
    }

    #[test]
    fn stacked_outputs_share_one_merged_label() {
        let records = demo_records(3);
        let refs: Vec<&TokenRecord> = records.iter().collect();
        let labels = layout_labels(&refs, DEFAULT_FONT_SIZE);

        // one label per non-zero arrow plus a single merged label
        assert_eq!(labels.len(), records.len() - STACKED_OUTPUTS.len() + 1);
        let merged = labels
            .iter()
            .find(|l| l.text == "the lazy")
            .expect("merged label");
        assert!(!merged.is_input);
        assert_eq!(merged.position.y, records[INPUT_WORDS.len() + 1].destination.y);
    }
}
