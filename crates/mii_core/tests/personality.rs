use mii_core::personality::{PersonalityTraits, PersonalityType, VoiceTraits, classify};
use proptest::prelude::*;
use rstest::rstest;

const GAPPED: [i32; 8] = [0, 1, 2, 3, 5, 6, 7, 8];

#[rstest]
#[case(0, 0, 0, 0, PersonalityType::IndependentLoneWolf)]
#[case(7, 8, 7, 8, PersonalityType::OutgoingEntertainer)]
// horizontal 4 leaves the first column, vertical 8 enters the second row
#[case(4, 0, 7, 1, PersonalityType::EasygoingDreamer)]
#[case(3, 0, 7, 0, PersonalityType::IndependentFreeSpirit)]
#[case(3, 0, 3, 0, PersonalityType::IndependentLoneWolf)]
#[case(0, 3, 4, 0, PersonalityType::IndependentFreeSpirit)]
#[case(7, 0, 7, 0, PersonalityType::IndependentArtist)]
#[case(7, 1, 7, 1, PersonalityType::OutgoingCharmer)]
#[case(7, 5, 7, 5, PersonalityType::OutgoingEntertainer)]
#[case(0, 0, 7, 5, PersonalityType::EasygoingSoftie)]
#[case(7, 8, 0, 0, PersonalityType::ConfidentGoGetter)]
#[case(7, 2, 0, 0, PersonalityType::ConfidentBrainiac)]
#[case(7, 2, 4, 0, PersonalityType::ConfidentDesigner)]
fn grid_boundaries(
    #[case] movement: i32,
    #[case] speech: i32,
    #[case] expressiveness: i32,
    #[case] attitude: i32,
    #[case] expected: PersonalityType,
) {
    assert_eq!(
        classify(movement, speech, expressiveness, attitude),
        expected,
        "classify({movement}, {speech}, {expressiveness}, {attitude})"
    );
}

#[rstest]
#[case(4, 5)]
#[case(-3, 0)]
#[case(40, 8)]
fn gapped_axes_are_normalised(#[case] raw: i32, #[case] equivalent: i32) {
    assert_eq!(classify(0, raw, 0, 0), classify(0, equivalent, 0, 0));
    assert_eq!(classify(0, 0, 0, raw), classify(0, 0, 0, equivalent));
}

#[test]
fn out_of_range_inputs_are_clamped() {
    assert_eq!(classify(100, 100, 100, 100), PersonalityType::OutgoingEntertainer);
    assert_eq!(
        classify(i32::MIN, i32::MIN, i32::MIN, i32::MIN),
        PersonalityType::IndependentLoneWolf
    );
}

#[test]
fn labels_are_distinct() {
    let mut labels: Vec<_> = PersonalityType::ALL.iter().map(|t| t.as_str()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 16);
    assert_eq!(PersonalityType::ConfidentGoGetter.to_string(), "Confident Go-getter");
}

#[test]
fn raw_bytes_map_to_trait_values() {
    let traits = PersonalityTraits::from_raw([1, 1, 1, 1, 0], VoiceTraits::default());
    assert_eq!(
        (traits.energy, traits.speech, traits.facial_expressions, traits.mood),
        (0, 0, 0, 0)
    );
    assert_eq!(traits.personality_type(), PersonalityType::IndependentLoneWolf);

    // speech and mood skip 4: stored 5 means 5, stored 4 means 3
    let traits = PersonalityTraits::from_raw([8, 5, 8, 4, 3], VoiceTraits::default());
    assert_eq!(traits.energy, 7);
    assert_eq!(traits.speech, 5);
    assert_eq!(traits.facial_expressions, 7);
    assert_eq!(traits.mood, 3);
    assert_eq!(traits.overall, 3);

    let empty = PersonalityTraits::from_raw([0; 5], VoiceTraits::default());
    assert_eq!(empty.energy, -1);
    assert_eq!(empty.personality_type(), PersonalityType::IndependentLoneWolf);
}

proptest! {
    #[test]
    fn classify_is_total_over_the_domain(
        movement in 0..=7i32,
        speech in prop::sample::select(GAPPED.to_vec()),
        expressiveness in 0..=7i32,
        attitude in prop::sample::select(GAPPED.to_vec()),
    ) {
        let label = classify(movement, speech, expressiveness, attitude);
        prop_assert!(PersonalityType::ALL.contains(&label));
    }

    #[test]
    fn classify_never_panics(a in any::<i32>(), b in any::<i32>(), c in any::<i32>(), d in any::<i32>()) {
        let label = classify(a, b, c, d);
        prop_assert!(PersonalityType::ALL.contains(&label));
    }

    #[test]
    fn more_movement_never_moves_left(
        movement in 0..7i32,
        speech in prop::sample::select(GAPPED.to_vec()),
        expressiveness in 0..=7i32,
        attitude in prop::sample::select(GAPPED.to_vec()),
    ) {
        let column = |t: PersonalityType| {
            PersonalityType::ALL.iter().position(|x| *x == t).map(|i| i % 4)
        };
        let before = column(classify(movement, speech, expressiveness, attitude));
        let after = column(classify(movement + 1, speech, expressiveness, attitude));
        prop_assert!(after >= before);
    }
}
