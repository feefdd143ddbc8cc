//! Option shuffling.
//!
//! Generators tend to put the right answer in the same slot, so every question
//! is reordered once before anyone sees it. The correct option is tracked by
//! identity through the permutation, not by text, so duplicate option strings
//! cannot confuse it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::model::Question;

/// Return `question` with its options uniformly permuted and
/// `correct_answer_index` pointing at the originally-correct option.
///
/// A question whose answer index is out of range is returned unchanged.
pub fn shuffle_options<R: Rng + ?Sized>(question: Question, rng: &mut R) -> Question {
    if question.correct_answer_index >= question.options.len() {
        log::warn!(
            "question {:?} has answer index {} for {} options; leaving order as generated",
            question.id,
            question.correct_answer_index,
            question.options.len()
        );
        return question;
    }

    let correct = question.correct_answer_index;
    let mut tagged: Vec<(String, bool)> = question
        .options
        .into_iter()
        .enumerate()
        .map(|(i, text)| (text, i == correct))
        .collect();

    // Fisher–Yates, walking from the last slot down.
    tagged.shuffle(rng);

    let correct_answer_index = tagged
        .iter()
        .position(|(_, is_correct)| *is_correct)
        .unwrap_or(correct);

    Question {
        options: tagged.into_iter().map(|(text, _)| text).collect(),
        correct_answer_index,
        ..question
    }
}

/// Shuffle every question independently.
pub fn shuffle_all<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions
        .into_iter()
        .map(|q| shuffle_options(q, rng))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn abcd(correct: usize) -> Question {
        Question {
            id: "q".into(),
            question_text: "Pick one".into(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer_index: correct,
            explanation: String::new(),
        }
    }

    fn sorted(options: &[String]) -> Vec<String> {
        let mut v = options.to_vec();
        v.sort();
        v
    }

    #[test]
    fn correct_option_follows_the_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let shuffled = shuffle_options(abcd(2), &mut rng);
            assert_eq!(shuffled.options[shuffled.correct_answer_index], "C");
            assert_eq!(sorted(&shuffled.options), vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn other_fields_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut q = abcd(0);
        q.explanation = "because".into();
        let shuffled = shuffle_options(q, &mut rng);
        assert_eq!(shuffled.id, "q");
        assert_eq!(shuffled.question_text, "Pick one");
        assert_eq!(shuffled.explanation, "because");
    }

    #[test]
    fn duplicate_texts_keep_the_tagged_slot() {
        let mut rng = StdRng::seed_from_u64(3);
        let q = Question {
            options: vec!["same".into(), "same".into(), "other".into(), "x".into()],
            correct_answer_index: 1,
            ..abcd(0)
        };
        for _ in 0..50 {
            let s = shuffle_options(q.clone(), &mut rng);
            assert_eq!(s.options[s.correct_answer_index], "same");
        }
    }

    #[test]
    fn every_ordering_is_about_equally_likely() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 48_000;
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

        for _ in 0..trials {
            let s = shuffle_options(abcd(0), &mut rng);
            *counts.entry(s.options).or_default() += 1;
        }

        assert_eq!(counts.len(), 24, "all 4! orderings must appear");
        let expected = trials / 24;
        for (ordering, n) in &counts {
            assert!(
                n.abs_diff(expected) < expected / 5,
                "ordering {ordering:?} seen {n} times, expected ~{expected}"
            );
        }
    }

    #[test]
    fn correct_position_is_spread_across_slots() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut slots = [0usize; 4];
        for _ in 0..4_000 {
            slots[shuffle_options(abcd(0), &mut rng).correct_answer_index] += 1;
        }
        for n in slots {
            assert!(n > 800 && n < 1_200, "slot counts {slots:?}");
        }
    }

    #[test]
    fn out_of_range_answer_is_left_alone() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = abcd(9);
        assert_eq!(shuffle_options(q.clone(), &mut rng), q);
    }

    #[test]
    fn short_option_lists_are_still_shuffled_consistently() {
        let mut rng = StdRng::seed_from_u64(11);
        let q = Question {
            options: vec!["yes".into(), "no".into()],
            correct_answer_index: 1,
            ..abcd(0)
        };
        for _ in 0..20 {
            let s = shuffle_options(q.clone(), &mut rng);
            assert_eq!(s.options[s.correct_answer_index], "no");
        }
    }

    #[test]
    fn shuffle_all_handles_each_question() {
        let mut rng = StdRng::seed_from_u64(2);
        let out = shuffle_all(vec![abcd(0), abcd(3)], &mut rng);
        assert_eq!(out[0].options[out[0].correct_answer_index], "A");
        assert_eq!(out[1].options[out[1].correct_answer_index], "D");
    }
}
