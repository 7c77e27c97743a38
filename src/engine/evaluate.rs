// src/engine/evaluate.rs

use std::collections::HashMap;

use crate::models::question::AnswerKey;
use crate::models::score::{QuizResult, TimingSummary};

use super::stats::summarize;

/// A user's submission for one attempt: a sparse map of question index to
/// selected option index, plus optional per-question elapsed times.
/// An absent question index means "unanswered" and scores as incorrect.
#[derive(Debug, Clone, Default)]
pub struct SubmittedAnswers {
    pub selected: HashMap<usize, usize>,
    pub elapsed_seconds: Vec<f64>,
}

struct GradeBand {
    floor: f64,
    letter: &'static str,
    remark: &'static str,
    color: &'static str,
}

/// Ordered grade table, scanned top-down, first satisfied floor wins.
/// The final entry is unconditional, so classification is total over all
/// reals (NaN and out-of-range percentages fall through to it).
const GRADE_BANDS: &[GradeBand] = &[
    GradeBand { floor: 90.0, letter: "A+", remark: "Outstanding", color: "#5BC0BE" },
    GradeBand { floor: 80.0, letter: "A", remark: "Excellent", color: "#5BC0BE" },
    GradeBand { floor: 70.0, letter: "B", remark: "Very Good", color: "#5BC0BE" },
    GradeBand { floor: 60.0, letter: "C", remark: "Good Job", color: "#5BC0BE" },
    GradeBand { floor: 50.0, letter: "D", remark: "Keep Trying", color: "#3A506B" },
    GradeBand { floor: f64::NEG_INFINITY, letter: "F", remark: "Practice More", color: "#3A506B" },
];

fn classify(percentage: f64) -> &'static GradeBand {
    for band in GRADE_BANDS {
        if percentage >= band.floor {
            return band;
        }
    }
    // Only reachable for NaN, which compares false against every floor.
    &GRADE_BANDS[GRADE_BANDS.len() - 1]
}

/// Grades one attempt against its answer key.
///
/// An answer counts as correct iff it was submitted for that question index
/// and equals the key's correct option. Missing or out-of-range answers are
/// simply incorrect; a key whose own `correct_index` does not address an
/// option can never be answered correctly. An empty key yields the zero
/// result rather than dividing by zero.
pub fn evaluate(key: &AnswerKey, answers: &SubmittedAnswers) -> QuizResult {
    let total = key.questions.len();
    let mut score = 0usize;

    for (i, question) in key.questions.iter().enumerate() {
        let correct_in_range = question.correct_index < question.options.len();
        if let Some(&picked) = answers.selected.get(&i) {
            if correct_in_range && picked == question.correct_index {
                score += 1;
            }
        }
    }

    let percentage = if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let band = classify(percentage);

    QuizResult {
        subject: key.subject.clone(),
        score: score as u32,
        total: total as u32,
        percentage,
        grade: band.letter.to_string(),
        remark: band.remark.to_string(),
        color: band.color.to_string(),
        timing: timing_summary(&answers.elapsed_seconds),
    }
}

/// Folds the recorded per-question times, reusing the same summary
/// semantics as the percentage statistics. None when nothing was recorded.
fn timing_summary(elapsed: &[f64]) -> Option<TimingSummary> {
    if elapsed.is_empty() {
        return None;
    }
    let stats = summarize(elapsed);
    Some(TimingSummary {
        total_seconds: elapsed.iter().sum(),
        average_seconds: stats.average,
        fastest_seconds: stats.min,
        slowest_seconds: stats.max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;

    fn key(subject: &str, correct: &[usize]) -> AnswerKey {
        AnswerKey {
            subject: subject.to_string(),
            questions: correct
                .iter()
                .map(|&c| Question {
                    text: format!("q{}", c),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_index: c,
                })
                .collect(),
        }
    }

    fn answers(pairs: &[(usize, usize)]) -> SubmittedAnswers {
        SubmittedAnswers {
            selected: pairs.iter().copied().collect(),
            elapsed_seconds: Vec::new(),
        }
    }

    #[test]
    fn grades_mixed_attempt() {
        // 4 of 5 correct: the answer for index 3 is out of range.
        let key = key("Python", &[2, 3, 0, 1, 0]);
        let submitted = answers(&[(0, 2), (1, 3), (2, 0), (3, 9), (4, 0)]);

        let result = evaluate(&key, &submitted);

        assert_eq!(result.score, 4);
        assert_eq!(result.total, 5);
        assert!((result.percentage - 80.0).abs() < f64::EPSILON);
        assert_eq!(result.grade, "A");
        assert_eq!(result.remark, "Excellent");
        assert!(result.timing.is_none());
    }

    #[test]
    fn no_answers_scores_zero() {
        let key = key("Java", &[0, 1, 2]);
        let result = evaluate(&key, &SubmittedAnswers::default());

        assert_eq!(result.score, 0);
        assert_eq!(result.total, 3);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.grade, "F");
    }

    #[test]
    fn empty_key_yields_zero_result() {
        let key = AnswerKey {
            subject: "Ghost".to_string(),
            questions: Vec::new(),
        };
        let result = evaluate(&key, &answers(&[(0, 0)]));

        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn score_is_bounded_by_total() {
        let key = key("C", &[0, 0]);
        // Duplicate-looking and stray indices must not inflate the score.
        let submitted = answers(&[(0, 0), (1, 0), (7, 0)]);
        let result = evaluate(&key, &submitted);

        assert_eq!(result.score, 2);
        assert_eq!(result.total, 2);
        assert!((result.percentage - (result.score as f64 / result.total as f64) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_correct_index_is_never_correct() {
        let mut key = key("C#", &[1]);
        key.questions[0].correct_index = 42;
        let result = evaluate(&key, &answers(&[(0, 42)]));

        assert_eq!(result.score, 0);
    }

    #[test]
    fn grade_thresholds_are_monotonic() {
        let order = ["F", "D", "C", "B", "A", "A+"];
        let rank = |letter: &str| order.iter().position(|g| *g == letter).unwrap();

        let mut prev = rank(classify(0.0).letter);
        for p in 1..=100 {
            let current = rank(classify(p as f64).letter);
            assert!(current >= prev, "grade dropped at p={}", p);
            prev = current;
        }
    }

    #[test]
    fn grade_boundaries_first_match_wins() {
        assert_eq!(classify(90.0).letter, "A+");
        assert_eq!(classify(89.999).letter, "A");
        assert_eq!(classify(50.0).letter, "D");
        assert_eq!(classify(49.999).letter, "F");
        // Out-of-range inputs must not panic.
        assert_eq!(classify(-5.0).letter, "F");
        assert_eq!(classify(150.0).letter, "A+");
        assert_eq!(classify(f64::NAN).letter, "F");
    }

    #[test]
    fn timing_does_not_change_score() {
        let key = key("Python", &[0, 1]);
        let mut submitted = answers(&[(0, 0), (1, 1)]);
        submitted.elapsed_seconds = vec![2.0, 6.0];

        let result = evaluate(&key, &submitted);

        assert_eq!(result.score, 2);
        let timing = result.timing.expect("times were recorded");
        assert!((timing.total_seconds - 8.0).abs() < 1e-9);
        assert!((timing.average_seconds - 4.0).abs() < 1e-9);
        assert!((timing.fastest_seconds - 2.0).abs() < 1e-9);
        assert!((timing.slowest_seconds - 6.0).abs() < 1e-9);
    }
}
