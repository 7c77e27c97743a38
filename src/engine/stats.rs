// src/engine/stats.rs

use std::collections::BTreeMap;

use crate::models::score::{HistogramBucket, LeaderboardEntry, ScoreRecord, Statistics};

/// Summarizes a percentage collection in one pass.
/// Empty input yields the all-zero summary, never a division by zero.
pub fn summarize(values: &[f64]) -> Statistics {
    if values.is_empty() {
        return Statistics::default();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }

    Statistics {
        count: values.len(),
        average: sum / values.len() as f64,
        min,
        max,
    }
}

/// Ranks historical records per subject: descending by percentage,
/// truncated to `top_n`. The sort is stable, so records with equal
/// percentages keep their input order across runs.
pub fn leaderboard(
    records: &[ScoreRecord],
    top_n: usize,
) -> BTreeMap<String, Vec<LeaderboardEntry>> {
    let mut by_subject: BTreeMap<String, Vec<LeaderboardEntry>> = BTreeMap::new();
    for record in records {
        by_subject
            .entry(record.subject.clone())
            .or_default()
            .push(LeaderboardEntry {
                user: record.user.clone(),
                percentage: record.percentage,
            });
    }

    for entries in by_subject.values_mut() {
        entries.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        entries.truncate(top_n);
    }

    by_subject
}

/// Buckets each subject's percentages into `bucket_count` equal-width
/// intervals spanning the observed min..max of that subject.
pub fn distribution(
    records: &[ScoreRecord],
    bucket_count: usize,
) -> BTreeMap<String, Vec<HistogramBucket>> {
    let mut by_subject: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_subject
            .entry(record.subject.clone())
            .or_default()
            .push(record.percentage);
    }

    by_subject
        .into_iter()
        .map(|(subject, values)| (subject, histogram(&values, bucket_count)))
        .collect()
}

/// Half-open binning with a closed final interval: a value exactly on an
/// interior edge lands in the bucket it starts, and the data maximum lands
/// in the last bucket. A degenerate sample (min == max) collapses to one
/// bucket holding every point.
fn histogram(values: &[f64], bucket_count: usize) -> Vec<HistogramBucket> {
    if values.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let stats = summarize(values);
    if stats.min == stats.max {
        return vec![HistogramBucket {
            lower: stats.min,
            upper: stats.max,
            count: values.len(),
        }];
    }

    let width = (stats.max - stats.min) / bucket_count as f64;
    let mut counts = vec![0usize; bucket_count];
    for &v in values {
        let index = (((v - stats.min) / width) as usize).min(bucket_count - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            lower: stats.min + width * i as f64,
            upper: if i + 1 == bucket_count {
                stats.max
            } else {
                stats.min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: &str, subject: &str, percentage: f64) -> ScoreRecord {
        ScoreRecord {
            user: user.to_string(),
            subject: subject.to_string(),
            score: 0,
            total: 5,
            percentage,
            taken_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn summarize_empty_is_all_zeros() {
        let stats = summarize(&[]);
        assert_eq!(
            stats,
            Statistics {
                count: 0,
                average: 0.0,
                min: 0.0,
                max: 0.0
            }
        );
    }

    #[test]
    fn summarize_three_values() {
        let stats = summarize(&[70.0, 90.0, 50.0]);
        assert_eq!(stats.count, 3);
        assert!((stats.average - 70.0).abs() < 1e-9);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 90.0);
    }

    #[test]
    fn leaderboard_sorts_and_truncates_per_subject() {
        let records = vec![
            record("ann", "Java", 60.0),
            record("bob", "Java", 85.0),
            record("cid", "Java", 85.0),
            record("dee", "Python", 40.0),
        ];

        let board = leaderboard(&records, 2);

        let java = &board["Java"];
        assert_eq!(java.len(), 2);
        // Stable sort: bob submitted before cid, so the tie keeps that order.
        assert_eq!(java[0].user, "bob");
        assert_eq!(java[1].user, "cid");
        assert_eq!(board["Python"].len(), 1);
    }

    #[test]
    fn leaderboard_keeps_small_groups_whole() {
        let records = vec![record("ann", "C", 30.0)];
        let board = leaderboard(&records, 10);
        assert_eq!(board["C"].len(), 1);
    }

    #[test]
    fn distribution_bins_boundaries_downward_except_maximum() {
        let records: Vec<ScoreRecord> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .map(|&p| record("ann", "C#", p))
            .collect();

        let histograms = distribution(&records, 2);
        let buckets = &histograms["C#"];

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0], HistogramBucket { lower: 10.0, upper: 30.0, count: 2 });
        // 30 opens the second bucket; 50 closes it as the data maximum.
        assert_eq!(buckets[1], HistogramBucket { lower: 30.0, upper: 50.0, count: 3 });
    }

    #[test]
    fn distribution_collapses_single_point_subjects() {
        let records = vec![record("ann", "Java", 75.0), record("bob", "Java", 75.0)];
        let histograms = distribution(&records, 10);
        let buckets = &histograms["Java"];

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0], HistogramBucket { lower: 75.0, upper: 75.0, count: 2 });
    }

    #[test]
    fn distribution_of_nothing_is_nothing() {
        assert!(distribution(&[], 10).is_empty());
    }

    #[test]
    fn distribution_counts_every_record_once() {
        let records: Vec<ScoreRecord> = (0..=100)
            .map(|p| record("ann", "Python", p as f64))
            .collect();
        let histograms = distribution(&records, 10);
        let buckets = &histograms["Python"];

        let counted: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(counted, records.len());
        assert_eq!(buckets.first().map(|b| b.lower), Some(0.0));
        assert_eq!(buckets.last().map(|b| b.upper), Some(100.0));
    }
}
