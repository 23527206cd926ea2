use chrono::{Duration, NaiveDate};

use crate::pkg::internal::candidate::Candidate;

use super::classify::{duration_minutes_or_default, ScoreBand, ScoreBands, DEFAULT_DURATION_MIN};

/// Length of the dense trend series: the trailing 30 calendar days ending
/// today, inclusive.
pub const TREND_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub recommended: usize,
    pub average_score: f64,
    pub average_duration_min: u32,
}

/// Headline numbers over the FULL candidate list (never the filtered view).
pub fn summarize(candidates: &[Candidate]) -> Summary {
    let total = candidates.len();
    let recommended = candidates
        .iter()
        .filter(|candidate| is_selected(candidate))
        .count();
    let score_sum: f64 = candidates
        .iter()
        .map(|candidate| candidate.score().unwrap_or(0.0))
        .sum();
    // the divisor is floored at 1 so an empty list averages to 0
    let average_score = score_sum / total.max(1) as f64;
    Summary {
        total,
        recommended,
        average_score,
        average_duration_min: average_duration(candidates),
    }
}

// analytics counts "recommended" by the select keyword alone
fn is_selected(candidate: &Candidate) -> bool {
    candidate.status().to_lowercase().contains("select")
}

fn average_duration(candidates: &[Candidate]) -> u32 {
    if candidates.is_empty() {
        return DEFAULT_DURATION_MIN;
    }
    let sum: u32 = candidates
        .iter()
        .map(|candidate| duration_minutes_or_default(candidate.duration()))
        .sum();
    (f64::from(sum) / candidates.len() as f64).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: u32,
    pub recommended: u32,
}

/// Dense per-day series over the trailing window. Days without candidates
/// report zeros; candidates without a report date do not contribute.
pub fn trend_series(candidates: &[Candidate], today: NaiveDate) -> Vec<TrendPoint> {
    let start = today - Duration::days(TREND_WINDOW_DAYS - 1);
    let mut series: Vec<TrendPoint> = (0..TREND_WINDOW_DAYS)
        .map(|offset| TrendPoint {
            date: start + Duration::days(offset),
            total: 0,
            recommended: 0,
        })
        .collect();
    for candidate in candidates {
        if let Some(date) = candidate.report_date() {
            if date < start || date > today {
                continue;
            }
            let index = (date - start).num_days() as usize;
            series[index].total += 1;
            if is_selected(candidate) {
                series[index].recommended += 1;
            }
        }
    }
    series
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreDistribution {
    pub excellent: u32,
    pub good: u32,
    pub fair: u32,
    pub poor: u32,
}

/// Partition over the four score bands; a missing score counts as 0.
pub fn score_distribution(candidates: &[Candidate], bands: &ScoreBands) -> ScoreDistribution {
    let mut distribution = ScoreDistribution::default();
    for candidate in candidates {
        match bands.band(candidate.score().unwrap_or(0.0)) {
            ScoreBand::Excellent => distribution.excellent += 1,
            ScoreBand::Good => distribution.good += 1,
            ScoreBand::Fair => distribution.fair += 1,
            ScoreBand::Poor => distribution.poor += 1,
        }
    }
    distribution
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::pkg::internal::candidate::test_candidate;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn summary_scenario() {
        let candidates = vec![
            test_candidate(
                "rec1",
                json!({"overallScore": "47", "status": "Selected", "reportGeneratedAt": "2024-01-10"}),
            ),
            test_candidate(
                "rec2",
                json!({"overallScore": "20", "status": "Rejected", "reportGeneratedAt": "2024-01-05"}),
            ),
        ];
        let summary = summarize(&candidates);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.recommended, 1);
        assert!((summary.average_score - 33.5).abs() < f64::EPSILON);

        let distribution = score_distribution(&candidates, &ScoreBands::default());
        assert_eq!(distribution.excellent, 1);
        assert_eq!(distribution.poor, 1);
        assert_eq!(distribution.good + distribution.fair, 0);
    }

    #[test]
    fn empty_list_has_no_division_fault() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.average_duration_min, DEFAULT_DURATION_MIN);
    }

    #[test]
    fn unscored_candidates_average_as_zero_but_display_elsewhere() {
        let candidates = vec![
            test_candidate("rec1", json!({"overallScore": "40"})),
            test_candidate("rec2", json!({})),
        ];
        let summary = summarize(&candidates);
        assert!((summary.average_score - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn durations_substitute_the_default() {
        let candidates = vec![
            test_candidate("rec1", json!({"interviewDuration": "45:00"})),
            test_candidate("rec2", json!({"interviewDuration": "not recorded"})),
            test_candidate("rec3", json!({})),
        ];
        // (45 + 25 + 25) / 3 rounds to 32
        assert_eq!(summarize(&candidates).average_duration_min, 32);
    }

    #[test]
    fn trend_is_dense_and_windowed() {
        let candidates = vec![
            test_candidate(
                "rec1",
                json!({"reportGeneratedAt": "2024-01-20", "status": "Selected"}),
            ),
            test_candidate("rec2", json!({"reportGeneratedAt": "2024-01-20"})),
            test_candidate("rec3", json!({"reportGeneratedAt": "2024-01-01"})),
            // outside the trailing window: 2023-12-01
            test_candidate("rec4", json!({"reportGeneratedAt": "2023-12-01"})),
            // future-dated: excluded from the series
            test_candidate("rec5", json!({"reportGeneratedAt": "2024-02-01"})),
            // undated: skipped
            test_candidate("rec6", json!({})),
        ];
        let series = trend_series(&candidates, today());
        assert_eq!(series.len() as i64, TREND_WINDOW_DAYS);
        assert_eq!(series.first().unwrap().date, today() - Duration::days(29));
        assert_eq!(series.last().unwrap().date, today());

        let last = series.last().unwrap();
        assert_eq!((last.total, last.recommended), (2, 1));
        let jan_first = series
            .iter()
            .find(|point| point.date == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap();
        assert_eq!((jan_first.total, jan_first.recommended), (1, 0));

        let populated: u32 = series.iter().map(|point| point.total).sum();
        assert_eq!(populated, 3);
        assert!(series
            .iter()
            .all(|point| point.date >= today() - Duration::days(29) && point.date <= today()));
    }
}
