use chrono::NaiveDate;
use serde::Serialize;

use crate::pkg::internal::candidate::Candidate;
use crate::pkg::internal::profile::Profile;

use super::classify::{classify_status, ScoreBands};
use super::filter::{apply, FilterCriteria};
use super::stats::{score_distribution, summarize, trend_series};

/// Declarative description of the admin dashboard: everything is already a
/// display string or a css class, so presentation layers (JSON or HTML)
/// add no computation of their own.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub trend: Vec<TrendPointView>,
    pub distribution: Vec<DistributionRow>,
    pub rows: Vec<CandidateRow>,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub total: usize,
    pub recommended: usize,
    pub average_score: String,
    pub average_duration: String,
}

#[derive(Debug, Serialize)]
pub struct TrendPointView {
    pub date: String,
    pub label: String,
    pub total: u32,
    pub recommended: u32,
    pub bar_pct: u32,
}

#[derive(Debug, Serialize)]
pub struct DistributionRow {
    pub label: String,
    pub count: u32,
    pub css_class: String,
    pub bar_pct: u32,
}

#[derive(Debug, Serialize)]
pub struct CandidateRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    pub score: String,
    pub score_class: String,
    pub status: String,
    pub status_class: String,
    pub date: String,
}

pub fn build_dashboard(
    candidates: &[Candidate],
    criteria: &FilterCriteria,
    bands: &ScoreBands,
    today: NaiveDate,
) -> DashboardView {
    // analytics always read the full list; only the table is filtered
    let summary = summarize(candidates);
    let trend = trend_series(candidates, today);
    let distribution = score_distribution(candidates, bands);
    let filtered = apply(candidates, criteria, today);

    let max_trend = trend.iter().map(|point| point.total).max().unwrap_or(0).max(1);
    let trend = trend
        .into_iter()
        .map(|point| TrendPointView {
            date: point.date.format("%Y-%m-%d").to_string(),
            label: point.date.format("%-m/%-d").to_string(),
            total: point.total,
            recommended: point.recommended,
            bar_pct: point.total * 100 / max_trend,
        })
        .collect();

    let counts = [
        ("Excellent", format!("{:.0}+", bands.excellent), distribution.excellent, "score-excellent"),
        ("Good", format!("{:.0}+", bands.good), distribution.good, "score-good"),
        ("Fair", format!("{:.0}+", bands.fair), distribution.fair, "score-fair"),
        ("Poor", format!("below {:.0}", bands.fair), distribution.poor, "score-poor"),
    ];
    let max_band = counts.iter().map(|(_, _, count, _)| *count).max().unwrap_or(0).max(1);
    let distribution = counts
        .into_iter()
        .map(|(name, bound, count, css_class)| DistributionRow {
            label: format!("{} ({})", name, bound),
            count,
            css_class: css_class.into(),
            bar_pct: count * 100 / max_band,
        })
        .collect();

    DashboardView {
        summary: SummaryView {
            total: summary.total,
            recommended: summary.recommended,
            average_score: format!("{:.1}", summary.average_score),
            average_duration: format!("{}m", summary.average_duration_min),
        },
        trend,
        distribution,
        rows: candidate_rows(&filtered, bands, today),
    }
}

fn candidate_rows(filtered: &[Candidate], bands: &ScoreBands, today: NaiveDate) -> Vec<CandidateRow> {
    filtered
        .iter()
        .map(|candidate| {
            let (score, score_class) = match candidate.score() {
                // absent or non-numeric scores display as N/A in the poorest badge
                None => ("N/A".to_string(), "score-poor"),
                Some(score) => (format!("{:.1}", score), bands.band(score).css_class()),
            };
            let (status, status_class) = if candidate.status().is_empty() {
                ("Pending".to_string(), "status-pending")
            } else {
                // display text stays verbatim; only the badge class is derived
                (
                    candidate.status().to_string(),
                    classify_status(candidate.status()).css_class(),
                )
            };
            CandidateRow {
                id: candidate.id.clone(),
                name: if candidate.name().is_empty() {
                    "N/A".to_string()
                } else {
                    candidate.name().to_string()
                },
                email: candidate.email().to_string(),
                position: candidate.position().to_string(),
                score,
                score_class: score_class.into(),
                status,
                status_class: status_class.into(),
                date: candidate.interview_date(today).format("%-m/%-d/%Y").to_string(),
            }
        })
        .collect()
}

/// Declarative description of the candidate cards page.
#[derive(Debug, Serialize)]
pub struct CardsView {
    pub total: usize,
    pub total_questions: usize,
    pub cards: Vec<ProfileCard>,
}

#[derive(Debug, Serialize)]
pub struct ProfileCard {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub profession: String,
    pub skills: Vec<String>,
    pub question_count: usize,
}

pub fn build_cards(profiles: &[Profile], search: Option<&str>) -> CardsView {
    // headline stats cover the full list even while the grid is filtered
    let total = profiles.len();
    let total_questions = profiles.iter().map(Profile::question_count).sum();
    let cards = profiles
        .iter()
        .filter(|profile| match search {
            Some(term) => profile.matches_search(term),
            None => true,
        })
        .map(|profile| ProfileCard {
            id: profile.id.clone(),
            name: or_unknown(profile.name()),
            initials: profile.initials(),
            email: or_na(profile.email()),
            phone: or_na(profile.phone()),
            profession: or_na(profile.profession()),
            skills: profile.skills(),
            question_count: profile.question_count(),
        })
        .collect();
    CardsView {
        total,
        total_questions,
        cards,
    }
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".into()
    } else {
        value.into()
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        "Unknown".into()
    } else {
        value.into()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::pkg::internal::candidate::test_candidate;
    use crate::pkg::internal::profile::test_profile;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn rows_default_missing_scores_to_na() {
        let candidates = vec![test_candidate("rec1", json!({"candidateName": "Ada"}))];
        let view = build_dashboard(
            &candidates,
            &FilterCriteria::default(),
            &ScoreBands::default(),
            today(),
        );
        let row = &view.rows[0];
        assert_eq!(row.score, "N/A");
        assert_eq!(row.score_class, "score-poor");
        // ...while the aggregate treats the same missing score as zero
        assert_eq!(view.summary.average_score, "0.0");
    }

    #[test]
    fn rows_keep_status_text_verbatim() {
        let candidates = vec![
            test_candidate("rec1", json!({"status": "Strongly Selected"})),
            test_candidate("rec2", json!({})),
        ];
        let view = build_dashboard(
            &candidates,
            &FilterCriteria::default(),
            &ScoreBands::default(),
            today(),
        );
        assert_eq!(view.rows[0].status, "Strongly Selected");
        assert_eq!(view.rows[0].status_class, "status-recommended");
        assert_eq!(view.rows[1].status, "Pending");
        assert_eq!(view.rows[1].status_class, "status-pending");
    }

    #[test]
    fn trend_and_distribution_are_fully_stringified() {
        let candidates = vec![test_candidate(
            "rec1",
            json!({"overallScore": "47", "reportGeneratedAt": "2024-01-20"}),
        )];
        let view = build_dashboard(
            &candidates,
            &FilterCriteria::default(),
            &ScoreBands::default(),
            today(),
        );
        assert_eq!(view.trend.len() as i64, super::super::stats::TREND_WINDOW_DAYS);
        assert_eq!(view.trend.last().unwrap().label, "1/20");
        assert_eq!(view.trend.last().unwrap().bar_pct, 100);
        assert_eq!(view.distribution[0].label, "Excellent (45+)");
        assert_eq!(view.distribution[0].count, 1);
    }

    #[test]
    fn cards_stats_cover_the_full_list_while_the_grid_filters() {
        let profiles = vec![
            test_profile(
                "rec1",
                json!({"Name": "Grace Hopper", "profession": "Engineer",
                        "PrimarySkillsQuestions": "1. One? 2. Two?"}),
            ),
            test_profile("rec2", json!({"Name": "Jean Bartik", "profession": "Analyst"})),
        ];
        let view = build_cards(&profiles, Some("engineer"));
        assert_eq!(view.total, 2);
        assert_eq!(view.total_questions, 2);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].name, "Grace Hopper");
        assert_eq!(view.cards[0].initials, "GH");
        assert_eq!(view.cards[0].email, "N/A");
    }
}
