use chrono::NaiveDate;

use crate::pkg::internal::candidate::Candidate;

use super::classify::{classify_status, StatusClass};

/// Relative date window anchored at "today". Anything unrecognized
/// disables the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    Today,
    Week,
    Month,
    Quarter,
    #[default]
    All,
}

impl DateWindow {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "today" => DateWindow::Today,
            "week" => DateWindow::Week,
            "month" => DateWindow::Month,
            "quarter" => DateWindow::Quarter,
            _ => DateWindow::All,
        }
    }

    fn max_age_days(&self) -> Option<i64> {
        match self {
            DateWindow::Today => Some(0),
            DateWindow::Week => Some(7),
            DateWindow::Month => Some(30),
            DateWindow::Quarter => Some(90),
            DateWindow::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Recommended,
    NotRecommended,
    Pending,
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "recommended" => Some(StatusFilter::Recommended),
            "not-recommended" => Some(StatusFilter::NotRecommended),
            "pending" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    fn class(&self) -> StatusClass {
        match self {
            StatusFilter::Recommended => StatusClass::Recommended,
            StatusFilter::NotRecommended => StatusClass::NotRecommended,
            StatusFilter::Pending => StatusClass::Pending,
        }
    }
}

/// Active filter criteria; all active criteria must hold (logical AND).
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub position: Option<String>,
    pub window: DateWindow,
}

impl FilterCriteria {
    pub fn from_params(
        search: Option<String>,
        status: Option<String>,
        position: Option<String>,
        window: Option<String>,
    ) -> Self {
        FilterCriteria {
            search: normalize(search),
            status: status.as_deref().and_then(StatusFilter::parse),
            position: normalize(position),
            window: window
                .as_deref()
                .map(DateWindow::parse)
                .unwrap_or_default(),
        }
    }
}

fn normalize(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

/// Filters the FULL candidate list against the criteria and re-applies the
/// canonical order. The result is a fresh projection every time; it is
/// never derived from a previously filtered list.
pub fn apply(candidates: &[Candidate], criteria: &FilterCriteria, today: NaiveDate) -> Vec<Candidate> {
    let mut selected: Vec<Candidate> = candidates
        .iter()
        .filter(|candidate| matches(candidate, criteria, today))
        .cloned()
        .collect();
    sort_by_date_desc(&mut selected, today);
    selected
}

/// Canonical ordering: most recent interview date first. Stable, so equal
/// dates keep their upstream order across re-renders.
pub fn sort_by_date_desc(candidates: &mut [Candidate], today: NaiveDate) {
    candidates.sort_by(|a, b| b.interview_date(today).cmp(&a.interview_date(today)));
}

fn matches(candidate: &Candidate, criteria: &FilterCriteria, today: NaiveDate) -> bool {
    if let Some(wanted) = criteria.status {
        // a record with no status text is never excluded by a category
        let status = candidate.status();
        if !status.is_empty() && classify_status(status) != wanted.class() {
            return false;
        }
    }
    if let Some(position) = &criteria.position {
        let have = candidate.position();
        if !have.is_empty() && !have.to_lowercase().contains(position) {
            return false;
        }
    }
    if let Some(max_age) = criteria.window.max_age_days() {
        let age = (today - candidate.interview_date(today)).num_days();
        if age > max_age {
            return false;
        }
    }
    if let Some(term) = &criteria.search {
        if !candidate.name().to_lowercase().contains(term)
            && !candidate.email().to_lowercase().contains(term)
            && !candidate.position().to_lowercase().contains(term)
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::pkg::internal::candidate::test_candidate;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn roster() -> Vec<Candidate> {
        vec![
            test_candidate(
                "rec1",
                json!({
                    "candidateName": "Ada Lovelace",
                    "candidateEmail": "ada@example.com",
                    "positionApplied": "Engineer",
                    "status": "Selected",
                    "reportGeneratedAt": "2024-03-14",
                }),
            ),
            test_candidate(
                "rec2",
                json!({
                    "candidateName": "Bob Crane",
                    "candidateEmail": "bob@example.com",
                    "positionApplied": "Manager",
                    "status": "Rejected",
                    "reportGeneratedAt": "2024-02-01",
                }),
            ),
            test_candidate(
                "rec3",
                json!({
                    "candidateName": "Cleo Park",
                    "candidateEmail": "cleo@example.com",
                    "positionApplied": "Engineer",
                    "status": "On Hold",
                    "reportGeneratedAt": "2024-03-15",
                }),
            ),
        ]
    }

    #[test]
    fn search_matches_position_substring() {
        let criteria = FilterCriteria::from_params(Some("eng".into()), None, None, None);
        let hits = apply(&roster(), &criteria, today());
        let names: Vec<&str> = hits.iter().map(Candidate::name).collect();
        assert_eq!(names, vec!["Cleo Park", "Ada Lovelace"]);
    }

    #[test]
    fn criteria_combine_with_logical_and() {
        let criteria = FilterCriteria::from_params(
            Some("example.com".into()),
            Some("recommended".into()),
            Some("engineer".into()),
            Some("week".into()),
        );
        let hits = apply(&roster(), &criteria, today());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Ada Lovelace");
    }

    #[test]
    fn date_windows_bound_candidate_age() {
        let all = roster();
        let week = FilterCriteria::from_params(None, None, None, Some("week".into()));
        assert_eq!(apply(&all, &week, today()).len(), 2);
        let quarter = FilterCriteria::from_params(None, None, None, Some("quarter".into()));
        assert_eq!(apply(&all, &quarter, today()).len(), 3);
        let today_only = FilterCriteria::from_params(None, None, None, Some("today".into()));
        let hits = apply(&all, &today_only, today());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Cleo Park");
    }

    #[test]
    fn unrecognized_window_disables_the_date_filter() {
        let criteria = FilterCriteria::from_params(None, None, None, Some("fortnight".into()));
        assert_eq!(apply(&roster(), &criteria, today()).len(), 3);
    }

    #[test]
    fn missing_fields_never_exclude() {
        let blank = vec![test_candidate("rec9", json!({}))];
        let criteria = FilterCriteria::from_params(
            None,
            Some("recommended".into()),
            Some("engineer".into()),
            Some("today".into()),
        );
        // no status, no position, no date: passes category and window filters
        assert_eq!(apply(&blank, &criteria, today()).len(), 1);
        // but a text search still treats missing fields as empty strings
        let searched = FilterCriteria::from_params(Some("ada".into()), None, None, None);
        assert!(apply(&blank, &searched, today()).is_empty());
    }

    #[test]
    fn ambiguous_status_lands_in_not_recommended() {
        let tricky = vec![test_candidate("rec8", json!({"status": "Not Recommended"}))];
        let recommended = FilterCriteria::from_params(None, Some("recommended".into()), None, None);
        assert!(apply(&tricky, &recommended, today()).is_empty());
        let not_recommended =
            FilterCriteria::from_params(None, Some("not-recommended".into()), None, None);
        assert_eq!(apply(&tricky, &not_recommended, today()).len(), 1);
    }

    #[test]
    fn filtering_is_idempotent_and_resorts() {
        let criteria = FilterCriteria::from_params(None, None, None, None);
        let once = apply(&roster(), &criteria, today());
        let twice = apply(&once, &criteria, today());
        let order =
            |list: &[Candidate]| list.iter().map(|c| c.id.clone()).collect::<Vec<String>>();
        assert_eq!(order(&once), order(&twice));
        // canonical order is descending by date
        assert_eq!(order(&once), vec!["rec3", "rec1", "rec2"]);
    }
}
