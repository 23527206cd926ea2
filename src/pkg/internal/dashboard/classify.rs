use lazy_static::lazy_static;
use regex::Regex;

use crate::conf::settings;

/// Substituted whenever a duration is missing or unparsable.
pub const DEFAULT_DURATION_MIN: u32 = 25;

lazy_static! {
    static ref DURATION: Regex = Regex::new(r"(\d+):(\d+)").unwrap();
}

/// Three-way recommendation category derived from free-text status.
/// Rejection keywords are checked first so "Not Recommended" never reads as
/// a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Recommended,
    NotRecommended,
    Pending,
}

impl StatusClass {
    pub fn label(&self) -> &'static str {
        match self {
            StatusClass::Recommended => "Recommended",
            StatusClass::NotRecommended => "Not Recommended",
            StatusClass::Pending => "Pending",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::Recommended => "status-recommended",
            StatusClass::NotRecommended => "status-not-recommended",
            StatusClass::Pending => "status-pending",
        }
    }
}

pub fn classify_status(status: &str) -> StatusClass {
    let status = status.trim().to_lowercase();
    if status.contains("reject")
        || status.contains("not recommend")
        || status.contains("not select")
    {
        StatusClass::NotRecommended
    } else if status.contains("select") || status.contains("recommend") {
        StatusClass::Recommended
    } else {
        StatusClass::Pending
    }
}

/// Lower bounds of the top three score bands, highest first; everything
/// below the last bound is "poor". One set per deployment.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBands {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for ScoreBands {
    fn default() -> Self {
        ScoreBands {
            excellent: 45.0,
            good: 35.0,
            fair: 25.0,
        }
    }
}

impl ScoreBands {
    pub fn from_settings() -> Self {
        ScoreBands {
            excellent: settings.score_excellent,
            good: settings.score_good,
            fair: settings.score_fair,
        }
    }

    /// First band whose lower bound the score meets or exceeds.
    pub fn band(&self, score: f64) -> ScoreBand {
        if score >= self.excellent {
            ScoreBand::Excellent
        } else if score >= self.good {
            ScoreBand::Good
        } else if score >= self.fair {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }
}

/// First capture group of `<digits>:<digits>`, kept as the minutes value.
pub fn parse_duration_minutes(raw: &str) -> Option<u32> {
    DURATION
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .and_then(|minutes| minutes.as_str().parse().ok())
}

pub fn duration_minutes_or_default(raw: Option<&str>) -> u32 {
    raw.and_then(parse_duration_minutes)
        .unwrap_or(DEFAULT_DURATION_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_keywords_classify_as_recommended() {
        assert_eq!(classify_status("Selected"), StatusClass::Recommended);
        assert_eq!(classify_status("  highly recommended "), StatusClass::Recommended);
        assert_eq!(classify_status("SELECT for round 2"), StatusClass::Recommended);
    }

    #[test]
    fn rejection_keywords_win_over_acceptance_keywords() {
        assert_eq!(classify_status("Rejected"), StatusClass::NotRecommended);
        assert_eq!(classify_status("Not Recommended"), StatusClass::NotRecommended);
        assert_eq!(classify_status("not selected"), StatusClass::NotRecommended);
    }

    #[test]
    fn anything_else_is_pending() {
        assert_eq!(classify_status(""), StatusClass::Pending);
        assert_eq!(classify_status("On Hold"), StatusClass::Pending);
    }

    #[test]
    fn bands_pick_first_matching_lower_bound() {
        let bands = ScoreBands::default();
        assert_eq!(bands.band(47.0), ScoreBand::Excellent);
        assert_eq!(bands.band(45.0), ScoreBand::Excellent);
        assert_eq!(bands.band(44.9), ScoreBand::Good);
        assert_eq!(bands.band(25.0), ScoreBand::Fair);
        assert_eq!(bands.band(20.0), ScoreBand::Poor);
        assert_eq!(bands.band(0.0), ScoreBand::Poor);
    }

    #[test]
    fn bands_are_configurable_to_the_ten_point_scale() {
        let bands = ScoreBands {
            excellent: 9.0,
            good: 7.0,
            fair: 5.0,
        };
        assert_eq!(bands.band(9.5), ScoreBand::Excellent);
        assert_eq!(bands.band(6.0), ScoreBand::Fair);
    }

    #[test]
    fn duration_takes_the_first_group() {
        assert_eq!(parse_duration_minutes("45:30"), Some(45));
        assert_eq!(parse_duration_minutes("1:05"), Some(1));
        assert_eq!(parse_duration_minutes("half an hour"), None);
        assert_eq!(duration_minutes_or_default(None), DEFAULT_DURATION_MIN);
        assert_eq!(duration_minutes_or_default(Some("junk")), DEFAULT_DURATION_MIN);
        assert_eq!(duration_minutes_or_default(Some("40:00")), 40);
    }
}
