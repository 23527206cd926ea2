use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::pkg::internal::adaptors::store::spec::Record;

/// Pipeline candidate: a typed view over one record's field bag. Missing
/// text fields read as empty strings, never as errors.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    fields: Map<String, Value>,
}

fn text<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or("")
}

impl Candidate {
    pub fn from_record(record: Record) -> Self {
        Candidate {
            id: record.id,
            fields: record.fields,
        }
    }

    pub fn name(&self) -> &str {
        text(&self.fields, "candidateName")
    }

    pub fn email(&self) -> &str {
        text(&self.fields, "candidateEmail")
    }

    pub fn position(&self) -> &str {
        text(&self.fields, "positionApplied")
    }

    pub fn status(&self) -> &str {
        text(&self.fields, "status")
    }

    pub fn duration(&self) -> Option<&str> {
        self.fields
            .get("interviewDuration")
            .and_then(Value::as_str)
            .filter(|raw| !raw.is_empty())
    }

    /// Overall score parsed as a float; the store serves it as either a
    /// number or a numeric string.
    pub fn score(&self) -> Option<f64> {
        match self.fields.get("overallScore") {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(raw)) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    /// Calendar date of the report timestamp, if present and well-formed.
    pub fn report_date(&self) -> Option<NaiveDate> {
        parse_record_date(text(&self.fields, "reportGeneratedAt"))
    }

    /// The date used for ordering and window filters; a candidate without a
    /// report date counts as "now" and always passes a date window.
    pub fn interview_date(&self, today: NaiveDate) -> NaiveDate {
        self.report_date().unwrap_or(today)
    }
}

/// Accepts ISO-8601 dates and date-times, keeping only the date portion.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or("");
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub fn test_candidate(id: &str, fields: Value) -> Candidate {
    let fields = match fields {
        Value::Object(map) => map,
        _ => panic!("fields fixture must be an object"),
    };
    Candidate::from_record(Record {
        id: id.into(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn candidate(fields: Value) -> Candidate {
        test_candidate("rec001", fields)
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let c = candidate(json!({}));
        assert_eq!(c.name(), "");
        assert_eq!(c.email(), "");
        assert_eq!(c.status(), "");
        assert_eq!(c.score(), None);
        assert_eq!(c.duration(), None);
        assert_eq!(c.report_date(), None);
    }

    #[test]
    fn score_parses_from_string_or_number() {
        assert_eq!(candidate(json!({"overallScore": "47.5"})).score(), Some(47.5));
        assert_eq!(candidate(json!({"overallScore": 12})).score(), Some(12.0));
        assert_eq!(candidate(json!({"overallScore": "n/a"})).score(), None);
    }

    #[test]
    fn report_date_takes_the_date_portion() {
        let c = candidate(json!({"reportGeneratedAt": "2024-01-10T14:22:00.000Z"}));
        assert_eq!(
            c.report_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        );
        let plain = candidate(json!({"reportGeneratedAt": "2024-01-05"}));
        assert_eq!(
            plain.report_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(candidate(json!({})).interview_date(today), today);
    }
}
