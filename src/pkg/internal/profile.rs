use serde_json::{Map, Value};

use crate::pkg::internal::adaptors::store::spec::Record;
use crate::pkg::internal::questions;

/// The five long-form question fields, in display order.
pub const QUESTION_FIELDS: [(&str, &str); 5] = [
    ("PrimarySkillsQuestions", "Primary Skills Questions"),
    ("SecondarySkillsQuestions", "Secondary Skills Questions"),
    ("ProjectBasedQuestions", "Project-Based Questions"),
    ("ScenarioBasedQuestions", "Scenario-Based Questions"),
    ("DebuggingQuestions", "Debugging Questions"),
];

/// Profile candidate: the cards-view reading of a record's field bag.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    fields: Map<String, Value>,
}

fn text<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or("")
}

impl Profile {
    pub fn from_record(record: Record) -> Self {
        Profile {
            id: record.id,
            fields: record.fields,
        }
    }

    pub fn name(&self) -> &str {
        text(&self.fields, "Name")
    }

    pub fn email(&self) -> &str {
        text(&self.fields, "email")
    }

    pub fn phone(&self) -> &str {
        text(&self.fields, "number")
    }

    pub fn profession(&self) -> &str {
        text(&self.fields, "profession")
    }

    pub fn education(&self) -> &str {
        text(&self.fields, "education")
    }

    pub fn experience(&self) -> &str {
        text(&self.fields, "Experience")
    }

    pub fn skills_raw(&self) -> &str {
        text(&self.fields, "skills")
    }

    pub fn skills(&self) -> Vec<String> {
        self.skills_raw()
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn project(&self) -> &str {
        text(&self.fields, "Project")
    }

    pub fn interview_url(&self) -> &str {
        text(&self.fields, "Interview_url")
    }

    /// Up to two uppercased initials from the display name.
    pub fn initials(&self) -> String {
        self.name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Non-empty question sections as (title, body) pairs.
    pub fn question_sections(&self) -> Vec<(&'static str, &str)> {
        QUESTION_FIELDS
            .iter()
            .filter_map(|&(key, title)| {
                let body = text(&self.fields, key);
                if body.is_empty() {
                    None
                } else {
                    Some((title, body))
                }
            })
            .collect()
    }

    pub fn question_count(&self) -> usize {
        self.question_sections()
            .iter()
            .map(|(_, body)| questions::count_questions(body))
            .sum()
    }

    /// Card-view search: OR across name, email, skills and profession.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name().to_lowercase().contains(&term)
            || self.email().to_lowercase().contains(&term)
            || self.skills_raw().to_lowercase().contains(&term)
            || self.profession().to_lowercase().contains(&term)
    }
}

/// CSV export of the profile list; embedded commas in the long-form fields
/// become ";" so spreadsheet imports keep their columns.
pub fn to_csv(profiles: &[Profile]) -> String {
    let mut csv = String::from("Name,Email,Phone,Profession,Education,Experience,Skills\n");
    for profile in profiles {
        let row = [
            profile.name().to_string(),
            profile.email().to_string(),
            profile.phone().to_string(),
            profile.profession().to_string(),
            profile.education().replace(',', ";"),
            profile.experience().replace(',', ";"),
            profile.skills_raw().replace(',', ";"),
        ];
        let quoted: Vec<String> = row
            .iter()
            .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
            .collect();
        csv.push_str(&quoted.join(","));
        csv.push('\n');
    }
    csv
}

#[cfg(test)]
pub fn test_profile(id: &str, fields: Value) -> Profile {
    let fields = match fields {
        Value::Object(map) => map,
        _ => panic!("fields fixture must be an object"),
    };
    Profile::from_record(Record {
        id: id.into(),
        fields,
    })
}
