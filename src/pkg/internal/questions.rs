use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // question lists arrive as "1. first 2. second ..." blobs
    static ref NUMBERED: Regex = Regex::new(r"\d+\.\s").unwrap();
}

/// Splits a numbered question blob into individual trimmed questions.
pub fn split_questions(raw: &str) -> Vec<String> {
    NUMBERED
        .split(raw)
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .map(String::from)
        .collect()
}

pub fn count_questions(raw: &str) -> usize {
    split_questions(raw).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_numbered_markers() {
        let raw = "1. What is a lifetime? 2. Explain Send vs Sync. 3. When do you Box?";
        let questions = split_questions(raw);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "What is a lifetime?");
        assert_eq!(questions[2], "When do you Box?");
    }

    #[test]
    fn handles_newline_separated_lists() {
        let raw = "1. First question\n2. Second question\n";
        assert_eq!(count_questions(raw), 2);
    }

    #[test]
    fn empty_and_markerless_input() {
        assert_eq!(count_questions(""), 0);
        // no numbered markers: the whole blob is one question
        assert_eq!(count_questions("tell me about yourself"), 1);
    }
}
