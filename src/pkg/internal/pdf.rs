use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

use super::scrape::ScrapedProfile;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 7.0;
const WRAP_COLUMNS: usize = 88;

fn pdf_err(err: printpdf::Error) -> StandardError {
    StandardError::new("ERR-PDF-001").interpolate_err(err.to_string())
}

/// Renders a scraped profile as a simple paginated resume PDF using the
/// built-in Helvetica fonts, so the binary ships no font assets.
pub fn render_profile(profile: &ScrapedProfile) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Candidate Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "resume",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        let name = if profile.full_name.is_empty() {
            "Candidate"
        } else {
            profile.full_name.as_str()
        };
        writer.line(name, &bold, 18.0);
        writer.gap();

        for (label, value) in [
            ("Email", &profile.email),
            ("Phone", &profile.phone),
            ("LinkedIn", &profile.linkedin_url),
        ] {
            if !value.is_empty() {
                writer.line(&format!("{}: {}", label, value), &regular, 11.0);
            }
        }

        if !profile.skills.is_empty() {
            writer.section("Skills", &bold);
            for line in wrap(&profile.skills.join(", "), WRAP_COLUMNS) {
                writer.line(&line, &regular, 11.0);
            }
        }
        if !profile.education.is_empty() {
            writer.section("Education", &bold);
            for entry in &profile.education {
                for line in wrap(entry, WRAP_COLUMNS) {
                    writer.line(&line, &regular, 11.0);
                }
            }
        }
        if !profile.experience.is_empty() {
            writer.section("Experience", &bold);
            for entry in &profile.experience {
                for line in wrap(entry, WRAP_COLUMNS) {
                    writer.line(&line, &regular, 11.0);
                }
            }
        }
        if !profile.projects.is_empty() {
            writer.section("Projects", &bold);
            for line in wrap(&profile.projects, WRAP_COLUMNS) {
                writer.line(&line, &regular, 11.0);
            }
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes)).map_err(pdf_err)?;
    Ok(bytes)
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn line(&mut self, text: &str, font: &IndirectFontRef, size: f32) {
        if self.y < MARGIN_MM {
            self.break_page();
        }
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM;
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT_MM / 2.0;
    }

    fn section(&mut self, title: &str, font: &IndirectFontRef) {
        self.gap();
        self.line(title, font, 13.0);
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "resume");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pdf_document() {
        let profile = ScrapedProfile {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            skills: vec!["Mathematics".into(), "Programming".into()],
            ..ScrapedProfile::default()
        };
        let bytes = render_profile(&profile).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_profiles_spill_onto_extra_pages() {
        let profile = ScrapedProfile {
            full_name: "Verbose Candidate".into(),
            experience: (0..120).map(|i| format!("Role {} doing many things", i)).collect(),
            ..ScrapedProfile::default()
        };
        let bytes = render_profile(&profile).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert!(wrap("", 10).is_empty());
    }
}
