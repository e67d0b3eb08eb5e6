//! Resume layout: a fixed single-column flow from the picture down to education.
//!
//! Pagination is line-granular. Every emitted line checks the bottom margin,
//! so a long description may continue on the next page, but only between
//! wrapped lines. Gaps between blocks never force a break on their own.

use tracing::debug;

use crate::layout::canvas::{Align, DocumentCanvas, ImagePlacement, LaidOutDocument};
use crate::layout::error::MalformedRecordError;
use crate::layout::font_metrics::{Font, PageConfig};
use crate::models::resume::ResumeRecord;
use crate::render::image::ProfileImage;

/// Lays the record out into pages of draw operations.
///
/// Pure: the same record, image and config always give the same layout.
pub fn lay_out(
    record: &ResumeRecord,
    image: Option<&ProfileImage>,
    config: &PageConfig,
) -> Result<LaidOutDocument, MalformedRecordError> {
    if record.name.trim().is_empty() {
        return Err(MalformedRecordError { field: "name" });
    }

    let mut canvas = DocumentCanvas::new(config);

    if image.is_some() {
        let size = config.image_size_mm;
        let top = config.margin_top_mm;
        canvas.image(ImagePlacement {
            x_mm: (config.page_width_mm() - size) / 2.0,
            y_mm: top,
            width_mm: size,
            height_mm: size,
        });
        canvas.set_xy(config.margin_left_mm, top + size + config.image_gap_mm);
    }

    write_header(&mut canvas, record, config);
    write_summary(&mut canvas, record, config);
    write_experience(&mut canvas, record, config);
    write_education(&mut canvas, record, config);

    let document = canvas.finish();
    debug!(
        pages = document.page_count(),
        lines = document.texts().count(),
        jobs = record.experience.len(),
        education = record.education.len(),
        "resume laid out"
    );
    Ok(document)
}

fn write_header(canvas: &mut DocumentCanvas<'_>, record: &ResumeRecord, config: &PageConfig) {
    canvas.set_font(Font::HelveticaBold, config.name_font_pt);
    canvas.write(&record.name, Align::Center);

    // Empty contact fields still print their label so spacing never shifts.
    canvas.set_font(Font::Helvetica, config.body_font_pt);
    canvas.ln(config.contact_gap_mm);
    canvas.write(&format!("Email: {}", record.contact.email), Align::Center);
    canvas.write(&format!("Phone: {}", record.contact.phone), Align::Center);
    canvas.write(&format!("Address: {}", record.contact.address), Align::Center);
    canvas.ln(config.section_gap_mm);
}

fn write_summary(canvas: &mut DocumentCanvas<'_>, record: &ResumeRecord, config: &PageConfig) {
    write_heading(canvas, "Summary", config);
    canvas.write(&record.summary, Align::Left);
    canvas.ln(config.section_gap_mm);
}

fn write_experience(canvas: &mut DocumentCanvas<'_>, record: &ResumeRecord, config: &PageConfig) {
    write_heading(canvas, "Experience", config);
    for job in &record.experience {
        canvas.write(&job.heading(), Align::Left);
        canvas.write(&job.date_range(), Align::Left);
        canvas.write(&job.description, Align::Left);
        canvas.ln(config.entry_gap_mm);
    }
    canvas.ln(config.section_gap_mm);
}

fn write_education(canvas: &mut DocumentCanvas<'_>, record: &ResumeRecord, config: &PageConfig) {
    write_heading(canvas, "Education", config);
    for entry in &record.education {
        canvas.write(&entry.heading(), Align::Left);
        canvas.write(&entry.graduation_year, Align::Left);
        canvas.ln(config.entry_gap_mm);
    }
}

/// Bold section title, then back to the body font for the section content.
fn write_heading(canvas: &mut DocumentCanvas<'_>, title: &str, config: &PageConfig) {
    canvas.set_font(Font::HelveticaBold, config.heading_font_pt);
    canvas.write(title, Align::Left);
    canvas.set_font(Font::Helvetica, config.body_font_pt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{default_page_config, PageSize};
    use crate::models::resume::{Contact, EducationEntry, JobEntry};

    fn a4() -> PageConfig {
        default_page_config(PageSize::A4)
    }

    fn named(name: &str) -> ResumeRecord {
        ResumeRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn job(title: &str, description: &str) -> JobEntry {
        JobEntry {
            title: title.to_string(),
            company: "Acme".to_string(),
            start_date: "2019".to_string(),
            end_date: "2021".to_string(),
            description: description.to_string(),
        }
    }

    fn texts(doc: &LaidOutDocument) -> Vec<String> {
        doc.texts().map(|t| t.text.clone()).collect()
    }

    fn tiny_image() -> ProfileImage {
        ProfileImage::from_rgb(2, 2, vec![0; 12]).unwrap()
    }

    #[test]
    fn test_example_record_fits_one_page_with_expected_lines() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            contact: Contact {
                email: "j@x.com".to_string(),
                ..Default::default()
            },
            summary: "Engineer.".to_string(),
            experience: vec![],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                institution: "State U".to_string(),
                graduation_year: "2020".to_string(),
            }],
        };
        let doc = lay_out(&record, None, &a4()).unwrap();
        assert_eq!(doc.page_count(), 1);

        let lines = texts(&doc);
        for expected in [
            "Jane Doe",
            "Email: j@x.com",
            "Summary",
            "Engineer.",
            "Education",
            "BSc - State U",
            "2020",
        ] {
            assert!(
                lines.iter().any(|l| l == expected),
                "missing {expected:?} in {lines:?}"
            );
        }
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let err = lay_out(&named(""), None, &a4()).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(lay_out(&named("  \n "), None, &a4()).is_err());
    }

    #[test]
    fn test_name_only_is_one_page() {
        let doc = lay_out(&named("Jane Doe"), None, &a4()).unwrap();
        assert_eq!(doc.page_count(), 1);
        let lines = texts(&doc);
        assert_eq!(lines[0], "Jane Doe");
        // Empty contact fields keep their labels.
        assert_eq!(&lines[1..4], &["Email:", "Phone:", "Address:"]);
    }

    #[test]
    fn test_name_uses_bold_large_font_and_headings_bold() {
        let record = named("Jane Doe");
        let doc = lay_out(&record, None, &a4()).unwrap();
        let runs: Vec<_> = doc.texts().collect();
        assert_eq!(runs[0].font, Font::HelveticaBold);
        assert_eq!(runs[0].size_pt, 16.0);
        assert_eq!(runs[1].font, Font::Helvetica);
        let summary = runs.iter().find(|r| r.text == "Summary").unwrap();
        assert_eq!(summary.font, Font::HelveticaBold);
        assert_eq!(summary.size_pt, 14.0);
    }

    #[test]
    fn test_experience_order_is_preserved() {
        let mut record = named("Jane Doe");
        record.experience = vec![job("Alpha", ""), job("Bravo", ""), job("Charlie", "")];
        let doc = lay_out(&record, None, &a4()).unwrap();
        let lines = texts(&doc);
        let pos = |needle: &str| lines.iter().position(|l| l == needle).unwrap();
        assert!(pos("Alpha - Acme") < pos("Bravo - Acme"));
        assert!(pos("Bravo - Acme") < pos("Charlie - Acme"));
    }

    #[test]
    fn test_long_summary_wraps_within_printable_width() {
        let config = a4();
        let mut record = named("Jane Doe");
        record.summary =
            "Seasoned engineer who enjoys building reliable systems and mentoring people. ".repeat(10);
        let doc = lay_out(&record, None, &config).unwrap();

        let summary_lines = doc
            .texts()
            .skip_while(|t| t.text != "Summary")
            .skip(1)
            .take_while(|t| t.text != "Experience")
            .count();
        assert!(summary_lines > 1, "summary should wrap, got {summary_lines} line(s)");

        for run in doc.texts() {
            assert!(
                run.width_mm <= config.printable_width_mm() + 1e-3,
                "{:?} is {}mm wide",
                run.text,
                run.width_mm
            );
        }
    }

    #[test]
    fn test_accented_name_and_summary_stay_inside_margins() {
        let config = a4();
        let mut record = named(&"ÖZTÜRK ÆSØ ".repeat(12));
        record.summary = "ÖÖÖÖ ÄÄÄÄ ".repeat(40);
        let doc = lay_out(&record, None, &config).unwrap();

        let right_edge = config.page_width_mm() - config.margin_right_mm;
        for run in doc.texts() {
            assert!(run.width_mm <= config.printable_width_mm() + 1e-3);
            assert!(
                run.x_mm >= config.margin_left_mm - 1e-3,
                "{:?} starts left of the margin",
                run.text
            );
            assert!(
                run.x_mm + run.width_mm <= right_edge + 1e-3,
                "{:?} runs past the right margin",
                run.text
            );
        }
        let name = doc.texts().next().unwrap();
        assert!(name.text.starts_with("ÖZTÜRK ÆSØ"));
    }

    #[test]
    fn test_many_entries_paginate_without_losing_content() {
        let config = a4();
        let mut record = named("Jane Doe");
        record.experience = (0..30)
            .map(|i| job(&format!("Role {i}"), "Kept the lights on and the pagers quiet."))
            .collect();
        let doc = lay_out(&record, None, &config).unwrap();
        assert!(doc.page_count() > 1);

        let lines = texts(&doc);
        let mut last = 0;
        for i in 0..30 {
            let heading = format!("Role {i} - Acme");
            let at = lines
                .iter()
                .position(|l| *l == heading)
                .unwrap_or_else(|| panic!("{heading} dropped"));
            assert!(at >= last, "{heading} out of order");
            last = at;
        }
        let descriptions = lines
            .iter()
            .filter(|l| l.as_str() == "Kept the lights on and the pagers quiet.")
            .count();
        assert_eq!(descriptions, 30);

        for page in &doc.pages {
            for run in page.texts() {
                assert!(run.y_mm >= config.margin_top_mm);
                assert!(run.y_mm + run.line_height_mm <= config.page_break_y_mm() + 1e-3);
            }
        }
    }

    #[test]
    fn test_image_is_centered_and_pushes_header_down() {
        let config = a4();
        let image = tiny_image();
        let doc = lay_out(&named("Jane Doe"), Some(&image), &config).unwrap();
        let placement = doc.pages[0].images().next().copied().unwrap();
        assert_eq!(placement.x_mm, 85.0);
        assert_eq!(placement.y_mm, 10.0);
        assert_eq!(placement.width_mm, 40.0);
        let name = doc.texts().next().unwrap();
        assert_eq!(name.y_mm, 60.0);
    }

    #[test]
    fn test_without_image_header_starts_at_top_margin() {
        let doc = lay_out(&named("Jane Doe"), None, &a4()).unwrap();
        assert!(!doc.has_image());
        assert_eq!(doc.texts().next().unwrap().y_mm, 10.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut record = named("Jane Doe");
        record.summary = "Builds things. ".repeat(40);
        record.experience = (0..12).map(|i| job(&format!("Role {i}"), "Did work.")).collect();
        let image = tiny_image();
        let first = lay_out(&record, Some(&image), &a4()).unwrap();
        let second = lay_out(&record, Some(&image), &a4()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_entries_with_empty_fields_are_rendered_as_blank_lines() {
        let mut record = named("Jane Doe");
        record.experience = vec![JobEntry::default()];
        record.education = vec![EducationEntry::default()];
        let doc = lay_out(&record, None, &a4()).unwrap();
        let lines = texts(&doc);
        // heading + dates for the job, heading for education; each renders as "-"
        assert_eq!(lines.iter().filter(|l| l.as_str() == "-").count(), 3);
        assert_eq!(doc.page_count(), 1);
    }
}
