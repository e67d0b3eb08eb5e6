// Record + optional picture → PDF bytes.
// Synchronous and CPU-bound: callers on the async runtime use spawn_blocking.

pub mod image;
pub mod pdf;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::layout::engine::lay_out;
use crate::layout::error::{ImagePlacementWarning, RenderError};
use crate::layout::font_metrics::PageConfig;
use crate::models::resume::ResumeRecord;
use crate::render::image::ProfileImage;
use crate::render::pdf::{write_pdf, DocumentInfo};

/// A finished document plus anything the caller should tell the user about it.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub pdf: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<ImagePlacementWarning>,
}

/// Renders `record` into a PDF.
///
/// `image` holds the encoded upload, if any. A picture that cannot be used is
/// left out and reported in `warnings`; only a missing name fails the call.
pub fn render(
    record: &ResumeRecord,
    image: Option<&[u8]>,
    config: &PageConfig,
    created_at: Option<DateTime<Utc>>,
) -> Result<RenderedResume, RenderError> {
    let mut warnings = Vec::new();

    let profile_image = match image.map(ProfileImage::decode) {
        Some(Ok(decoded)) => Some(decoded),
        Some(Err(warning)) => {
            warn!("Rendering without profile image: {warning}");
            warnings.push(warning);
            None
        }
        None => None,
    };

    let layout = lay_out(record, profile_image.as_ref(), config)?;
    let info = DocumentInfo {
        title: record.name.clone(),
        created_at,
    };
    let pdf = write_pdf(&layout, profile_image.as_ref(), &info)?;

    Ok(RenderedResume {
        pdf,
        page_count: layout.page_count(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::error::MalformedRecordError;
    use crate::layout::font_metrics::{default_page_config, PageSize};
    use crate::models::resume::JobEntry;
    use crate::render::image::tests::png_bytes;

    fn config() -> PageConfig {
        default_page_config(PageSize::A4)
    }

    fn named(name: &str) -> ResumeRecord {
        ResumeRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_name_only_gives_single_page_pdf() {
        let rendered = render(&named("Jane Doe"), None, &config(), None).unwrap();
        assert_eq!(rendered.page_count, 1);
        assert!(rendered.warnings.is_empty());
        let doc = lopdf::Document::load_mem(&rendered.pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_without_name_fails() {
        let err = render(&named(""), None, &config(), None).unwrap_err();
        assert!(matches!(
            err,
            RenderError::MalformedRecord(MalformedRecordError { field: "name" })
        ));
    }

    #[test]
    fn test_corrupt_image_degrades_to_warning() {
        let rendered = render(
            &named("Jane Doe"),
            Some(b"\x89PNG\r\n\x1a\nnot really"),
            &config(),
            None,
        )
        .unwrap();
        assert_eq!(rendered.warnings.len(), 1);
        assert!(matches!(
            rendered.warnings[0],
            ImagePlacementWarning::Undecodable(_)
        ));
        let doc = lopdf::Document::load_mem(&rendered.pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_valid_image_is_used_without_warning() {
        let png = png_bytes(4, 4);
        let rendered = render(&named("Jane Doe"), Some(&png), &config(), None).unwrap();
        assert!(rendered.warnings.is_empty());
        let text = String::from_utf8_lossy(&rendered.pdf);
        assert!(text.contains("/DeviceRGB"));
    }

    #[test]
    fn test_long_resume_spans_pages() {
        let mut record = named("Jane Doe");
        record.experience = (0..40)
            .map(|i| JobEntry {
                title: format!("Role {i}"),
                company: "Acme".to_string(),
                description: "Ran the build farm. ".repeat(6),
                ..Default::default()
            })
            .collect();
        let rendered = render(&record, None, &config(), None).unwrap();
        assert!(rendered.page_count > 1);
        let doc = lopdf::Document::load_mem(&rendered.pdf).unwrap();
        assert_eq!(doc.get_pages().len(), rendered.page_count);
    }

    #[test]
    fn test_render_is_deterministic_without_timestamp() {
        let mut record = named("Jane Doe");
        record.summary = "Calm under pressure. ".repeat(30);
        let first = render(&record, None, &config(), None).unwrap();
        let second = render(&record, None, &config(), None).unwrap();
        assert_eq!(first.page_count, second.page_count);
        assert_eq!(first.pdf, second.pdf);
    }
}
