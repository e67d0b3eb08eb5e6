//! Serializes a laid-out resume into a PDF with `lopdf`.
//!
//! All pages share one resource dictionary: `/F1` Helvetica, `/F2` Helvetica-Bold
//! and, when a picture was placed, `/Im1`. Content streams are Flate-compressed.

use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::canvas::{DrawOp, LaidOutDocument, Page};
use crate::layout::error::RenderError;
use crate::layout::font_metrics::{win_ansi_byte, Font, PT_PER_MM};
use crate::render::image::ProfileImage;

const IMAGE_RESOURCE: &str = "Im1";
const PRODUCER: &str = concat!("vitae ", env!("CARGO_PKG_VERSION"));

/// Values for the PDF `/Info` dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    /// Supplied by the caller so layout and serialization never read the clock.
    pub created_at: Option<DateTime<Utc>>,
}

/// Writes `layout` as a complete PDF and returns the bytes.
///
/// `image` is embedded only if the layout actually placed one.
pub fn write_pdf(
    layout: &LaidOutDocument,
    image: Option<&ProfileImage>,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Helvetica, Font::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    let embedded_image = image.filter(|_| layout.has_image());
    if let Some(image) = embedded_image {
        let image_id = doc.add_object(image_xobject(image)?);
        resources.set("XObject", dictionary! { IMAGE_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let page_width_pt = layout.page_width_mm * PT_PER_MM;
    let page_height_pt = layout.page_height_mm * PT_PER_MM;

    let mut page_ids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, page_height_pt, embedded_image.is_some());
        let stream = Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content.encode()?)?,
        );
        let content_id = doc.add_object(stream);

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(info));
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn page_content(page: &Page, page_height_pt: f32, image_available: bool) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text(run) => {
                if run.text.is_empty() {
                    continue;
                }
                // Baseline sits a little below the middle of the line box.
                let size_mm = run.size_pt / PT_PER_MM;
                let baseline_mm = run.y_mm + run.line_height_mm / 2.0 + 0.3 * size_mm;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(run.font.resource_name().as_bytes().to_vec()),
                        Object::Real(run.size_pt),
                    ],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![
                        Object::Real(run.x_mm * PT_PER_MM),
                        Object::Real(page_height_pt - baseline_mm * PT_PER_MM),
                    ],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(&run.text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Image(placement) if image_available => {
                let w = placement.width_mm * PT_PER_MM;
                let h = placement.height_mm * PT_PER_MM;
                let x = placement.x_mm * PT_PER_MM;
                let y = page_height_pt - (placement.y_mm + placement.height_mm) * PT_PER_MM;
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        Object::Real(w),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(h),
                        Object::Real(x),
                        Object::Real(y),
                    ],
                ));
                operations.push(Operation::new(
                    "Do",
                    vec![Object::Name(IMAGE_RESOURCE.as_bytes().to_vec())],
                ));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Image(_) => {}
        }
    }

    Content { operations }
}

fn image_xobject(image: &ProfileImage) -> Result<Stream, RenderError> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width() as i64,
        "Height" => image.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8_i64,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, deflate(image.rgb())?))
}

fn info_dictionary(info: &DocumentInfo) -> Dictionary {
    let mut dict = dictionary! {
        "Title" => Object::String(to_win_ansi(&info.title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(created_at) = info.created_at {
        let stamp = format!("D:{}", created_at.format("%Y%m%d%H%M%SZ"));
        dict.set("CreationDate", Object::string_literal(stamp));
    }
    dict
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Encodes text the way the layout measured it.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::lay_out;
    use crate::layout::font_metrics::{default_page_config, PageSize};
    use crate::models::resume::{JobEntry, ResumeRecord};
    use flate2::read::ZlibDecoder;
    use lopdf::ObjectId;
    use std::io::Read;

    fn record(name: &str) -> ResumeRecord {
        ResumeRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Jane Doe".to_string(),
            created_at: None,
        }
    }

    fn page_text(doc: &Document, page_id: ObjectId) -> String {
        let mut out = String::new();
        for content_id in doc.get_page_contents(page_id) {
            let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
            let mut decoded = Vec::new();
            let raw = match ZlibDecoder::new(stream.content.as_slice()).read_to_end(&mut decoded) {
                Ok(_) => decoded,
                Err(_) => stream.content.clone(),
            };
            out.push_str(&String::from_utf8_lossy(&raw));
        }
        out
    }

    #[test]
    fn test_written_pdf_reloads_with_same_page_count() {
        let config = default_page_config(PageSize::A4);
        let mut rec = record("Jane Doe");
        rec.experience = (0..30)
            .map(|i| JobEntry {
                title: format!("Role {i}"),
                ..Default::default()
            })
            .collect();
        let layout = lay_out(&rec, None, &config).unwrap();
        assert!(layout.page_count() > 1);

        let bytes = write_pdf(&layout, None, &info()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), layout.page_count());
    }

    #[test]
    fn test_page_content_contains_text_operators() {
        let config = default_page_config(PageSize::A4);
        let layout = lay_out(&record("Jane Doe"), None, &config).unwrap();
        let bytes = write_pdf(&layout, None, &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let first_page = *doc.get_pages().get(&1).unwrap();
        let content = page_text(&doc, first_page);
        assert!(content.contains("(Jane Doe) Tj"), "content was: {content}");
        assert!(content.contains("(Summary) Tj"));
    }

    #[test]
    fn test_page_media_box_is_a4_in_points() {
        let config = default_page_config(PageSize::A4);
        let layout = lay_out(&record("Jane Doe"), None, &config).unwrap();
        let bytes = write_pdf(&layout, None, &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.1, "width {width}");
        assert!((height - 841.89).abs() < 0.1, "height {height}");
    }

    #[test]
    fn test_image_is_embedded_as_rgb_xobject() {
        let config = default_page_config(PageSize::A4);
        let image = ProfileImage::from_rgb(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let layout = lay_out(&record("Jane Doe"), Some(&image), &config).unwrap();
        let bytes = write_pdf(&layout, Some(&image), &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let xobjects: Vec<&Stream> = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| matches!(s.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image"))
            .collect();
        assert_eq!(xobjects.len(), 1);
        assert_eq!(xobjects[0].dict.get(b"Width").unwrap().as_i64().unwrap(), 2);

        let first_page = *doc.get_pages().get(&1).unwrap();
        assert!(page_text(&doc, first_page).contains("/Im1 Do"));
    }

    #[test]
    fn test_no_image_resource_without_placement() {
        let config = default_page_config(PageSize::A4);
        let image = ProfileImage::from_rgb(1, 1, vec![0, 0, 0]).unwrap();
        // Layout made without the image: nothing to embed even if one is passed.
        let layout = lay_out(&record("Jane Doe"), None, &config).unwrap();
        let bytes = write_pdf(&layout, Some(&image), &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let has_image = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .any(|s| s.dict.has(b"Width"));
        assert!(!has_image);
    }

    #[test]
    fn test_info_dictionary_carries_title_and_date() {
        let config = default_page_config(PageSize::A4);
        let layout = lay_out(&record("Jane Doe"), None, &config).unwrap();
        let created_at = DateTime::parse_from_rfc3339("2024-03-05T07:08:09Z")
            .unwrap()
            .with_timezone(&Utc);
        let info = DocumentInfo {
            title: "Jane Doe".to_string(),
            created_at: Some(created_at),
        };
        let bytes = write_pdf(&layout, None, &info).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Jane Doe)"));
        assert!(text.contains("(D:20240305070809Z)"));
    }

    #[test]
    fn test_to_win_ansi() {
        assert_eq!(to_win_ansi("Jane"), b"Jane".to_vec());
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
    }
}
