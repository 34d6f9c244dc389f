use anyhow::{Context, Result};
use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};
use tracing::debug;

mod font;
mod wrap;

pub use wrap::wrap_text;

pub const TITLE: &str = "RIASSUNTO PDF";
pub const PAGE_WIDTH: i64 = 612;
pub const PAGE_HEIGHT: i64 = 792;
pub const MARGIN: i64 = 50;
pub const LINE_HEIGHT: i64 = 15;
pub const BODY_FONT_SIZE: i64 = 11;
const TITLE_FONT_SIZE: i64 = 16;
const SOURCE_FONT_SIZE: i64 = 10;
const TITLE_Y: i64 = PAGE_HEIGHT - 50;
const SOURCE_Y: i64 = PAGE_HEIGHT - 70;
const BODY_TOP: i64 = PAGE_HEIGHT - 100;
const CONTINUATION_TOP: i64 = PAGE_HEIGHT - 50;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

pub fn max_line_width() -> f32 {
    (PAGE_WIDTH - 2 * MARGIN) as f32
}

/// A wrapped summary line and the baseline it is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: i64,
}

/// Distributes lines over pages: a new page begins whenever the cursor has
/// dropped below the bottom margin.
pub fn paginate(lines: Vec<String>) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = BODY_TOP;

    for text in lines {
        if y < MARGIN {
            pages.push(Vec::new());
            y = CONTINUATION_TOP;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { text, y });
        }
        y -= LINE_HEIGHT;
    }

    pages
}

/// Renders `summary` into a Letter-sized PDF headed by the title and the
/// name of the source document.
pub fn render_summary_pdf(summary: &str, source_filename: &str) -> Result<Vec<u8>> {
    let lines = wrap_text(summary, BODY_FONT_SIZE as f32, max_line_width());
    let line_count = lines.len();
    let pages = paginate(lines);

    debug!(line_count, page_count = pages.len(), "laying out summary PDF");

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(base_font("Helvetica"));
    let bold_id = doc.add_object(base_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (index, page_lines) in pages.iter().enumerate() {
        let mut operations = Vec::new();
        if index == 0 {
            operations.extend(text_operations(BOLD_FONT, TITLE_FONT_SIZE, TITLE_Y, TITLE));
            operations.extend(text_operations(
                REGULAR_FONT,
                SOURCE_FONT_SIZE,
                SOURCE_Y,
                &format!("Documento: {source_filename}"),
            ));
        }
        for line in page_lines {
            operations.extend(text_operations(
                REGULAR_FONT,
                BODY_FONT_SIZE,
                line.y,
                &line.text,
            ));
        }

        let content = Content { operations }
            .encode()
            .with_context(|| format!("Failed to encode content of page {}", index + 1))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = add_page(&mut doc, pages_id, content_id, resources_id);
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box(),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("Failed to serialize summary PDF")?;
    Ok(buffer)
}

fn base_font(name: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn media_box() -> Vec<Object> {
    vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    content_id: ObjectId,
    resources_id: ObjectId,
) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => media_box(),
    })
}

fn text_operations(font_name: &str, size: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font_name.as_bytes().to_vec()), size.into()]),
        Operation::new("Td", vec![MARGIN.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(font::encode(text))]),
        Operation::new("ET", vec![]),
    ]
}
