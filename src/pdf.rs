//! PDF assembly with `lopdf`.
//!
//! The captured bitmap is embedded once, as a single RGB image XObject shared
//! by every page. Each page draws that image at full page width with its top
//! edge shifted up by the page's [`offset_mm`](crate::paginate::Page::offset_mm);
//! the MediaBox clips everything outside the page, which leaves exactly the
//! page's band visible.

use crate::paginate::{Page, PageSize};
use crate::raster::CapturedBitmap;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

/// PostScript points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Resource name of the shared letter image.
const IMAGE_NAME: &str = "Im0";

/// Written into the Info dictionary.
const PRODUCER: &str = concat!("birthday-letter ", env!("CARGO_PKG_VERSION"));

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMeta {
    pub title: String,
    /// Omitted from the Info dictionary when empty.
    pub author: String,
}

/// PDF text string: UTF-16BE with a byte-order mark, so non-Latin names
/// survive in viewers' document properties.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn image_xobject(bitmap: &CapturedBitmap) -> Stream {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => bitmap.width() as i64,
        "Height" => bitmap.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    Stream::new(dict, bitmap.pixels.as_raw().clone())
}

/// Content stream placing the whole image so that `page`'s band is on the page.
fn page_content(page: &Page, size: PageSize, image_height_mm: f64) -> Content {
    let page_h = mm_to_pt(size.height_mm);
    let img_w = mm_to_pt(size.width_mm);
    let img_h = mm_to_pt(image_height_mm);
    // PDF origin is bottom-left: the image top sits `offset` below the page top.
    let bottom = page_h - mm_to_pt(page.offset_mm) - img_h;

    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (img_w as f32).into(),
                    0.into(),
                    0.into(),
                    (img_h as f32).into(),
                    0.into(),
                    (bottom as f32).into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    }
}

/// Build a PDF with one page per entry in `pages`.
#[tracing::instrument(skip_all, fields(pages = pages.len()))]
pub fn assemble_pdf(
    bitmap: &CapturedBitmap,
    pages: &[Page],
    size: PageSize,
    meta: &DocumentMeta,
) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(image_xobject(bitmap));
    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { IMAGE_NAME => image_id },
    });

    let image_height_mm =
        f64::from(bitmap.height()) * size.width_mm / f64::from(bitmap.width().max(1));
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (mm_to_pt(size.width_mm) as f32).into(),
        (mm_to_pt(size.height_mm) as f32).into(),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, size, image_height_mm);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Title" => text_string(&meta.title),
        "Producer" => text_string(PRODUCER),
    };
    if !meta.author.is_empty() {
        info.set("Author", text_string(&meta.author));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    tracing::debug!(bytes = buf.len(), "pdf assembled");
    Ok(buf)
}
