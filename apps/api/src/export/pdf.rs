//! Raster image → single-page PDF.
//!
//! The page is portrait A4. The image is drawn from the top-left corner at
//! full page width, with its height scaled to keep the aspect ratio. A
//! capture taller than the page runs off the bottom edge rather than
//! paginating.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::export::ExportError;

pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Decoded capture: 8-bit RGB, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// Decodes a PNG of any colour type into 8-bit RGB. Alpha is composited onto
/// a white background.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, ExportError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ExportError::Image(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    let pixels = &buf[..info.buffer_size()];

    if info.width == 0 || info.height == 0 {
        return Err(ExportError::Image("image has no pixels".to_string()));
    }

    let rgb = match info.color_type {
        png::ColorType::Rgb => pixels.to_vec(),
        png::ColorType::Rgba => pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3];
                [over_white(px[0], a), over_white(px[1], a), over_white(px[2], a)]
            })
            .collect(),
        png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|px| {
                let g = over_white(px[0], px[1]);
                [g, g, g]
            })
            .collect(),
        other => {
            return Err(ExportError::Image(format!(
                "unsupported colour type {other:?} after expansion"
            )))
        }
    };

    Ok(RasterImage {
        width: info.width,
        height: info.height,
        rgb,
    })
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Drawn size of the image on the page, in points: `(page width, scaled height)`.
pub fn placement(width: u32, height: u32) -> (f32, f32) {
    let draw_w = A4_WIDTH_PT;
    let draw_h = height as f32 * draw_w / width as f32;
    (draw_w, draw_h)
}

/// Builds the single-page PDF holding `image`.
pub fn image_pdf(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&image.rgb)?;
    let compressed = encoder.finish()?;

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width),
            "Height" => i64::from(image.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    ));

    let (draw_w, draw_h) = placement(image.width, image.height);
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(draw_w),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(draw_h),
                    Object::Integer(0),
                    Object::Real(A4_HEIGHT_PT - draw_h),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(A4_WIDTH_PT),
            Object::Real(A4_HEIGHT_PT),
        ],
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => Object::Reference(image_id),
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Pdf(format!("Save failed: {e}")))?;
    Ok(buffer)
}
