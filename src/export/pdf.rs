//! PDF writer for paginated pages.
//!
//! Pages are A4 (210mm x 297mm). Text and chrome are written with the
//! builtin Helvetica faces so no font assets ship with the crate; the
//! subject photo is re-encoded as JPEG at the configured quality and
//! embedded as a raster, cropped per page slice when a cut falls through
//! it.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::DynamicImage;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};

use super::layout::{self, Tint, GOLD};
use super::pagination::{Page, PagePrimitive};
use crate::config::ExportSettings;

const PT_PER_MM: f64 = 72.0 / 25.4;
// printpdf draws embedded images at this dpi when no transform is given.
const IMAGE_BASE_DPI: f64 = 300.0;

struct PdfFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Writes the paginated document to `path`, returning the page count.
pub fn write_pdf(
    title: &str,
    pages: &[Page],
    photo: Option<&DynamicImage>,
    settings: &ExportSettings,
    path: &Path,
) -> Result<usize> {
    let ppm = layout::px_per_mm(settings.render_scale);
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        mm(layout::A4_WIDTH_MM),
        mm(layout::A4_HEIGHT_MM),
        "Layer 1",
    );
    let fonts = PdfFonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..pages.len() {
        let (page, layer) =
            doc.add_page(mm(layout::A4_WIDTH_MM), mm(layout::A4_HEIGHT_MM), "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for (page, layer) in pages.iter().zip(&layers) {
        for primitive in &page.primitives {
            draw_primitive(layer, primitive, &fonts, photo, settings, ppm)?;
        }
    }

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(pages.len())
}

fn draw_primitive(
    layer: &PdfLayerReference,
    primitive: &PagePrimitive,
    fonts: &PdfFonts,
    photo: Option<&DynamicImage>,
    settings: &ExportSettings,
    ppm: f32,
) -> Result<()> {
    match primitive {
        PagePrimitive::Text {
            x,
            y,
            size,
            bold,
            color,
            content,
        } => {
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            let size_pt = (size / ppm) as f64 * PT_PER_MM;
            // Baseline sits roughly 80% into the glyph box.
            let baseline = layout::A4_HEIGHT_MM - (y + 0.8 * size) / ppm;
            layer.set_fill_color(rgb(*color));
            layer.use_text(content.clone(), size_pt as f32, mm(x / ppm), mm(baseline), font);
        }
        PagePrimitive::Rule {
            x,
            y,
            width,
            thickness,
            color,
        } => {
            let y_mm = layout::A4_HEIGHT_MM - y / ppm;
            layer.set_outline_color(rgb(*color));
            layer.set_outline_thickness(((thickness / ppm) as f64 * PT_PER_MM) as f32);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(x / ppm), mm(y_mm)), false),
                    (Point::new(mm((x + width) / ppm), mm(y_mm)), false),
                ],
                is_closed: false,
            });
        }
        PagePrimitive::Band {
            x,
            y,
            width,
            height,
            color,
        } => {
            layer.set_fill_color(rgb(*color));
            layer.add_rect(band_rect(*x, *y, *width, *height, ppm).with_mode(PaintMode::Fill));
        }
        PagePrimitive::Photo {
            x,
            y,
            width,
            height,
            crop_top,
            crop_height,
        } => {
            match photo {
                Some(source) => embed_photo_slice(
                    layer, source, *x, *y, *width, *height, *crop_top, *crop_height, settings, ppm,
                )?,
                None => {
                    // Degraded output: an empty framed slot where the
                    // portrait would have been.
                    layer.set_outline_color(rgb(GOLD));
                    layer.set_outline_thickness(2.0);
                    layer.add_rect(
                        band_rect(*x, *y, *width, *height, ppm).with_mode(PaintMode::Stroke),
                    );
                }
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn embed_photo_slice(
    layer: &PdfLayerReference,
    source: &DynamicImage,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    crop_top: f32,
    crop_height: f32,
    settings: &ExportSettings,
    ppm: f32,
) -> Result<()> {
    let src_h = source.height();
    let crop_y = ((crop_top * src_h as f32) as u32).min(src_h.saturating_sub(1));
    let crop_h = ((crop_height * src_h as f32).round() as u32)
        .max(1)
        .min(src_h - crop_y);
    let slice = source.crop_imm(0, crop_y, source.width(), crop_h);

    // Round-trip through JPEG at the configured quality; this is the
    // encoding that ends up rasterized on the page.
    let rgb_slice = slice.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, settings.jpeg_quality)
        .encode_image(&rgb_slice)
        .context("Failed to JPEG-encode photo slice")?;
    let decoder =
        JpegDecoder::new(Cursor::new(jpeg.as_slice())).context("Failed to reopen photo slice")?;
    let image = Image::try_from(decoder).map_err(|err| anyhow!("Failed to embed photo: {err}"))?;

    let w_mm = (width / ppm) as f64;
    let h_mm = (height / ppm) as f64;
    let base_w_mm = rgb_slice.width() as f64 * 25.4 / IMAGE_BASE_DPI;
    let base_h_mm = rgb_slice.height() as f64 * 25.4 / IMAGE_BASE_DPI;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x / ppm)),
            translate_y: Some(mm(layout::A4_HEIGHT_MM - (y + height) / ppm)),
            scale_x: Some((w_mm / base_w_mm) as f32),
            scale_y: Some((h_mm / base_h_mm) as f32),
            ..Default::default()
        },
    );

    // Gold frame, matching the displayed portrait.
    layer.set_outline_color(rgb(GOLD));
    layer.set_outline_thickness(2.0);
    layer.add_rect(band_rect(x, y, width, height, ppm).with_mode(PaintMode::Stroke));
    Ok(())
}

fn band_rect(x: f32, y: f32, width: f32, height: f32, ppm: f32) -> Rect {
    Rect::new(
        mm(x / ppm),
        mm(layout::A4_HEIGHT_MM - (y + height) / ppm),
        mm((x + width) / ppm),
        mm(layout::A4_HEIGHT_MM - y / ppm),
    )
}

fn rgb(tint: Tint) -> Color {
    Color::Rgb(Rgb::new(tint.r.into(), tint.g.into(), tint.b.into(), None))
}

/// Millimetre coordinate from an f32 pixel-derived value.
fn mm(value: f32) -> Mm {
    Mm(value)
}
