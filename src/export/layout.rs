//! Measures a `DocumentSpec` into drawing primitives on a continuous
//! A4-width canvas.
//!
//! Geometry is in pixels at 96 dpi times the configured render scale, with
//! the y axis growing downwards from the top of the canvas. The canvas has
//! no page boundaries; cutting it into pages is the pagination stage's job.

use super::template::{DocumentSpec, SectionBody, SectionSpec};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
const BASE_DPI: f32 = 96.0;
const MM_PER_INCH: f32 = 25.4;

/// Average glyph advance as a fraction of the font size, used for wrapping
/// and centering estimates with the builtin Helvetica faces.
const GLYPH_ASPECT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

// Palette carried over from the displayed page: deep navy chrome with gold
// accents on a white sheet.
pub const NAVY: Tint = Tint { r: 0.059, g: 0.204, b: 0.376 };
pub const GOLD: Tint = Tint { r: 0.722, g: 0.525, b: 0.043 };
pub const INK: Tint = Tint { r: 0.07, g: 0.07, b: 0.07 };
pub const WHITE: Tint = Tint { r: 1.0, g: 1.0, b: 1.0 };

/// One drawable element. `y` is measured from the canvas top; for text it
/// is the top of the glyph box and `size` is the font height.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Tint,
        content: String,
    },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Tint,
    },
    Band {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Tint,
    },
    /// Slot for the subject photo, framed by the writer.
    Photo { x: f32, y: f32, width: f32, height: f32 },
}

/// The measured, still unpaginated document.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub primitives: Vec<Primitive>,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

pub fn px_per_mm(scale: f32) -> f32 {
    BASE_DPI / MM_PER_INCH * scale
}

pub fn page_width_px(scale: f32) -> f32 {
    A4_WIDTH_MM * px_per_mm(scale)
}

pub fn page_height_px(scale: f32) -> f32 {
    A4_HEIGHT_MM * px_per_mm(scale)
}

struct Cursor {
    primitives: Vec<Primitive>,
    y: f32,
    scale: f32,
    width: f32,
}

impl Cursor {
    fn px(&self, css_px: f32) -> f32 {
        css_px * self.scale
    }

    fn text_width(&self, content: &str, size: f32) -> f32 {
        content.chars().count() as f32 * size * GLYPH_ASPECT
    }

    fn centered_text(&mut self, content: &str, size: f32, bold: bool, color: Tint) {
        let width = self.text_width(content, size);
        let x = ((self.width - width) / 2.0).max(0.0);
        self.primitives.push(Primitive::Text {
            x,
            y: self.y,
            size,
            bold,
            color,
            content: content.to_string(),
        });
        self.y += size * 1.35;
    }
}

/// Lays the document out on a continuous canvas.
pub fn lay_out(doc: &DocumentSpec, scale: f32) -> Canvas {
    let width = page_width_px(scale);
    let mut cursor = Cursor {
        primitives: Vec::new(),
        y: 0.0,
        scale,
        width,
    };
    let mm = px_per_mm(scale);
    let header_h = 15.0 * mm;
    let footer_h = 10.0 * mm;
    let rail_w = 5.0 * mm;
    let margin = 20.0 * mm;

    // Chrome bands are emitted first so everything else paints above them.
    // The side rails and the footer band are appended once the content
    // height is known.
    cursor.primitives.push(Primitive::Band {
        x: 0.0,
        y: 0.0,
        width,
        height: header_h,
        color: NAVY,
    });

    cursor.y = header_h + cursor.px(20.0);
    cursor.centered_text(&doc.title, cursor.px(24.0), true, NAVY);
    cursor.y += cursor.px(6.0);
    cursor.centered_text(&doc.subject, cursor.px(20.0), false, INK);
    cursor.y += cursor.px(12.0);

    if doc.photo.is_some() {
        let photo_w = cursor.px(150.0);
        let photo_h = cursor.px(180.0);
        cursor.primitives.push(Primitive::Photo {
            x: (width - photo_w) / 2.0,
            y: cursor.y,
            width: photo_w,
            height: photo_h,
        });
        cursor.y += photo_h + cursor.px(20.0);
    }

    for section in &doc.sections {
        lay_out_section(&mut cursor, section, margin, width - 2.0 * margin);
    }

    // Footer band with the copyright line inside it.
    cursor.y += cursor.px(10.0);
    let footer_top = cursor.y;
    cursor.primitives.push(Primitive::Band {
        x: 0.0,
        y: footer_top,
        width,
        height: footer_h,
        color: NAVY,
    });
    let footer_size = cursor.px(10.0);
    let footer_width = cursor.text_width(&doc.footer, footer_size);
    cursor.primitives.push(Primitive::Text {
        x: ((width - footer_width) / 2.0).max(0.0),
        y: footer_top + (footer_h - footer_size) / 2.0,
        size: footer_size,
        bold: false,
        color: WHITE,
        content: doc.footer.clone(),
    });
    let height = footer_top + footer_h;

    // Gold side rails between header and footer bands.
    for x in [0.0, width - rail_w] {
        cursor.primitives.insert(
            1,
            Primitive::Band {
                x,
                y: header_h,
                width: rail_w,
                height: footer_top - header_h,
                color: GOLD,
            },
        );
    }

    Canvas {
        primitives: cursor.primitives,
        width,
        height,
        scale,
    }
}

fn lay_out_section(cursor: &mut Cursor, section: &SectionSpec, margin: f32, content_w: f32) {
    let heading_size = cursor.px(18.0);
    cursor.primitives.push(Primitive::Text {
        x: margin,
        y: cursor.y,
        size: heading_size,
        bold: true,
        color: NAVY,
        content: section.heading.clone(),
    });
    cursor.y += heading_size * 1.3;
    cursor.primitives.push(Primitive::Rule {
        x: margin,
        y: cursor.y,
        width: content_w,
        thickness: cursor.px(1.0),
        color: GOLD,
    });
    cursor.y += cursor.px(10.0);

    let body_size = cursor.px(12.0);
    let line_gap = body_size * 1.4;
    let pad = cursor.px(8.0);
    match &section.body {
        SectionBody::Table(rows) => {
            // 40% label column, as in the displayed tables.
            let label_x = margin;
            let value_x = margin + content_w * 0.4;
            let value_w = content_w * 0.6 - pad;
            for row in rows {
                cursor.primitives.push(Primitive::Text {
                    x: label_x,
                    y: cursor.y,
                    size: body_size,
                    bold: true,
                    color: INK,
                    content: row.label.clone(),
                });
                let lines = wrap_text(&row.value, max_chars(value_w, body_size));
                for (index, line) in lines.iter().enumerate() {
                    cursor.primitives.push(Primitive::Text {
                        x: value_x,
                        y: cursor.y + index as f32 * line_gap,
                        size: body_size,
                        bold: false,
                        color: INK,
                        content: line.clone(),
                    });
                }
                cursor.y += lines.len().max(1) as f32 * line_gap + pad;
            }
        }
        SectionBody::Paragraph(text) => {
            for line in wrap_text(text, max_chars(content_w, body_size)) {
                cursor.primitives.push(Primitive::Text {
                    x: margin + pad,
                    y: cursor.y,
                    size: body_size,
                    bold: false,
                    color: INK,
                    content: line,
                });
                cursor.y += line_gap;
            }
            cursor.y += pad;
        }
    }
    cursor.y += cursor.px(12.0);
}

fn max_chars(width_px: f32, font_px: f32) -> usize {
    ((width_px / (font_px * GLYPH_ASPECT)) as usize).max(8)
}

/// Greedy whitespace wrap. Overlong single words are kept on their own line
/// rather than hyphenated.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
