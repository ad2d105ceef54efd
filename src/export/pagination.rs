//! Cuts the continuous canvas into A4 page windows.
//!
//! The policy is the one the displayed page always had: the cut happens
//! strictly on vertical pixel offset. A band or the photograph straddling a
//! cut is clipped into per-page slices; a text run lands on the page that
//! contains the top of its glyph box and may sit flush against the cut.
//! Mid-row breaks are accepted behavior, not something to paper over.

use super::layout::{Canvas, Primitive, Tint};

/// A primitive relocated onto one page; `y` is local to that page.
#[derive(Debug, Clone, PartialEq)]
pub enum PagePrimitive {
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
    /// A horizontal slice of the photo box. `crop_top` and `crop_height`
    /// are fractions of the full box height, telling the writer which part
    /// of the source raster this slice shows.
    Photo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        crop_top: f32,
        crop_height: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub primitives: Vec<PagePrimitive>,
}

pub fn page_count(canvas_height: f32, page_height: f32) -> usize {
    ((canvas_height / page_height).ceil() as usize).max(1)
}

/// Splits the canvas into pages of `page_height` pixels.
pub fn paginate(canvas: &Canvas, page_height: f32) -> Vec<Page> {
    let count = page_count(canvas.height, page_height);
    let mut pages = vec![Page::default(); count];
    for primitive in &canvas.primitives {
        match primitive {
            Primitive::Text {
                x,
                y,
                size,
                bold,
                color,
                content,
            } => {
                let page = page_index(*y, page_height, count);
                pages[page].primitives.push(PagePrimitive::Text {
                    x: *x,
                    y: y - page as f32 * page_height,
                    size: *size,
                    bold: *bold,
                    color: *color,
                    content: content.clone(),
                });
            }
            Primitive::Rule {
                x,
                y,
                width,
                thickness,
                color,
            } => {
                let page = page_index(*y, page_height, count);
                pages[page].primitives.push(PagePrimitive::Rule {
                    x: *x,
                    y: y - page as f32 * page_height,
                    width: *width,
                    thickness: *thickness,
                    color: *color,
                });
            }
            Primitive::Band {
                x,
                y,
                width,
                height,
                color,
            } => {
                for (page, top, slice_h) in slices(*y, *height, page_height, count) {
                    pages[page].primitives.push(PagePrimitive::Band {
                        x: *x,
                        y: top,
                        width: *width,
                        height: slice_h,
                        color: *color,
                    });
                }
            }
            Primitive::Photo {
                x,
                y,
                width,
                height,
            } => {
                for (page, top, slice_h) in slices(*y, *height, page_height, count) {
                    let offset = page as f32 * page_height + top - y;
                    pages[page].primitives.push(PagePrimitive::Photo {
                        x: *x,
                        y: top,
                        width: *width,
                        height: slice_h,
                        crop_top: offset / height,
                        crop_height: slice_h / height,
                    });
                }
            }
        }
    }
    pages
}

fn page_index(y: f32, page_height: f32, count: usize) -> usize {
    ((y / page_height) as usize).min(count - 1)
}

/// Per-page slices of a vertical extent: (page, local top, slice height).
fn slices(y: f32, height: f32, page_height: f32, count: usize) -> Vec<(usize, f32, f32)> {
    let mut out = Vec::new();
    let bottom = y + height;
    let first = page_index(y, page_height, count);
    let last = page_index((bottom - f32::EPSILON).max(y), page_height, count);
    for page in first..=last {
        let window_top = page as f32 * page_height;
        let window_bottom = window_top + page_height;
        let top = y.max(window_top);
        let slice_bottom = bottom.min(window_bottom);
        let slice_h = slice_bottom - top;
        if slice_h > 0.0 {
            out.push((page, top - window_top, slice_h));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::layout::{Canvas, Primitive, INK, NAVY};

    fn canvas(primitives: Vec<Primitive>, height: f32) -> Canvas {
        Canvas {
            primitives,
            width: 800.0,
            height,
            scale: 1.0,
        }
    }

    #[test]
    fn single_page_when_content_fits() {
        assert_eq!(page_count(500.0, 1123.0), 1);
        assert_eq!(page_count(1123.0, 1123.0), 1);
        assert_eq!(page_count(1124.0, 1123.0), 2);
    }

    #[test]
    fn band_straddling_the_cut_is_clipped() {
        let band = Primitive::Band {
            x: 0.0,
            y: 900.0,
            width: 800.0,
            height: 400.0,
            color: NAVY,
        };
        let pages = paginate(&canvas(vec![band], 1300.0), 1000.0);
        assert_eq!(pages.len(), 2);
        let PagePrimitive::Band { y, height, .. } = &pages[0].primitives[0] else {
            panic!("expected band");
        };
        assert_eq!((*y, *height), (900.0, 100.0));
        let PagePrimitive::Band { y, height, .. } = &pages[1].primitives[0] else {
            panic!("expected band");
        };
        assert_eq!((*y, *height), (0.0, 300.0));
    }

    #[test]
    fn photo_slices_carry_crop_fractions() {
        let photo = Primitive::Photo {
            x: 100.0,
            y: 950.0,
            width: 300.0,
            height: 200.0,
        };
        let pages = paginate(&canvas(vec![photo], 1150.0), 1000.0);
        let PagePrimitive::Photo {
            crop_top,
            crop_height,
            ..
        } = &pages[0].primitives[0]
        else {
            panic!("expected photo");
        };
        assert!((crop_top - 0.0).abs() < 1e-6);
        assert!((crop_height - 0.25).abs() < 1e-6);
        let PagePrimitive::Photo {
            crop_top,
            crop_height,
            ..
        } = &pages[1].primitives[0]
        else {
            panic!("expected photo");
        };
        assert!((crop_top - 0.25).abs() < 1e-6);
        assert!((crop_height - 0.75).abs() < 1e-6);
    }

    #[test]
    fn text_sits_on_the_page_holding_its_top() {
        let text = Primitive::Text {
            x: 10.0,
            y: 995.0,
            size: 24.0,
            bold: false,
            color: INK,
            content: "cut line".into(),
        };
        let pages = paginate(&canvas(vec![text], 1100.0), 1000.0);
        assert!(pages[0].primitives.len() == 1, "text stays on first page");
        assert!(pages[1].primitives.is_empty());
    }
}
