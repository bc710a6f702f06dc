//! Auxiliary mark siting
//!
//! Builds the draw directives that accompany placed pages: separator and
//! cyan fills, barcode and logo siting, the per-sheet chart, mail-merge
//! text, and the manifest body. All offsets are in points from the slot
//! origin.

use crate::constants::{BARCODE_TEXT_SIZE, SPINE_LOGO_INSET};
use crate::job::JobDescriptor;
use crate::metadata::{BarcodeSite, ChartOrientation, CropSpec, ProductMetadata};
use crate::render::TextMetrics;
use crate::sheetmap::SheetMap;
use crate::types::Orientation;

use super::{CropMark, Directive, FontId, Rect};

impl CropMark {
    pub(crate) fn around(x: f32, y: f32, width: f32, height: f32, spec: &CropSpec) -> Self {
        Self {
            x,
            y,
            width,
            height,
            line_width: spec.line_width,
            length: spec.length,
            start: spec.start,
            bleed: spec.bleed,
        }
    }
}

/// Per-sheet density chart with its "n of m" label
pub(crate) fn chart_mark(metadata: &ProductMetadata, sheet: usize, depth: usize) -> Directive {
    let (mut n, mut total) = (sheet, depth);
    if metadata.duplex() {
        n /= 2;
        total /= 2;
    }
    let (mut x, mut y) = (10.0, 10.0);
    if let Some((off_x, off_y)) = metadata.sheet_offset {
        x += off_x;
        y += off_y;
    }
    Directive::Chart {
        x,
        y,
        vertical: metadata.chart_orientation == ChartOrientation::Vertical,
        label: format!("{} of {}", n + 1, total),
    }
}

/// Color separator fill and its centered label
pub(crate) fn separator_marks(
    label: &str,
    metadata: &ProductMetadata,
    metrics: &dyn TextMetrics,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    row: usize,
    col: usize,
) -> Vec<Directive> {
    let mut out = vec![Directive::Rect {
        rect: Rect::new(x, y, width, height),
        color: metadata.color.clone(),
    }];
    let text = if label.is_empty() {
        // row-first cell number
        (row * metadata.cols + col + 1).to_string()
    } else {
        label.to_string()
    };
    let str_width = metrics.text_width(&text, FontId::Serif, 36.0);
    let mut orientate = metadata.orientation;
    let mut xpos = x + width / 2.0;
    let mut ypos = y + height / 2.0;
    if orientate == Orientation::West {
        xpos += 18.0;
        ypos -= str_width / 2.0;
    } else {
        xpos -= str_width / 2.0;
        ypos -= 18.0;
    }
    if metadata.reverse_cols && col % 2 == 1 && orientate == Orientation::West {
        orientate = Orientation::East;
        ypos += str_width;
    }
    out.push(Directive::Text {
        text,
        font: FontId::Serif,
        size: 36.0,
        x: xpos,
        y: ypos,
        orientate,
        background: None,
    });
    out
}

/// Cyan separator back, extended toward the identifier edge so the stack
/// stays machine-sortable
pub(crate) fn cyan_mark(
    metadata: &ProductMetadata,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    let (mut off_x, mut off_y) = (0.0, 0.0);
    if !metadata.binding_side_id() {
        if metadata.orientation == Orientation::West {
            off_y = 50.0;
        } else {
            off_x = 50.0;
        }
    }
    let rect = if metadata.no_extend_separator {
        Rect::new(x, y, width, height)
    } else {
        Rect::new(x - off_x, y - off_y, width + off_x, height + off_y)
    };
    Directive::Rect {
        rect,
        color: "cyan".to_string(),
    }
}

/// Order barcode in the corner of a trailing barcode page
pub(crate) fn barcode_page_mark(
    job: &JobDescriptor,
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
) -> Directive {
    let xpos = if content_orientation == Orientation::West {
        x + width - 30.0
    } else {
        x + 30.0
    };
    Directive::Text {
        text: format!("*{}*", job.order_item_id),
        font: FontId::Barcode,
        size: metadata.barcode_size,
        x: xpos,
        y: y + 30.0,
        orientate: content_orientation,
        background: Some("white".to_string()),
    }
}

/// Publisher logo centered on a trailing logo page
pub(crate) fn logo_page_mark(
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    Directive::Logo {
        rect: Rect::new(x, y, width, height),
        orientate: content_orientation,
        version: metadata.logo_version.clone(),
    }
}

/// Product-level barcode on a cover/card front
pub(crate) fn product_barcode_front(
    site: &BarcodeSite,
    job: &JobDescriptor,
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    let (xpos, ypos) = match site.pos {
        Some((off_x, off_y)) => (x + off_x, y + off_y),
        None => {
            if content_orientation == Orientation::West {
                (x + width / 2.0, y + 215.0)
            } else {
                (x + width - 150.0, y + height / 2.0)
            }
        }
    };
    let orientate = if site.vertical {
        if content_orientation == Orientation::West {
            Orientation::North
        } else {
            Orientation::West
        }
    } else {
        metadata.orientation
    };
    Directive::Text {
        text: format!("*{}*", job.barcode_text()),
        font: FontId::Barcode,
        size: metadata.barcode_size,
        x: xpos,
        y: ypos,
        orientate,
        background: Some("white".to_string()),
    }
}

/// Product-level barcode (and spine logo) on a cover back
#[allow(clippy::too_many_arguments)]
pub(crate) fn product_barcode_back(
    site: &BarcodeSite,
    job: &JobDescriptor,
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    col: usize,
) -> Vec<Directive> {
    let (mut xpos, mut ypos) = match site.pos {
        Some((off_x, off_y)) => (x + off_x, y + off_y),
        None => (x + width - 20.0, y + height - 110.0),
    };
    let mut orientate = metadata.orientation;
    if metadata.reverse_cols && col % 2 == 1 && orientate == Orientation::West {
        // only exercised on pocket books
        orientate = Orientation::East;
        xpos = 2.0 * x + width - xpos;
        ypos = 2.0 * y + height - ypos;
    }
    let mut out = vec![Directive::Text {
        text: format!("*{}*", job.order_item_id),
        font: FontId::Barcode,
        size: metadata.barcode_size,
        x: xpos,
        y: ypos,
        orientate,
        background: Some("white".to_string()),
    }];
    if metadata.logo.is_some_and(|logo| logo.back) {
        let (mut logo_w, mut logo_h) = (width, height);
        let (mut logo_x, mut logo_y) = (x, y);
        if content_orientation == Orientation::West {
            logo_h /= 2.0;
            logo_y += logo_h - SPINE_LOGO_INSET;
            if metadata.reverse_cols && col % 2 == 1 {
                logo_y -= logo_h - 2.0 * SPINE_LOGO_INSET;
            }
        } else {
            logo_w /= 2.0;
            logo_x += logo_w - SPINE_LOGO_INSET;
        }
        out.push(Directive::Logo {
            rect: Rect::new(logo_x, logo_y, logo_w, logo_h),
            orientate,
            version: metadata.logo_version.clone(),
        });
    }
    out
}

/// Half-panel logo on greeting-card fronts
pub(crate) fn greeting_front_logo(
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    let orientate = if content_orientation == Orientation::North {
        Orientation::South
    } else {
        content_orientation
    };
    let half = width / 2.0;
    Directive::Logo {
        rect: Rect::new(x + half, y, half, height),
        orientate,
        version: metadata.logo_version.clone(),
    }
}

/// Logo on postcard backs
pub(crate) fn postcard_back_logo(
    metadata: &ProductMetadata,
    content_orientation: Orientation,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    let (mut xpos, mut ypos) = (x, y);
    let orientate = if content_orientation == Orientation::North {
        ypos -= height / 2.0 - 30.0;
        content_orientation
    } else {
        xpos -= width / 2.0 - 30.0;
        Orientation::East
    };
    Directive::Logo {
        rect: Rect::new(xpos, ypos, width, height),
        orientate,
        version: metadata.logo_version.clone(),
    }
}

/// Mail-merge code flowed into a rotated box at the panel center
pub(crate) fn mail_merge_mark(
    code: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Directive {
    Directive::TextBox {
        text: code.to_string(),
        font: FontId::Sans,
        size: 15.6,
        x: x + width / 2.0,
        y: y + height / 2.0,
        rotation: -90.0,
        rect: Rect::new(-220.0, -313.0, 155.0, 400.0),
    }
}

/// Manifest body: one line plus Code-39 companion per job on the run
#[allow(clippy::too_many_arguments)]
pub(crate) fn manifest_marks(
    map: &SheetMap,
    metrics: &dyn TextMetrics,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    title: Option<&str>,
) -> Vec<Directive> {
    let mut out = Vec::new();
    let orientate;
    let mut xpos;
    let mut ypos;
    if width > height {
        orientate = Orientation::West;
        xpos = x + 20.0;
        ypos = y + 20.0;
    } else {
        orientate = Orientation::North;
        xpos = x + 10.0;
        ypos = y + height - 40.0;
    }

    if let Some(title) = title {
        let text_width = metrics.text_width(title, FontId::Serif, 10.0) + 5.0;
        let bar_width = metrics.text_width(title, FontId::Barcode, BARCODE_TEXT_SIZE) + 5.0;
        let bar = format!("*{}*", title.replace(' ', ""));
        if orientate == Orientation::West {
            out.push(text(title, FontId::Serif, 10.0, xpos,
                ypos + height / 2.0 - (text_width + bar_width) / 2.0, orientate));
            out.push(text(&bar, FontId::Barcode, BARCODE_TEXT_SIZE, xpos,
                ypos + height / 2.0 - bar_width / 2.0 + text_width / 2.0, orientate));
            out.push(Directive::Line {
                x1: xpos + 15.0,
                y1: ypos,
                x2: xpos + 15.0,
                y2: ypos + height - 40.0,
                line_width: 0.1,
            });
            xpos += 40.0;
        } else {
            out.push(text(title, FontId::Serif, 10.0,
                xpos + width / 2.0 - (text_width + bar_width) / 2.0, ypos, orientate));
            out.push(text(&bar, FontId::Barcode, BARCODE_TEXT_SIZE,
                xpos + width / 2.0 - bar_width / 2.0 + text_width / 2.0, ypos, orientate));
            out.push(Directive::Line {
                x1: xpos + 30.0,
                y1: ypos - 15.0,
                x2: xpos + width - 40.0,
                y2: ypos - 15.0,
                line_width: 0.1,
            });
            ypos -= 40.0;
        }
    }

    let (start_x, start_y) = (xpos, ypos);
    for job in map.jobs() {
        if job.order_item_id < 0 {
            continue;
        }
        let line = format!("{} - Qty {} Pgs {}", job.order_item_id, job.qty, job.pages);
        let bar = format!("*{}*", job.order_item_id);
        let text_width = metrics.text_width(&line, FontId::Serif, 9.0);
        let bar_width = metrics.text_width(&bar, FontId::Barcode, BARCODE_TEXT_SIZE);
        out.push(text(&line, FontId::Serif, 9.0, xpos, ypos, orientate));
        let (bar_x, bar_y) = if orientate == Orientation::West {
            (xpos, ypos + text_width + 5.0)
        } else {
            (xpos + text_width + 5.0, ypos)
        };
        out.push(text(&bar, FontId::Barcode, BARCODE_TEXT_SIZE, bar_x, bar_y, orientate));
        if orientate == Orientation::West {
            xpos += 40.0;
            if xpos > width - 40.0 {
                xpos = start_x;
                ypos += text_width + bar_width + 20.0;
            }
        } else {
            ypos -= 40.0;
            if ypos < y + 40.0 {
                ypos = start_y;
                xpos += text_width + bar_width + 20.0;
            }
        }
    }
    out
}

fn text(
    content: &str,
    font: FontId,
    size: f32,
    x: f32,
    y: f32,
    orientate: Orientation,
) -> Directive {
    Directive::Text {
        text: content.to_string(),
        font,
        size,
        x,
        y,
        orientate,
        background: None,
    }
}
