//! Identifier text
//!
//! Every content-bearing page carries a human-readable run identifier baked
//! from the product's template. The text hugs one of the four page edges
//! depending on sheet orientation, identifier side, and which face of the
//! sheet is being printed, so it survives trimming on the binding side.

use crate::metadata::ProductMetadata;
use crate::page::LogicalPage;
use crate::render::TextMetrics;
use crate::types::Orientation;

use super::{Directive, FontId};

/// Build the identifier directive for a placed page, if the product
/// configures one.
#[allow(clippy::too_many_arguments)]
pub(crate) fn identifier_mark(
    page: &LogicalPage,
    metadata: &ProductMetadata,
    metrics: &dyn TextMetrics,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    is_back: bool,
    col: usize,
) -> Option<Directive> {
    let template = metadata.id_text.as_deref().filter(|t| !t.is_empty())?;
    let job = page.job.as_ref()?;
    let text = substitute(template, &page.label, job);
    let size = metadata.id_size;
    let str_width = metrics.text_width(&text, FontId::Serif, size);

    let (xpos, ypos, orientate);
    if let Some((pos_x, pos_y)) = metadata.id_pos {
        xpos = pos_x;
        ypos = pos_y;
        orientate = metadata.id_orient.unwrap_or(metadata.orientation);
    } else if metadata.orientation == Orientation::West {
        if metadata.binding_side_id() {
            if is_back {
                orientate = Orientation::North;
                xpos = x + width / 2.0 - str_width / 2.0;
                ypos = y + height - size - 2.0;
            } else {
                orientate = Orientation::South;
                xpos = x + width / 2.0 + str_width / 2.0;
                ypos = y + size + 2.0;
            }
        } else if metadata.reverse_cols && col % 2 == 1 {
            orientate = Orientation::North;
            xpos = x + width / 2.0 - str_width / 2.0;
            ypos = y - size;
        } else {
            orientate = Orientation::South;
            xpos = x + width / 2.0 + str_width / 2.0;
            ypos = y + height + size;
        }
    } else if metadata.binding_side_id() {
        if is_back {
            orientate = Orientation::East;
            xpos = x + width - size - 2.0;
            ypos = y + height / 2.0 + str_width / 2.0;
        } else {
            orientate = Orientation::West;
            xpos = x + size + 2.0;
            ypos = y + height / 2.0 - str_width / 2.0;
        }
    } else if is_back {
        orientate = Orientation::East;
        xpos = x - size;
        ypos = y + height / 2.0 + str_width / 2.0;
    } else {
        orientate = Orientation::West;
        xpos = x + width + size;
        ypos = y + height / 2.0 - str_width / 2.0;
    }

    Some(Directive::Text {
        text,
        font: FontId::Serif,
        size,
        x: xpos,
        y: ypos,
        orientate,
        background: Some("white".to_string()),
    })
}

/// Bake the identifier template for one page
fn substitute(template: &str, label: &str, job: &crate::job::JobDescriptor) -> String {
    template
        .replace("<order_item_id>", &job.order_item_id.to_string())
        .replace("<page>", &title_case(label))
        .replace("<pages>", &job.pages.saturating_sub(1).to_string())
        .replace("<qty>", &job.qty.to_string())
        .replace("<cover>", &job.cover)
}

/// Capitalize the first letter of every word
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobDescriptor;
    use crate::page::LogicalPage;
    use crate::render::ApproxTextMetrics;
    use std::sync::Arc;

    fn job() -> Arc<JobDescriptor> {
        let mut job = JobDescriptor::new(4321, "B", "book.pdf", 12, 3);
        job.cover = "Red Linen".to_string();
        Arc::new(job)
    }

    fn page() -> LogicalPage {
        LogicalPage::content(&job(), 5)
    }

    fn metadata_with_template() -> ProductMetadata {
        let mut meta = ProductMetadata::new(2, 2, (400.0, 600.0));
        meta.id_text = Some("<order_item_id> <page>/<pages> Qty <qty> <cover>".to_string());
        meta
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cover front"), "Cover Front");
        assert_eq!(title_case("logo/barcode"), "Logo/Barcode");
        assert_eq!(title_case("5"), "5");
    }

    #[test]
    fn test_template_substitution() {
        let text = substitute(
            "<order_item_id> <page>/<pages> Qty <qty> <cover>",
            "5",
            &job(),
        );
        assert_eq!(text, "4321 5/11 Qty 3 Red Linen");
    }

    #[test]
    fn test_north_binding_front_sits_on_spine_edge() {
        let meta = metadata_with_template();
        let metrics = ApproxTextMetrics::default();
        let mark = identifier_mark(&page(), &meta, &metrics, 100.0, 200.0, 400.0, 600.0, false, 0)
            .unwrap();
        let Directive::Text { x, orientate, .. } = mark else {
            panic!("expected text directive");
        };
        assert_eq!(orientate, Orientation::West);
        assert!((x - (100.0 + meta.id_size + 2.0)).abs() < 0.01);
    }

    #[test]
    fn test_north_binding_back_moves_to_far_edge() {
        let meta = metadata_with_template();
        let metrics = ApproxTextMetrics::default();
        let mark = identifier_mark(&page(), &meta, &metrics, 100.0, 200.0, 400.0, 600.0, true, 0)
            .unwrap();
        let Directive::Text { x, orientate, .. } = mark else {
            panic!("expected text directive");
        };
        assert_eq!(orientate, Orientation::East);
        assert!((x - (100.0 + 400.0 - meta.id_size - 2.0)).abs() < 0.01);
    }

    #[test]
    fn test_west_binding_uses_top_and_bottom_edges() {
        let mut meta = metadata_with_template();
        meta.orientation = Orientation::West;
        let metrics = ApproxTextMetrics::default();
        let front = identifier_mark(&page(), &meta, &metrics, 0.0, 0.0, 400.0, 600.0, false, 0)
            .unwrap();
        let Directive::Text { y, orientate, .. } = front else {
            panic!("expected text directive");
        };
        assert_eq!(orientate, Orientation::South);
        assert!((y - (meta.id_size + 2.0)).abs() < 0.01);

        let back = identifier_mark(&page(), &meta, &metrics, 0.0, 0.0, 400.0, 600.0, true, 0)
            .unwrap();
        let Directive::Text { y, orientate, .. } = back else {
            panic!("expected text directive");
        };
        assert_eq!(orientate, Orientation::North);
        assert!((y - (600.0 - meta.id_size - 2.0)).abs() < 0.01);
    }

    #[test]
    fn test_absolute_position_override() {
        let mut meta = metadata_with_template();
        meta.id_pos = Some((50.0, 60.0));
        meta.id_orient = Some(Orientation::East);
        let metrics = ApproxTextMetrics::default();
        let mark = identifier_mark(&page(), &meta, &metrics, 100.0, 200.0, 400.0, 600.0, false, 0)
            .unwrap();
        let Directive::Text { x, y, orientate, .. } = mark else {
            panic!("expected text directive");
        };
        assert_eq!((x, y), (50.0, 60.0));
        assert_eq!(orientate, Orientation::East);
    }

    #[test]
    fn test_no_template_means_no_identifier() {
        let meta = ProductMetadata::new(2, 2, (400.0, 600.0));
        let metrics = ApproxTextMetrics::default();
        assert!(
            identifier_mark(&page(), &meta, &metrics, 0.0, 0.0, 400.0, 600.0, false, 0).is_none()
        );
    }
}
