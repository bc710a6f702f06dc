//! Renderer boundary
//!
//! The engine computes geometry; a `Renderer` session owned by the caller
//! turns it into document pages. Renderer sessions are stateful and
//! single-writer (one open document at a time), so callers must serialize
//! access to a given session; the engine itself holds no document state.
//!
//! String-width measurement is a renderer service: mark and identifier
//! siting depends on it, so the placement engine queries `TextMetrics`
//! while planning.

use crate::placement::{Directive, FontId, PlacementInstruction, SheetPlan};
use crate::types::Result;

/// String-width measurement service
pub trait TextMetrics {
    /// Width of `text` in points when set in `font` at `size`
    fn text_width(&self, text: &str, font: FontId, size: f32) -> f32;
}

/// Character-count width estimate, for planning without a font engine.
///
/// Good enough for mark siting on the press sheet; swap in the real
/// renderer's measurement for production output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMetrics {
    pub serif_factor: f32,
    pub sans_factor: f32,
    /// Code-39 glyphs are wide and fixed-pitch
    pub barcode_factor: f32,
}

impl Default for ApproxTextMetrics {
    fn default() -> Self {
        Self {
            serif_factor: 0.5,
            sans_factor: 0.52,
            barcode_factor: 1.0,
        }
    }
}

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, text: &str, font: FontId, size: f32) -> f32 {
        let factor = match font {
            FontId::Serif => self.serif_factor,
            FontId::Sans => self.sans_factor,
            FontId::Barcode => self.barcode_factor,
        };
        text.chars().count() as f32 * size * factor
    }
}

/// Drawing session for one output document.
///
/// Implementations own the document lifecycle (open, per-page begin/end,
/// close) and the low-level drawing primitives.
pub trait Renderer: TextMetrics {
    /// Start a new sheet side. A flipped sheet is rotated 180 degrees
    /// before any slot is drawn.
    fn begin_sheet(&mut self, width: f32, height: f32, flipped: bool) -> Result<()>;

    /// Place the slot's source page content; called only for slots that
    /// carry a source reference.
    fn place_page(&mut self, slot: &PlacementInstruction) -> Result<()>;

    fn draw(&mut self, directive: &Directive) -> Result<()>;

    fn end_sheet(&mut self) -> Result<()>;
}

/// Drive a renderer through a planned run, in emission order.
pub fn render_plans(renderer: &mut dyn Renderer, plans: &[SheetPlan]) -> Result<()> {
    for plan in plans {
        renderer.begin_sheet(plan.width, plan.height, plan.flipped)?;
        for slot in &plan.slots {
            if slot.page.source.is_some() {
                renderer.place_page(slot)?;
            }
            for directive in &slot.marks {
                renderer.draw(directive)?;
            }
        }
        for crop in &plan.crops {
            renderer.draw(&Directive::CropMarks(*crop))?;
        }
        renderer.end_sheet()?;
    }
    Ok(())
}

/// One call captured by a `RecordingRenderer`
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    BeginSheet {
        width: f32,
        height: f32,
        flipped: bool,
    },
    PlacePage(PlacementInstruction),
    Draw(Directive),
    EndSheet,
}

/// Renderer that records its call stream instead of drawing.
///
/// Useful for dry runs and for asserting on emitted geometry in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub events: Vec<RenderEvent>,
    metrics: ApproxTextMetrics,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextMetrics for RecordingRenderer {
    fn text_width(&self, text: &str, font: FontId, size: f32) -> f32 {
        self.metrics.text_width(text, font, size)
    }
}

impl Renderer for RecordingRenderer {
    fn begin_sheet(&mut self, width: f32, height: f32, flipped: bool) -> Result<()> {
        self.events.push(RenderEvent::BeginSheet {
            width,
            height,
            flipped,
        });
        Ok(())
    }

    fn place_page(&mut self, slot: &PlacementInstruction) -> Result<()> {
        self.events.push(RenderEvent::PlacePage(slot.clone()));
        Ok(())
    }

    fn draw(&mut self, directive: &Directive) -> Result<()> {
        self.events.push(RenderEvent::Draw(directive.clone()));
        Ok(())
    }

    fn end_sheet(&mut self) -> Result<()> {
        self.events.push(RenderEvent::EndSheet);
        Ok(())
    }
}
