#![warn(missing_docs)]
//! Drawing surfaces for the filter schematic.
//!
//! A [`DrawingSurface`] only knows a handful of primitives (clear, line, arc, text). The
//! geometry itself is computed elsewhere ([`crate::scene`]) so it can be tested without any
//! pixels involved.
use crate::{
    error::{AoiError, AoiResult},
    scene::{ArcSpan, Segment},
};
use nalgebra::Point2;
use num::ToPrimitive;
use plotters::{
    backend::DrawingBackend,
    coord::Shift,
    element::{DashedPathElement, PathElement, Text},
    prelude::DrawingArea,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontStyle, IntoFont, RGBAColor, ShapeStyle, TextStyle as PlottersTextStyle, WHITE,
    },
};

/// Number of straight segments used to approximate an arc.
const ARC_SEGMENTS: usize = 32;

/// Stroke attributes of lines and arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// stroke color
    pub color: RGBAColor,
    /// line width in pixels
    pub width: f64,
    /// optional dash pattern (dash length, gap length)
    pub dash: Option<(f64, f64)>,
}

/// Attributes of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// text color
    pub color: RGBAColor,
    /// font size in pixels
    pub size: f64,
    /// bold font
    pub bold: bool,
    /// font family
    pub family: String,
}

/// A 2D pixel surface accepting drawing primitives.
pub trait DrawingSurface {
    /// Erase everything drawn so far.
    ///
    /// # Errors
    ///
    /// This function returns an [`AoiError::Drawing`] if the backend fails.
    fn clear(&mut self) -> AoiResult<()>;
    /// Stroke a straight line.
    ///
    /// # Errors
    ///
    /// This function returns an [`AoiError::Drawing`] if the backend fails.
    fn stroke_line(&mut self, segment: &Segment, style: &StrokeStyle) -> AoiResult<()>;
    /// Stroke a circular arc.
    ///
    /// # Errors
    ///
    /// This function returns an [`AoiError::Drawing`] if the backend fails.
    fn stroke_arc(&mut self, arc: &ArcSpan, style: &StrokeStyle) -> AoiResult<()>;
    /// Draw a text with its baseline starting at `anchor`.
    ///
    /// # Errors
    ///
    /// This function returns an [`AoiError::Drawing`] if the backend fails.
    fn draw_text(&mut self, anchor: Point2<f64>, text: &str, style: &TextStyle) -> AoiResult<()>;
}

/// A primitive recorded by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// the surface was cleared
    Clear,
    /// a line was stroked
    Line(Segment, StrokeStyle),
    /// an arc was stroked
    Arc(ArcSpan, StrokeStyle),
    /// a text was drawn
    Text(Point2<f64>, String, TextStyle),
}

/// A [`DrawingSurface`] that keeps the list of primitives instead of drawing pixels.
///
/// Clearing empties the list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Returns the primitives drawn since the last clear (including the clear itself).
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) -> AoiResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }
    fn stroke_line(&mut self, segment: &Segment, style: &StrokeStyle) -> AoiResult<()> {
        self.commands.push(DrawCommand::Line(*segment, *style));
        Ok(())
    }
    fn stroke_arc(&mut self, arc: &ArcSpan, style: &StrokeStyle) -> AoiResult<()> {
        self.commands.push(DrawCommand::Arc(*arc, *style));
        Ok(())
    }
    fn draw_text(&mut self, anchor: Point2<f64>, text: &str, style: &TextStyle) -> AoiResult<()> {
        self.commands
            .push(DrawCommand::Text(anchor, text.to_owned(), style.clone()));
        Ok(())
    }
}

/// A [`DrawingSurface`] on top of a `plotters` drawing area.
pub struct PlottersSurface<B: DrawingBackend> {
    area: DrawingArea<B, Shift>,
}

impl<B: DrawingBackend> PlottersSurface<B> {
    /// Creates a new [`PlottersSurface`] drawing onto the given area.
    #[must_use]
    pub const fn new(area: DrawingArea<B, Shift>) -> Self {
        Self { area }
    }
    /// Flush all pending drawing operations to the backend (e.g. write the file).
    ///
    /// # Errors
    ///
    /// This function returns an [`AoiError::Drawing`] if the backend fails.
    pub fn present(&self) -> AoiResult<()> {
        self.area.present().map_err(drawing_err)
    }
}

fn drawing_err<E: std::fmt::Display>(e: E) -> AoiError {
    AoiError::Drawing(format!("{e}"))
}

fn backend_coord(p: &Point2<f64>) -> AoiResult<(i32, i32)> {
    match (p.x.round().to_i32(), p.y.round().to_i32()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(AoiError::Drawing(format!(
            "point ({}, {}) cannot be mapped to pixel coordinates",
            p.x, p.y
        ))),
    }
}

fn shape_style(style: &StrokeStyle) -> ShapeStyle {
    ShapeStyle {
        color: style.color,
        filled: false,
        stroke_width: style.width.round().to_u32().unwrap_or(1).max(1),
    }
}

fn stroke_path<B: DrawingBackend>(
    area: &DrawingArea<B, Shift>,
    points: Vec<(i32, i32)>,
    style: &StrokeStyle,
) -> AoiResult<()> {
    let shape = shape_style(style);
    if let Some((dash, gap)) = style.dash {
        let dash = dash.round().to_u32().unwrap_or(1).max(1);
        let gap = gap.round().to_u32().unwrap_or(1).max(1);
        area.draw(&DashedPathElement::new(points, dash, gap, shape))
            .map_err(drawing_err)
    } else {
        area.draw(&PathElement::new(points, shape))
            .map_err(drawing_err)
    }
}

impl<B: DrawingBackend> DrawingSurface for PlottersSurface<B> {
    fn clear(&mut self) -> AoiResult<()> {
        self.area.fill(&WHITE).map_err(drawing_err)
    }
    fn stroke_line(&mut self, segment: &Segment, style: &StrokeStyle) -> AoiResult<()> {
        let points = vec![backend_coord(&segment.start)?, backend_coord(&segment.end)?];
        stroke_path(&self.area, points, style)
    }
    fn stroke_arc(&mut self, arc: &ArcSpan, style: &StrokeStyle) -> AoiResult<()> {
        let polyline = arc.to_polyline(ARC_SEGMENTS);
        if polyline.len() < 2 {
            // nothing visible for a zero sweep
            return Ok(());
        }
        let points = polyline
            .iter()
            .map(backend_coord)
            .collect::<AoiResult<Vec<_>>>()?;
        stroke_path(&self.area, points, style)
    }
    fn draw_text(&mut self, anchor: Point2<f64>, text: &str, style: &TextStyle) -> AoiResult<()> {
        let font_style = if style.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let font: PlottersTextStyle<'_> = (style.family.as_str(), style.size)
            .into_font()
            .style(font_style)
            .color(&style.color)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        self.area
            .draw(&Text::new(text.to_owned(), backend_coord(&anchor)?, font))
            .map_err(drawing_err)
    }
}
