#![warn(missing_docs)]
//! Plotting of transmission spectra.
//!
//! This module contains the description of a chart ([`Trace`], [`TraceStyle`], [`PlotLayout`]),
//! the [`SpectrumPlotter`] trait through which the render pipeline hands over finished traces,
//! and [`FilePlotter`], a `plotters` based implementation writing SVG or bitmap files.
use crate::error::{AoiError, AoiResult};
use crate::spectrum::SpectralSeries;
use approx::abs_diff_ne;
use log::{info, warn};
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, SeriesLabelPosition},
    coord::Shift,
    element::PathElement,
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    series::{AreaSeries, DashedLineSeries, LineSeries},
    style::{Color, IntoFont, RGBAColor, ShapeStyle, BLACK, WHITE},
};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};

/// Output format of a [`FilePlotter`] or a file based drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PltBackEnd {
    /// scalable vector graphics (`.svg`)
    #[default]
    Svg,
    /// bitmap (`.bmp`)
    Bmp,
}

impl PltBackEnd {
    /// Returns the file extension belonging to this backend.
    #[must_use]
    pub const fn file_extension(&self) -> &str {
        match self {
            Self::Svg => "svg",
            Self::Bmp => "bmp",
        }
    }
}

/// Struct that holds the maximum and minimum values of an axis
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct AxLims {
    /// minimum value of the axis
    pub min: f64,
    /// maximum value of the axis
    pub max: f64,
}

impl AxLims {
    /// Creates a new [`AxLims`] struct
    ///
    /// Returns `None` if one of the limits is not finite or if `min >= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let axlim = Self { min, max };
        if axlim.check_validity() {
            Some(axlim)
        } else {
            warn!("Invalid axis limits. Must be finite and min < max.");
            None
        }
    }
    /// Checks the validity of the delivered min and max values and returns a true if it is valid, false otherwise
    #[must_use]
    pub fn check_validity(self) -> bool {
        self.max.is_finite()
            && self.min.is_finite()
            && abs_diff_ne!(self.max, self.min)
            && self.max > self.min
    }
}

/// Visual style of one trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    /// line color including opacity
    pub color: RGBAColor,
    /// line width in pixels
    pub width: u32,
    /// draw a dashed instead of a solid line
    pub dashed: bool,
    /// fill the area between the curve and zero
    pub filled: bool,
}

impl TraceStyle {
    fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color,
            filled: false,
            stroke_width: self.width,
        }
    }
}

/// One labeled curve of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    x: Vec<f64>,
    y: Vec<f64>,
    style: TraceStyle,
    label: String,
}

impl Trace {
    /// Creates a new [`Trace`] from a spectral series. The x values are the wavelengths in
    /// nanometers, the y values the transmission in percent.
    #[must_use]
    pub fn from_series(series: &SpectralSeries, style: TraceStyle, label: &str) -> Self {
        Self {
            x: series.wavelengths_nm().to_vec(),
            y: series.transmission().to_vec(),
            style,
            label: label.to_owned(),
        }
    }
    /// Returns the x values of this [`Trace`].
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }
    /// Returns the y values of this [`Trace`].
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    /// Returns the style of this [`Trace`].
    #[must_use]
    pub const fn style(&self) -> &TraceStyle {
        &self.style
    }
    /// Returns the legend label of this [`Trace`].
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
    fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// Axis and legend configuration of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    /// title of the x axis
    pub x_label: String,
    /// title of the y axis
    pub y_label: String,
    /// fixed range of the x axis
    pub x_lim: AxLims,
    /// fixed range of the y axis
    pub y_lim: AxLims,
    /// show a legend with the trace labels
    pub show_legend: bool,
}

/// A collaborator that renders a complete chart from a list of traces.
pub trait SpectrumPlotter {
    /// Redraw the full chart with the given traces and layout.
    ///
    /// # Errors
    ///
    /// Whether an error is returned depends on the implementation. Errors are passed on
    /// unmodified by the render pipeline.
    fn plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> AoiResult<()>;
}

/// A [`SpectrumPlotter`] writing the chart into an image file.
#[derive(Debug, Clone)]
pub struct FilePlotter {
    path: PathBuf,
    backend: PltBackEnd,
    fig_size: (u32, u32),
}

impl FilePlotter {
    /// Creates a new [`FilePlotter`] writing to `path` with a figure size of 800 x 500 pixels.
    #[must_use]
    pub fn new(path: &Path, backend: PltBackEnd) -> Self {
        Self {
            path: path.to_path_buf(),
            backend,
            fig_size: (800, 500),
        }
    }
    /// Set the figure size in pixels.
    #[must_use]
    pub const fn with_fig_size(mut self, fig_size: (u32, u32)) -> Self {
        self.fig_size = fig_size;
        self
    }
    /// Returns the output path of this [`FilePlotter`].
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpectrumPlotter for FilePlotter {
    fn plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> AoiResult<()> {
        info!("Write spectrum plot to {}", self.path.display());
        match self.backend {
            PltBackEnd::Svg => {
                let root = SVGBackend::new(&self.path, self.fig_size).into_drawing_area();
                draw_chart(&root, traces, layout)
            }
            PltBackEnd::Bmp => {
                let root = BitMapBackend::new(&self.path, self.fig_size).into_drawing_area();
                draw_chart(&root, traces, layout)
            }
        }
    }
}

fn plot_err<E: std::fmt::Display>(e: E) -> AoiError {
    AoiError::Plot(format!("{e}"))
}

/// Draw a full chart with the given traces onto a drawing area.
///
/// # Errors
///
/// This function will return an [`AoiError::Plot`] if the backend reports an error.
pub fn draw_chart<B: DrawingBackend>(
    root: &DrawingArea<B, Shift>,
    traces: &[Trace],
    layout: &PlotLayout,
) -> AoiResult<()> {
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            layout.x_lim.min..layout.x_lim.max,
            layout.y_lim.min..layout.y_lim.max,
        )
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc(layout.x_label.as_str())
        .y_desc(layout.y_label.as_str())
        .label_style(("sans-serif", 15).into_font())
        .draw()
        .map_err(plot_err)?;

    for trace in traces {
        let style = trace.style.shape_style();
        let points = trace.points();
        let anno = if trace.style.filled {
            chart
                .draw_series(
                    AreaSeries::new(points, 0.0, trace.style.color.mix(0.3)).border_style(style),
                )
                .map_err(plot_err)?
        } else if trace.style.dashed {
            chart
                .draw_series(DashedLineSeries::new(points, 8, 6, style))
                .map_err(plot_err)?
        } else {
            chart
                .draw_series(LineSeries::new(points, style))
                .map_err(plot_err)?
        };
        let legend_style = style;
        anno.label(trace.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_style));
    }
    if layout.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }
    root.present().map_err(plot_err)
}
