#![warn(missing_docs)]
//! One refresh cycle of the visualization.
//!
//! The [`RenderCoordinator`] reads the current angle of incidence, computes the shifted center
//! wavelength, synthesizes the baseline and the shifted transmission curve and hands everything
//! to the external collaborators:
//!
//! - an [`AngleSource`] delivering the current angle,
//! - a [`SpectrumPlotter`] rendering the chart,
//! - a [`DrawingSurface`] for the filter schematic,
//! - a [`ValueDisplay`] showing the resulting numbers.
//!
//! All computations of a cycle are done before the first collaborator is called, so an invalid
//! angle never leaves a partially updated frame behind. Collaborator errors are passed on
//! unmodified.
pub use crate::{
    drawing::DrawingSurface,
    plottable::{PlotLayout, SpectrumPlotter, Trace, TraceStyle},
};
use crate::{
    config::SessionConfig,
    drawing::{StrokeStyle, TextStyle},
    error::{AoiError, AoiResult},
    filter::FilterParameters,
    nanometer,
    plottable::AxLims,
    scene::{build_scene_geometry, format_degrees, SceneGeometry, SceneLayout},
    shift::shifted_center_wavelength,
    spectrum::{synthesize_transmission, SpectralSeries},
};
use log::{debug, info};
use plotters::style::RGBAColor;
use std::{io::Write, ops::Range};
use uom::si::{
    f64::{Angle, Length},
    length::nanometer,
};

/// A source of the current angle of incidence.
pub trait AngleSource {
    /// Returns the current angle of incidence.
    fn current_angle(&self) -> Angle;
}

impl AngleSource for Angle {
    fn current_angle(&self) -> Angle {
        *self
    }
}

/// A collaborator showing the result of a refresh cycle to the user.
pub trait ValueDisplay {
    /// Show the angle of incidence and the shifted center wavelength (already rounded to 0.1 nm).
    ///
    /// # Errors
    ///
    /// Whether an error is returned depends on the implementation.
    fn show(&mut self, aoi: Angle, shifted_center: Length) -> AoiResult<()>;
}

/// A [`ValueDisplay`] writing one line per cycle into a writer (e.g. `stdout`).
pub struct ConsoleDisplay<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleDisplay<W> {
    /// Creates a new [`ConsoleDisplay`].
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
    /// Consumes the display and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ValueDisplay for ConsoleDisplay<W> {
    fn show(&mut self, aoi: Angle, shifted_center: Length) -> AoiResult<()> {
        writeln!(
            self.writer,
            "AOI: {}  shifted CWL: {:.1} nm",
            format_degrees(aoi),
            shifted_center.get::<nanometer>()
        )
        .map_err(|e| AoiError::Console(format!("writing to display failed: {e}")))
    }
}

/// The values shown at the end of a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    /// the angle of incidence of this frame
    pub aoi: Angle,
    /// the shifted center wavelength (unrounded)
    pub shifted_center: Length,
}

/// Style of the baseline trace (normal incidence).
#[must_use]
pub const fn baseline_style() -> TraceStyle {
    TraceStyle {
        color: RGBAColor(0xbb, 0xbb, 0xbb, 0.7),
        width: 3,
        dashed: true,
        filled: false,
    }
}

/// Style of the shifted trace.
#[must_use]
pub const fn shifted_style() -> TraceStyle {
    TraceStyle {
        color: RGBAColor(0xe4, 0x57, 0x2e, 1.0),
        width: 3,
        dashed: false,
        filled: true,
    }
}

/// Sequences the computation and the hand-off to the collaborators of one refresh cycle.
///
/// The coordinator holds the immutable session constants only. Every call of
/// [`refresh`](RenderCoordinator::refresh) recomputes everything from scratch.
#[derive(Debug, Clone)]
pub struct RenderCoordinator {
    filter: FilterParameters,
    num_points: usize,
    half_span: Length,
    transmission_max: f64,
    layout: SceneLayout,
}

impl RenderCoordinator {
    /// Creates a new [`RenderCoordinator`] from a session configuration.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Config`] if the configuration is inconsistent.
    pub fn new(config: &SessionConfig) -> AoiResult<Self> {
        config.validate()?;
        info!("Session filter: {}", config.filter);
        Ok(Self {
            filter: config.filter,
            num_points: config.num_points,
            half_span: config.half_span,
            transmission_max: config.transmission_max,
            layout: config.scene.clone(),
        })
    }
    /// Returns the filter constants of this session.
    #[must_use]
    pub const fn filter(&self) -> &FilterParameters {
        &self.filter
    }
    /// Returns the plotted wavelength range (`center ± half_span`).
    #[must_use]
    pub fn wavelength_range(&self) -> Range<Length> {
        let center = self.filter.center_wavelength();
        (center - self.half_span)..(center + self.half_span)
    }
    /// Returns the fixed axis and legend configuration of the chart.
    ///
    /// # Errors
    ///
    /// This function will return an [`AoiError::Config`] if the axis ranges are invalid.
    pub fn plot_layout(&self) -> AoiResult<PlotLayout> {
        let range = self.wavelength_range();
        let x_lim = AxLims::new(range.start.get::<nanometer>(), range.end.get::<nanometer>())
            .ok_or_else(|| AoiError::Config("invalid wavelength axis range".into()))?;
        let y_lim = AxLims::new(0.0, self.transmission_max)
            .ok_or_else(|| AoiError::Config("invalid transmission axis range".into()))?;
        Ok(PlotLayout {
            x_label: "Wavelength (nm)".into(),
            y_label: "Transmission (%)".into(),
            x_lim,
            y_lim,
            show_legend: true,
        })
    }
    /// Synthesize the baseline and the shifted series for the given angle of incidence.
    ///
    /// Returns `(shifted center, baseline, shifted)`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the shift calculation or the spectrum synthesis
    /// fails.
    pub fn compute_series(&self, aoi: Angle) -> AoiResult<(Length, SpectralSeries, SpectralSeries)> {
        let shifted_center = shifted_center_wavelength(&self.filter, aoi)?;
        let range = self.wavelength_range();
        let shifted = synthesize_transmission(
            shifted_center,
            self.filter.fwhm(),
            range.clone(),
            self.num_points,
        )?;
        let baseline = synthesize_transmission(
            self.filter.center_wavelength(),
            self.filter.fwhm(),
            range,
            self.num_points,
        )?;
        debug!("baseline: {baseline:?}, shifted: {shifted:?}");
        Ok((shifted_center, baseline, shifted))
    }
    /// Build the baseline and the shifted trace for the given angle of incidence.
    ///
    /// Returns the shifted center wavelength together with the traces `[baseline, shifted]`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the shift calculation or the spectrum synthesis
    /// fails.
    pub fn compute_traces(&self, aoi: Angle) -> AoiResult<(Length, Vec<Trace>)> {
        let (shifted_center, baseline, shifted) = self.compute_series(aoi)?;
        let traces = vec![
            Trace::from_series(&baseline, baseline_style(), "Baseline (AOI = 0°)"),
            Trace::from_series(
                &shifted,
                shifted_style(),
                &format!("Shifted (AOI = {})", format_degrees(aoi)),
            ),
        ];
        Ok((shifted_center, traces))
    }
    /// Run one complete refresh cycle.
    ///
    /// # Errors
    ///
    /// This function will return
    ///   - an [`AoiError::Domain`] or [`AoiError::Spectrum`] if the computation fails. In this
    ///     case none of the collaborators is called.
    ///   - any error of the collaborators unmodified.
    pub fn refresh(
        &self,
        source: &impl AngleSource,
        plotter: &mut impl SpectrumPlotter,
        surface: &mut impl DrawingSurface,
        display: &mut impl ValueDisplay,
    ) -> AoiResult<FrameSummary> {
        let aoi = source.current_angle();
        let (shifted_center, traces) = self.compute_traces(aoi)?;
        let plot_layout = self.plot_layout()?;
        let geometry = build_scene_geometry(aoi, &self.layout);
        info!(
            "Refresh: AOI {} -> shifted CWL {:.3} nm",
            format_degrees(aoi),
            shifted_center.get::<nanometer>()
        );
        plotter.plot(&traces, &plot_layout)?;
        draw_scene(&geometry, surface)?;
        let rounded = nanometer!((shifted_center.get::<nanometer>() * 10.0).round() / 10.0);
        display.show(aoi, rounded)?;
        Ok(FrameSummary {
            aoi,
            shifted_center,
        })
    }
}

/// Draw the filter schematic onto a surface. The surface is cleared first.
///
/// # Errors
///
/// This function passes on the errors of the drawing surface.
pub fn draw_scene(geometry: &SceneGeometry, surface: &mut impl DrawingSurface) -> AoiResult<()> {
    let dark = RGBAColor(0x33, 0x33, 0x33, 1.0);
    surface.clear()?;
    surface.stroke_line(
        &geometry.plate,
        &StrokeStyle {
            color: RGBAColor(0x88, 0x88, 0x88, 1.0),
            width: 6.0,
            dash: None,
        },
    )?;
    surface.stroke_line(
        &geometry.normal,
        &StrokeStyle {
            color: RGBAColor(0x1e, 0x90, 0xff, 1.0),
            width: 2.0,
            dash: Some((6.0, 6.0)),
        },
    )?;
    surface.stroke_line(
        &geometry.beam,
        &StrokeStyle {
            color: RGBAColor(0xe4, 0x57, 0x2e, 1.0),
            width: 4.0,
            dash: None,
        },
    )?;
    surface.stroke_arc(
        &geometry.arc,
        &StrokeStyle {
            color: dark,
            width: 1.5,
            dash: None,
        },
    )?;
    surface.draw_text(
        geometry.label.anchor,
        &geometry.label.text,
        &TextStyle {
            color: dark,
            size: 14.0,
            bold: true,
            family: "sans-serif".into(),
        },
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        degree,
        drawing::{DrawCommand, RecordingSurface},
    };
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[derive(Default)]
    struct RecordingPlotter {
        calls: Vec<(Vec<Trace>, PlotLayout)>,
    }
    impl SpectrumPlotter for RecordingPlotter {
        fn plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> AoiResult<()> {
            self.calls.push((traces.to_vec(), layout.clone()));
            Ok(())
        }
    }
    struct FailingPlotter;
    impl SpectrumPlotter for FailingPlotter {
        fn plot(&mut self, _traces: &[Trace], _layout: &PlotLayout) -> AoiResult<()> {
            Err(AoiError::Plot("backend gone".into()))
        }
    }
    struct FailingSurface;
    impl DrawingSurface for FailingSurface {
        fn clear(&mut self) -> AoiResult<()> {
            Err(AoiError::Drawing("no canvas".into()))
        }
        fn stroke_line(&mut self, _: &crate::scene::Segment, _: &StrokeStyle) -> AoiResult<()> {
            Ok(())
        }
        fn stroke_arc(&mut self, _: &crate::scene::ArcSpan, _: &StrokeStyle) -> AoiResult<()> {
            Ok(())
        }
        fn draw_text(
            &mut self,
            _: nalgebra::Point2<f64>,
            _: &str,
            _: &TextStyle,
        ) -> AoiResult<()> {
            Ok(())
        }
    }
    #[derive(Default)]
    struct RecordingDisplay {
        values: Vec<(f64, f64)>,
    }
    impl ValueDisplay for RecordingDisplay {
        fn show(&mut self, aoi: Angle, shifted_center: Length) -> AoiResult<()> {
            self.values.push((
                aoi.get::<uom::si::angle::degree>(),
                shifted_center.get::<nanometer>(),
            ));
            Ok(())
        }
    }
    fn coordinator() -> RenderCoordinator {
        RenderCoordinator::new(&SessionConfig::default()).unwrap()
    }
    #[test]
    fn new() {
        let c = coordinator();
        assert_eq!(c.filter(), &FilterParameters::default());
        let mut config = SessionConfig::default();
        config.num_points = 1;
        assert_matches!(RenderCoordinator::new(&config), Err(AoiError::Config(_)));
    }
    #[test]
    fn wavelength_range() {
        let range = coordinator().wavelength_range();
        assert_abs_diff_eq!(range.start.get::<nanometer>(), 620.0, epsilon = 1e-9);
        assert_abs_diff_eq!(range.end.get::<nanometer>(), 680.0, epsilon = 1e-9);
    }
    #[test]
    fn plot_layout() {
        let layout = coordinator().plot_layout().unwrap();
        assert_eq!(layout.x_label, "Wavelength (nm)");
        assert_eq!(layout.y_label, "Transmission (%)");
        assert_abs_diff_eq!(layout.x_lim.min, 620.0, epsilon = 1e-9);
        assert_abs_diff_eq!(layout.x_lim.max, 680.0, epsilon = 1e-9);
        assert_eq!(layout.y_lim, AxLims { min: 0.0, max: 105.0 });
        assert!(layout.show_legend);
    }
    #[test]
    fn refresh() {
        let c = coordinator();
        let mut plotter = RecordingPlotter::default();
        let mut surface = RecordingSurface::default();
        let mut display = RecordingDisplay::default();
        let summary = c
            .refresh(&degree!(20.0), &mut plotter, &mut surface, &mut display)
            .unwrap();
        assert_abs_diff_eq!(
            summary.shifted_center.get::<nanometer>(),
            642.097_043_56,
            epsilon = 1e-6
        );
        assert_eq!(plotter.calls.len(), 1);
        let (traces, layout) = &plotter.calls[0];
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].label(), "Baseline (AOI = 0°)");
        assert_eq!(traces[0].style(), &baseline_style());
        assert_eq!(traces[1].label(), "Shifted (AOI = 20°)");
        assert_eq!(traces[1].style(), &shifted_style());
        assert_eq!(traces[0].x(), traces[1].x());
        assert_eq!(traces[1].x().len(), 300);
        assert_eq!(layout.y_lim.max, 105.0);
        assert_eq!(surface.commands().len(), 6);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_matches!(&surface.commands()[5], DrawCommand::Text(_, text, style) if text == "20°" && style.bold);
        assert_eq!(display.values.len(), 1);
        assert_abs_diff_eq!(display.values[0].0, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(display.values[0].1, 642.1, epsilon = 1e-9);
    }
    #[test]
    fn baseline_independent_of_angle() {
        let c = coordinator();
        let (_, at_zero) = c.compute_traces(degree!(0.0)).unwrap();
        let (_, at_forty) = c.compute_traces(degree!(40.0)).unwrap();
        assert_eq!(at_zero[0], at_forty[0]);
        assert_eq!(at_zero[0].y(), at_zero[1].y());
        assert_ne!(at_zero[1].y(), at_forty[1].y());
    }
    #[test]
    fn invalid_angle_calls_no_collaborator() {
        let c = coordinator();
        let mut plotter = RecordingPlotter::default();
        let mut surface = RecordingSurface::default();
        let mut display = RecordingDisplay::default();
        assert_matches!(
            c.refresh(&degree!(f64::NAN), &mut plotter, &mut surface, &mut display),
            Err(AoiError::Domain(_))
        );
        assert!(plotter.calls.is_empty());
        assert!(surface.commands().is_empty());
        assert!(display.values.is_empty());
    }
    #[test]
    fn collaborator_errors_propagate_unmodified() {
        let c = coordinator();
        let mut surface = RecordingSurface::default();
        let mut display = RecordingDisplay::default();
        assert_eq!(
            c.refresh(&degree!(10.0), &mut FailingPlotter, &mut surface, &mut display),
            Err(AoiError::Plot("backend gone".into()))
        );
        assert!(surface.commands().is_empty());
        let mut plotter = RecordingPlotter::default();
        assert_eq!(
            c.refresh(&degree!(10.0), &mut plotter, &mut FailingSurface, &mut display),
            Err(AoiError::Drawing("no canvas".into()))
        );
        assert!(display.values.is_empty());
    }
    #[test]
    fn console_display() {
        let mut display = ConsoleDisplay::new(Vec::new());
        display.show(degree!(20.0), nanometer!(642.1)).unwrap();
        display.show(degree!(-7.5), nanometer!(647.6)).unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(
            text,
            "AOI: 20°  shifted CWL: 642.1 nm\nAOI: -7.5°  shifted CWL: 647.6 nm\n"
        );
    }
    #[test]
    fn draw_scene_styles() {
        let geometry = build_scene_geometry(degree!(30.0), &SceneLayout::default());
        let mut surface = RecordingSurface::default();
        draw_scene(&geometry, &mut surface).unwrap();
        let cmds = surface.commands();
        assert_matches!(&cmds[1], DrawCommand::Line(seg, style) if *seg == geometry.plate && style.width == 6.0);
        assert_matches!(&cmds[2], DrawCommand::Line(seg, style) if *seg == geometry.normal && style.dash == Some((6.0, 6.0)));
        assert_matches!(&cmds[3], DrawCommand::Line(seg, style) if *seg == geometry.beam && style.width == 4.0);
        assert_matches!(&cmds[4], DrawCommand::Arc(arc, style) if *arc == geometry.arc && style.width == 1.5);
        assert_matches!(&cmds[5], DrawCommand::Text(anchor, _, _) if *anchor == geometry.label.anchor);
    }
}
