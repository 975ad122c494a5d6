#![warn(missing_docs)]
//! File based session: every angle-change event renders one frame into image files.
use crate::{
    config::SessionConfig,
    drawing::PlottersSurface,
    error::{AoiError, AoiResult},
    plottable::{FilePlotter, PltBackEnd},
    render::{FrameSummary, RenderCoordinator, ValueDisplay},
    scene::format_degrees,
    spectrum::SpectralSeries,
};
use log::{info, warn};
use plotters::{
    backend::DrawingBackend,
    coord::Shift,
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use uom::si::f64::{Angle, Length};

/// The files written for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFiles {
    /// the transmission chart
    pub spectrum: PathBuf,
    /// the filter schematic
    pub schematic: PathBuf,
    /// the shifted series as CSV (if requested)
    pub csv: Option<PathBuf>,
}

/// A sequence of frames written into an output directory.
pub struct FileSession {
    coordinator: RenderCoordinator,
    scene_size: (u32, u32),
    output_dir: PathBuf,
    backend: PltBackEnd,
    csv: bool,
}

impl FileSession {
    /// Creates a new [`FileSession`]. The output directory is created if necessary.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configuration is invalid or the output directory
    /// cannot be created.
    pub fn new(
        config: &SessionConfig,
        output_dir: &Path,
        backend: PltBackEnd,
        csv: bool,
    ) -> AoiResult<Self> {
        fs::create_dir_all(output_dir).map_err(|e| {
            AoiError::Other(format!(
                "cannot create output directory {} : {}",
                output_dir.display(),
                e
            ))
        })?;
        Ok(Self {
            coordinator: RenderCoordinator::new(config)?,
            scene_size: (config.scene.width, config.scene.height),
            output_dir: output_dir.to_path_buf(),
            backend,
            csv,
        })
    }
    /// Returns the file names of the frame for the given angle of incidence.
    #[must_use]
    pub fn frame_files(&self, aoi: Angle) -> FrameFiles {
        let tag = format_degrees(aoi).replace('°', "deg");
        let ext = self.backend.file_extension();
        FrameFiles {
            spectrum: self.output_dir.join(format!("spectrum_{tag}.{ext}")),
            schematic: self.output_dir.join(format!("aoi_{tag}.{ext}")),
            csv: self
                .csv
                .then(|| self.output_dir.join(format!("spectrum_{tag}.csv"))),
        }
    }
    /// Process one angle-change event.
    ///
    /// All files of a frame are first written under a temporary name next to their target and
    /// only moved into place once the whole frame succeeded. The display is updated last. A
    /// failing frame leaves neither new nor truncated files behind and keeps the files of an
    /// earlier frame for the same angle.
    ///
    /// # Errors
    ///
    /// This function will return an error if the frame could not be computed or one of the files
    /// could not be written.
    pub fn process(
        &self,
        aoi: Angle,
        display: &mut impl ValueDisplay,
    ) -> AoiResult<(FrameSummary, FrameFiles)> {
        // an invalid angle fails here, before any file is opened
        let (_, _, shifted) = self.coordinator.compute_series(aoi)?;
        let files = self.frame_files(aoi);
        let staged = StagedFrame::new(&files);
        let mut pending = PendingDisplay::default();
        let summary = match self.write_staged(aoi, &shifted, &staged, &mut pending) {
            Ok(summary) => summary,
            Err(e) => {
                staged.discard();
                return Err(e);
            }
        };
        staged.commit()?;
        if let Some((aoi, shifted_center)) = pending.value {
            display.show(aoi, shifted_center)?;
        }
        Ok((summary, files))
    }
    fn write_staged(
        &self,
        aoi: Angle,
        shifted: &SpectralSeries,
        staged: &StagedFrame,
        display: &mut PendingDisplay,
    ) -> AoiResult<FrameSummary> {
        if let Some(csv_path) = &staged.csv {
            let file = File::create(&csv_path.staged).map_err(|e| {
                AoiError::Other(format!(
                    "cannot create file {} : {}",
                    csv_path.target.display(),
                    e
                ))
            })?;
            shifted.to_csv(file)?;
        }
        let mut plotter = FilePlotter::new(&staged.spectrum.staged, self.backend);
        match self.backend {
            PltBackEnd::Svg => {
                let area = SVGBackend::new(&staged.schematic.staged, self.scene_size)
                    .into_drawing_area();
                self.render(aoi, area, &mut plotter, display)
            }
            PltBackEnd::Bmp => {
                let area = BitMapBackend::new(&staged.schematic.staged, self.scene_size)
                    .into_drawing_area();
                self.render(aoi, area, &mut plotter, display)
            }
        }
    }
    fn render<B: DrawingBackend>(
        &self,
        aoi: Angle,
        area: DrawingArea<B, Shift>,
        plotter: &mut FilePlotter,
        display: &mut impl ValueDisplay,
    ) -> AoiResult<FrameSummary> {
        let mut surface = PlottersSurface::new(area);
        let summary = self
            .coordinator
            .refresh(&aoi, plotter, &mut surface, display)?;
        surface.present()?;
        Ok(summary)
    }
}

/// Holds the readout of a frame until all of its files are in place.
#[derive(Default)]
struct PendingDisplay {
    value: Option<(Angle, Length)>,
}

impl ValueDisplay for PendingDisplay {
    fn show(&mut self, aoi: Angle, shifted_center: Length) -> AoiResult<()> {
        self.value = Some((aoi, shifted_center));
        Ok(())
    }
}

/// A file written under a temporary name first.
struct StagedFile {
    staged: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    fn new(target: &Path) -> Self {
        Self {
            staged: staged_path(target),
            target: target.to_path_buf(),
        }
    }
}

/// `spectrum_20deg.svg` -> `spectrum_20deg.part.svg`. The extension is kept since the bitmap
/// encoder picks the image format from it.
fn staged_path(target: &Path) -> PathBuf {
    let ext = target
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    target.with_extension(format!("part.{ext}"))
}

struct StagedFrame {
    spectrum: StagedFile,
    schematic: StagedFile,
    csv: Option<StagedFile>,
}

impl StagedFrame {
    fn new(files: &FrameFiles) -> Self {
        Self {
            spectrum: StagedFile::new(&files.spectrum),
            schematic: StagedFile::new(&files.schematic),
            csv: files.csv.as_deref().map(StagedFile::new),
        }
    }
    fn files(&self) -> impl Iterator<Item = &StagedFile> {
        [&self.spectrum, &self.schematic]
            .into_iter()
            .chain(self.csv.as_ref())
    }
    fn commit(&self) -> AoiResult<()> {
        for file in self.files() {
            if let Err(e) = fs::rename(&file.staged, &file.target) {
                self.discard();
                return Err(AoiError::Other(format!(
                    "cannot write file {} : {}",
                    file.target.display(),
                    e
                )));
            }
            info!("Wrote {}", file.target.display());
        }
        Ok(())
    }
    fn discard(&self) {
        for file in self.files() {
            if file.staged.is_file() {
                if let Err(e) = fs::remove_file(&file.staged) {
                    warn!("cannot remove {} : {}", file.staged.display(), e);
                }
            }
        }
    }
}
