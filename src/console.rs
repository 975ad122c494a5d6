//! Handling the command line
//!
//! This module handles the command line parsing and the interactive angle prompt, which acts as
//! the angle-change event source of a session.
use crate::{
    degree,
    error::{AoiError, AoiResult},
    plottable::PltBackEnd,
};
use clap::Parser;
use rprompt::prompt_reply_from_bufread;
use std::{
    io::{BufRead, ErrorKind, Write},
    path::PathBuf,
};
use uom::si::f64::Angle;

/// Command line arguments of the `aoi_shift` application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// angle of incidence in degrees. May be given several times, one frame is rendered per value
    #[arg(short, long, allow_negative_numbers = true)]
    pub aoi: Vec<f64>,

    /// session configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// directory the generated files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// image format of the generated plots (svg or bmp)
    #[arg(short, long, default_value_t = PltBackEnd::Svg)]
    pub format: PltBackEnd,

    /// additionally export the shifted spectrum of each frame as CSV
    #[arg(long)]
    pub csv: bool,

    /// read further angles from the console after the given ones
    #[arg(short, long)]
    pub interactive: bool,
}

impl Args {
    /// Returns the angles given on the command line.
    ///
    /// If neither an angle nor the interactive mode is given, a single frame at normal incidence
    /// is rendered.
    #[must_use]
    pub fn initial_angles(&self) -> Vec<Angle> {
        if self.aoi.is_empty() && !self.interactive {
            vec![degree!(0.0)]
        } else {
            self.aoi.iter().map(|a| degree!(*a)).collect()
        }
    }
}

/// Evaluates if the passed string is a valid angle in degrees.
/// # Attributes
/// * `aoi_input`: the user input
/// # Returns
/// * the parsed angle
/// * None if the input is not a finite number
#[must_use]
pub fn eval_aoi_input(aoi_input: &str) -> Option<Angle> {
    aoi_input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .map(|a| degree!(a))
}

fn is_end_of_session(input: &str) -> bool {
    let input = input.trim();
    input.is_empty() || input.eq_ignore_ascii_case("q")
}

/// Prompt the user for the next angle of incidence.
///
/// Invalid input is reported and the prompt repeated.
/// # Attributes
/// * `reader`: Type that implements the `BufRead` trait to read from. May be `stdin().lock()` for user input or a static byte slice for tests
/// * `writer`: Type that implements the `Write` trait to write the prompt into.
/// # Returns
/// * the next angle
/// * None if the user entered an empty line or `q` or the input ended
/// # Errors
/// This function will return an [`AoiError::Console`] if reading or writing fails.
pub fn prompt_angle(reader: &mut impl BufRead, writer: &mut impl Write) -> AoiResult<Option<Angle>> {
    let mut prompt_str = "Angle of incidence in degrees (empty or q to quit): ".to_owned();
    loop {
        let input = match prompt_reply_from_bufread(reader, writer, &prompt_str) {
            Ok(input) => input,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(AoiError::Console(format!("reading input failed: {e}"))),
        };
        if is_end_of_session(&input) {
            return Ok(None);
        }
        if let Some(aoi) = eval_aoi_input(&input) {
            return Ok(Some(aoi));
        }
        prompt_str = format!("Invalid angle: {}\nAngle of incidence in degrees: ", input.trim());
    }
}
