use aoi_shift::{
    config::SessionConfig,
    console::{prompt_angle, Args},
    error::AoiResult,
    render::ConsoleDisplay,
    session::FileSession,
};
use clap::Parser;
use env_logger::Env;
use log::error;
use std::io::{stdin, stdout, BufReader};

fn read_config(args: &Args) -> AoiResult<SessionConfig> {
    args.config
        .as_ref()
        .map_or_else(|| Ok(SessionConfig::default()), |path| SessionConfig::from_file(path))
}

fn main() -> AoiResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    //parse CLI arguments
    let args = Args::parse();
    let config = read_config(&args)?;
    let session = FileSession::new(&config, &args.output_dir, args.format, args.csv)?;
    let mut display = ConsoleDisplay::new(stdout());

    //one frame per angle given on the command line
    for aoi in args.initial_angles() {
        session.process(aoi, &mut display)?;
    }
    if args.interactive {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = stdout();
        while let Some(aoi) = prompt_angle(&mut reader, &mut writer)? {
            // a failed frame does not end the session, the next angle is a fresh attempt
            if let Err(e) = session.process(aoi, &mut display) {
                error!("{e}");
            }
        }
    }
    Ok(())
}
