use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;

pub fn init(level: LevelFilter) -> Result<()> {
    SimpleLogger::new()
        .with_level(level)
        .without_timestamps()
        .init()?;

    Ok(())
}

/// Maps the `-v`/`-q` flags to a level; `Info` when neither is given.
pub fn level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Warn;
    }

    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
