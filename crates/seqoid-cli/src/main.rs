#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::io::{BufWriter, Write};

use clap::Parser;
use config::{CliArgs, Config, Format, MachineSource, render};
use seqoid::{
    AtomicSequenceCounter, ObjectId, ObjectIdGenerator, OsRandom, UnixClock,
    reset_sequence_counter, try_object_id,
};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(?config, "starting");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if config.machine == MachineSource::Hardware {
        // The process-wide generator discovers the hardware address itself.
        reset_sequence_counter(config.seed);
        emit(&mut out, config.format, config.count, try_object_id)?;
    } else {
        let generator = ObjectIdGenerator::new(
            AtomicSequenceCounter::new(OsRandom),
            UnixClock,
            config.machine.clone().into_source(),
        );
        if config.seed.is_some() {
            generator.reset_sequence(config.seed);
        }
        emit(&mut out, config.format, config.count, || {
            generator.try_next_id()
        })?;
    }

    out.flush()?;
    Ok(())
}

fn emit<W, F>(out: &mut W, format: Format, count: usize, mut next: F) -> anyhow::Result<()>
where
    W: Write,
    F: FnMut() -> seqoid::Result<ObjectId>,
{
    for _ in 0..count {
        let id = next()?;
        match render(&id, format) {
            Some(text) => writeln!(out, "{text}")?,
            None => out.write_all(id.as_bytes())?,
        }
    }
    tracing::debug!(count, ?format, "generated identifiers");
    Ok(())
}
