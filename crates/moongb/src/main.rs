use std::path::PathBuf;

use anyhow::Context;
use moongb_core::{CoreConfig, GameBoy};

const USAGE: &str = "Usage: moongb <rom.gb> [frames]";

fn run(rom_path: PathBuf, frames: u32) -> anyhow::Result<()> {
    let mut gb = GameBoy::new(&rom_path, CoreConfig::default())
        .with_context(|| format!("failed to load '{}'", rom_path.display()))?;

    log::info!("running '{}' for {} frame(s)", gb.game_title(), frames);
    for _ in 0..frames {
        gb.step_frame();
    }

    gb.dump_system();
    gb.flush().context("failed to write save data")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });
    let frames: u32 = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            eprintln!("Invalid frame count '{arg}'. {USAGE}");
            std::process::exit(2);
        }),
        None => 60,
    };

    if let Err(err) = run(rom_path, frames) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
