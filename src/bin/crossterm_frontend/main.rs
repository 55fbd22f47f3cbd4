use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::driver::{Driver, DriverConfig};
use chip8_vm::emulator::Emulator;
use chip8_vm::rom::read_rom;

mod crossterm_io;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per frame
    #[structopt(long, default_value = "10")]
    ipf: u32,

    /// Frames per second
    #[structopt(long, default_value = "60")]
    fps: u32,

    /// Seed for the random instruction, the clock is used if absent
    #[structopt(long)]
    seed: Option<u32>,

    /// Milliseconds a key counts as held after the terminal reports it
    #[structopt(long, default_value = "250")]
    hold_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = read_rom(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = match opt.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emulator.load(&program)?;

    let config = DriverConfig {
        instructions_per_frame: opt.ipf,
        frames_per_second: opt.fps,
    };
    let input = CrosstermInput::new(KeyManager::new(Duration::from_millis(opt.hold_ms)));

    // The terminal is restored when the driver (and its output) is dropped,
    // before the error is printed
    let result = {
        let mut driver = Driver::new(emulator, input, CrosstermOutput::new()?, config);
        driver.run(None)
    };
    result?;

    Ok(())
}
