use std::path::PathBuf;

use structopt::StructOpt;

use chip8_vm::driver::{Driver, DriverConfig};
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::Emulator;
use chip8_vm::rom::read_rom;

/// Run a program without a screen or keyboard, then print the final screen.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of frames to run
    #[structopt(long, default_value = "600")]
    frames: u64,

    /// Instructions executed per frame
    #[structopt(long, default_value = "10")]
    ipf: u32,

    /// Frames per second
    #[structopt(long, default_value = "60")]
    fps: u32,

    /// Seed for the random instruction, the clock is used if absent
    #[structopt(long)]
    seed: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

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
    let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), config);
    let result = driver.run(Some(opt.frames));

    print!("{}", driver.emulator().framebuffer());
    result?;
    Ok(())
}
