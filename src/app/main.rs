use std::env;
use std::path::Path;
use std::process::ExitCode;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

mod constants;
mod sdl_display;
mod sdl_setup;

use gbcore::system::GameBoy;
use sdl_display::SdlDisplay;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <boot-rom-path> <cartridge-rom-path>", args[0]);
        return ExitCode::from(1);
    }
    let boot_rom_path = Path::new(&args[1]);
    let cartridge_path = Path::new(&args[2]);

    let rom_filename = cartridge_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy();
    let window_title = format!("gbcore - {rom_filename}");

    let mut sdl_context = match sdl_setup::init_sdl(&window_title) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("failed to initialize SDL2: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut gb = match GameBoy::new(boot_rom_path, cartridge_path) {
        Ok(gb) => gb,
        Err(e) => {
            log::error!("failed to start emulator: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut display = SdlDisplay::new(sdl_context.canvas);

    'main_loop: loop {
        for event in sdl_context.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main_loop,
                _ => {}
            }
        }

        if let Err(e) = gb.run_frame(&mut display) {
            log::error!("emulator halted: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
