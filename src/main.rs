//! Fireworks headless driver
//!
//! Runs a fixed-length show at 60 Hz against a recording canvas and prints
//! the final population stats as JSON. Usage: `fireworks [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use fireworks::renderer::RecordingCanvas;
    use fireworks::{FireworkShow, Result, Settings};
    use glam::Vec2;

    const VIEWPORT: (f32, f32) = (1280.0, 720.0);
    const FRAME: Duration = Duration::from_micros(16_667);
    const FRAMES: u32 = 60 * 20;
    /// Frames between simulated pointer requests
    const POINTER_PERIOD: u32 = 7;

    fn load_settings() -> Result<Settings> {
        match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading settings from {path}");
                let json = std::fs::read_to_string(&path)?;
                Settings::from_json(&json)
            }
            None => Ok(Settings::default()),
        }
    }

    pub fn run() -> Result<()> {
        let settings = load_settings()?;
        log::info!("Fireworks (native) starting...");

        let mut show = FireworkShow::with_default_sprite(settings)?;
        show.set_viewport_size(VIEWPORT.0, VIEWPORT.1);

        let mut canvas = RecordingCanvas::new();
        let mut peak_particles = 0;
        let mut draw_commands = 0;

        for frame in 1..=FRAMES {
            // Sweep a pointer across the sky to exercise the debounced channel
            if frame % POINTER_PERIOD == 0 {
                let t = frame as f32 / FRAMES as f32;
                let target = Vec2::new(VIEWPORT.0 * t, VIEWPORT.1 * 0.25);
                show.request_rocket(target, false);
            }

            show.advance(FRAME * frame);

            canvas.clear();
            show.paint(&mut canvas);
            draw_commands += canvas.commands.len();
            peak_particles = peak_particles.max(show.engine().particles().len());

            if frame % 300 == 0 {
                let stats = show.stats();
                log::info!(
                    "frame {}: rockets={} particles={} explosions={}",
                    stats.frame,
                    stats.rockets,
                    stats.particles,
                    stats.explosions
                );
            }
        }

        log::info!(
            "Done: peak particles={peak_particles}, batch capacity={}, draw commands={draw_commands}",
            show.painter().batch().capacity()
        );
        println!("{}", serde_json::to_string_pretty(&show.stats())?);
        Ok(())
    }
}
