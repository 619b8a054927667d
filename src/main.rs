//! Character map demo (default binary).
//!
//! Stacks a background, a spinner and a button in one compositor and drives it
//! with a fixed tick. Interactive by default; set `CHARMAP_HEADLESS=1` to print
//! each composited frame to stdout instead.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_charmap::config::DemoConfig;
use tui_charmap::demo::Scene;
use tui_charmap::engine::Tick;
use tui_charmap::host::TerminalHost;
use tui_charmap::input::{map_key_event, map_mouse_event, should_quit, InputData};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = DemoConfig::from_env();
    info!(
        "demo {}x{}, {} ms ticks, headless={}",
        config.width, config.height, config.tick_ms, config.headless
    );

    let mut scene = Scene::new(config.width as usize, config.height as usize)
        .context("building demo scene")?;

    if config.headless {
        return run_headless(&mut scene, &config);
    }

    let mut host = TerminalHost::new();
    host.enter()?;

    let result = run(&mut host, &mut scene, &config);

    // Always try to restore terminal state.
    let _ = host.exit();
    result
}

fn run_headless(scene: &mut Scene, config: &DemoConfig) -> Result<()> {
    let mut tick = Tick::default();
    for _ in 0..config.ticks {
        scene.tick(tick).context("compositing frame")?;
        println!("{}", scene.render(&config.delimiter));
        println!();
        tick = tick.next(config.tick_ms);
    }
    Ok(())
}

fn run(host: &mut TerminalHost, scene: &mut Scene, config: &DemoConfig) -> Result<()> {
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));
    let mut last_tick = Instant::now();
    let mut tick = Tick::default();

    scene.tick(tick).context("compositing frame")?;

    loop {
        host.draw(scene.compositor().output())?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(kind) = map_key_event(key) {
                        scene.handle_input(&InputData::new(kind));
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(data) = map_mouse_event(mouse) {
                        scene.handle_input(&data);
                    }
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();
            tick = tick.next(elapsed);
            scene.tick(tick).context("compositing frame")?;

            if config.ticks > 0 && tick.index >= config.ticks {
                return Ok(());
            }
        }
    }
}
