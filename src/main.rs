//! Rock Storm headless runner
//!
//! Plays one seeded game with a scripted pilot and logs HUD changes.
//!
//! Usage: `rock-storm [seed] [max_ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rock_storm::sim::{Director, GamePhase, Intent};
    use rock_storm::{LogDisplay, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(20_000);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Falling back to default tuning: {e}");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Rock Storm starting (seed {seed}, up to {max_ticks} ticks)");
    let mut director = match Director::new(seed, tuning, LogDisplay::default()) {
        Ok(director) => director,
        Err(e) => {
            log::error!("Cannot start: {e}");
            std::process::exit(1);
        }
    };

    // A few seconds of attract mode before the game starts
    for _ in 0..90 {
        director.on_tick();
    }
    director.start_game();

    while director.ticks() < max_ticks {
        let t = director.ticks();
        director.set_intent(Intent::TurnRight, t % 48 < 6);
        director.set_intent(Intent::Thrust, t % 120 < 10);
        if t % 9 == 0 {
            director.set_intent(Intent::Fire, true);
        }
        director.on_tick();

        if director.phase() == GamePhase::GameOver {
            break;
        }
    }

    let hud = &director.display().hud;
    log::info!(
        "Finished after {} ticks ({} ms simulated): score {}, level {}, lives {}",
        director.ticks(),
        director.time_ms(),
        hud.score,
        hud.level,
        hud.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the product on wasm; there is no headless runner
}
