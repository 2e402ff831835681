//! Folio Pong entry point
//!
//! The browser build starts from `platform::web` (`start_pong`). Natively
//! this binary runs a headless match on a simulated 800x600 board and logs
//! the score.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use folio_pong::consts::CONTAINER_ID;
    use folio_pong::platform::HeadlessToolkit;
    use folio_pong::sim::{KeyCode, Rect};
    use folio_pong::{Game, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read tuning file {path}"))?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    let seed = std::env::var("PONG_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    log::info!("Folio Pong (native) starting, seed {seed}");

    let toolkit = HeadlessToolkit::with_container(CONTAINER_ID, Rect::new(0.0, 0.0, 800.0, 600.0));
    let mut game = Game::mount_with_tuning(toolkit, CONTAINER_ID, seed, tuning)?;

    // Both players sweep their paddles back and forth for a simulated minute
    let sweeps = [(KeyCode::S, KeyCode::ARROW_DOWN), (KeyCode::W, KeyCode::ARROW_UP)];
    for (second, (left, right)) in sweeps.iter().cycle().take(60).enumerate() {
        game.key_down(*left);
        game.key_down(*right);
        game.advance(1000.0);
        game.key_up(*left);
        game.key_up(*right);
        log::debug!("t={}s score {}", second + 1, game.scoreboard().render());
    }

    let [p1, p2] = game.scoreboard().scores();
    log::info!("Final score after {} rounds: {p1} - {p2}", game.round());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in platform::web
}
