use std::env;
use std::process::ExitCode;

use fwog_app::config::{AppConfig, GAME_TITLE};
use fwog_app::error::AppError;

fn load_config() -> Result<AppConfig, AppError> {
    match env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            Ok(AppConfig::load(path)?)
        }
        None => Ok(AppConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = load_config().and_then(|config| {
        log::info!(
            "{} starting: {} enemies on the {:?} backend",
            config.title,
            config.sim.enemy_count,
            config.sim.physics.backend
        );
        fwog_app::run_headless(&config)
    });

    match result {
        Ok(stats) => {
            log::info!(
                "{GAME_TITLE} finished: {} frames, {} steps, {} contacts",
                stats.frames,
                stats.steps,
                stats.collisions.begin
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{GAME_TITLE} unable to run: {err}");
            ExitCode::FAILURE
        }
    }
}
