//=========================================================================
// ITCUBIA
//=========================================================================
//
// Game binary: logging, bundled regions, scene registration, run.
//
// Log level defaults to `info`; override with `RUST_LOG`.
//
//=========================================================================

use std::process::ExitCode;

use env_logger::Env;
use log::error;

use itcubia::core::world::RegionLibrary;
use itcubia::EngineBuilder;

const REGIONS: &str = include_str!("../assets/regions.json");

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let regions = match RegionLibrary::from_json(REGIONS) {
        Ok(regions) => regions,
        Err(err) => {
            error!("Bundled regions are invalid: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = EngineBuilder::new()
        .with_regions(Box::new(regions))
        .build()
        .register_scenes(itcubia::scenes::register_all)
        .and_then(|engine| engine.run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Engine failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
