mod app;
mod artifact;
mod color;
mod data;
mod inference;
mod overlay;
mod present;
mod state;
mod ui;

use std::path::PathBuf;

use app::TomatoGraderApp;
use artifact::store::{ArtifactPaths, ArtifactStore};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let paths = paths_from_args();
    let store = match ArtifactStore::load(&paths) {
        Ok(store) => store,
        Err(e) => {
            // No dataset means no slider bounds; nothing useful can run.
            log::error!("{e}");
            eprintln!("Cannot start: {e}");
            eprintln!(
                "Place the reference dataset at '{}' (or pass its path as the first argument).",
                paths.dataset.display()
            );
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tomato Grader",
        options,
        Box::new(|_cc| Ok(Box::new(TomatoGraderApp::new(AppState::new(store))))),
    )
}

/// Optional positional overrides: `tomato-grader [dataset [classifier [scaler]]]`.
fn paths_from_args() -> ArtifactPaths {
    let mut args = std::env::args().skip(1);
    let mut paths = ArtifactPaths::default();
    if let Some(p) = args.next() {
        paths.dataset = PathBuf::from(p);
    }
    if let Some(p) = args.next() {
        paths.classifier = PathBuf::from(p);
    }
    if let Some(p) = args.next() {
        paths.scaler = PathBuf::from(p);
    }
    paths
}
