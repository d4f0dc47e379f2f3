slint::include_modules!();

use circle_player::config::{add_recent_manifest, config_path, load_config, save_config};
use circle_player::ActivityManifest;
use clap::Parser;
use std::cell::RefCell;
use std::rc::Rc;

mod callbacks;
mod cli;
mod state;
mod utils;
mod view;

use callbacks::loading::{make_loader, setup_loading_callbacks};
use callbacks::navigation::setup_navigation_callbacks;
use callbacks::resize::setup_resize_tracking;
use callbacks::selection::setup_selection_callbacks;
use state::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Cli::parse();

    let config_file = args.config.clone().or_else(config_path);
    let mut config = config_file
        .as_deref()
        .map(load_config)
        .unwrap_or_default();

    let manifest = ActivityManifest::load(&args.manifest)?;
    log::info!(
        "loaded manifest {} with {} activities",
        args.manifest.display(),
        manifest.len()
    );

    add_recent_manifest(&mut config, args.manifest.display().to_string());
    if let Some(path) = config_file.as_deref() {
        if let Err(e) = save_config(&config, path) {
            log::warn!("{e}");
        }
    }

    let ui = AppWindow::new()?;
    let session = Rc::new(RefCell::new(Session::new(manifest, config)));

    let loader = make_loader(&ui, session.clone());
    setup_loading_callbacks(&ui, loader.clone(), session.clone());
    setup_selection_callbacks(&ui, session.clone());
    setup_navigation_callbacks(&ui, loader.clone(), session.clone());
    let _resize_timer = setup_resize_tracking(&ui, session.clone());

    // Load first activity
    loader(0);

    ui.run()?;

    // Decodes still in flight must not touch a closed window.
    session.borrow_mut().player.teardown();
    Ok(())
}
