use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod game;
mod player;
mod theme;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a deal seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Pulls flag-style segments out of `location.hash`. The first segment is
/// the route and belongs to the router, e.g. `#game&-v&--seed=7`.
fn args_from_hash(location_hash: &str) -> Args {
    let flags = location_hash
        .split(['#', '&'])
        .filter(|segment| segment.starts_with('-'));

    Args::try_parse_from(core::iter::once("memorito").chain(flags)).unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("Could not parse hash args: {err}").into());
        Args::parse_from(["memorito"])
    })
}


fn console_welcome() {
    log::info!("Welcome to the STELLIGHT fan site! TWENTY FOUR SEVEN WITH US!");
    for (id, name) in memorito_core::ROSTER.iter().enumerate() {
        log::debug!("member #{}: {}", id + 1, name);
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();

    let args = args_from_hash(&location_hash);
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);

    // Missing mount point is a hard failure: log it and wire nothing, so no
    // timers or listeners outlive a page without the app container.
    let Some(root) = document().get_element_by_id("app") else {
        log::error!("Could not find id=\"app\" element, app not started");
        return;
    };

    console_welcome();

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, app::AppProps { seed: args.seed })
        .render();
}
