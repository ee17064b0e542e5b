use bevy::{log::LogPlugin, prelude::*};
use clap::Parser;

use realtimescale::hud::{setup_hud, update_scale_text, update_screen_title};
use realtimescale::screens::{announce_screen, handle_screen_hotkeys, DemoScreen};
use realtimescale::{Config, RealTimeScalePlugin};

/// Demo host: a window with fake screens to try Ctrl+scroll rescaling on.
#[derive(Parser, Debug)]
#[command(name = "realtimescale-demo", version, about)]
struct Args {
    /// Settings file (defaults to ./realtimescale-settings.toml).
    #[arg(long)]
    config: Option<String>,
    /// Directory holding RealTimeScale.toml. Overrides the settings file.
    #[arg(long)]
    store_dir: Option<std::path::PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref());
    if let Some(dir) = args.store_dir {
        config.store_dir = Some(dir);
    }
    log::info!(
        "scroll steps: {:.2} / {:.2} (fine), starting scale {:.2}",
        config.coarse_step,
        config.fine_step,
        config.initial_scale
    );

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "RealTimeScale demo".into(),
                        resolution: (1000.0, 700.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                // env_logger owns the global logger
                .disable::<LogPlugin>(),
        )
        .add_plugins(RealTimeScalePlugin { config })
        .init_state::<DemoScreen>()
        .add_systems(Startup, setup_hud)
        .add_systems(
            Update,
            (
                handle_screen_hotkeys,
                (announce_screen, update_screen_title).run_if(state_changed::<DemoScreen>),
                update_scale_text,
            ),
        )
        .run();
}
