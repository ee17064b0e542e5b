use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::ui::UiScale;

use crate::config::Config;
use crate::ports::{InputPoller, WindowScaler};
use crate::session::ScaleSession;
use crate::store::ScalePreferenceStore;
use crate::surface::SurfaceKind;

/// Sent by the host whenever a surface opens, or all surfaces close.
#[derive(Event, Debug, Clone)]
pub struct SurfaceOpened(pub SurfaceKind);

/// Surface scroll input currently applies to.
#[derive(Resource, Debug, Clone)]
pub struct ActiveSurface(pub SurfaceKind);

impl Default for ActiveSurface {
    fn default() -> Self {
        Self(SurfaceKind::None)
    }
}

/// The scale session, as a Bevy resource.
#[derive(Resource, Deref, DerefMut)]
pub struct RealTimeScale(pub ScaleSession<ScalePreferenceStore>);

/// `UiScale` as the window scaler; Bevy relayouts UI nodes on change.
struct UiScaleWriter<'a>(&'a mut UiScale);

impl WindowScaler for UiScaleWriter<'_> {
    fn apply_scale(&mut self, scale: f64) {
        self.0 .0 = scale as f32;
    }
}

struct KeyboardModifiers<'a>(&'a ButtonInput<KeyCode>);

impl InputPoller for KeyboardModifiers<'_> {
    fn ctrl_down(&self) -> bool {
        self.0.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight])
    }

    fn shift_down(&self) -> bool {
        self.0.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight])
    }
}

/// Ctrl+scroll rescales the active surface; Ctrl+N saves the current scale as the default.
pub struct RealTimeScalePlugin {
    pub config: Config,
}

impl Plugin for RealTimeScalePlugin {
    fn build(&self, app: &mut App) {
        let store = match &self.config.store_dir {
            Some(dir) => ScalePreferenceStore::new(dir),
            None => ScalePreferenceStore::from_config_dir().unwrap_or_else(|err| {
                log::warn!("{err}; keeping scale preferences in the working directory");
                ScalePreferenceStore::new(".")
            }),
        };
        log::info!("scale preferences at {}", store.path().display());

        app.insert_resource(RealTimeScale(ScaleSession::with_config(store, &self.config)))
            .init_resource::<ActiveSurface>()
            .init_resource::<UiScale>()
            .add_event::<SurfaceOpened>()
            .add_systems(
                Update,
                (
                    apply_opened_surfaces,
                    handle_scale_scroll.after(apply_opened_surfaces),
                    handle_save_default,
                ),
            );
    }
}

pub fn apply_opened_surfaces(
    mut events: EventReader<SurfaceOpened>,
    mut active: ResMut<ActiveSurface>,
    mut session: ResMut<RealTimeScale>,
    mut ui_scale: ResMut<UiScale>,
) {
    for SurfaceOpened(kind) in events.read() {
        active.0 = kind.clone();
        session.on_surface_opened(kind, &mut UiScaleWriter(&mut ui_scale));
    }
}

pub fn handle_scale_scroll(
    mut wheel: EventReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    active: Res<ActiveSurface>,
    mut session: ResMut<RealTimeScale>,
    mut ui_scale: ResMut<UiScale>,
) {
    let input = KeyboardModifiers(&keys);
    for event in wheel.read() {
        // horizontal-only scroll
        if event.y == 0.0 {
            continue;
        }
        session.on_scroll(&active.0, event.y as f64, &input, &mut UiScaleWriter(&mut ui_scale));
    }
}

pub fn handle_save_default(keys: Res<ButtonInput<KeyCode>>, session: Res<RealTimeScale>) {
    if keys.just_pressed(KeyCode::KeyN) {
        session.on_save_default(&KeyboardModifiers(&keys));
    }
}
