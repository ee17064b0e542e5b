//! realtimescale — per-screen UI scale preferences.
//!
//! Hold Ctrl and scroll over a screen to rescale its UI; the value is
//! remembered per screen in `RealTimeScale.toml` and applied again the next
//! time that screen opens. Ctrl+N stores the current value as the default.
//!
//! The portable part is [`ScalePreferenceStore`] plus [`ScaleSession`], which
//! reach the host only through [`WindowScaler`] and [`InputPoller`]. The
//! [`plugin`] module wires them into a Bevy app.
//!
//! # Example
//! ```no_run
//! use realtimescale::{Modifiers, RecordingScaler, ScalePreferenceStore, ScaleSession, SurfaceKind};
//! let mut session = ScaleSession::new(ScalePreferenceStore::new("config"));
//! let mut scaler = RecordingScaler::default();
//! let chest = SurfaceKind::other("chest");
//! session.on_surface_opened(&chest, &mut scaler);
//! session.on_scroll(&chest, 1.0, &Modifiers { ctrl: true, shift: false }, &mut scaler);
//! ```

pub mod config;
pub mod hud;
pub mod plugin;
pub mod ports;
pub mod scale;
pub mod screens;
pub mod session;
pub mod store;
pub mod surface;
pub mod table;

pub use config::Config;
pub use plugin::{ActiveSurface, RealTimeScale, RealTimeScalePlugin, SurfaceOpened};
pub use ports::{InputPoller, Modifiers, RecordingScaler, WindowScaler};
pub use session::ScaleSession;
pub use store::{ScalePreferenceStore, ScaleStore, StoreError};
pub use surface::SurfaceKind;
pub use table::ScaleTable;
