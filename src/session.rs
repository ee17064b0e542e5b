//! Event-side state: the scale currently in effect and the three handlers
//! the host calls (surface opened, Ctrl+scroll, save-default hotkey).

use log::{debug, info};

use crate::config::Config;
use crate::ports::{InputPoller, WindowScaler};
use crate::scale::{COARSE_STEP, FINE_STEP, INITIAL_SESSION_SCALE, MIN_SCALE};
use crate::store::ScaleStore;
use crate::surface::SurfaceKind;

/// Owned by the host's event-dispatch layer; one per window.
#[derive(Debug)]
pub struct ScaleSession<S> {
    store: S,
    current: f64,
    coarse_step: f64,
    fine_step: f64,
}

impl<S: ScaleStore> ScaleSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: INITIAL_SESSION_SCALE,
            coarse_step: COARSE_STEP,
            fine_step: FINE_STEP,
        }
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            current: config.initial_scale,
            coarse_step: config.coarse_step,
            fine_step: config.fine_step,
        }
    }

    /// Scale the next scroll step starts from.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A surface was opened (or all were closed). Returns the scale applied, if any.
    ///
    /// Closing every surface applies the stored default without touching the
    /// session scale. Excluded surfaces are left alone.
    pub fn on_surface_opened(
        &mut self,
        surface: &SurfaceKind,
        scaler: &mut impl WindowScaler,
    ) -> Option<f64> {
        let scale = match surface {
            SurfaceKind::Excluded => return None,
            SurfaceKind::None => self.store.get_default_scale(),
            _ => {
                let key = surface.context_key()?;
                let scale = self.store.get_scale(key);
                self.current = scale;
                debug!("surface \"{key}\" opened at scale {scale:.2}");
                scale
            }
        };
        scaler.apply_scale(scale);
        Some(scale)
    }

    /// Ctrl+scroll over a surface. Returns the new scale when one was applied.
    ///
    /// Negative `delta` shrinks, positive grows. Shift selects the fine step.
    /// The result never drops below [`MIN_SCALE`], so the window and the
    /// stored value agree even at the bottom of the range.
    pub fn on_scroll(
        &mut self,
        surface: &SurfaceKind,
        delta: f64,
        input: &impl InputPoller,
        scaler: &mut impl WindowScaler,
    ) -> Option<f64> {
        if !input.ctrl_down() {
            return None;
        }
        let key = surface.context_key()?;

        let step = if input.shift_down() {
            self.fine_step
        } else {
            self.coarse_step
        };
        if delta < 0.0 && self.current >= 0.0 {
            self.current -= step;
        } else if delta > 0.0 {
            self.current += step;
        }
        if self.current < MIN_SCALE {
            self.current = MIN_SCALE;
        }

        self.store.set_scale(key, self.current);
        scaler.apply_scale(self.current);
        Some(self.current)
    }

    /// Ctrl+N: persist the session scale as the default.
    pub fn on_save_default(&self, input: &impl InputPoller) -> bool {
        if !input.ctrl_down() {
            return false;
        }
        info!("saving {:.2} as the default scale", self.current);
        self.store.set_default_scale(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Modifiers, RecordingScaler};
    use crate::scale::{round2, FALLBACK_DEFAULT_SCALE};
    use crate::table::ScaleTable;
    use crate::ScalePreferenceStore;
    use std::cell::RefCell;

    const CTRL: Modifiers = Modifiers { ctrl: true, shift: false };
    const CTRL_SHIFT: Modifiers = Modifiers { ctrl: true, shift: true };

    /// In-memory store with the same fallback rules as the file store.
    #[derive(Default)]
    struct MemoryStore {
        table: RefCell<ScaleTable>,
    }

    impl ScaleStore for MemoryStore {
        fn get_default_scale(&self) -> f64 {
            self.table.borrow().default_scale().unwrap_or(FALLBACK_DEFAULT_SCALE)
        }

        fn get_scale(&self, key: &str) -> f64 {
            let found = self.table.borrow().get(key);
            found.unwrap_or_else(|| self.get_default_scale())
        }

        fn set_default_scale(&self, value: f64) -> bool {
            self.table.borrow_mut().upsert(crate::table::DEFAULT_KEY, round2(value));
            true
        }

        fn set_scale(&self, key: &str, value: f64) -> bool {
            self.table.borrow_mut().upsert(key, round2(value));
            true
        }
    }

    fn session() -> ScaleSession<MemoryStore> {
        ScaleSession::new(MemoryStore::default())
    }

    #[test]
    fn no_surface_applies_default_only() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        assert_eq!(s.on_surface_opened(&SurfaceKind::None, &mut scaler), Some(4.0));
        assert_eq!(scaler.applied, vec![4.0]);
        assert_eq!(s.current(), INITIAL_SESSION_SCALE);
    }

    #[test]
    fn excluded_surface_is_untouched() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        assert_eq!(s.on_surface_opened(&SurfaceKind::Excluded, &mut scaler), None);
        assert_eq!(s.on_scroll(&SurfaceKind::Excluded, 1.0, &CTRL, &mut scaler), None);
        assert!(scaler.applied.is_empty());
        assert!(s.store().table.borrow().is_empty());
    }

    #[test]
    fn opening_a_surface_loads_its_scale() {
        let mut s = session();
        s.store().set_scale("chest", 1.5);
        let mut scaler = RecordingScaler::default();

        assert_eq!(s.on_surface_opened(&SurfaceKind::other("chest"), &mut scaler), Some(1.5));
        assert_eq!(s.current(), 1.5);
        assert_eq!(s.on_surface_opened(&SurfaceKind::other("furnace"), &mut scaler), Some(4.0));
        assert_eq!(s.current(), 4.0);
    }

    #[test]
    fn scroll_steps_and_persists() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        let chest = SurfaceKind::other("chest");
        s.on_surface_opened(&chest, &mut scaler);

        let up = s.on_scroll(&chest, 1.0, &CTRL, &mut scaler).unwrap();
        assert!((up - 4.1).abs() < 1e-9);
        let down = s.on_scroll(&chest, -1.0, &CTRL_SHIFT, &mut scaler).unwrap();
        assert!((down - 4.09).abs() < 1e-9);
        assert_eq!(s.store().get_scale("chest"), 4.09);
        assert_eq!(scaler.last(), Some(down));
    }

    #[test]
    fn scroll_without_ctrl_is_ignored() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        let plain = Modifiers::default();
        assert_eq!(s.on_scroll(&SurfaceKind::Inventory, 1.0, &plain, &mut scaler), None);
        assert_eq!(s.current(), INITIAL_SESSION_SCALE);
        assert!(scaler.applied.is_empty());
    }

    #[test]
    fn zero_delta_rewrites_current_value() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        assert_eq!(s.on_scroll(&SurfaceKind::Inventory, 0.0, &CTRL, &mut scaler), Some(2.0));
        assert_eq!(s.store().get_scale("inventory"), 2.0);
    }

    #[test]
    fn scroll_down_never_goes_negative() {
        let mut s = ScaleSession::with_config(
            MemoryStore::default(),
            &Config {
                initial_scale: 0.05,
                ..Config::default()
            },
        );
        let mut scaler = RecordingScaler::default();
        let got = s.on_scroll(&SurfaceKind::Inventory, -1.0, &CTRL, &mut scaler);
        assert_eq!(got, Some(MIN_SCALE));
        assert_eq!(s.store().get_scale("inventory"), MIN_SCALE);
    }

    #[test]
    fn scroll_to_zero_applies_the_floor() {
        let mut s = ScaleSession::with_config(
            MemoryStore::default(),
            &Config {
                initial_scale: 0.1,
                ..Config::default()
            },
        );
        let mut scaler = RecordingScaler::default();
        assert_eq!(s.on_scroll(&SurfaceKind::Inventory, -1.0, &CTRL, &mut scaler), Some(MIN_SCALE));
        assert_eq!(scaler.last(), Some(MIN_SCALE));
        assert_eq!(s.store().get_scale("inventory"), MIN_SCALE);
    }

    #[test]
    fn inventory_variants_share_one_key() {
        let mut s = session();
        let mut scaler = RecordingScaler::default();
        s.on_scroll(&SurfaceKind::Inventory, 1.0, &CTRL, &mut scaler);
        assert_eq!(s.store().get_scale("inventory"), 2.1);
        assert_eq!(s.on_surface_opened(&SurfaceKind::Inventory, &mut scaler), Some(2.1));
    }

    #[test]
    fn save_default_needs_ctrl() {
        let s = session();
        assert!(!s.on_save_default(&Modifiers::default()));
        assert_eq!(s.store().get_default_scale(), 4.0);
        assert!(s.on_save_default(&CTRL));
        assert_eq!(s.store().get_default_scale(), 2.0);
    }

    #[test]
    fn drives_the_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = ScaleSession::new(ScalePreferenceStore::new(dir.path()));
        let mut scaler = RecordingScaler::default();
        let map = SurfaceKind::other("map");

        // Missing file: opening reads the 4.00 fallback.
        assert_eq!(s.on_surface_opened(&map, &mut scaler), Some(4.0));
        s.on_scroll(&map, 1.0, &CTRL, &mut scaler);
        assert_eq!(s.store().get_scale("map"), 4.1);
        // The write seeded the default entry with 1.00.
        assert_eq!(s.on_surface_opened(&SurfaceKind::None, &mut scaler), Some(1.0));

        assert!(s.on_save_default(&CTRL));
        assert_eq!(s.store().get_default_scale(), 4.1);
    }
}
