use bevy::prelude::*;

use crate::plugin::SurfaceOpened;
use crate::surface::SurfaceKind;

/// Fake screens of the demo host.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum DemoScreen {
    /// In the world with nothing open.
    #[default]
    InWorld,
    Title,
    Inventory,
    CreativeInventory,
    Chest,
    Furnace,
}

impl DemoScreen {
    pub fn all() -> Vec<DemoScreen> {
        vec![
            DemoScreen::InWorld,
            DemoScreen::Title,
            DemoScreen::Inventory,
            DemoScreen::CreativeInventory,
            DemoScreen::Chest,
            DemoScreen::Furnace,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DemoScreen::InWorld => "In world",
            DemoScreen::Title => "Title screen",
            DemoScreen::Inventory => "Inventory",
            DemoScreen::CreativeInventory => "Creative inventory",
            DemoScreen::Chest => "Chest",
            DemoScreen::Furnace => "Furnace",
        }
    }

    pub fn hotkey(&self) -> KeyCode {
        match self {
            DemoScreen::InWorld => KeyCode::Escape,
            DemoScreen::Title => KeyCode::KeyT,
            DemoScreen::Inventory => KeyCode::KeyE,
            DemoScreen::CreativeInventory => KeyCode::KeyC,
            DemoScreen::Chest => KeyCode::KeyB,
            DemoScreen::Furnace => KeyCode::KeyF,
        }
    }

    /// How the scale plugin should treat this screen.
    pub fn surface(&self) -> SurfaceKind {
        match self {
            DemoScreen::InWorld => SurfaceKind::None,
            DemoScreen::Title => SurfaceKind::Excluded,
            DemoScreen::Inventory | DemoScreen::CreativeInventory => SurfaceKind::Inventory,
            DemoScreen::Chest => SurfaceKind::other("chest"),
            DemoScreen::Furnace => SurfaceKind::other("furnace"),
        }
    }
}

/// Switch screens with their hotkeys. Ctrl is left for the scale shortcuts.
pub fn handle_screen_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    current: Res<State<DemoScreen>>,
    mut next: ResMut<NextState<DemoScreen>>,
) {
    if keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
        return;
    }
    for screen in DemoScreen::all() {
        if keys.just_pressed(screen.hotkey()) && *current.get() != screen {
            next.set(screen);
        }
    }
}

/// Tell the scale plugin about the screen that just opened.
pub fn announce_screen(state: Res<State<DemoScreen>>, mut opened: EventWriter<SurfaceOpened>) {
    let screen = *state.get();
    log::debug!("screen changed to {}", screen.name());
    opened.send(SurfaceOpened(screen.surface()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_variants_map_to_one_surface() {
        assert_eq!(DemoScreen::Inventory.surface(), DemoScreen::CreativeInventory.surface());
        assert_eq!(DemoScreen::Title.surface(), SurfaceKind::Excluded);
        assert_eq!(DemoScreen::InWorld.surface(), SurfaceKind::None);
    }

    #[test]
    fn hotkeys_are_unique() {
        let keys: Vec<_> = DemoScreen::all().iter().map(|s| s.hotkey()).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(k));
        }
    }
}
