//! What kind of UI surface is open, and which context key it scales under.

/// Canonical key shared by every inventory variant.
pub const INVENTORY_KEY: &str = "inventory";

/// Classification of the active UI surface, decided by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// No surface open; the default scale applies.
    None,
    /// Title, loading, world creation/selection and message screens. Never rescaled.
    Excluded,
    /// Player inventory, creative or survival.
    Inventory,
    /// Any other surface, keyed by its own identity.
    Other(String),
}

impl SurfaceKind {
    pub fn other(key: impl Into<String>) -> Self {
        SurfaceKind::Other(key.into())
    }

    /// Key this surface's scale is stored under, if it has one.
    pub fn context_key(&self) -> Option<&str> {
        match self {
            SurfaceKind::None | SurfaceKind::Excluded => None,
            SurfaceKind::Inventory => Some(INVENTORY_KEY),
            SurfaceKind::Other(key) => Some(key.as_str()),
        }
    }
}
