use crate::error::Result;
use crate::store::Store;

/// Window geometry of the main window, e.g. `600x400+80+60`
pub const WINDOW_GEOMETRY: &str = "window_geometry";
/// Pane divider positions of the main window
pub const SASH_COORDINATES: &str = "sash_coordinates";
/// uid of the speaker that was selected when the process last exited
pub const LAST_SELECTED: &str = "last_selected";

/// Typed facade over the `config` table. Values are written through
/// immediately; there is no write-behind buffering.
pub struct Settings<'a> {
    store: &'a Store,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn get(&self, name: &str) -> Result<Option<String>> {
        self.store.get_setting(name)
    }

    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.store.set_setting(name, value)
    }

    pub fn window_geometry(&self) -> Result<Option<String>> {
        self.get(WINDOW_GEOMETRY)
    }

    pub fn set_window_geometry(&self, geometry: &str) -> Result<()> {
        self.set(WINDOW_GEOMETRY, geometry)
    }

    pub fn sash_coordinates(&self) -> Result<Option<String>> {
        self.get(SASH_COORDINATES)
    }

    pub fn set_sash_coordinates(&self, coordinates: &str) -> Result<()> {
        self.set(SASH_COORDINATES, coordinates)
    }

    pub fn last_selected(&self) -> Result<Option<String>> {
        self.get(LAST_SELECTED)
    }

    pub fn set_last_selected(&self, uid: &str) -> Result<()> {
        self.set(LAST_SELECTED, uid)
    }

    pub fn clear_last_selected(&self) -> Result<()> {
        self.store.delete_setting(LAST_SELECTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_share_the_config_table() {
        let store = Store::open_in_memory().unwrap();
        let settings = store.settings();

        settings.set_window_geometry("600x400+80+60").unwrap();
        settings.set_last_selected("RINCON_000E58C0123401400").unwrap();

        assert_eq!(
            settings.get(WINDOW_GEOMETRY).unwrap().as_deref(),
            Some("600x400+80+60")
        );
        assert_eq!(
            settings.last_selected().unwrap().as_deref(),
            Some("RINCON_000E58C0123401400")
        );
        assert_eq!(settings.sash_coordinates().unwrap(), None);
    }
}
