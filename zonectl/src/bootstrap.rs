use std::path::Path;

use log::{debug, warn};

use crate::client::{Connect, Discovery};
use crate::controller::Controller;
use crate::error::Result;
use crate::store::Store;

/// Everything the startup sequence produced for the caller layer
pub struct Startup<D: Discovery, N: Connect> {
    pub controller: Controller<D, N>,
    /// Persisted window geometry, if any. Restoration is best-effort; a
    /// read failure comes back as `None`, never as an error.
    pub window_geometry: Option<String>,
    /// Persisted pane divider positions, same best-effort contract
    pub sash_coordinates: Option<String>,
    /// True when no speakers were loaded from the store. Whether to scan is
    /// the caller's decision; bootstrap never touches the network.
    pub needs_scan: bool,
}

/// Startup sequence, strictly ordered: open/create the store, restore the
/// window settings, load the persisted speakers, then restore the previous
/// selection if its uid still resolves against the loaded registry.
///
/// A `last_selected` uid that no longer resolves leaves the controller
/// unselected without an error. A selection whose info fetch fails is kept
/// selected, matching [`Controller::select`].
pub fn bootstrap<D, N, P>(path: P, discovery: D, connector: N) -> Result<Startup<D, N>>
where
    D: Discovery,
    N: Connect,
    P: AsRef<Path>,
{
    let store = Store::open(path)?;

    let window_geometry = read_best_effort(&store, crate::settings::WINDOW_GEOMETRY);
    let sash_coordinates = read_best_effort(&store, crate::settings::SASH_COORDINATES);

    let mut controller = Controller::new(store, discovery, connector);
    let loaded = controller.load()?;
    let needs_scan = loaded == 0;

    let last_selected = match controller.get_setting(crate::settings::LAST_SELECTED) {
        Ok(value) => value,
        Err(err) => {
            warn!("could not restore previous selection: {}", err);
            None
        }
    };
    if let Some(uid) = last_selected {
        if controller.find(&uid).is_some() {
            if let Err(err) = controller.select(Some(uid.as_str())) {
                // selection survives a failed info fetch
                warn!("could not read info from restored speaker {}: {}", uid, err);
            }
        } else {
            debug!("last selected speaker {} is no longer known", uid);
        }
    }

    Ok(Startup {
        controller,
        window_geometry,
        sash_coordinates,
        needs_scan,
    })
}

fn read_best_effort(store: &Store, name: &str) -> Option<String> {
    match store.get_setting(name) {
        Ok(value) => value,
        Err(err) => {
            warn!("could not restore setting {}: {}", name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockConnector, MockDeviceBuilder, MockScanner};
    use crate::model::DeviceRecord;

    fn record(uid: &str, name: &str, ip: &str) -> DeviceRecord {
        DeviceRecord {
            uid: uid.to_string(),
            display_name: name.to_string(),
            network_address: ip.to_string(),
            serial_number: String::new(),
            mac_address: String::new(),
        }
    }

    fn healthy_connector() -> MockConnector {
        let mut connector = MockConnector::new();
        connector.expect_connect().returning(|address| {
            Box::new(
                MockDeviceBuilder::new()
                    .uid(format!("RINCON_{}", address.replace('.', "")))
                    .build(),
            )
        });
        connector
    }

    #[test]
    fn fresh_store_needs_scan_and_stays_unselected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        let startup = bootstrap(&path, MockScanner::new(), healthy_connector()).unwrap();
        assert!(startup.needs_scan);
        assert_eq!(startup.controller.selected_uid(), None);
        assert_eq!(startup.window_geometry, None);
    }

    #[test]
    fn restores_geometry_and_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        {
            let mut store = Store::open(&path).unwrap();
            store
                .replace_speakers(&[record("RINCON_192168_1140", "Kitchen", "192.168.1.140")])
                .unwrap();
            let settings = store.settings();
            settings.set_window_geometry("600x400+80+60").unwrap();
            settings.set_last_selected("RINCON_192168_1140").unwrap();
        }

        let mut connector = MockConnector::new();
        connector.expect_connect().returning(|_| {
            Box::new(
                MockDeviceBuilder::new()
                    .uid("RINCON_192168_1140")
                    .name("Kitchen")
                    .track("Harvest Moon", "Neil Young")
                    .build(),
            )
        });

        let startup = bootstrap(&path, MockScanner::new(), connector).unwrap();
        assert!(!startup.needs_scan);
        assert_eq!(startup.window_geometry.as_deref(), Some("600x400+80+60"));
        assert_eq!(startup.controller.selected_uid(), Some("RINCON_192168_1140"));
        assert_eq!(startup.controller.now_playing().title, "Harvest Moon");
    }

    #[test]
    fn dangling_last_selected_leaves_state_unselected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        {
            let mut store = Store::open(&path).unwrap();
            store
                .replace_speakers(&[record("RINCON_A", "Kitchen", "192.168.1.140")])
                .unwrap();
            store.settings().set_last_selected("RINCON_Z").unwrap();
        }

        let startup = bootstrap(&path, MockScanner::new(), healthy_connector()).unwrap();
        assert!(!startup.needs_scan);
        assert_eq!(startup.controller.selected_uid(), None);
    }

    #[test]
    fn bootstrap_never_scans_on_its_own() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        let mut scanner = MockScanner::new();
        scanner.expect_list_addresses().times(0);

        let startup = bootstrap(&path, scanner, healthy_connector()).unwrap();
        assert!(startup.needs_scan);
    }
}
