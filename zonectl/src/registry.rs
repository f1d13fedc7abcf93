use log::{debug, warn};

use crate::client::{Connect, DeviceClient, Discovery};
use crate::error::Result;
use crate::model::DeviceRecord;
use crate::store::Store;

/// One known speaker: its registry record plus the control handle for it
pub struct DeviceEntry {
    pub record: DeviceRecord,
    pub client: Box<dyn DeviceClient>,
}

/// In-memory registry of known speakers. Built from the store at startup,
/// replaced wholesale by every successful scan. Owns identity,
/// reconciliation and ordering; the selection layer refers into it by uid
/// and must re-validate after any replacement.
#[derive(Default)]
pub struct Registry {
    entries: Vec<DeviceEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate the network and rebuild the registry from what responds.
    ///
    /// Addresses that answer without usable identity (bridge-only nodes) are
    /// skipped, as are individual speakers whose info fetch fails; neither
    /// aborts the scan. A discovery failure aborts with the registry
    /// untouched. On success the previous contents are discarded entirely,
    /// and the new entries are sorted by display name (case-sensitive).
    pub fn scan(&mut self, discovery: &dyn Discovery, connector: &dyn Connect) -> Result<usize> {
        let addresses = discovery.list_addresses()?;

        let mut entries = Vec::new();
        for address in addresses {
            let client = connector.connect(&address);
            let info = match client.info() {
                Ok(info) => info,
                Err(err) => {
                    warn!("could not fetch info from {}, skipping: {}", address, err);
                    continue;
                }
            };

            match info.into_record(&address) {
                Some(record) => entries.push(DeviceEntry { record, client }),
                None => {
                    warn!(
                        "speaker {} does not have any info (probably a bridge), skipping",
                        address
                    );
                }
            }
        }

        debug!("found {} speaker(s)", entries.len());
        entries.sort_by(|a, b| a.record.display_name.cmp(&b.record.display_name));

        self.entries = entries;
        Ok(self.entries.len())
    }

    /// Write the current registry contents to the store, replacing whatever
    /// was persisted before. Transactional: all-or-nothing.
    pub fn persist(&self, store: &mut Store) -> Result<()> {
        let records: Vec<DeviceRecord> =
            self.entries.iter().map(|entry| entry.record.clone()).collect();
        store.replace_speakers(&records)
    }

    /// Rebuild the registry from the store, in storage order, reconnecting
    /// a control handle per row.
    pub fn load(&mut self, store: &Store, connector: &dyn Connect) -> Result<usize> {
        let records = store.load_speakers()?;
        self.entries = records
            .into_iter()
            .map(|record| {
                let client = connector.connect(&record.network_address);
                DeviceEntry { record, client }
            })
            .collect();

        debug!("loaded {} speaker(s) from store", self.entries.len());
        Ok(self.entries.len())
    }

    pub fn find(&self, uid: &str) -> Option<&DeviceEntry> {
        self.entries.iter().find(|entry| entry.record.uid == uid)
    }

    pub fn records(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
