use log::{debug, info, warn};

use crate::client::{Connect, Discovery};
use crate::error::{ControllerError, Result};
use crate::model::{DeviceRecord, QueueEntry, TrackInfo, TransportOp};
use crate::registry::Registry;
use crate::settings::Settings;
use crate::store::Store;

/// Placeholder shown for any info panel field with nothing to display
pub const EMPTY_INFO: &str = "-";

/// Last-known-good display state for the selected speaker. Fields are
/// overwritten wholesale on a successful fetch and left alone on a failed
/// one; only deselection resets them to [`EMPTY_INFO`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: Option<String>,
    pub volume: Option<u8>,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            title: EMPTY_INFO.to_string(),
            artist: EMPTY_INFO.to_string(),
            album: EMPTY_INFO.to_string(),
            album_art_url: None,
            volume: None,
        }
    }
}

impl NowPlaying {
    fn apply(&mut self, track: &TrackInfo, volume: u8) {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(EMPTY_INFO)
                .to_string()
        };

        self.title = field(&track.title);
        self.artist = field(&track.artist);
        self.album = field(&track.album);
        self.album_art_url = track.album_art_url.clone();
        self.volume = Some(volume);
    }
}

/// Owns the registry, the store and the current selection, and mediates
/// every state-changing operation through them so callers always observe a
/// consistent view.
///
/// All operations take `&mut self`: one logical thread of control, blocking
/// calls issued sequentially, no internal locking. Callers dispatching off
/// an event thread must serialize operations per speaker and keep a single
/// writer for the store.
pub struct Controller<D: Discovery, N: Connect> {
    registry: Registry,
    store: Store,
    discovery: D,
    connector: N,
    selected: Option<String>,
    now_playing: NowPlaying,
    queue: Vec<QueueEntry>,
}

impl<D: Discovery, N: Connect> Controller<D, N> {
    pub fn new(store: Store, discovery: D, connector: N) -> Self {
        Self {
            registry: Registry::new(),
            store,
            discovery,
            connector,
            selected: None,
            now_playing: NowPlaying::default(),
            queue: Vec::new(),
        }
    }

    /// Rebuild the registry from the network and persist the result.
    ///
    /// Destructive: speakers not re-found are gone from memory and store. A
    /// discovery failure short-circuits before persistence, so a failed scan
    /// never wipes a previously good persisted set. The post-scan registry
    /// is authoritative: if the selected speaker was not re-found the
    /// selection is dropped and the info panel reset.
    pub fn scan(&mut self) -> Result<usize> {
        let found = self.registry.scan(&self.discovery, &self.connector)?;
        self.registry.persist(&mut self.store)?;

        if let Some(uid) = self.selected.clone() {
            if self.registry.find(&uid).is_none() {
                info!("selected speaker {} not found by scan, deselecting", uid);
                self.clear_selection();
            }
        }
        Ok(found)
    }

    /// Rebuild the registry from the store, in storage order
    pub fn load(&mut self) -> Result<usize> {
        self.registry.load(&self.store, &self.connector)
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.registry.records()
    }

    pub fn find(&self, uid: &str) -> Option<&DeviceRecord> {
        self.registry.find(uid).map(|entry| &entry.record)
    }

    pub fn selected_uid(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    /// The queue snapshot for the selected speaker, as of the last
    /// successful [`refresh_queue`](Self::refresh_queue)
    pub fn queue(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// Change the selection. `None` deselects, resets the info panel to the
    /// empty placeholder and clears the persisted `last_selected` value, so
    /// a restart does not re-select a speaker the user explicitly
    /// deselected. Selecting the already-selected speaker is a no-op with
    /// no remote traffic.
    ///
    /// Selecting a speaker fetches its current track and volume; if that
    /// fetch fails the selection still stands and the panel keeps its
    /// previous values, with the error passed through to the caller. The
    /// uid is written to the `last_selected` setting best-effort: a
    /// persistence failure is logged, not returned.
    pub fn select(&mut self, uid: Option<&str>) -> Result<()> {
        let Some(uid) = uid else {
            debug!("nothing selected");
            self.clear_selection();
            if let Err(err) = self.store.settings().clear_last_selected() {
                warn!("could not clear persisted selection: {}", err);
            }
            return Ok(());
        };

        if self.selected.as_deref() == Some(uid) {
            debug!("speaker {} already selected", uid);
            return Ok(());
        }

        if self.registry.find(uid).is_none() {
            return Err(ControllerError::DeviceUnavailable {
                uid: uid.to_string(),
                reason: "not in registry".to_string(),
            });
        }

        self.selected = Some(uid.to_string());
        // the previous speaker's snapshot is not meaningful for this one
        self.queue.clear();

        if let Err(err) = self.store.settings().set_last_selected(uid) {
            warn!("could not persist selection {}: {}", uid, err);
        }

        self.refresh_now_playing()
    }

    /// Replace the queue snapshot with a fresh fetch from the selected
    /// speaker. On failure the previous snapshot stays in place.
    pub fn refresh_queue(&mut self) -> Result<usize> {
        let uid = self.require_selection()?;
        let entry = self.require_entry(&uid)?;

        let queue = entry.client.queue()?;
        debug!("fetched {} queue entries from {}", queue.len(), uid);
        self.queue = queue;
        Ok(self.queue.len())
    }

    /// Send an absolute volume (0-100) to the selected speaker. The panel
    /// echoes the value only once the speaker confirms it.
    pub fn apply_volume(&mut self, volume: u8) -> Result<()> {
        let uid = self.require_selection()?;
        if volume > 100 {
            return Err(ControllerError::Precondition(format!(
                "volume {} out of range 0-100",
                volume
            )));
        }

        let entry = self.require_entry(&uid)?;
        debug!("changing volume of {} to {}", uid, volume);
        entry.client.set_volume(volume)?;

        self.now_playing.volume = Some(volume);
        Ok(())
    }

    /// Run a transport operation on the selected speaker, then re-read its
    /// info panel. Requesting this with no selection is a caller bug and
    /// fails with a precondition error before any remote call.
    pub fn transport(&mut self, op: TransportOp) -> Result<()> {
        let uid = self.require_selection()?;
        let entry = self.require_entry(&uid)?;

        debug!("sending {} to {}", op, uid);
        match op {
            TransportOp::Previous => entry.client.previous(),
            TransportOp::Next => entry.client.next(),
            TransportOp::Pause => entry.client.pause(),
            TransportOp::Play => entry.client.play(),
        }?;

        self.refresh_now_playing()
    }

    /// Start playback at `index` within the current queue snapshot, then
    /// re-read the info panel. An index outside the snapshot fails before
    /// any remote call.
    pub fn play_queue_entry(&mut self, index: usize) -> Result<()> {
        let uid = self.require_selection()?;
        if index >= self.queue.len() {
            return Err(ControllerError::Precondition(format!(
                "queue index {} out of bounds ({} entries)",
                index,
                self.queue.len()
            )));
        }

        let entry = self.require_entry(&uid)?;
        entry.client.play_from_queue(index)?;

        self.refresh_now_playing()
    }

    pub fn get_setting(&self, name: &str) -> Result<Option<String>> {
        self.store.get_setting(name)
    }

    pub fn set_setting(&self, name: &str, value: &str) -> Result<()> {
        self.store.set_setting(name, value)
    }

    pub fn settings(&self) -> Settings<'_> {
        self.store.settings()
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.now_playing = NowPlaying::default();
        self.queue.clear();
    }

    fn require_selection(&self) -> Result<String> {
        self.selected
            .clone()
            .ok_or_else(|| ControllerError::Precondition("no speaker selected".to_string()))
    }

    fn require_entry(&self, uid: &str) -> Result<&crate::registry::DeviceEntry> {
        self.registry
            .find(uid)
            .ok_or_else(|| ControllerError::DeviceUnavailable {
                uid: uid.to_string(),
                reason: "not in registry".to_string(),
            })
    }

    fn refresh_now_playing(&mut self) -> Result<()> {
        let uid = self.require_selection()?;
        let entry = self.require_entry(&uid)?;

        let track = entry.client.current_track()?;
        let volume = entry.client.volume()?;
        self.now_playing.apply(&track, volume);
        Ok(())
    }
}
