use mockall::mock;

use crate::client::{Connect, DeviceClient, Discovery};
use crate::error::Result;
use crate::model::{DeviceInfo, QueueEntry, TrackInfo};

mock! {
    pub Device {}

    impl DeviceClient for Device {
        fn info(&self) -> Result<DeviceInfo>;
        fn volume(&self) -> Result<u8>;
        fn set_volume(&self, volume: u8) -> Result<()>;
        fn previous(&self) -> Result<()>;
        fn next(&self) -> Result<()>;
        fn pause(&self) -> Result<()>;
        fn play(&self) -> Result<()>;
        fn current_track(&self) -> Result<TrackInfo>;
        fn queue(&self) -> Result<Vec<QueueEntry>>;
        fn play_from_queue(&self, index: usize) -> Result<()>;
    }
}

mock! {
    pub Scanner {}

    impl Discovery for Scanner {
        fn list_addresses(&self) -> Result<Vec<String>>;
    }
}

mock! {
    pub Connector {}

    impl Connect for Connector {
        fn connect(&self, address: &str) -> Box<dyn DeviceClient>;
    }
}

/// Builder for a [`MockDevice`] preset with sensible speaker behavior
pub struct MockDeviceBuilder {
    uid: String,
    name: String,
    serial: String,
    mac: String,
    volume: u8,
    track: TrackInfo,
    queue: Vec<QueueEntry>,
}

impl Default for MockDeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDeviceBuilder {
    pub fn new() -> Self {
        Self {
            uid: "RINCON_000E58C0123401400".into(),
            name: "Living Room".into(),
            serial: "00-0E-58-C0-12-34:8".into(),
            mac: "00:0E:58:C0:12:34".into(),
            volume: 50,
            track: TrackInfo::default(),
            queue: Vec::new(),
        }
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    pub fn track(mut self, title: impl Into<String>, artist: impl Into<String>) -> Self {
        self.track.title = Some(title.into());
        self.track.artist = Some(artist.into());
        self
    }

    pub fn queue_entry(mut self, title: impl Into<String>, artist: impl Into<String>) -> Self {
        self.queue.push(QueueEntry {
            title: Some(title.into()),
            artist: Some(artist.into()),
            album: None,
        });
        self
    }

    /// A device that only answers `info()`. Every other call must be
    /// stubbed by the test, so an unexpected remote call fails loudly.
    pub fn bare(self) -> MockDevice {
        let info = DeviceInfo {
            uid: Some(self.uid),
            display_name: Some(self.name),
            serial_number: Some(self.serial),
            mac_address: Some(self.mac),
        };

        let mut device = MockDevice::new();
        device.expect_info().returning(move || Ok(info.clone()));
        device
    }

    /// A fully healthy device: every call succeeds with the configured state
    pub fn build(self) -> MockDevice {
        let volume = self.volume;
        let track = self.track.clone();
        let queue = self.queue.clone();

        let mut device = self.bare();
        device.expect_volume().returning(move || Ok(volume));
        device.expect_set_volume().returning(|_| Ok(()));
        device.expect_previous().returning(|| Ok(()));
        device.expect_next().returning(|| Ok(()));
        device.expect_pause().returning(|| Ok(()));
        device.expect_play().returning(|| Ok(()));
        device
            .expect_current_track()
            .returning(move || Ok(track.clone()));
        device.expect_queue().returning(move || Ok(queue.clone()));
        device.expect_play_from_queue().returning(|_| Ok(()));
        device
    }
}
