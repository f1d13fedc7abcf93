use crate::error::Result;
use crate::model::{DeviceInfo, QueueEntry, TrackInfo};

/// Per-device control handle, implemented by an adapter around the real
/// device-control protocol library. Every call is a remote call that may
/// fail or time out; failures come back as error values, never panics.
pub trait DeviceClient {
    /// Fetch the speaker's own description. Absent fields are "unknown".
    fn info(&self) -> Result<DeviceInfo>;

    /// Current volume level (0-100)
    fn volume(&self) -> Result<u8>;

    /// Set the volume level (0-100)
    fn set_volume(&self, volume: u8) -> Result<()>;

    fn previous(&self) -> Result<()>;
    fn next(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn play(&self) -> Result<()>;

    /// Metadata for the track currently playing
    fn current_track(&self) -> Result<TrackInfo>;

    /// The speaker's current play queue, in queue order
    fn queue(&self) -> Result<Vec<QueueEntry>>;

    /// Start playback at the given 0-based queue position
    fn play_from_queue(&self, index: usize) -> Result<()>;
}

/// Network enumeration of reachable speakers. An empty result is a valid
/// outcome (no devices found), not an error.
pub trait Discovery {
    fn list_addresses(&self) -> Result<Vec<String>>;
}

/// Constructs a control handle for a network address. This is cheap handle
/// construction only; no network traffic happens until the handle is used.
pub trait Connect {
    fn connect(&self, address: &str) -> Box<dyn DeviceClient>;
}
