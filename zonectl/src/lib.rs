pub mod bootstrap;
pub mod client;
pub mod controller;
pub mod error;
pub mod model;
pub mod registry;
pub mod settings;
pub mod store;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key types for easier access
pub use bootstrap::{bootstrap, Startup};
pub use client::{Connect, DeviceClient, Discovery};
pub use controller::{Controller, NowPlaying, EMPTY_INFO};
pub use error::{ControllerError, Result};
pub use model::{DeviceInfo, DeviceRecord, QueueEntry, TrackInfo, TransportOp, UNNAMED};
pub use registry::Registry;
pub use settings::Settings;
pub use store::Store;
