mod device;
mod queue;
mod track;
mod transport;

pub use device::{DeviceInfo, DeviceRecord, UNNAMED};
pub use queue::QueueEntry;
pub use track::TrackInfo;
pub use transport::TransportOp;
