/// One track in a speaker's play queue, indexed by position (0-based)
/// within the snapshot it was fetched in. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueEntry {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}
