use std::fmt;

/// Transport operations a caller may request for the selected speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    Previous,
    Next,
    Pause,
    Play,
}

impl fmt::Display for TransportOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportOp::Previous => "previous",
            TransportOp::Next => "next",
            TransportOp::Pause => "pause",
            TransportOp::Play => "play",
        };
        write!(f, "{}", name)
    }
}
