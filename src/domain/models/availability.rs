/// Whether the remote blob store may be used.
///
/// `Unavailable` is terminal for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
    Available,
    Unavailable,
}

impl AvailabilityState {
    pub fn is_available(self) -> bool {
        matches!(self, AvailabilityState::Available)
    }
}

impl From<bool> for AvailabilityState {
    fn from(available: bool) -> Self {
        if available {
            AvailabilityState::Available
        } else {
            AvailabilityState::Unavailable
        }
    }
}

impl std::fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityState::Available => write!(f, "available"),
            AvailabilityState::Unavailable => write!(f, "unavailable"),
        }
    }
}
