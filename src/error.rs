/// The word wrap engine's result type.
pub type WrapResult = Result<(), WrapError>;

/// Describes an unexpected error happening while maintaining the slice
/// structure.
///
/// These indicate that the sweep's bookkeeping has desynchronized from
/// the boundary (for example an ill-formed, self-intersecting contour).
/// They are fatal for the current layout pass and never retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InternalError {
    /// A horizontal-line intersection that the slice structure relies on
    /// does not exist (parallel or degenerate edges).
    MissingIntersection,
    /// A boundary edge opened a new corridor without the matching
    /// opposite wall.
    UnpairedSweepEvent,
}

impl core::fmt::Display for InternalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InternalError::MissingIntersection => {
                write!(f, "Missing horizontal intersection")
            }
            InternalError::UnpairedSweepEvent => {
                write!(f, "Sweep event without a matching corridor wall")
            }
        }
    }
}

impl std::error::Error for InternalError {}

/// An input contract violation, detected before the sweep runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidInput {
    PositionIsNaN,
    ZeroSizeBox,
    UnclosedContour,
}

impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidInput::PositionIsNaN => {
                write!(f, "Position is not a number")
            }
            InvalidInput::ZeroSizeBox => {
                write!(f, "Word box with zero or negative size")
            }
            InvalidInput::UnclosedContour => {
                write!(f, "Boundary contour is not closed")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}

/// The word wrap engine's error enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapError {
    InvalidInput(InvalidInput),
    Internal(InternalError),
}

impl core::fmt::Display for WrapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WrapError::InvalidInput(e) => {
                write!(f, "Invalid input: {}", e)
            }
            WrapError::Internal(e) => {
                write!(f, "Internal error: {}", e)
            }
        }
    }
}

impl std::error::Error for WrapError {}

impl core::convert::From<InvalidInput> for WrapError {
    fn from(value: InvalidInput) -> Self {
        Self::InvalidInput(value)
    }
}

impl core::convert::From<InternalError> for WrapError {
    fn from(value: InternalError) -> Self {
        Self::Internal(value)
    }
}
