use thiserror::Error;

/// Why a drawing operation was rejected.
///
/// A rejected operation leaves the train line untouched.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DrawError {
    /// The operation needs a heading and no segment has been drawn yet.
    #[error("{operation} requires a heading, draw a straight segment first.")]
    InvalidState { operation: &'static str },
    #[error("Invalid argument for {operation}: {reason}.")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },
    /// The solve has no finite solution for the current heading.
    #[error("Degenerate geometry in {operation}: {reason}.")]
    DegenerateGeometry {
        operation: &'static str,
        reason: String,
    },
}

impl DrawError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        DrawError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(operation: &'static str, reason: impl Into<String>) -> Self {
        DrawError::DegenerateGeometry {
            operation,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DrawError::InvalidState { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DrawError::InvalidArgument { .. })
    }

    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(self, DrawError::DegenerateGeometry { .. })
    }
}

#[test]
fn messages() {
    let e = DrawError::InvalidState {
        operation: "draw_turn",
    };
    assert_eq!(
        e.to_string(),
        "draw_turn requires a heading, draw a straight segment first."
    );
    assert!(e.is_invalid_state());

    let e = DrawError::invalid_argument("draw_turn", "radius must be positive");
    assert_eq!(
        e.to_string(),
        "Invalid argument for draw_turn: radius must be positive."
    );
    assert!(e.is_invalid_argument());
    assert!(!e.is_degenerate_geometry());
}
