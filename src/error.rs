use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    InvalidBoardSize,
    InvalidCoordinate,
    CoordOccupied,
    SelfCapture,
    KoViolation,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::InvalidBoardSize => write!(f, "invalid board size"),
            GoError::InvalidCoordinate => write!(f, "invalid coordinate"),
            GoError::CoordOccupied => write!(f, "coordinate occupied"),
            GoError::SelfCapture => write!(f, "self-capture"),
            GoError::KoViolation => write!(f, "ko violation"),
        }
    }
}

impl std::error::Error for GoError {}
