use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    pub fn from_int(v: i8) -> Option<Self> {
        match v.signum() {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Stone::Black => "B",
            Stone::White => "W",
        }
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl std::str::FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(Stone::Black),
            "white" => Ok(Stone::White),
            _ => Err(format!("invalid color: {s}")),
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "black"),
            Stone::White => write!(f, "white"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_int_normalizes() {
        assert_eq!(Stone::from_int(1), Some(Stone::Black));
        assert_eq!(Stone::from_int(-1), Some(Stone::White));
        assert_eq!(Stone::from_int(5), Some(Stone::Black));
        assert_eq!(Stone::from_int(0), None);
    }

    #[test]
    fn int_round_trip() {
        assert_eq!(Stone::from_int(Stone::Black.to_int()), Some(Stone::Black));
        assert_eq!(Stone::from_int(Stone::White.to_int()), Some(Stone::White));
    }

    #[test]
    fn opponent() {
        assert_eq!(Stone::Black.opp(), Stone::White);
        assert_eq!(Stone::White.opp(), Stone::Black);
        assert_eq!(-Stone::Black, Stone::White);
    }

    #[test]
    fn parses_color_names() {
        assert_eq!("black".parse(), Ok(Stone::Black));
        assert_eq!("white".parse(), Ok(Stone::White));
        assert!("green".parse::<Stone>().is_err());
    }

    #[test]
    fn displays_color_names() {
        assert_eq!(Stone::Black.to_string(), "black");
        assert_eq!(Stone::White.to_string(), "white");
    }
}
