//! Board coordinate notation: a letter column followed by a 1-based row
//! number, e.g. "a1" is the lower-left corner (0, 0) and "e5" is (4, 4).
//! Letters are case-insensitive.

use crate::Point;
use crate::error::GoError;

/// Parse a notation string against the given board dimensions.
///
/// The column letter is checked against `[a, z)` before the range check;
/// the literal `z` has always been rejected upstream and stays rejected
/// here even though no supported board reaches it.
pub fn parse(coord: &str, cols: u8, rows: u8) -> Result<Point, GoError> {
    let mut chars = coord.chars();

    let letter = chars
        .next()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .filter(|&c| c < 'z')
        .ok_or(GoError::InvalidCoordinate)?;

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GoError::InvalidCoordinate);
    }

    let col = letter as u8 - b'a';
    let number: u32 = digits.parse().map_err(|_| GoError::InvalidCoordinate)?;

    if col >= cols || number < 1 || number > rows as u32 {
        return Err(GoError::InvalidCoordinate);
    }

    Ok((col, number as u8 - 1))
}

/// Format a point back into notation. Inverse of [`parse`] for any
/// in-range point.
pub fn format((col, row): Point) -> String {
    format!("{}{}", (b'a' + col) as char, row as u16 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_coordinates() {
        assert_eq!(parse("a1", 9, 9), Ok((0, 0)));
        assert_eq!(parse("e2", 9, 9), Ok((4, 1)));
        assert_eq!(parse("e5", 9, 9), Ok((4, 4)));
        assert_eq!(parse("s19", 19, 19), Ok((18, 18)));
    }

    #[test]
    fn accepts_uppercase() {
        assert_eq!(parse("A1", 9, 9), Ok((0, 0)));
        assert_eq!(parse("E5", 9, 9), Ok((4, 4)));
    }

    #[test]
    fn rejects_malformed_input() {
        for coord in ["", "5", "1a", "test", "a", "a1b", "e-1", "??"] {
            assert_eq!(parse(coord, 9, 9), Err(GoError::InvalidCoordinate), "{coord}");
        }
    }

    #[test]
    fn rejects_out_of_range() {
        // columns past the board edge
        assert_eq!(parse("o2", 9, 9), Err(GoError::InvalidCoordinate));
        assert_eq!(parse("y22", 19, 19), Err(GoError::InvalidCoordinate));
        // rows
        assert_eq!(parse("a0", 9, 9), Err(GoError::InvalidCoordinate));
        assert_eq!(parse("a10", 9, 9), Err(GoError::InvalidCoordinate));
        assert_eq!(parse("a30", 19, 19), Err(GoError::InvalidCoordinate));
        // absurdly long numbers must not overflow into acceptance
        assert_eq!(parse("a99999999999999", 19, 19), Err(GoError::InvalidCoordinate));
    }

    #[test]
    fn rejects_letter_z() {
        assert_eq!(parse("z9", 9, 9), Err(GoError::InvalidCoordinate));
        assert_eq!(parse("Z9", 19, 19), Err(GoError::InvalidCoordinate));
    }

    #[test]
    fn round_trips_all_points() {
        for col in 0..19u8 {
            for row in 0..19u8 {
                let coord = format((col, row));
                assert_eq!(parse(&coord, 19, 19), Ok((col, row)), "{coord}");
            }
        }
    }

    #[test]
    fn formats_known_points() {
        assert_eq!(format((0, 0)), "a1");
        assert_eq!(format((4, 1)), "e2");
        assert_eq!(format((4, 4)), "e5");
    }
}
