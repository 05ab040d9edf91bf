//! Type definitions for pieces and board coordinates
//!
//! Closed enumerations for piece kind and color, and newtypes for files, ranks and
//! squares. Every value is validated when it is constructed, so a `Square` always
//! lies on the 8x8 board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Kind of chess piece
///
/// Wire names are the capitalized English names (`"Knight"`, `"Queen"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds, in declaration order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

impl FromStr for PieceKind {
    type Err = RulesError;

    /// Parse a piece kind by its exact, case-sensitive name
    fn from_str(s: &str) -> RulesResult<Self> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RulesError::InvalidPieceKind(s.to_string()))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Piece color, lower-case on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        }
    }
}

impl FromStr for PieceColor {
    type Err = RulesError;

    fn from_str(s: &str) -> RulesResult<Self> {
        match s {
            "white" => Ok(PieceColor::White),
            "black" => Ok(PieceColor::Black),
            _ => Err(RulesError::InvalidColor(s.to_string())),
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board file (column), 0 for 'a' through 7 for 'h'
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from a character ('a'..='h')
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::File;
    /// assert_eq!(File::from_char('e').map(File::index), Some(4));
    /// assert_eq!(File::from_char('E'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Create a file from its index (0-7)
    pub fn from_index(index: i8) -> Option<Self> {
        (0..8).contains(&index).then_some(File(index as u8))
    }

    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board rank (row), 0 for rank 1 through 7 for rank 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);

    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        (1..=8).contains(&n).then(|| Rank(n - 1))
    }

    /// Create a rank from its index (0-7)
    pub fn from_index(index: i8) -> Option<Self> {
        (0..8).contains(&index).then_some(Rank(index as u8))
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square (file, rank)
///
/// Ordering is by file first, then rank, which matches the lexicographic order of the
/// algebraic strings (`"a1" < "a2" < ... < "h8"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    pub fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    pub fn file(self) -> File {
        self.file
    }

    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Parse algebraic notation such as `"e4"`
    ///
    /// Exactly two characters: a lower-case file letter and a rank digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_rules::Square;
    /// let square = Square::from_algebraic("e4").unwrap();
    /// assert_eq!(square.to_algebraic(), "e4");
    /// assert!(Square::from_algebraic("e9").is_err());
    /// ```
    pub fn from_algebraic(s: &str) -> RulesResult<Self> {
        let invalid = || RulesError::InvalidSquare(s.to_string());

        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(invalid());
        };

        let rank_num = rank_char.to_digit(10).ok_or_else(invalid)? as u8;

        Ok(Square {
            file: File::from_char(file_char).ok_or_else(invalid)?,
            rank: Rank::from_number(rank_num).ok_or_else(invalid)?,
        })
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Square displaced by (`d_file`, `d_rank`), or `None` when it falls off the board
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Square> {
        let file = File::from_index(self.file.index() as i8 + d_file)?;
        let rank = Rank::from_index(self.rank.index() as i8 + d_rank)?;
        Some(Square { file, rank })
    }
}

impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> RulesResult<Self> {
        Square::from_algebraic(s)
    }
}

impl TryFrom<String> for Square {
    type Error = RulesError;

    fn try_from(s: String) -> RulesResult<Self> {
        Square::from_algebraic(&s)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_to_char() {
        assert_eq!(File(0).to_char(), 'a');
        assert_eq!(File(4).to_char(), 'e');
        assert_eq!(File(7).to_char(), 'h');
    }

    #[test]
    fn test_rank_from_number() {
        assert_eq!(Rank::from_number(1), Some(Rank(0)));
        assert_eq!(Rank::from_number(4), Some(Rank(3)));
        assert_eq!(Rank::from_number(8), Some(Rank(7)));
        assert_eq!(Rank::from_number(0), None);
        assert_eq!(Rank::from_number(9), None);
    }

    #[test]
    fn test_square_algebraic() {
        let square = Square::from_algebraic("e4").unwrap();
        assert_eq!(square.file().index(), 4);
        assert_eq!(square.rank().index(), 3);
        assert_eq!(square.to_algebraic(), "e4");

        let corner = Square::from_algebraic("h8").unwrap();
        assert_eq!(corner.file().index(), 7);
        assert_eq!(corner.rank().index(), 7);
    }

    #[test]
    fn test_square_rejects_malformed_input() {
        for input in ["", "e", "i1", "a0", "a9", "H1", "a10", " a1", "a1 ", "11", "aa"] {
            assert_eq!(
                Square::from_algebraic(input),
                Err(RulesError::InvalidSquare(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let h1: Square = "h1".parse().unwrap();
        assert_eq!(h1.offset(-2, 1).map(String::from), Some("f2".to_string()));
        assert_eq!(h1.offset(1, 2), None);
        assert_eq!(h1.offset(-1, -2), None);
    }

    #[test]
    fn test_square_order_matches_algebraic_order() {
        let mut squares: Vec<Square> = ["h5", "a8", "e2", "a1", "e10"]
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        squares.sort();
        let names: Vec<String> = squares.into_iter().map(String::from).collect();
        assert_eq!(names, ["a1", "a8", "e2", "h5"]);
    }

    #[test]
    fn test_piece_kind_parse() {
        assert_eq!("Knight".parse::<PieceKind>(), Ok(PieceKind::Knight));
        assert_eq!("King".parse::<PieceKind>(), Ok(PieceKind::King));
        assert_eq!(
            "knight".parse::<PieceKind>(),
            Err(RulesError::InvalidPieceKind("knight".to_string()))
        );
        assert!("Turtle".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_piece_color_parse() {
        assert_eq!("white".parse::<PieceColor>(), Ok(PieceColor::White));
        assert_eq!("black".parse::<PieceColor>(), Ok(PieceColor::Black));
        assert_eq!(
            "purple".parse::<PieceColor>(),
            Err(RulesError::InvalidColor("purple".to_string()))
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&PieceKind::Bishop).unwrap(), "\"Bishop\"");
        assert_eq!(serde_json::to_string(&PieceColor::Black).unwrap(), "\"black\"");
        let square: Square = serde_json::from_str("\"g3\"").unwrap();
        assert_eq!(serde_json::to_string(&square).unwrap(), "\"g3\"");
        assert!(serde_json::from_str::<Square>("\"z3\"").is_err());
    }
}
