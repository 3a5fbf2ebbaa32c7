mod fmt;

use super::ErrorKind;
use super::SourcePos;


/// All keywords in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	Song,
	Phrase,
	Octave,
	Repeat,
	Volume,
	Tempo,
	Instrument,
	Rest,
}


/// Note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Note {
	A,
	B,
	C,
	D,
	E,
	F,
	G,
}


impl Note {
	/// The note for a letter byte, A through G.
	pub fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			b'A' => Some(Self::A),
			b'B' => Some(Self::B),
			b'C' => Some(Self::C),
			b'D' => Some(Self::D),
			b'E' => Some(Self::E),
			b'F' => Some(Self::F),
			b'G' => Some(Self::G),
			_ => None,
		}
	}
}


/// Pitch accidentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
	Sharp, // #
	Flat,  // b
}


impl Accidental {
	pub fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			b'#' => Some(Self::Sharp),
			b'b' => Some(Self::Flat),
			_ => None,
		}
	}
}


/// Octave shift markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OctaveShift {
	Up,   // +
	Down, // -
}


impl OctaveShift {
	pub fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			b'+' => Some(Self::Up),
			b'-' => Some(Self::Down),
			_ => None,
		}
	}
}


/// Note length words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
	Whole,
	Half,
	Quarter,
	Eighth,
}


/// Volume words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Volume {
	Piano,
	MesoPiano,
	MesoForte,
	Forte,
	Default,
}


/// All possible kinds of token in melos.
#[derive(Debug)]
pub enum TokenKind {
	Keyword(Keyword),
	Note(Note),
	Accidental(Accidental),
	Shift(OctaveShift),
	Length(Length),
	Volume(Volume),

	/// An octave number, 0 through 7.
	Octave(u8),
	/// A tempo value, 60 through 129 beats per minute.
	Tempo(u16),
	// String literals are not interned because they probably won't be repeated very often.
	String(Box<[u8]>),

	OpenParens,  // (
	CloseParens, // )
	OpenBrace,   // {
	CloseBrace,  // }

	/// A recoverable lexical error. Errors are surfaced in the token stream so that a
	/// single pass can collect multiple diagnostics.
	Error(ErrorKind),

	/// End of the last source. Produced indefinitely once reached.
	Eof,
}


impl TokenKind {
	/// The structural token for a parenthesis or brace byte.
	pub fn punct(byte: u8) -> Option<Self> {
		match byte {
			b'(' => Some(Self::OpenParens),
			b')' => Some(Self::CloseParens),
			b'{' => Some(Self::OpenBrace),
			b'}' => Some(Self::CloseBrace),
			_ => None,
		}
	}
}


/// A lexical token.
#[derive(Debug)]
pub struct Token {
	pub token: TokenKind,
	pub pos: SourcePos,
}
