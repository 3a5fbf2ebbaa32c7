use std::fmt::{self, Display};

use super::{
	Accidental,
	Keyword,
	Length,
	Note,
	OctaveShift,
	Token,
	TokenKind,
	Volume,
};


impl Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Song => "Song",
			Self::Phrase => "Phrase",
			Self::Octave => "Octave",
			Self::Repeat => "Repeat",
			Self::Volume => "Volume",
			Self::Tempo => "Tempo",
			Self::Instrument => "Instrument",
			Self::Rest => "Rest",
		})
	}
}


impl Display for Note {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::A => "A",
			Self::B => "B",
			Self::C => "C",
			Self::D => "D",
			Self::E => "E",
			Self::F => "F",
			Self::G => "G",
		})
	}
}


impl Display for Accidental {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Sharp => "#",
			Self::Flat => "b",
		})
	}
}


impl Display for OctaveShift {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Up => "+",
			Self::Down => "-",
		})
	}
}


impl Display for Length {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Whole => "Whole",
			Self::Half => "Half",
			Self::Quarter => "Quarter",
			Self::Eighth => "Eighth",
		})
	}
}


impl Display for Volume {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			Self::Piano => "piano",
			Self::MesoPiano => "mesopiano",
			Self::MesoForte => "mesoforte",
			Self::Forte => "forte",
			Self::Default => "default",
		})
	}
}


impl Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Keyword(keyword) => keyword.fmt(f),
			Self::Note(note) => note.fmt(f),
			Self::Accidental(accidental) => accidental.fmt(f),
			Self::Shift(shift) => shift.fmt(f),
			Self::Length(length) => length.fmt(f),
			Self::Volume(volume) => volume.fmt(f),
			Self::Octave(octave) => octave.fmt(f),
			Self::Tempo(tempo) => tempo.fmt(f),
			Self::String(string) => write!(
				f,
				"\"{}\"",
				String::from_utf8_lossy(string).escape_debug()
			),
			Self::OpenParens => f.write_str("("),
			Self::CloseParens => f.write_str(")"),
			Self::OpenBrace => f.write_str("{"),
			Self::CloseBrace => f.write_str("}"),
			Self::Error(error) => write!(f, "error: {}", error),
			Self::Eof => f.write_str("<eof>"),
		}
	}
}


impl Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.token.fmt(f)
	}
}
