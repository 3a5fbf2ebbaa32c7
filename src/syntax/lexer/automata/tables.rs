use super::super::token::{Keyword, Length, Volume};


/// Character equivalence classes, one column each in the transition rows.
///
/// Bytes that the grammar never tells apart share a class, which keeps the
/// rows short.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
	/// Zero width start of line marker.
	Bol,
	/// End of input marker.
	Eof,
	Blank,
	Cr,
	Nl,
	/// Note letters except E, which starts "Eighth".
	Note,
	UpperE,
	UpperH,
	UpperI,
	UpperO,
	UpperP,
	UpperQ,
	UpperR,
	UpperS,
	UpperT,
	UpperV,
	UpperW,
	LowerA,
	LowerC,
	LowerD,
	LowerE,
	LowerF,
	LowerG,
	LowerH,
	LowerI,
	LowerL,
	LowerM,
	LowerN,
	LowerO,
	LowerP,
	LowerR,
	LowerS,
	LowerT,
	LowerU,
	LowerV,
	/// `#` and `b`.
	Acc,
	/// `+` and `-`.
	Shift,
	Paren,
	Quote,
	Backslash,
	Slash,
	Star,
	/// `0` and `2`.
	Dig02,
	Dig1,
	/// `3` to `5`.
	Dig35,
	/// `6` and `7`.
	Dig67,
	/// `8` and `9`.
	Dig89,
	Other,
}


/// A unit of lookahead fed to the transition rows.
#[derive(Debug, Clone, Copy)]
pub enum Lookahead {
	Byte(u8),
	Bol,
	Eof,
}


/// Scanner states, one row each in the transition table.
///
/// Trailing digits count the characters consumed so far, so `Song3` is the
/// state after reading `Son`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	Start,
	LineStart,
	Whitespace,
	Bad,
	NoteOne,
	AccOne,
	ShiftOne,
	ParenOne,
	StrOpen,
	SlashOne,
	LineComment,
	BlockOpen,
	OctOne,
	Oct1,
	Oct67,
	Bad89,
	TempoMid,
	TempoEnd,
	Song1,
	Song2,
	Song3,
	Song4,
	Phrase1,
	Phrase2,
	Phrase3,
	Phrase4,
	Phrase5,
	Phrase6,
	Octave1,
	Octave2,
	Octave3,
	Octave4,
	Octave5,
	Octave6,
	R1,
	R2,
	Repeat3,
	Repeat4,
	Repeat5,
	Repeat6,
	Rest3,
	Rest4,
	Tempo1,
	Tempo2,
	Tempo3,
	Tempo4,
	Tempo5,
	Instr1,
	Instr2,
	Instr3,
	Instr4,
	Instr5,
	Instr6,
	Instr7,
	Instr8,
	Instr9,
	Instr10,
	Volume1,
	Volume2,
	Volume3,
	Volume4,
	Volume5,
	Volume6,
	Whole1,
	Whole2,
	Whole3,
	Whole4,
	Whole5,
	Half1,
	Half2,
	Half3,
	Half4,
	Quarter1,
	Quarter2,
	Quarter3,
	Quarter4,
	Quarter5,
	Quarter6,
	Quarter7,
	Eighth1,
	Eighth2,
	Eighth3,
	Eighth4,
	Eighth5,
	Eighth6,
	Piano1,
	Piano2,
	Piano3,
	Piano4,
	Piano5,
	Meso1,
	Meso2,
	Meso3,
	Meso4,
	MesoP5,
	MesoP6,
	MesoP7,
	MesoP8,
	MesoP9,
	MesoF5,
	MesoF6,
	MesoF7,
	MesoF8,
	MesoF9,
	Forte1,
	Forte2,
	Forte3,
	Forte4,
	Forte5,
	Default1,
	Default2,
	Default3,
	Default4,
	Default5,
	Default6,
	Default7,
	StrBody,
	StrByte,
	StrQuote,
	StrEsc,
	StrNl,
	EscStart,
	EscGood,
	EscBad,
	BlockBody,
	BlockByte,
	BlockStar,
	BlockClose,
}


impl State {
	pub const COUNT: usize = State::BlockClose as usize + 1;
}


/// What the scanner should do with a finished match.
#[derive(Debug, Clone, Copy)]
pub enum Action {
	Skip,
	Note,
	Accidental,
	Shift,
	Punct,
	Octave,
	Tempo,
	Keyword(Keyword),
	Length(Length),
	Volume(Volume),
	Unrecognized,
	StringStart,
	StringByte,
	StringEnd,
	EscapeStart,
	EscapeGood,
	EscapeBad,
	StringTerminator,
	CommentStart,
	CommentEnd,
}


/// An accepting rule attached to a state.
#[derive(Debug, Clone, Copy)]
pub struct Accept {
	pub action: Action,
	/// Drop a trailing line terminator from the match before acting.
	pub trim_terminator: bool,
}


/// A transition table row: sparse edges over a default.
///
/// An edge to `None` blocks the default for that class.
#[derive(Debug, Clone, Copy)]
pub struct Row {
	pub accept: Option<Accept>,
	pub edges: &'static [(Class, Option<State>)],
	pub default: Option<State>,
}


/// The table set driving one scanner.
#[derive(Debug)]
pub struct Tables {
	pub chars: &'static [Class; 128],
	pub rows: &'static [Row],
	pub start_normal: State,
	pub start_string: State,
	pub start_escape: State,
	pub start_comment: State,
}


impl Tables {
	pub fn class_of(&self, lookahead: Lookahead) -> Class {
		match lookahead {
			Lookahead::Bol => Class::Bol,
			Lookahead::Eof => Class::Eof,
			Lookahead::Byte(value) if (value as usize) < self.chars.len() => {
				self.chars[value as usize]
			}
			Lookahead::Byte(_) => Class::Other,
		}
	}


	pub fn step(&self, state: State, class: Class) -> Option<State> {
		let row = &self.rows[state as usize];

		for &(edge, target) in row.edges {
			if edge == class {
				return target;
			}
		}

		row.default
	}


	pub fn accept(&self, state: State) -> Option<Accept> {
		self.rows[state as usize].accept
	}
}


const fn accept(action: Action) -> Option<Accept> {
	Some(Accept { action, trim_terminator: false })
}


const fn row(
	accept: Option<Accept>,
	edges: &'static [(Class, Option<State>)],
	default: Option<State>,
) -> Row {
	Row { accept, edges, default }
}


static CHARS: [Class; 128] = {
	use Class::*;

	const __: Class = Other;

	[
		__,        __,        __,        __,        __,        __,        __,        __,        // 0x00
		__,        Blank,     Nl,        __,        Blank,     Cr,        __,        __,        // 0x08
		__,        __,        __,        __,        __,        __,        __,        __,        // 0x10
		__,        __,        __,        __,        __,        __,        __,        __,        // 0x18
		Blank,     __,        Quote,     Acc,       __,        __,        __,        __,        // 0x20
		Paren,     Paren,     Star,      Shift,     __,        Shift,     __,        Slash,     // 0x28
		Dig02,     Dig1,      Dig02,     Dig35,     Dig35,     Dig35,     Dig67,     Dig67,     // 0x30
		Dig89,     Dig89,     __,        __,        __,        __,        __,        __,        // 0x38
		__,        Note,      Note,      Note,      Note,      UpperE,    Note,      Note,      // 0x40
		UpperH,    UpperI,    __,        __,        __,        __,        __,        UpperO,    // 0x48
		UpperP,    UpperQ,    UpperR,    UpperS,    UpperT,    __,        UpperV,    UpperW,    // 0x50
		__,        __,        __,        __,        Backslash, __,        __,        __,        // 0x58
		__,        LowerA,    Acc,       LowerC,    LowerD,    LowerE,    LowerF,    LowerG,    // 0x60
		LowerH,    LowerI,    __,        __,        LowerL,    LowerM,    LowerN,    LowerO,    // 0x68
		LowerP,    __,        LowerR,    LowerS,    LowerT,    LowerU,    LowerV,    __,        // 0x70
		__,        __,        __,        Paren,     __,        Paren,     __,        __,        // 0x78
	]
};


static ROWS: [Row; State::COUNT] = {
	use Class::*;
	use State::*;

	const EMPTY: Row = Row { accept: None, edges: &[], default: None };

	const ANY_DIGIT: &[(Class, Option<State>)] = &[
		(Dig02, Some(TempoEnd)),
		(Dig1, Some(TempoEnd)),
		(Dig35, Some(TempoEnd)),
		(Dig67, Some(TempoEnd)),
		(Dig89, Some(TempoEnd)),
	];

	let mut rows = [EMPTY; State::COUNT];

	rows[Start as usize] = row(
		None,
		&[
			(Bol, Some(LineStart)),
			(Blank, Some(Whitespace)),
			(Cr, Some(Whitespace)),
			(Nl, Some(Whitespace)),
			(Note, Some(NoteOne)),
			(UpperE, Some(Eighth1)),
			(UpperH, Some(Half1)),
			(UpperI, Some(Instr1)),
			(UpperO, Some(Octave1)),
			(UpperP, Some(Phrase1)),
			(UpperQ, Some(Quarter1)),
			(UpperR, Some(R1)),
			(UpperS, Some(Song1)),
			(UpperT, Some(Tempo1)),
			(UpperV, Some(Volume1)),
			(UpperW, Some(Whole1)),
			(LowerD, Some(Default1)),
			(LowerF, Some(Forte1)),
			(LowerM, Some(Meso1)),
			(LowerP, Some(Piano1)),
			(Acc, Some(AccOne)),
			(Shift, Some(ShiftOne)),
			(Paren, Some(ParenOne)),
			(Quote, Some(StrOpen)),
			(Slash, Some(SlashOne)),
			(Dig02, Some(OctOne)),
			(Dig1, Some(Oct1)),
			(Dig35, Some(OctOne)),
			(Dig67, Some(Oct67)),
			(Dig89, Some(Bad89)),
		],
		Some(Bad),
	);
	rows[LineStart as usize] = row(accept(Action::Skip), &[], None);
	rows[Whitespace as usize] = row(
		accept(Action::Skip),
		&[
			(Blank, Some(Whitespace)),
			(Cr, Some(Whitespace)),
			(Nl, Some(Whitespace)),
		],
		None,
	);
	rows[Bad as usize] = row(accept(Action::Unrecognized), &[], None);
	rows[NoteOne as usize] = row(accept(Action::Note), &[], None);
	rows[AccOne as usize] = row(accept(Action::Accidental), &[], None);
	rows[ShiftOne as usize] = row(accept(Action::Shift), &[], None);
	rows[ParenOne as usize] = row(accept(Action::Punct), &[], None);
	rows[StrOpen as usize] = row(accept(Action::StringStart), &[], None);
	rows[SlashOne as usize] = row(
		accept(Action::Unrecognized),
		&[(Slash, Some(LineComment)), (Star, Some(BlockOpen))],
		None,
	);
	rows[LineComment as usize] = row(
		accept(Action::Skip),
		&[(Cr, None), (Nl, None)],
		Some(LineComment),
	);
	rows[BlockOpen as usize] = row(accept(Action::CommentStart), &[], None);

	rows[OctOne as usize] = row(accept(Action::Octave), &[], None);
	rows[Oct1 as usize] = row(
		accept(Action::Octave),
		&[(Dig02, Some(TempoMid)), (Dig1, Some(TempoMid))],
		None,
	);
	rows[Oct67 as usize] = row(accept(Action::Octave), ANY_DIGIT, None);
	rows[Bad89 as usize] = row(accept(Action::Unrecognized), ANY_DIGIT, None);
	rows[TempoMid as usize] = row(None, ANY_DIGIT, None);
	rows[TempoEnd as usize] = row(accept(Action::Tempo), &[], None);

	rows[Song1 as usize] = row(accept(Action::Unrecognized), &[(LowerO, Some(Song2))], None);
	rows[Song2 as usize] = row(None, &[(LowerN, Some(Song3))], None);
	rows[Song3 as usize] = row(None, &[(LowerG, Some(Song4))], None);
	rows[Song4 as usize] = row(accept(Action::Keyword(Keyword::Song)), &[], None);

	rows[Phrase1 as usize] = row(accept(Action::Unrecognized), &[(LowerH, Some(Phrase2))], None);
	rows[Phrase2 as usize] = row(None, &[(LowerR, Some(Phrase3))], None);
	rows[Phrase3 as usize] = row(None, &[(LowerA, Some(Phrase4))], None);
	rows[Phrase4 as usize] = row(None, &[(LowerS, Some(Phrase5))], None);
	rows[Phrase5 as usize] = row(None, &[(LowerE, Some(Phrase6))], None);
	rows[Phrase6 as usize] = row(accept(Action::Keyword(Keyword::Phrase)), &[], None);

	rows[Octave1 as usize] = row(accept(Action::Unrecognized), &[(LowerC, Some(Octave2))], None);
	rows[Octave2 as usize] = row(None, &[(LowerT, Some(Octave3))], None);
	rows[Octave3 as usize] = row(None, &[(LowerA, Some(Octave4))], None);
	rows[Octave4 as usize] = row(None, &[(LowerV, Some(Octave5))], None);
	rows[Octave5 as usize] = row(None, &[(LowerE, Some(Octave6))], None);
	rows[Octave6 as usize] = row(accept(Action::Keyword(Keyword::Octave)), &[], None);

	rows[R1 as usize] = row(accept(Action::Unrecognized), &[(LowerE, Some(R2))], None);
	rows[R2 as usize] = row(None, &[(LowerP, Some(Repeat3)), (LowerS, Some(Rest3))], None);
	rows[Repeat3 as usize] = row(None, &[(LowerE, Some(Repeat4))], None);
	rows[Repeat4 as usize] = row(None, &[(LowerA, Some(Repeat5))], None);
	rows[Repeat5 as usize] = row(None, &[(LowerT, Some(Repeat6))], None);
	rows[Repeat6 as usize] = row(accept(Action::Keyword(Keyword::Repeat)), &[], None);
	rows[Rest3 as usize] = row(None, &[(LowerT, Some(Rest4))], None);
	rows[Rest4 as usize] = row(accept(Action::Keyword(Keyword::Rest)), &[], None);

	rows[Tempo1 as usize] = row(accept(Action::Unrecognized), &[(LowerE, Some(Tempo2))], None);
	rows[Tempo2 as usize] = row(None, &[(LowerM, Some(Tempo3))], None);
	rows[Tempo3 as usize] = row(None, &[(LowerP, Some(Tempo4))], None);
	rows[Tempo4 as usize] = row(None, &[(LowerO, Some(Tempo5))], None);
	rows[Tempo5 as usize] = row(accept(Action::Keyword(Keyword::Tempo)), &[], None);

	rows[Instr1 as usize] = row(accept(Action::Unrecognized), &[(LowerN, Some(Instr2))], None);
	rows[Instr2 as usize] = row(None, &[(LowerS, Some(Instr3))], None);
	rows[Instr3 as usize] = row(None, &[(LowerT, Some(Instr4))], None);
	rows[Instr4 as usize] = row(None, &[(LowerR, Some(Instr5))], None);
	rows[Instr5 as usize] = row(None, &[(LowerU, Some(Instr6))], None);
	rows[Instr6 as usize] = row(None, &[(LowerM, Some(Instr7))], None);
	rows[Instr7 as usize] = row(None, &[(LowerE, Some(Instr8))], None);
	rows[Instr8 as usize] = row(None, &[(LowerN, Some(Instr9))], None);
	rows[Instr9 as usize] = row(None, &[(LowerT, Some(Instr10))], None);
	rows[Instr10 as usize] = row(accept(Action::Keyword(Keyword::Instrument)), &[], None);

	rows[Volume1 as usize] = row(accept(Action::Unrecognized), &[(LowerO, Some(Volume2))], None);
	rows[Volume2 as usize] = row(None, &[(LowerL, Some(Volume3))], None);
	rows[Volume3 as usize] = row(None, &[(LowerU, Some(Volume4))], None);
	rows[Volume4 as usize] = row(None, &[(LowerM, Some(Volume5))], None);
	rows[Volume5 as usize] = row(None, &[(LowerE, Some(Volume6))], None);
	rows[Volume6 as usize] = row(accept(Action::Keyword(Keyword::Volume)), &[], None);

	rows[Whole1 as usize] = row(accept(Action::Unrecognized), &[(LowerH, Some(Whole2))], None);
	rows[Whole2 as usize] = row(None, &[(LowerO, Some(Whole3))], None);
	rows[Whole3 as usize] = row(None, &[(LowerL, Some(Whole4))], None);
	rows[Whole4 as usize] = row(None, &[(LowerE, Some(Whole5))], None);
	rows[Whole5 as usize] = row(accept(Action::Length(Length::Whole)), &[], None);

	rows[Half1 as usize] = row(accept(Action::Unrecognized), &[(LowerA, Some(Half2))], None);
	rows[Half2 as usize] = row(None, &[(LowerL, Some(Half3))], None);
	rows[Half3 as usize] = row(None, &[(LowerF, Some(Half4))], None);
	rows[Half4 as usize] = row(accept(Action::Length(Length::Half)), &[], None);

	rows[Quarter1 as usize] = row(accept(Action::Unrecognized), &[(LowerU, Some(Quarter2))], None);
	rows[Quarter2 as usize] = row(None, &[(LowerA, Some(Quarter3))], None);
	rows[Quarter3 as usize] = row(None, &[(LowerR, Some(Quarter4))], None);
	rows[Quarter4 as usize] = row(None, &[(LowerT, Some(Quarter5))], None);
	rows[Quarter5 as usize] = row(None, &[(LowerE, Some(Quarter6))], None);
	rows[Quarter6 as usize] = row(None, &[(LowerR, Some(Quarter7))], None);
	rows[Quarter7 as usize] = row(accept(Action::Length(Length::Quarter)), &[], None);

	// E alone is a note, so the "Eighth" spine starts on an accepting state.
	rows[Eighth1 as usize] = row(accept(Action::Note), &[(LowerI, Some(Eighth2))], None);
	rows[Eighth2 as usize] = row(None, &[(LowerG, Some(Eighth3))], None);
	rows[Eighth3 as usize] = row(None, &[(LowerH, Some(Eighth4))], None);
	rows[Eighth4 as usize] = row(None, &[(LowerT, Some(Eighth5))], None);
	rows[Eighth5 as usize] = row(None, &[(LowerH, Some(Eighth6))], None);
	rows[Eighth6 as usize] = row(accept(Action::Length(Length::Eighth)), &[], None);

	rows[Piano1 as usize] = row(accept(Action::Unrecognized), &[(LowerI, Some(Piano2))], None);
	rows[Piano2 as usize] = row(None, &[(LowerA, Some(Piano3))], None);
	rows[Piano3 as usize] = row(None, &[(LowerN, Some(Piano4))], None);
	rows[Piano4 as usize] = row(None, &[(LowerO, Some(Piano5))], None);
	rows[Piano5 as usize] = row(accept(Action::Volume(Volume::Piano)), &[], None);

	rows[Meso1 as usize] = row(accept(Action::Unrecognized), &[(LowerE, Some(Meso2))], None);
	rows[Meso2 as usize] = row(None, &[(LowerS, Some(Meso3))], None);
	rows[Meso3 as usize] = row(None, &[(LowerO, Some(Meso4))], None);
	rows[Meso4 as usize] = row(None, &[(LowerP, Some(MesoP5)), (LowerF, Some(MesoF5))], None);
	rows[MesoP5 as usize] = row(None, &[(LowerI, Some(MesoP6))], None);
	rows[MesoP6 as usize] = row(None, &[(LowerA, Some(MesoP7))], None);
	rows[MesoP7 as usize] = row(None, &[(LowerN, Some(MesoP8))], None);
	rows[MesoP8 as usize] = row(None, &[(LowerO, Some(MesoP9))], None);
	rows[MesoP9 as usize] = row(accept(Action::Volume(Volume::MesoPiano)), &[], None);
	rows[MesoF5 as usize] = row(None, &[(LowerO, Some(MesoF6))], None);
	rows[MesoF6 as usize] = row(None, &[(LowerR, Some(MesoF7))], None);
	rows[MesoF7 as usize] = row(None, &[(LowerT, Some(MesoF8))], None);
	rows[MesoF8 as usize] = row(None, &[(LowerE, Some(MesoF9))], None);
	rows[MesoF9 as usize] = row(accept(Action::Volume(Volume::MesoForte)), &[], None);

	rows[Forte1 as usize] = row(accept(Action::Unrecognized), &[(LowerO, Some(Forte2))], None);
	rows[Forte2 as usize] = row(None, &[(LowerR, Some(Forte3))], None);
	rows[Forte3 as usize] = row(None, &[(LowerT, Some(Forte4))], None);
	rows[Forte4 as usize] = row(None, &[(LowerE, Some(Forte5))], None);
	rows[Forte5 as usize] = row(accept(Action::Volume(Volume::Forte)), &[], None);

	rows[Default1 as usize] = row(accept(Action::Unrecognized), &[(LowerE, Some(Default2))], None);
	rows[Default2 as usize] = row(None, &[(LowerF, Some(Default3))], None);
	rows[Default3 as usize] = row(None, &[(LowerA, Some(Default4))], None);
	rows[Default4 as usize] = row(None, &[(LowerU, Some(Default5))], None);
	rows[Default5 as usize] = row(None, &[(LowerL, Some(Default6))], None);
	rows[Default6 as usize] = row(None, &[(LowerT, Some(Default7))], None);
	rows[Default7 as usize] = row(accept(Action::Volume(Volume::Default)), &[], None);

	rows[StrBody as usize] = row(
		None,
		&[
			(Bol, Some(LineStart)),
			(Quote, Some(StrQuote)),
			(Backslash, Some(StrEsc)),
			(Cr, Some(StrNl)),
			(Nl, Some(StrNl)),
		],
		Some(StrByte),
	);
	rows[StrByte as usize] = row(accept(Action::StringByte), &[], None);
	rows[StrQuote as usize] = row(accept(Action::StringEnd), &[], None);
	rows[StrEsc as usize] = row(accept(Action::EscapeStart), &[], None);
	rows[StrNl as usize] = row(accept(Action::StringTerminator), &[], None);

	rows[EscStart as usize] = row(
		None,
		&[
			(Bol, Some(LineStart)),
			(LowerN, Some(EscGood)),
			(LowerT, Some(EscGood)),
			(LowerF, Some(EscGood)),
			(Quote, Some(EscGood)),
			(Backslash, Some(EscGood)),
		],
		Some(EscBad),
	);
	rows[EscGood as usize] = row(accept(Action::EscapeGood), &[], None);
	rows[EscBad as usize] = row(accept(Action::EscapeBad), &[], None);

	rows[BlockBody as usize] = row(
		None,
		&[(Bol, Some(LineStart)), (Star, Some(BlockStar))],
		Some(BlockByte),
	);
	rows[BlockByte as usize] = row(accept(Action::Skip), &[], None);
	rows[BlockStar as usize] = row(accept(Action::Skip), &[(Slash, Some(BlockClose))], None);
	rows[BlockClose as usize] = row(accept(Action::CommentEnd), &[], None);

	rows
};


/// Tables for the music notation scanner.
pub static TABLES: Tables = Tables {
	chars: &CHARS,
	rows: &ROWS,
	start_normal: State::Start,
	start_string: State::StrBody,
	start_escape: State::EscStart,
	start_comment: State::BlockBody,
};
