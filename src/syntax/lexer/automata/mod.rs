pub(super) mod tables;

use std::io::{self, Read};

use self::tables::{Action, Lookahead, State, Tables, TABLES};
use super::{
	buffer::Buffer,
	token::{Accidental, Note, OctaveShift, TokenKind},
	ErrorKind,
};


/// Longest allowed string literal payload, in bytes after escape decoding.
pub const MAX_STRING_LEN: usize = 5000;


/// Which of the scanners should run next.
///
/// String literals and block comments are scanned piecewise, one match per
/// byte, so the mode has to survive across matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	Normal,
	InString,
	StringEscape,
	InBlockComment,
}


/// The outcome of running the scanner once.
#[derive(Debug)]
pub(super) enum Scan {
	/// A token and the line where it starts.
	Token(TokenKind, u32),
	/// The current source is exhausted.
	EndOfSource,
}


/// The automata instance.
#[derive(Debug)]
pub(super) struct Automata {
	buffer: Buffer,
	tables: &'static Tables,
	mode: Mode,
	/// Decoded payload of the string literal in progress.
	string: Vec<u8>,
}


impl Automata {
	pub fn new(reader: Box<dyn Read>) -> Self {
		Self {
			buffer: Buffer::new(reader),
			tables: &TABLES,
			mode: Mode::Normal,
			string: Vec::new(),
		}
	}


	#[cfg(test)]
	pub fn with_tables(reader: Box<dyn Read>, tables: &'static Tables) -> Self {
		Self {
			buffer: Buffer::new(reader),
			tables,
			mode: Mode::Normal,
			string: Vec::new(),
		}
	}


	/// Start over on a new reader, keeping the buffer allocation.
	pub fn reset(&mut self, reader: Box<dyn Read>) {
		self.buffer.reset(reader);
		self.mode = Mode::Normal;
		self.string.clear();
	}


	/// Abandon the current match and silence the reader after an io failure,
	/// so that the next scan reports end of input instead of failing again.
	pub fn fail_source(&mut self) {
		self.buffer.rewind();
		self.buffer.retire();
	}


	/// The line number of the next match, starting at 1.
	pub fn line(&self) -> u32 {
		self.buffer.line()
	}


	/// Run the scanner until it produces a token or exhausts the source.
	pub fn scan(&mut self) -> io::Result<Scan> {
		loop {
			self.buffer.mark_start();

			let mut state = self.start_state();
			let mut matched = None;
			let mut first = true;

			loop {
				let lookahead =
					if first && self.buffer.at_line_start() {
						Lookahead::Bol
					} else {
						match self.buffer.pull()? {
							Some(byte) => Lookahead::Byte(byte),
							None => Lookahead::Eof,
						}
					};

				if let Lookahead::Eof = lookahead {
					if first {
						return Ok(self.end_of_input());
					}

					// End of input forces a fallback to the longest match.
					break;
				}

				let class = self.tables.class_of(lookahead);

				match self.tables.step(state, class) {
					Some(next) => {
						state = next;

						if let Some(accept) = self.tables.accept(state) {
							matched = Some(accept);
							self.buffer.mark_end();
						}
					}

					None => break,
				}

				first = false;
			}

			let accept = match matched {
				Some(accept) => accept,
				None => panic!("scanner reached a dead state with no match"),
			};

			if accept.trim_terminator {
				self.buffer.trim_terminator();
			}

			self.buffer.back_to_mark();

			if let Some(scan) = self.act(accept.action) {
				return Ok(scan);
			}
		}
	}


	fn start_state(&self) -> State {
		match self.mode {
			Mode::Normal => self.tables.start_normal,
			Mode::InString => self.tables.start_string,
			Mode::StringEscape => self.tables.start_escape,
			Mode::InBlockComment => self.tables.start_comment,
		}
	}


	/// Handle end of input showing up as the first lookahead of a match.
	fn end_of_input(&mut self) -> Scan {
		let line = self.buffer.line();

		match self.mode {
			Mode::Normal => Scan::EndOfSource,

			Mode::InString | Mode::StringEscape => {
				self.mode = Mode::Normal;
				self.string.clear();
				Scan::Token(TokenKind::Error(ErrorKind::UnterminatedString), line)
			}

			Mode::InBlockComment => {
				self.mode = Mode::Normal;
				Scan::Token(TokenKind::Error(ErrorKind::UnterminatedComment), line)
			}
		}
	}


	/// Apply the action of a finished match, producing a token or updating
	/// the scanner mode.
	fn act(&mut self, action: Action) -> Option<Scan> {
		let line = self.buffer.line();

		let token = match action {
			Action::Skip => return None,

			Action::Note => {
				let note = Note::from_byte(self.matched_byte())
					.expect("note rule matched a foreign byte");

				TokenKind::Note(note)
			}

			Action::Accidental => {
				let accidental = Accidental::from_byte(self.matched_byte())
					.expect("accidental rule matched a foreign byte");

				TokenKind::Accidental(accidental)
			}

			Action::Shift => {
				let shift = OctaveShift::from_byte(self.matched_byte())
					.expect("shift rule matched a foreign byte");

				TokenKind::Shift(shift)
			}

			Action::Punct => TokenKind::punct(self.matched_byte())
				.expect("delimiter rule matched a foreign byte"),

			Action::Octave => TokenKind::Octave(self.matched_byte() - b'0'),

			Action::Tempo => {
				let mut tempo: u16 = 0;

				for &byte in self.buffer.text() {
					tempo = tempo * 10 + u16::from(byte - b'0');
				}

				TokenKind::Tempo(tempo)
			}

			Action::Keyword(keyword) => TokenKind::Keyword(keyword),

			Action::Length(length) => TokenKind::Length(length),

			Action::Volume(volume) => TokenKind::Volume(volume),

			Action::Unrecognized => TokenKind::Error(
				ErrorKind::Unrecognized(self.matched_byte())
			),

			Action::StringStart => {
				self.mode = Mode::InString;
				self.string.clear();
				return None;
			}

			Action::StringByte => {
				self.string.push(self.matched_byte());
				return None;
			}

			Action::StringEnd => {
				self.mode = Mode::Normal;

				if self.string.len() > MAX_STRING_LEN {
					self.string.clear();
					TokenKind::Error(ErrorKind::StringTooLong)
				} else {
					let string = std::mem::take(&mut self.string);
					TokenKind::String(string.into_boxed_slice())
				}
			}

			Action::EscapeStart => {
				self.mode = Mode::StringEscape;
				return None;
			}

			Action::EscapeGood => {
				let byte = self.matched_byte();

				let decoded = match byte {
					b'n' => b'\n',
					b't' => b'\t',
					b'f' => 0x0C,
					_ => byte,
				};

				self.string.push(decoded);
				self.mode = Mode::InString;
				return None;
			}

			Action::EscapeBad => {
				let byte = self.matched_byte();

				// The bad escape stays in the payload verbatim.
				self.string.push(b'\\');
				self.string.push(byte);
				self.mode = Mode::InString;

				TokenKind::Error(ErrorKind::InvalidEscape(byte))
			}

			Action::StringTerminator => {
				self.mode = Mode::Normal;
				self.string.clear();
				TokenKind::Error(ErrorKind::UnterminatedString)
			}

			Action::CommentStart => {
				self.mode = Mode::InBlockComment;
				return None;
			}

			Action::CommentEnd => {
				self.mode = Mode::Normal;
				return None;
			}
		};

		Some(Scan::Token(token, line))
	}


	/// The first byte of the accepted match.
	fn matched_byte(&self) -> u8 {
		self.buffer
			.text()
			.first()
			.copied()
			.expect("byte rule committed an empty match")
	}
}
