mod automata;
mod buffer;
mod error;
#[cfg(test)]
mod tests;
mod token;

use std::io::{self, Write};

use crate::fmt::Show;
use crate::symbol::{Interner, Symbol};
use automata::{Automata, Scan};
use super::{Source, SourcePos};
pub use automata::MAX_STRING_LEN;
pub use buffer::BUFFER_CAPACITY;
pub use error::ErrorKind;
pub use token::{
	Accidental,
	Keyword,
	Length,
	Note,
	OctaveShift,
	Token,
	TokenKind,
	Volume,
};


/// The lexer for Melos source code.
///
/// Sources are tokenized in order, as a single stream. Lexical errors don't
/// stop the scan, they are yielded in stream as [`TokenKind::Error`] tokens.
#[derive(Debug)]
pub struct Lexer {
	automata: Automata,
	sources: std::vec::IntoIter<Source>,
	source: Symbol,
	finished: bool,
	drained: bool,
}


impl Lexer {
	/// Create a lexer over the given sources.
	///
	/// # Panics
	/// Panics if no source is given.
	pub fn new(sources: Vec<Source>) -> Self {
		let mut sources = sources.into_iter();

		let source = sources
			.next()
			.expect("lexer requires at least one source");

		Self {
			automata: Automata::new(source.reader),
			sources,
			source: source.name,
			finished: false,
			drained: false,
		}
	}


	/// Produce the next token, crossing into the next source when the
	/// current one runs out. Once all sources are done, produces an endless
	/// [`TokenKind::Eof`] tail.
	pub fn next_token(&mut self) -> Token {
		if self.finished {
			return self.eof_token();
		}

		loop {
			match self.automata.scan() {
				Ok(Scan::Token(token, line)) => {
					return Token {
						token,
						pos: SourcePos { line, source: self.source },
					}
				}

				Ok(Scan::EndOfSource) => match self.sources.next() {
					Some(source) => {
						self.source = source.name;
						self.automata.reset(source.reader);
					}

					None => {
						self.finished = true;
						return self.eof_token();
					}
				}

				Err(error) => {
					self.automata.fail_source();

					return Token {
						token: TokenKind::Error(ErrorKind::Io(error)),
						pos: self.pos(),
					};
				}
			}
		}
	}


	/// Tokenize everything to the given writer, one line per token, with a
	/// header naming each source as it is entered.
	pub fn dump<W: Write>(mut self, interner: &Interner, writer: &mut W) -> io::Result<()> {
		let mut current = None;

		loop {
			let token = self.next_token();

			if current != Some(token.pos.source) {
				current = Some(token.pos.source);
				writeln!(writer, "# {}", Show(token.pos.source, interner))?;
			}

			writeln!(writer, "line {}: {}", token.pos.line, token.token)?;

			if let TokenKind::Eof = token.token {
				return Ok(());
			}
		}
	}


	fn eof_token(&self) -> Token {
		Token { token: TokenKind::Eof, pos: self.pos() }
	}


	fn pos(&self) -> SourcePos {
		SourcePos {
			line: self.automata.line(),
			source: self.source,
		}
	}
}


impl From<Source> for Lexer {
	fn from(source: Source) -> Self {
		Self::new(vec![source])
	}
}


impl Iterator for Lexer {
	type Item = Token;

	/// Yields every token up to and including the first [`TokenKind::Eof`].
	fn next(&mut self) -> Option<Token> {
		if self.drained {
			return None;
		}

		let token = self.next_token();

		if let TokenKind::Eof = token.token {
			self.drained = true;
		}

		Some(token)
	}
}
