mod fmt;


/// The kind of lexical error.
/// Every kind is recoverable: the scanner emits the error in the token stream and
/// resynchronizes at the next lexeme boundary.
#[derive(Debug)]
pub enum ErrorKind {
	/// Unrecognized character.
	Unrecognized(u8),
	/// Unrecognized escape sequence in a string literal.
	InvalidEscape(u8),
	/// A bare line terminator or end of input inside a string literal.
	UnterminatedString,
	/// A string literal payload above the size limit.
	StringTooLong,
	/// End of input inside a block comment.
	UnterminatedComment,
	/// The underlying stream failed. The offending source is dropped after this is
	/// emitted.
	Io(std::io::Error),
}


impl std::error::Error for ErrorKind {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			_ => None,
		}
	}
}
