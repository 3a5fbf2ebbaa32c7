use std::fmt::{self, Display};

use super::ErrorKind;


impl Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Unrecognized(value) => {
				write!(f, "unrecognized character '{}'", *value as char)?
			}

			Self::InvalidEscape(value) => {
				write!(f, "unrecognized escape sequence '\\{}'", *value as char)?
			}

			Self::UnterminatedString => "unterminated string literal".fmt(f)?,

			Self::StringTooLong => "string literal exceeds the maximum length".fmt(f)?,

			Self::UnterminatedComment => "unterminated block comment".fmt(f)?,

			Self::Io(error) => write!(f, "io error: {}", error)?,
		};

		Ok(())
	}
}
