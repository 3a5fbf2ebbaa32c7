use super::{Interner, Symbol};
use crate::fmt::Display;


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		match context.resolve(*self) {
			Some(name) => write!(f, "{}", String::from_utf8_lossy(name)),
			None => write!(f, "<invalid symbol>"),
		}
	}
}
