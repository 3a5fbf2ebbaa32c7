use std::{
	fmt::{self, Display},
	fs::File,
	io::Read,
	path::Path,
};

use crate::{
	fmt as context_fmt,
	symbol::{Interner, Symbol},
};


/// A named stream of source code.
/// Sources are lexed back to back, so the reader is pulled incrementally instead of
/// being loaded into memory upfront.
pub struct Source {
	/// The source name, usually an origin path, interned as a symbol.
	pub name: Symbol,
	/// The stream of source code. Reads are blocking, and a zero-sized read means end of
	/// input.
	pub reader: Box<dyn Read>,
}


impl Source {
	/// Open the source code from a file path, interning the path as the source name.
	pub fn from_path<P>(path: P, interner: &mut Interner) -> std::io::Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let file = File::open(path)?;
		let name = interner.get_or_intern(path.to_string_lossy().as_bytes());

		Ok(Self::from_reader(name, file))
	}


	/// Wrap a std::io::Read as a source.
	/// The name may be anything, including fictional names like `<stdin>`.
	pub fn from_reader<R>(name: Symbol, reader: R) -> Self
	where
		R: Read + 'static,
	{
		Self { name, reader: Box::new(reader) }
	}
}


impl fmt::Debug for Source {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Source")
			.field("name", &self.name)
			.finish()
	}
}


/// A human readable position in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
	pub line: u32,
	/// The name of the owning source.
	pub source: Symbol,
}


impl Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "line {}", self.line)
	}
}


impl<'a> context_fmt::Display<'a> for SourcePos {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut fmt::Formatter<'_>, context: Self::Context) -> fmt::Result {
		context_fmt::Display::fmt(&self.source, f, context)?;
		write!(f, ": line {}", self.line)
	}
}
