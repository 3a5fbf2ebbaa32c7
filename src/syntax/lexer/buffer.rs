use std::{
	fmt,
	io::{self, Read},
};


/// Initial capacity of the scan buffer, in bytes.
pub const BUFFER_CAPACITY: usize = 512;


/// A growable scan buffer over a byte reader.
///
/// The buffer keeps three cursors: the start of the current match, the read
/// position, and the end of the longest accepted match so far. Bytes before
/// the match start are dead and get reclaimed on refill.
pub(super) struct Buffer {
	reader: Box<dyn Read>,
	bytes: Box<[u8]>,
	/// Start of the current match.
	start: usize,
	/// Read position, always within the filled region.
	index: usize,
	/// End of the longest accepted match.
	end: usize,
	/// Length of the filled region.
	filled: usize,
	line: u32,
	at_line_start: bool,
	/// Whether the last line terminator scanned was a carriage return, so
	/// that the line feed of a CRLF pair is not counted twice.
	last_was_cr: bool,
}


impl Buffer {
	pub fn new(reader: Box<dyn Read>) -> Self {
		Self {
			reader,
			bytes: vec![0; BUFFER_CAPACITY].into_boxed_slice(),
			start: 0,
			index: 0,
			end: 0,
			filled: 0,
			line: 1,
			at_line_start: true,
			last_was_cr: false,
		}
	}


	/// The line number of the current match start, starting at 1.
	pub fn line(&self) -> u32 {
		self.line
	}


	/// Whether the read position sits right after a line terminator or at
	/// the very start of the source.
	pub fn at_line_start(&self) -> bool {
		self.at_line_start
	}


	/// Read the next byte, refilling from the reader when the lookahead runs
	/// past the filled region. Returns `None` at end of input.
	pub fn pull(&mut self) -> io::Result<Option<u8>> {
		if self.index == self.filled {
			// Reclaim the dead region before growing.
			if self.start > 0 {
				self.bytes.copy_within(self.start .. self.filled, 0);
				self.index -= self.start;
				self.end -= self.start;
				self.filled -= self.start;
				self.start = 0;
			}

			if self.filled == self.bytes.len() {
				let mut grown = vec![0; 2 * self.bytes.len()].into_boxed_slice();
				grown[.. self.filled].copy_from_slice(&self.bytes);
				self.bytes = grown;
			}

			let read = self.reader.read(&mut self.bytes[self.filled ..])?;

			if read == 0 {
				return Ok(None);
			}

			self.filled += read;
		}

		let byte = self.bytes[self.index];
		self.index += 1;

		Ok(Some(byte))
	}


	/// Begin a new match at the read position, counting the line terminators
	/// of the bytes consumed since the previous match start.
	pub fn mark_start(&mut self) {
		for i in self.start .. self.index {
			match self.bytes[i] {
				b'\n' => {
					if !self.last_was_cr {
						self.line += 1;
					}

					self.last_was_cr = false;
				}

				b'\r' => {
					self.line += 1;
					self.last_was_cr = true;
				}

				_ => self.last_was_cr = false,
			}
		}

		self.start = self.index;
		self.end = self.index;
	}


	/// Record the read position as the end of the longest accepted match.
	pub fn mark_end(&mut self) {
		self.end = self.index;
	}


	/// Rewind the read position to the end of the accepted match.
	pub fn back_to_mark(&mut self) {
		self.index = self.end;
		self.at_line_start = self.end > self.start
			&& matches!(self.bytes[self.end - 1], b'\n' | b'\r');
	}


	/// Shrink the accepted match by one trailing line terminator, treating
	/// CRLF as a single terminator.
	pub fn trim_terminator(&mut self) {
		if self.end > self.start && self.bytes[self.end - 1] == b'\n' {
			self.end -= 1;
		}

		if self.end > self.start && self.bytes[self.end - 1] == b'\r' {
			self.end -= 1;
		}
	}


	/// The text of the accepted match.
	pub fn text(&self) -> &[u8] {
		&self.bytes[self.start .. self.end]
	}


	/// Drop the remains of the previous source and start over on a new
	/// reader, keeping the allocated capacity.
	pub fn reset(&mut self, reader: Box<dyn Read>) {
		self.reader = reader;
		self.start = 0;
		self.index = 0;
		self.end = 0;
		self.filled = 0;
		self.line = 1;
		self.at_line_start = true;
		self.last_was_cr = false;
	}


	/// Abandon the current match attempt.
	pub fn rewind(&mut self) {
		self.index = self.start;
		self.end = self.start;
	}


	/// Replace the reader with an empty one, so that the next pull reports
	/// end of input instead of failing again.
	pub fn retire(&mut self) {
		self.reader = Box::new(io::empty());
	}
}


impl fmt::Debug for Buffer {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Buffer")
			.field("start", &self.start)
			.field("index", &self.index)
			.field("end", &self.end)
			.field("filled", &self.filled)
			.field("line", &self.line)
			.field("at_line_start", &self.at_line_start)
			.finish()
	}
}
