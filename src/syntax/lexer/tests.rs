use std::io;

use super::*;
use super::automata::tables::{Accept, Action, Class, Row, State, Tables};

use assert_matches::assert_matches;


macro_rules! token {
	($kind:pat) => {
		Token { token: $kind, .. }
	};
}

macro_rules! error {
	($error:pat) => {
		Token { token: TokenKind::Error($error), .. }
	};
}


fn lex<R>(reader: R) -> Vec<Token>
where
	R: io::Read + 'static,
{
	let mut interner = Interner::new();
	let name = interner.get_or_intern("test.melos");

	Lexer::from(Source::from_reader(name, reader)).collect()
}


/// Check that TokenKind is not too big, because it gets moved around a lot.
#[test]
fn test_token_kind_size() {
	assert!(std::mem::size_of::<TokenKind>() <= 32);
}


#[test]
fn test_simple_song() {
	let input = r#"
		Song "demo" { // a tiny tune
			Tempo 120 Octave 4 Volume forte
			Instrument (1)
			Phrase "intro" {
				C# Quarter D b E+ A- Rest Half
			}
			Repeat (2) {}
		}
	"#;

	let tokens = lex(input.as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Keyword(Keyword::Song)),
			token!(TokenKind::String(song)),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::Keyword(Keyword::Tempo)),
			token!(TokenKind::Tempo(120)),
			token!(TokenKind::Keyword(Keyword::Octave)),
			token!(TokenKind::Octave(4)),
			token!(TokenKind::Keyword(Keyword::Volume)),
			token!(TokenKind::Volume(Volume::Forte)),
			token!(TokenKind::Keyword(Keyword::Instrument)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::Octave(1)),
			token!(TokenKind::CloseParens),
			token!(TokenKind::Keyword(Keyword::Phrase)),
			token!(TokenKind::String(phrase)),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::Note(Note::C)),
			token!(TokenKind::Accidental(Accidental::Sharp)),
			token!(TokenKind::Length(Length::Quarter)),
			token!(TokenKind::Note(Note::D)),
			token!(TokenKind::Accidental(Accidental::Flat)),
			token!(TokenKind::Note(Note::E)),
			token!(TokenKind::Shift(OctaveShift::Up)),
			token!(TokenKind::Note(Note::A)),
			token!(TokenKind::Shift(OctaveShift::Down)),
			token!(TokenKind::Keyword(Keyword::Rest)),
			token!(TokenKind::Length(Length::Half)),
			token!(TokenKind::CloseBrace),
			token!(TokenKind::Keyword(Keyword::Repeat)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::Octave(2)),
			token!(TokenKind::CloseParens),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::CloseBrace),
			token!(TokenKind::CloseBrace),
			token!(TokenKind::Eof),
		]
			=> {
				assert_eq!(song.as_ref(), b"demo");
				assert_eq!(phrase.as_ref(), b"intro");
			}
	);
}


#[test]
fn test_single_characters() {
	let tokens = lex("b # + - ( ) { } /".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Accidental(Accidental::Flat)),
			token!(TokenKind::Accidental(Accidental::Sharp)),
			token!(TokenKind::Shift(OctaveShift::Up)),
			token!(TokenKind::Shift(OctaveShift::Down)),
			token!(TokenKind::OpenParens),
			token!(TokenKind::CloseParens),
			token!(TokenKind::OpenBrace),
			token!(TokenKind::CloseBrace),
			error!(ErrorKind::Unrecognized(b'/')),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_maximal_munch() {
	let tokens = lex("Eighth".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Length(Length::Eighth)),
			token!(TokenKind::Eof),
		]
	);

	// A dead end falls back to the longest match, and rescans the rest.
	let tokens = lex("Eig".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::E)),
			error!(ErrorKind::Unrecognized(b'i')),
			error!(ErrorKind::Unrecognized(b'g')),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("Resta".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Keyword(Keyword::Rest)),
			error!(ErrorKind::Unrecognized(b'a')),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_octaves_and_tempos() {
	let tokens = lex("0 7 60 129".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Octave(0)),
			token!(TokenKind::Octave(7)),
			token!(TokenKind::Tempo(60)),
			token!(TokenKind::Tempo(129)),
			token!(TokenKind::Eof),
		]
	);

	// Unspaced digit runs partition greedily from the left.
	let tokens = lex("697".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Tempo(69)),
			token!(TokenKind::Octave(7)),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("1234".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Tempo(123)),
			token!(TokenKind::Octave(4)),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("12".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Octave(1)),
			token!(TokenKind::Octave(2)),
			token!(TokenKind::Eof),
		]
	);

	// 59 and 130 are out of the tempo range, and 8 and 9 are not octaves.
	let tokens = lex("59 130 8 9".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Octave(5)),
			error!(ErrorKind::Unrecognized(b'9')),
			token!(TokenKind::Octave(1)),
			token!(TokenKind::Octave(3)),
			token!(TokenKind::Octave(0)),
			error!(ErrorKind::Unrecognized(b'8')),
			error!(ErrorKind::Unrecognized(b'9')),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_keyword_prefixes() {
	let tokens = lex("Son".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::Unrecognized(b'S')),
			error!(ErrorKind::Unrecognized(b'o')),
			error!(ErrorKind::Unrecognized(b'n')),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("mesof".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::Unrecognized(b'm')),
			error!(ErrorKind::Unrecognized(b'e')),
			error!(ErrorKind::Unrecognized(b's')),
			error!(ErrorKind::Unrecognized(b'o')),
			error!(ErrorKind::Unrecognized(b'f')),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_line_counting() {
	let tokens = lex("C\nD\rE\r\nF\n\nG".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 1, .. } },
			Token { token: TokenKind::Note(Note::D), pos: SourcePos { line: 2, .. } },
			Token { token: TokenKind::Note(Note::E), pos: SourcePos { line: 3, .. } },
			Token { token: TokenKind::Note(Note::F), pos: SourcePos { line: 4, .. } },
			Token { token: TokenKind::Note(Note::G), pos: SourcePos { line: 6, .. } },
			Token { token: TokenKind::Eof, .. },
		]
	);
}


#[test]
fn test_multiple_sources() {
	let mut interner = Interner::new();
	let first = interner.get_or_intern("a.melos");
	let second = interner.get_or_intern("b.melos");

	let lexer = Lexer::new(vec![
		Source::from_reader(first, "C\nD".as_bytes()),
		Source::from_reader(second, "E".as_bytes()),
	]);

	let tokens: Vec<Token> = lexer.collect();

	assert_matches!(
		&tokens[..],
		[
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 1, source: s1 } },
			Token { token: TokenKind::Note(Note::D), pos: SourcePos { line: 2, source: s2 } },
			Token { token: TokenKind::Note(Note::E), pos: SourcePos { line: 1, source: s3 } },
			Token { token: TokenKind::Eof, .. },
		]
			=> {
				assert_eq!(*s1, first);
				assert_eq!(*s2, first);
				assert_eq!(*s3, second);

				assert_eq!(interner.get("a.melos"), Some(first));
				assert_eq!(interner.get("b.melos"), Some(second));
				assert_eq!(interner.len(), 2);
			}
	);
}


#[test]
fn test_tokens_do_not_span_sources() {
	let mut interner = Interner::new();
	let first = interner.get_or_intern("a.melos");
	let second = interner.get_or_intern("b.melos");

	let lexer = Lexer::new(vec![
		Source::from_reader(first, "Re".as_bytes()),
		Source::from_reader(second, "st".as_bytes()),
	]);

	let tokens: Vec<Token> = lexer.collect();

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::Unrecognized(b'R')),
			error!(ErrorKind::Unrecognized(b'e')),
			error!(ErrorKind::Unrecognized(b's')),
			error!(ErrorKind::Unrecognized(b't')),
			token!(TokenKind::Eof),
		]
	);

	// A string left open by one source doesn't leak into the next.
	let mut interner = Interner::new();
	let first = interner.get_or_intern("a.melos");
	let second = interner.get_or_intern("b.melos");

	let lexer = Lexer::new(vec![
		Source::from_reader(first, "\"ab".as_bytes()),
		Source::from_reader(second, "C".as_bytes()),
	]);

	let tokens: Vec<Token> = lexer.collect();

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::UnterminatedString),
			token!(TokenKind::Note(Note::C)),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_string_literals() {
	let tokens = lex(br#""hello" "escape \n \t \f \" \\ done" """#.as_ref());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::String(lit1)),
			token!(TokenKind::String(lit2)),
			token!(TokenKind::String(lit3)),
			token!(TokenKind::Eof),
		]
			=> {
				assert_eq!(lit1.as_ref(), b"hello");
				assert_eq!(lit2.as_ref(), b"escape \n \t \x0C \" \\ done");
				assert!(lit3.is_empty());
			}
	);
}


#[test]
fn test_invalid_escape() {
	let tokens = lex(br#""a\qb""#.as_ref());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::InvalidEscape(b'q')),
			token!(TokenKind::String(lit)),
			token!(TokenKind::Eof),
		]
			=> assert_eq!(lit.as_ref(), b"a\\qb")
	);

	// An escaped line terminator is an unrecognized escape like any other
	// byte, and the literal continues on the next line.
	let tokens = lex("\"a\\\nb\"".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			Token {
				token: TokenKind::Error(ErrorKind::InvalidEscape(b'\n')),
				pos: SourcePos { line: 1, .. },
			},
			Token { token: TokenKind::String(lit), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
			=> assert_eq!(lit.as_ref(), b"a\\\nb")
	);
}


#[test]
fn test_unterminated_strings() {
	let tokens = lex("\"ab\nC".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::UnterminatedString),
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("\"ab\rC".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::UnterminatedString),
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
	);

	// An escaped carriage return is a bad escape, and the linefeed behind it
	// still terminates the literal.
	let tokens = lex("\"a\\\r\nC".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::InvalidEscape(b'\r')),
			error!(ErrorKind::UnterminatedString),
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("\"ab".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::UnterminatedString),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_string_length_limit() {
	let mut input = Vec::with_capacity(MAX_STRING_LEN + 10);
	input.push(b'"');
	input.resize(MAX_STRING_LEN + 1, b'a');
	input.push(b'"');

	let tokens = lex(io::Cursor::new(input));

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::String(lit)),
			token!(TokenKind::Eof),
		]
			=> assert_eq!(lit.len(), MAX_STRING_LEN)
	);

	// One byte over the limit.
	let mut input = Vec::with_capacity(MAX_STRING_LEN + 10);
	input.push(b'"');
	input.resize(MAX_STRING_LEN + 2, b'a');
	input.push(b'"');

	let tokens = lex(io::Cursor::new(input));

	assert_matches!(
		&tokens[..],
		[
			error!(ErrorKind::StringTooLong),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_comments() {
	let tokens = lex("C // a line comment\nD /* a block /* comment */ E".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 1, .. } },
			Token { token: TokenKind::Note(Note::D), pos: SourcePos { line: 2, .. } },
			Token { token: TokenKind::Note(Note::E), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("C /* one\ntwo\nthree */ D".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			Token { token: TokenKind::Note(Note::C), pos: SourcePos { line: 1, .. } },
			Token { token: TokenKind::Note(Note::D), pos: SourcePos { line: 3, .. } },
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("A /**/ B".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::A)),
			token!(TokenKind::Note(Note::B)),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("C // no newline".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::C)),
			token!(TokenKind::Eof),
		]
	);

	let tokens = lex("C /* no end".as_bytes());

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::C)),
			error!(ErrorKind::UnterminatedComment),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_buffer_growth() {
	// A single comment match much longer than the initial buffer.
	let mut input = b"// ".to_vec();
	input.resize(20 * BUFFER_CAPACITY, b'x');
	input.extend_from_slice(b"\nG");

	let tokens = lex(io::Cursor::new(input));

	assert_matches!(
		&tokens[..],
		[
			Token { token: TokenKind::Note(Note::G), pos: SourcePos { line: 2, .. } },
			token!(TokenKind::Eof),
		]
	);

	let mut input = vec![b' '; 20 * BUFFER_CAPACITY];
	input.push(b'A');

	let tokens = lex(io::Cursor::new(input));

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::A)),
			token!(TokenKind::Eof),
		]
	);
}


#[test]
fn test_eof_is_idempotent() {
	let mut interner = Interner::new();
	let name = interner.get_or_intern("test.melos");
	let mut lexer = Lexer::from(Source::from_reader(name, "C".as_bytes()));

	assert_matches!(lexer.next_token(), token!(TokenKind::Note(Note::C)));
	assert_matches!(lexer.next_token(), token!(TokenKind::Eof));
	assert_matches!(lexer.next_token(), token!(TokenKind::Eof));
	assert_matches!(lexer.next_token(), token!(TokenKind::Eof));
}


#[test]
#[should_panic(expected = "at least one source")]
fn test_no_sources() {
	Lexer::new(Vec::new());
}


struct FailingReader {
	reads: usize,
}

impl io::Read for FailingReader {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.reads += 1;

		match self.reads {
			1 => {
				buf[.. 2].copy_from_slice(b"C ");
				Ok(2)
			}

			_ => Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken")),
		}
	}
}


#[test]
fn test_read_failure() {
	let tokens = lex(FailingReader { reads: 0 });

	assert_matches!(
		&tokens[..],
		[
			token!(TokenKind::Note(Note::C)),
			error!(ErrorKind::Io(error)),
			token!(TokenKind::Eof),
		]
			=> assert_eq!(error.kind(), io::ErrorKind::BrokenPipe)
	);
}


#[test]
#[should_panic(expected = "dead state")]
fn test_dead_state_panics() {
	// Reuses the first declared states as row indices.
	static BROKEN: Tables = {
		const CHARS: [Class; 128] = [Class::Other; 128];

		const ROWS: [Row; 2] = [
			Row {
				accept: None,
				edges: &[(Class::Bol, Some(State::LineStart))],
				default: None,
			},
			Row {
				accept: Some(Accept { action: Action::Skip, trim_terminator: false }),
				edges: &[],
				default: None,
			},
		];

		Tables {
			chars: &CHARS,
			rows: &ROWS,
			start_normal: State::Start,
			start_string: State::Start,
			start_escape: State::Start,
			start_comment: State::Start,
		}
	};

	let mut automata = Automata::with_tables(Box::new("x".as_bytes()), &BROKEN);

	let _ = automata.scan();
}


#[test]
fn test_trim_terminator() {
	// Reuses the first declared states as row indices: a toy number scanner
	// that consumes the line terminator and then trims it off the match.
	static TRIMMING: Tables = {
		const NUM: State = State::Whitespace;
		const END: State = State::Bad;

		const CHARS: [Class; 128] = {
			let mut chars = [Class::Other; 128];
			chars[b'1' as usize] = Class::Dig1;
			chars[b'\r' as usize] = Class::Cr;
			chars[b'\n' as usize] = Class::Nl;
			chars
		};

		const ROWS: [Row; 4] = [
			Row {
				accept: None,
				edges: &[
					(Class::Bol, Some(State::LineStart)),
					(Class::Dig1, Some(NUM)),
				],
				default: None,
			},
			Row {
				accept: Some(Accept { action: Action::Skip, trim_terminator: false }),
				edges: &[],
				default: None,
			},
			Row {
				accept: Some(Accept { action: Action::Tempo, trim_terminator: true }),
				edges: &[
					(Class::Dig1, Some(NUM)),
					(Class::Cr, Some(END)),
					(Class::Nl, Some(END)),
				],
				default: None,
			},
			Row {
				accept: Some(Accept { action: Action::Tempo, trim_terminator: true }),
				edges: &[(Class::Nl, Some(END))],
				default: None,
			},
		];

		Tables {
			chars: &CHARS,
			rows: &ROWS,
			start_normal: State::Start,
			start_string: State::Start,
			start_escape: State::Start,
			start_comment: State::Start,
		}
	};

	let mut automata = Automata::with_tables(Box::new("11".as_bytes()), &TRIMMING);
	assert_matches!(automata.scan(), Ok(Scan::Token(TokenKind::Tempo(11), 1)));

	let mut automata = Automata::with_tables(Box::new("1\n".as_bytes()), &TRIMMING);
	assert_matches!(automata.scan(), Ok(Scan::Token(TokenKind::Tempo(1), 1)));

	// CRLF comes off as a single terminator.
	let mut automata = Automata::with_tables(Box::new("1\r\n".as_bytes()), &TRIMMING);
	assert_matches!(automata.scan(), Ok(Scan::Token(TokenKind::Tempo(1), 1)));
}


#[test]
fn test_dump() {
	let mut interner = Interner::new();
	let first = interner.get_or_intern("a.melos");
	let second = interner.get_or_intern("b.melos");

	let lexer = Lexer::new(vec![
		Source::from_reader(first, "C 4\n\"hi\"".as_bytes()),
		Source::from_reader(second, "Rest".as_bytes()),
	]);

	let mut output = Vec::new();
	lexer.dump(&interner, &mut output).expect("dump failed");

	let expected = "\
		# a.melos\n\
		line 1: C\n\
		line 1: 4\n\
		line 2: \"hi\"\n\
		# b.melos\n\
		line 1: Rest\n\
		line 1: <eof>\n\
	";

	assert_eq!(String::from_utf8_lossy(&output), expected);

	// Only the source names get interned, never the string literals.
	assert_eq!(interner.len(), 2);
}
