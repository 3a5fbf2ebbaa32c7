//! Melos is a lexer for a small music composition language.
//!
//! The language describes songs as phrases of notes, with octave, tempo, volume and
//! instrument directives. This crate turns raw source text into a stream of classified
//! tokens, recovering from malformed input by emitting error tokens instead of aborting.
//!
//! The scanner is a table-driven automaton: a precomputed character class map,
//! transition table and accept table drive a maximal munch loop, while a small set of
//! lexical modes handles string literals, escape sequences and block comments. Input is
//! pulled incrementally from one or more named sources, which are lexed back to back as
//! if they were a single stream.

pub mod fmt;
pub mod symbol;
pub mod syntax;
