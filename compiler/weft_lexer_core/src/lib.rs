//! Incremental lexical front end: a windowed reader over immutable UTF-16
//! source text, plus the decoders and cache plumbing a lexer builds on.
//!
//! # Architecture
//!
//! ```text
//! SourceText ──copy_to──▶ TextWindow ──lexeme_units──▶ LexerCache
//!                            │                            │
//!                 escape / xml_entity               canonical tokens,
//!                   decoders                        trivia, keywords
//! ```
//!
//! A [`LexSession`] pairs one [`TextWindow`] with one
//! [`LexerCache`](weft_cache::LexerCache). Both borrow their storage from
//! [`SessionPools`], which are shared by reference across sessions and
//! threads and never live in process-wide statics.
//!
//! # End of Input
//!
//! Lookahead yields `Option<CodeUnit>`. `None` is the only end-of-input
//! signal; [`TextWindow::is_really_at_end`] answers the question directly.

mod buffer_pool;
mod config;
mod escape;
mod session;
mod source_text;
mod text_window;
mod xml_entity;

pub use buffer_pool::{BufferPool, WindowPools};
pub use config::{
    ConfigError, LexerConfig, WindowConfig, DEFAULT_WINDOW_LENGTH, MAX_POOLED_BUFFERS,
};
pub use escape::{dec_value, decode_unicode_escape, hex_value, DecodedChar, EscapeScan};
pub use session::{LexSession, SessionPools};
pub use source_text::{SourceText, Utf16Source};
pub use text_window::{is_new_line, TextWindow, WindowStats};

pub use weft_cache::CodeUnit;
