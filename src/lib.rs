//! Placeholder substitution and conditional blocks for documents whose text is split
//! into independently formatted runs.
//!
//! Placeholders look like `${name}` and are replaced by a value. Blocks are delimited
//! by `<name>` and `</name>`, may span many paragraphs and are either kept (tags
//! stripped) or removed together with their content. Tags and placeholders may be
//! split across runs at any character; run formatting is preserved.
//!
//! ```
//! use tdoc::{Document, Paragraph, Span};
//!
//! let paragraph = Paragraph::new_text().with_content(vec![
//!     Span::new_text("Hello ${na"),
//!     Span::new_text("me}<extra>, welcome</extra>!"),
//! ]);
//! let mut document = Document::new().with_paragraphs(vec![paragraph]);
//!
//! pure_fill::apply_blocks(&mut document, [("extra", false)]).unwrap();
//! pure_fill::substitute(&mut document, [("name", "Ivan")]).unwrap();
//! ```

pub mod block;
pub mod document;
mod error;
mod fill;
pub mod key;
pub mod paragraph;
pub mod replace;
pub mod runs;
pub mod scanner;

pub use document::{ParagraphPath, ParagraphSource};
pub use error::{Error, Result};
pub use fill::{DEFAULT_MAX_PASSES, DEFAULT_MAX_RETRIES, Options, Replacer, apply_blocks, substitute};
pub use runs::{Run, RunIndex, RunPosition};
