//! Corpus loading and partitioning
//!
//! ## Usage
//!
//! ```rust,ignore
//! use corpus::{Corpus, read_text, split, SplitMode};
//!
//! let corpus = Corpus::discover(&inputs, &[])?;
//! let text = read_text(&corpus.paths()[0])?;
//! let chunks = split("book.txt", &text, 4, SplitMode::Word)?;
//! ```
//!
//! ## Split modes
//!
//! - **Word**: chunk boundaries snap forward to whitespace (default)
//! - **Char**: fixed-width windows that may cut a word in two

pub mod loader;
pub mod partitioner;

pub use loader::{read_text, Corpus, DEFAULT_TEXT_EXTENSIONS};
pub use partitioner::{chunk_bounds, split, SplitMode, TextChunk};
