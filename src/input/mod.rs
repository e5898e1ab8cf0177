//! Reading the text to translate from the command line, a file, or stdin.

mod reader;

pub use reader::{InputReader, InputSource};
