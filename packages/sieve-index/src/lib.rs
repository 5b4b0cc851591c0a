pub mod lexical;
pub mod rank;
pub mod vector;

mod error;

pub use error::{Error, Result};
pub use lexical::LexicalIndex;
pub use vector::VectorIndex;
