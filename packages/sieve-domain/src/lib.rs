mod record;
pub mod text;

pub use record::{Candidate, Record};
