//! Small standard-library extensions shared across the judge crates.

pub mod fs;
pub mod result;

pub mod prelude {
    pub use crate::result::ResultEx;
}
