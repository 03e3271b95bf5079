//! Pages
//!
//! One component per document the server serves.

mod index;
mod subject;

pub use index::IndexPage;
pub use subject::{NotFoundPage, SubjectView};
