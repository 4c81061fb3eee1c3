// CV builder: one in-memory document, field edits, section list operations.
// Rendering lives in `render`, PDF export in `export`.

pub mod document;
pub mod handlers;
pub mod ids;
pub mod skills;
pub mod template;

pub use document::{CvEditor, EditOutcome};
