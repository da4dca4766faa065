// Skill grading: career table, the grading engine, and free-text extraction.
// Pure functions over an immutable `CareerCatalog`; no I/O outside `handlers`.

pub mod careers;
pub mod engine;
pub mod extract;
pub mod handlers;
