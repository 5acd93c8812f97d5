//! Rendering of merged documentation: markdown tables, README updates, and
//! JSON schemas.

mod markdown;
mod readme;
mod schema;

pub use markdown::{display_value, render_sections};
pub use readme::insert_parameters;
pub use schema::build_schema;
