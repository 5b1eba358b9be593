//! Renderers from the schema IR to target source text.
//!
//! Every renderer is a pure function of a validated [`Schema`](crate::ir::Schema):
//! the same input always produces byte-identical output.

pub mod ddl;
pub mod model;
