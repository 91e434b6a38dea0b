//! Document edit operations: the closed vocabulary an agent may emit and
//! the fail-fast validator that turns loosely typed op maps into it.

pub mod model;
pub mod validate;

pub use model::{DEFAULT_HEADING_LEVEL, EditOp, OpKind, RawOp};
pub use validate::{OpError, validate_ops};
