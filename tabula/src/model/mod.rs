//! Item model: dynamic values and field access

mod record;
mod row;
mod value;

pub use record::*;
pub use row::*;
pub use value::*;
