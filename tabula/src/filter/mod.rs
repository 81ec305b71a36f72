//! Filter predicate engine.
//!
//! - [`FilterClause`] - one typed field/operator/value condition
//! - [`FilterSet`] - the active clauses, one per field, ANDed
//! - [`RangeDrafts`] - merges separate "from"/"to" inputs into one `between`
//! - [`ClauseSpec`] - loosely-typed clause as UI code produces it

mod clause;
mod range;
mod set;
mod spec;

pub use clause::ALL_SENTINEL;
pub use clause::FilterClause;
pub use clause::FilterOperator;
pub use range::RangeBound;
pub use range::RangeDrafts;
pub use range::RangeEdit;
pub use set::FilterSet;
pub use spec::ClauseSpec;
