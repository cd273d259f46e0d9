//! Evaluation of named, SQL-flavored segment rules against a single user record.
//!
//! Rules such as `country = 'Turkey' AND level >= 10` go through a closed
//! pipeline: [`normalize`] rewrites them into canonical syntax, [`parse()`]
//! builds an [`Expr`], [`bind`] resolves it against the [`Record`] schema, and
//! the bound [`CompiledExpr`] is evaluated. Nothing outside that grammar is
//! ever executed.
//!
//! ```
//! use segmentor::{Record, run};
//!
//! let record = Record {
//!     id: "u4".into(),
//!     level: 20,
//!     country: "Turkey".into(),
//!     purchase_amount: 25_000,
//!     ..Record::default()
//! };
//! let rules = [
//!     ("tr_eq", "country = 'Turkey'"),
//!     ("or_clause", "level > 100 OR purchase_amount > 20000"),
//! ];
//!
//! let results = run(rules, &record, 1_735_689_600).unwrap();
//! assert_eq!(results.get("tr_eq"), Some(true));
//! assert_eq!(results.get("or_clause"), Some(true));
//! ```

mod compile;
mod error;
mod evaluate;
mod normalize;
pub mod parse;
mod runner;
mod types;

pub use compile::bind;
pub use error::{Cause, ErrorKind, SegmentError};
pub use evaluate::evaluate;
pub use normalize::normalize;
pub use parse::{ParseError, parse};
pub use runner::{BatchRunner, DEFAULT_CACHE_CAPACITY, now_epoch_seconds, run};
pub use types::{
    BatchReport, CompareOp, CompiledExpr, EvalError, Expr, Field, FieldExpr, FieldKind,
    FieldValue, Outcome, Record, RecordError, SegmentResults, Value, Verdict, field,
};
