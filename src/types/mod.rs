mod error;
mod expr;
mod field;
mod record;
mod report;
mod value;
mod verdict;

pub use error::EvalError;
pub use expr::{CompareOp, CompiledExpr, Expr, FieldExpr, field};
pub(crate) use expr::Node;
pub use field::{Field, FieldKind};
pub use record::{Record, RecordError};
pub use report::{BatchReport, Outcome};
pub use value::{FieldValue, Value};
pub use verdict::{SegmentResults, Verdict};
