use thiserror::Error;

use super::field::Field;
use super::value::FieldValue;

/// The single user record every rule in a batch is evaluated against.
///
/// Integer attributes are epoch seconds or currency minor units and are
/// expected to be non-negative; string attributes are expected to be
/// non-empty. The evaluator does not re-check these invariants; hosts that
/// accept untrusted input can call [`Record::validate`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: String,
    pub level: i64,
    pub country: String,
    pub first_session: i64,
    pub last_session: i64,
    pub purchase_amount: i64,
    pub last_purchase_at: i64,
}

/// A record that violates the attribute invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("field '{field}' must not be empty")]
    Empty { field: Field },

    #[error("field '{field}' must be >= 0, got {value}")]
    Negative { field: Field, value: i64 },
}

impl Record {
    /// Read one attribute.
    #[must_use]
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Id => FieldValue::Str(&self.id),
            Field::Level => FieldValue::Int(self.level),
            Field::Country => FieldValue::Str(&self.country),
            Field::FirstSession => FieldValue::Int(self.first_session),
            Field::LastSession => FieldValue::Int(self.last_session),
            Field::PurchaseAmount => FieldValue::Int(self.purchase_amount),
            Field::LastPurchaseAt => FieldValue::Int(self.last_purchase_at),
        }
    }

    /// Look up an attribute by its rule identifier.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<FieldValue<'_>> {
        Field::from_name(name).map(|f| self.get(f))
    }

    /// Check the attribute invariants, reporting the first violation in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] for an empty string or a negative integer.
    pub fn validate(&self) -> Result<(), RecordError> {
        for field in Field::ALL {
            match self.get(field) {
                FieldValue::Str(s) if s.is_empty() => {
                    return Err(RecordError::Empty { field });
                }
                FieldValue::Int(value) if value < 0 => {
                    return Err(RecordError::Negative { field, value });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
