use std::fmt;

/// The attribute type a rule comparison is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    String,
}

/// A resolved [`Record`](super::Record) attribute.
///
/// Rule identifiers are resolved to a `Field` during binding, so the
/// evaluator never performs a name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Level,
    Country,
    FirstSession,
    LastSession,
    PurchaseAmount,
    LastPurchaseAt,
}

impl Field {
    /// Every attribute, in declaration order.
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Level,
        Field::Country,
        Field::FirstSession,
        Field::LastSession,
        Field::PurchaseAmount,
        Field::LastPurchaseAt,
    ];

    /// Resolve a rule identifier. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The identifier used for this attribute in rule text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Level => "level",
            Field::Country => "country",
            Field::FirstSession => "first_session",
            Field::LastSession => "last_session",
            Field::PurchaseAmount => "purchase_amount",
            Field::LastPurchaseAt => "last_purchase_at",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Id | Field::Country => FieldKind::String,
            Field::Level
            | Field::FirstSession
            | Field::LastSession
            | Field::PurchaseAmount
            | Field::LastPurchaseAt => FieldKind::Integer,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::String => f.write_str("string"),
        }
    }
}
