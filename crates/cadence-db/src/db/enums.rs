//! Database enum types with Diesel serialization.
//!
//! Type-safe wrappers for TEXT columns constrained by CHECK clauses. Each
//! enum implements `ToSql` and `FromSql` for automatic conversion between
//! Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

use cadence_core::event::Recurrence;

/// Recurrence pattern of an event row.
///
/// Maps to the `events.recurrence` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum RecurrenceKind {
    None,
    Daily,
    Weekly,
}

impl ToSql<Text, Pg> for RecurrenceKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for RecurrenceKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"NONE" => Ok(Self::None),
            b"DAILY" => Ok(Self::Daily),
            b"WEEKLY" => Ok(Self::Weekly),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl RecurrenceKind {
    /// Returns the database string representation of this recurrence kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Recurrence> for RecurrenceKind {
    fn from(value: Recurrence) -> Self {
        match value {
            Recurrence::None => Self::None,
            Recurrence::Daily => Self::Daily,
            Recurrence::Weekly => Self::Weekly,
        }
    }
}

impl From<RecurrenceKind> for Recurrence {
    fn from(value: RecurrenceKind) -> Self {
        match value {
            RecurrenceKind::None => Self::None,
            RecurrenceKind::Daily => Self::Daily,
            RecurrenceKind::Weekly => Self::Weekly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn database_strings_match_the_check_constraint() {
        assert_eq!(RecurrenceKind::None.as_str(), "NONE");
        assert_eq!(RecurrenceKind::Daily.as_str(), "DAILY");
        assert_eq!(RecurrenceKind::Weekly.as_str(), "WEEKLY");
    }

    #[test_log::test]
    fn conversions_round_trip_through_the_domain_enum() {
        for kind in [
            RecurrenceKind::None,
            RecurrenceKind::Daily,
            RecurrenceKind::Weekly,
        ] {
            let domain: Recurrence = kind.into();
            assert_eq!(RecurrenceKind::from(domain), kind);
            assert_eq!(domain.as_str(), kind.as_str());
        }
    }
}
