//! Classification of Diesel failures shared by the repositories.
//!
//! Each repository turns a [`StorageFailure`] into its own port error, so
//! the `DatabaseErrorKind` matching lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Storage-level outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageFailure {
    /// A unique constraint rejected the write.
    Unique,
    /// A `CHECK` or `NOT NULL` constraint rejected the write.
    Constraint(String),
    /// A referenced row does not exist.
    ForeignKey,
    /// The connection dropped mid-operation.
    Connection,
    /// Anything else.
    Query,
}

/// Log and classify a Diesel error.
pub(crate) fn classify_diesel_error(error: DieselError) -> StorageFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => StorageFailure::Unique,
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation,
            info,
        ) => StorageFailure::Constraint(
            info.constraint_name()
                .or_else(|| info.column_name())
                .unwrap_or("constraint")
                .to_owned(),
        ),
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            StorageFailure::ForeignKey
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageFailure::Connection
        }
        _ => StorageFailure::Query,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for Diesel error classification.
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "violation"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    #[case(db_error(DatabaseErrorKind::UniqueViolation, Some("users_username_key")), StorageFailure::Unique)]
    #[case(
        db_error(DatabaseErrorKind::CheckViolation, Some("recipes_instructions_min_length")),
        StorageFailure::Constraint("recipes_instructions_min_length".to_owned())
    )]
    #[case(
        db_error(DatabaseErrorKind::NotNullViolation, None),
        StorageFailure::Constraint("constraint".to_owned())
    )]
    #[case(db_error(DatabaseErrorKind::ForeignKeyViolation, None), StorageFailure::ForeignKey)]
    #[case(db_error(DatabaseErrorKind::ClosedConnection, None), StorageFailure::Connection)]
    #[case(DieselError::NotFound, StorageFailure::Query)]
    #[case(DieselError::RollbackTransaction, StorageFailure::Query)]
    fn classifies_database_errors(#[case] error: DieselError, #[case] expected: StorageFailure) {
        assert_eq!(classify_diesel_error(error), expected);
    }
}
