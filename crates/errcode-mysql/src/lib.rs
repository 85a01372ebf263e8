//! MySQL server error numbers for errcode.
//!
//! [`to_code`] maps a MySQL server error number to a canonical code. With
//! the default `sqlx` feature, [`error_code`] finds the first
//! `sqlx::mysql::MySqlDatabaseError` in a cause chain (directly, or inside
//! `sqlx::Error::Database`) and maps its number.
//!
//! SEE: <https://dev.mysql.com/doc/mysql-errors/8.0/en/server-error-reference.html>

use errcode::{Code, DynError, LazyCoder, SharedCoder};

static ERROR_CODER: LazyCoder = LazyCoder::from_fn(error_code);

/// The MySQL coder.
pub fn error_coder() -> SharedCoder {
    ERROR_CODER.get()
}

/// The code of the first MySQL server error in the chain.
///
/// Without the `sqlx` feature no driver error type is known and every
/// error is `Unknown`.
pub fn error_code(err: Option<&DynError>) -> Code {
    let Some(err) = err else {
        return Code::Ok;
    };
    server_error_number(err).map_or(Code::Unknown, |number| to_code(number.into()))
}

// sqlx offers no public constructor for `MySqlDatabaseError`, so the
// matching arms below only run against a live server.
#[cfg(feature = "sqlx")]
fn server_error_number(err: &DynError) -> Option<u16> {
    use sqlx::mysql::MySqlDatabaseError;

    errcode::chain::find_map(err, |e| {
        if let Some(db) = e.downcast_ref::<MySqlDatabaseError>() {
            return Some(db.number());
        }
        match e.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db)) => {
                db.try_downcast_ref::<MySqlDatabaseError>().map(MySqlDatabaseError::number)
            }
            _ => None,
        }
    })
}

#[cfg(not(feature = "sqlx"))]
fn server_error_number(_err: &DynError) -> Option<u16> {
    None
}

/// The canonical code for a MySQL server error number.
pub fn to_code(number: u32) -> Code {
    match number {
        1317 => Code::Canceled, // ER_QUERY_INTERRUPTED

        1149 => Code::InvalidArgument, // ER_SYNTAX_ERROR

        1205 => Code::DeadlineExceeded, // ER_LOCK_WAIT_TIMEOUT

        1008    // ER_DB_DROP_EXISTS
        | 1017  // ER_FILE_NOT_FOUND
        | 1031  // ER_KEY_NOT_FOUND
        | 1049  // ER_BAD_DB_ERROR
        | 1051  // ER_BAD_TABLE_ERROR
        | 1106  // ER_UNKNOWN_PROCEDURE
        | 1109  // ER_UNKNOWN_TABLE
        | 1133  // ER_PASSWORD_NO_MATCH
        | 1146  // ER_NO_SUCH_TABLE
        | 1176  // ER_KEY_DOES_NOT_EXITS
        | 1305  // ER_SP_DOES_NOT_EXIST
        => Code::NotFound,

        1007    // ER_DB_CREATE_EXISTS
        | 1022  // ER_DUP_KEY
        | 1050  // ER_TABLE_EXISTS_ERROR
        | 1086  // ER_FILE_EXISTS_ERROR
        | 1169  // ER_DUP_UNIQUE
        | 1304  // ER_SP_ALREADY_EXISTS
        => Code::AlreadyExists,

        1044    // ER_DBACCESS_DENIED_ERROR
        | 1045  // ER_ACCESS_DENIED_ERROR
        | 1130  // ER_HOST_NOT_PRIVILEGED
        | 1132  // ER_PASSWORD_NOT_ALLOWED
        | 1142  // ER_TABLEACCESS_DENIED_ERROR
        | 1143  // ER_COLUMNACCESS_DENIED_ERROR
        | 1227  // ER_SPECIFIC_ACCESS_DENIED_ERROR
        | 1698  // ER_ACCESS_DENIED_NO_PASSWORD_ERROR
        | 3118  // ER_ACCOUNT_HAS_BEEN_LOCKED
        | 3879  // ER_DB_ACCESS_DENIED
        | 3955  // ER_USER_ACCESS_DENIED_FOR_USER_ACCOUNT_BLOCKED_BY_PASSWORD_LOCK
        | 10926 // ER_ACCESS_DENIED_ERROR_WITH_PASSWORD
        | 10927 // ER_ACCESS_DENIED_FOR_USER_ACCOUNT_LOCKED
        | 11192 // ER_FIREWALL_ACCESS_DENIED
        | 13525 // ER_ACCESS_DENIED_FOR_USER_ACCOUNT_BLOCKED_BY_PASSWORD_LOCK
        => Code::PermissionDenied,

        1037    // ER_OUTOFMEMORY
        | 1038  // ER_OUT_OF_SORTMEMORY
        | 1040  // ER_CON_COUNT_ERROR
        | 1041  // ER_OUT_OF_RESOURCES
        | 1129  // ER_HOST_IS_BLOCKED
        | 1197  // ER_TRANS_CACHE_FULL
        | 1203  // ER_TOO_MANY_USER_CONNECTIONS
        | 1206  // ER_LOCK_TABLE_FULL
        | 1226  // ER_USER_LIMIT_REACHED
        | 1461  // ER_MAX_PREPARED_STMT_COUNT_REACHED
        => Code::ResourceExhausted,

        1213 => Code::Aborted, // ER_LOCK_DEADLOCK

        1148    // ER_NOT_ALLOWED_COMMAND
        | 1178  // ER_CHECK_NOT_IMPLEMENTED
        | 1235  // ER_NOT_SUPPORTED_YET
        | 1295  // ER_UNSUPPORTED_PS
        => Code::Unimplemented,

        1053    // ER_SERVER_SHUTDOWN
        | 1077  // ER_NORMAL_SHUTDOWN
        | 1079  // ER_SHUTDOWN_COMPLETE
        | 1080  // ER_FORCING_CLOSE
        | 1194  // ER_CRASHED_ON_USAGE
        | 1195  // ER_CRASHED_ON_REPAIR
        => Code::Unavailable,

        1131 => Code::Unauthenticated, // ER_PASSWORD_ANONYMOUS_USER

        _ => Code::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errcode::{same_coder, CodedError};
    use std::io;

    #[test]
    fn spot_checks() {
        assert_eq!(to_code(1205), Code::DeadlineExceeded);
        assert_eq!(to_code(1213), Code::Aborted);
        assert_eq!(to_code(1045), Code::PermissionDenied);
        assert_eq!(to_code(1146), Code::NotFound);
    }

    #[test]
    fn unmapped_numbers() {
        assert_eq!(to_code(0), Code::Unknown);
        assert_eq!(to_code(1000), Code::Unknown);
        assert_eq!(to_code(1062), Code::Unknown); // ER_DUP_ENTRY is not in the table
        assert_eq!(to_code(99999), Code::Unknown);
        assert_eq!(to_code(u32::MAX), Code::Unknown);
    }

    #[test]
    fn families() {
        let families: [(&[u32], Code); 11] = [
            (&[1317], Code::Canceled),
            (&[1149], Code::InvalidArgument),
            (&[1205], Code::DeadlineExceeded),
            (
                &[1008, 1017, 1031, 1049, 1051, 1106, 1109, 1133, 1146, 1176, 1305],
                Code::NotFound,
            ),
            (&[1007, 1022, 1050, 1086, 1169, 1304], Code::AlreadyExists),
            (
                &[
                    1044, 1045, 1130, 1132, 1142, 1143, 1227, 1698, 3118, 3879, 3955, 10926,
                    10927, 11192, 13525,
                ],
                Code::PermissionDenied,
            ),
            (
                &[1037, 1038, 1040, 1041, 1129, 1197, 1203, 1206, 1226, 1461],
                Code::ResourceExhausted,
            ),
            (&[1213], Code::Aborted),
            (&[1148, 1178, 1235, 1295], Code::Unimplemented),
            (&[1053, 1077, 1079, 1080, 1194, 1195], Code::Unavailable),
            (&[1131], Code::Unauthenticated),
        ];
        for (numbers, want) in families {
            for number in numbers {
                assert_eq!(to_code(*number), want, "mysql error {number}");
            }
        }
    }

    #[test]
    fn nil_and_unrelated() {
        assert_eq!(error_code(None), Code::Ok);
        let other = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(error_code(Some(&other)), Code::Unknown);
        let tagged = CodedError::new(Code::NotFound, "row missing");
        assert_eq!(error_code(Some(&tagged)), Code::Unknown);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn non_database_sqlx_errors_are_unknown() {
        assert_eq!(error_code(Some(&sqlx::Error::RowNotFound)), Code::Unknown);
        assert_eq!(error_code(Some(&sqlx::Error::PoolTimedOut)), Code::Unknown);
    }

    #[test]
    fn coder_is_singleton() {
        let coder = error_coder();
        assert!(same_coder(&coder, &error_coder()));
        assert_eq!(coder.error_code(None), Code::Ok);
    }
}
