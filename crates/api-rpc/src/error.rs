//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use stage_tracker_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND_OR_UNAUTHORIZED: i32 = 4001;
    pub const UNAUTHENTICATED: i32 = 4010;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
    pub const CONFIG_ERROR: i32 = 5002;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    let message = err.to_string();
    let code = match err {
        AppError::Validation(_) | AppError::Domain(_) => code::VALIDATION_ERROR,
        AppError::Unauthenticated => code::UNAUTHENTICATED,
        AppError::NotFoundOrUnauthorized(_) => code::NOT_FOUND_OR_UNAUTHORIZED,
        AppError::Database(_) => code::DB_ERROR,
        AppError::Config(_) => code::CONFIG_ERROR,
        AppError::Export(_) => code::INTERNAL_ERROR,
    };
    ErrorObjectOwned::owned(code, message, None::<()>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_tracker_core::domain::DomainError;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            to_rpc_error(AppError::Unauthenticated).code(),
            code::UNAUTHENTICATED
        );
        assert_eq!(
            to_rpc_error(AppError::NotFoundOrUnauthorized("x".into())).code(),
            code::NOT_FOUND_OR_UNAUTHORIZED
        );
        assert_eq!(
            to_rpc_error(AppError::Domain(DomainError::InvalidStatus("bogus".into()))).code(),
            code::VALIDATION_ERROR
        );
        assert_eq!(
            to_rpc_error(AppError::Database("locked".into())).code(),
            code::DB_ERROR
        );
        assert_eq!(
            to_rpc_error(AppError::Export("bad date".into())).code(),
            code::INTERNAL_ERROR
        );
        assert_eq!(
            to_rpc_error(AppError::Config("bad url".into())).code(),
            code::CONFIG_ERROR
        );
    }

    #[test]
    fn test_not_found_message_does_not_mention_owner() {
        let err = to_rpc_error(AppError::NotFoundOrUnauthorized("app-1".into()));
        assert_eq!(
            err.message(),
            "Application not found or not owned by caller: app-1"
        );
    }
}
