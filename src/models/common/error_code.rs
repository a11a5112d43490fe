use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::DojoSystemError;

/// 响应码，写入 `ApiResponse.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserAlreadyExists = 3004,
    UserCreationFailed = 3005,

    // 班级
    ClassNotFound = 4000,
    ClassCodeAlreadyExists = 4001,
    ClassPermissionDenied = 4003,
    ClassInvalidState = 4009,

    // 课表
    ScheduleNotFound = 5000,
    ScheduleSlotExists = 5001,
    ScheduleConflict = 5002,

    // 选课
    EnrollmentNotFound = 6000,
    EnrollmentAlreadyExists = 6001,
    ClassCapacityExceeded = 6002,

    Validation = 7000,
}

impl ErrorCode {
    /// 将业务错误映射为 HTTP 状态码与响应码
    pub fn from_error(err: &DojoSystemError) -> (StatusCode, ErrorCode) {
        match err {
            DojoSystemError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            DojoSystemError::DuplicateCode(_) => {
                (StatusCode::CONFLICT, ErrorCode::ClassCodeAlreadyExists)
            }
            DojoSystemError::DuplicateSlot(_) => {
                (StatusCode::CONFLICT, ErrorCode::ScheduleSlotExists)
            }
            DojoSystemError::DuplicateEnrollment(_) => {
                (StatusCode::CONFLICT, ErrorCode::EnrollmentAlreadyExists)
            }
            DojoSystemError::DuplicateUser(_) => {
                (StatusCode::CONFLICT, ErrorCode::UserAlreadyExists)
            }
            DojoSystemError::CapacityExceeded(_) => {
                (StatusCode::CONFLICT, ErrorCode::ClassCapacityExceeded)
            }
            DojoSystemError::ScheduleConflict(_) => {
                (StatusCode::CONFLICT, ErrorCode::ScheduleConflict)
            }
            DojoSystemError::InvalidState(_) => {
                (StatusCode::CONFLICT, ErrorCode::ClassInvalidState)
            }
            DojoSystemError::Permission(_) => {
                (StatusCode::FORBIDDEN, ErrorCode::ClassPermissionDenied)
            }
            DojoSystemError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
            DojoSystemError::Authentication(_) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)
            }
            DojoSystemError::Validation(_) | DojoSystemError::DateParse(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::Validation)
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_errors_map_to_conflict() {
        for err in [
            DojoSystemError::duplicate_code("K-101"),
            DojoSystemError::duplicate_slot("slot"),
            DojoSystemError::duplicate_enrollment("pair"),
            DojoSystemError::capacity_exceeded("full"),
            DojoSystemError::schedule_conflict("overlap"),
            DojoSystemError::invalid_state("approved"),
        ] {
            assert_eq!(ErrorCode::from_error(&err).0, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_other_mappings() {
        assert_eq!(
            ErrorCode::from_error(&DojoSystemError::not_found("class")),
            (StatusCode::NOT_FOUND, ErrorCode::NotFound)
        );
        assert_eq!(
            ErrorCode::from_error(&DojoSystemError::permission("owner")).0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::from_error(&DojoSystemError::validation("bad")).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::from_error(&DojoSystemError::database_operation("io")).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(ErrorCode::Success as i32, 0);
    }
}
