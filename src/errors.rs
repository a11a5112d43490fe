//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务流程中的失败（冲突、容量、状态等）也在这里定义，
//! 路由层统一把它们映射为 HTTP 状态码与响应码。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_dojo_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum DojoSystemError {
            $($variant(String),)*
        }

        impl DojoSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DojoSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DojoSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DojoSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DojoSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DojoSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dojo_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Serialization("E006", "Serialization Error"),
    DateParse("E007", "Date Parse Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    Permission("E010", "Permission Denied"),
    DuplicateCode("E011", "Duplicate Class Code"),
    DuplicateSlot("E012", "Duplicate Schedule Slot"),
    DuplicateEnrollment("E013", "Duplicate Enrollment"),
    CapacityExceeded("E014", "Capacity Exceeded"),
    ScheduleConflict("E015", "Schedule Conflict"),
    InvalidState("E016", "Invalid State Transition"),
    DuplicateUser("E017", "Duplicate User"),
}

impl DojoSystemError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为业务规则拒绝（而非基础设施故障）
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            DojoSystemError::NotFound(_)
                | DojoSystemError::Validation(_)
                | DojoSystemError::Permission(_)
                | DojoSystemError::DuplicateCode(_)
                | DojoSystemError::DuplicateSlot(_)
                | DojoSystemError::DuplicateEnrollment(_)
                | DojoSystemError::DuplicateUser(_)
                | DojoSystemError::CapacityExceeded(_)
                | DojoSystemError::ScheduleConflict(_)
                | DojoSystemError::InvalidState(_)
        )
    }
}

impl fmt::Display for DojoSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DojoSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DojoSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        DojoSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DojoSystemError {
    fn from(err: serde_json::Error) -> Self {
        DojoSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DojoSystemError {
    fn from(err: chrono::ParseError) -> Self {
        DojoSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DojoSystemError>;
