use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级级别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "class.ts")]
pub enum ClassLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ClassLevel {
    pub fn all() -> &'static [ClassLevel] {
        &[
            ClassLevel::Beginner,
            ClassLevel::Intermediate,
            ClassLevel::Advanced,
        ]
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLevel::Beginner => write!(f, "beginner"),
            ClassLevel::Intermediate => write!(f, "intermediate"),
            ClassLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for ClassLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(ClassLevel::Beginner),
            "intermediate" => Ok(ClassLevel::Intermediate),
            "advanced" => Ok(ClassLevel::Advanced),
            _ => Err(format!("Invalid class level: {s}")),
        }
    }
}

// 审批状态：pending → approved | rejected，只允许从 pending 迁移一次
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "class.ts")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Invalid approval status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级代码（唯一）
    pub class_code: String,
    // 班级名称
    pub class_name: String,
    // 班级描述
    pub description: Option<String>,
    // 教练ID
    pub instructor_id: i64,
    pub level: ClassLevel,
    // 容量
    pub max_students: i32,
    // 当前在读人数（仅统计 active 选课）
    pub current_students: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub approval_status: ApprovalStatus,
    // 审批人
    pub approved_by: Option<i64>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason: Option<String>,
    pub is_active: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }

    pub fn is_full(&self) -> bool {
        self.current_students >= self.max_students
    }

    pub fn available_seats(&self) -> i32 {
        (self.max_students - self.current_students).max(0)
    }
}
