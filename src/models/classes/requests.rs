use super::entities::{ApprovalStatus, ClassLevel};
use crate::models::common::{PaginationQuery, pagination::deserialize_optional_from_str};
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub instructor_id: Option<i64>,
    pub approval_status: Option<ApprovalStatus>,
    pub level: Option<ClassLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// 创建（申请）班级请求
//
// # instructor_id 字段说明
// - **教练创建**：可选字段，不填写则使用当前登录教练的 ID，填写则必须等于自己
// - **管理员创建**：必填字段，且该用户必须是教练角色
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub instructor_id: Option<i64>,
    pub class_code: String,
    pub class_name: String,
    pub description: Option<String>,
    pub level: ClassLevel,
    #[serde(default = "default_max_students")]
    pub max_students: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

fn default_max_students() -> i32 {
    30
}

// 更新班级请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub description: Option<String>,
    pub level: Option<ClassLevel>,
    pub max_students: Option<i32>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

// 驳回请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct RejectClassRequest {
    pub reason: String,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub instructor_id: Option<i64>,
    pub approval_status: Option<ApprovalStatus>,
    pub level: Option<ClassLevel>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl From<ClassQueryParams> for ClassListQuery {
    fn from(params: ClassQueryParams) -> Self {
        ClassListQuery {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            instructor_id: params.instructor_id,
            approval_status: params.approval_status,
            level: params.level,
            is_active: params.is_active,
            search: params.search,
        }
    }
}
