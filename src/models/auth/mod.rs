pub mod requests;
pub mod responses;

pub use requests::LoginRequest;
pub use responses::{LoginResponse, RefreshTokenResponse, UserInfoResponse};

use super::users::entities::UserRole;

/// 当前操作者：由认证中间件构造，显式传入每个业务流程操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl ActorContext {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 经理或管理员
    pub fn can_review(&self) -> bool {
        matches!(self.role, UserRole::Manager | UserRole::Admin)
    }

    /// 教练本人或管理员可以管理该班级
    pub fn owns_or_admin(&self, instructor_id: i64) -> bool {
        self.is_admin() || (self.role == UserRole::Instructor && self.user_id == instructor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_checks() {
        let instructor = ActorContext::new(7, UserRole::Instructor);
        assert!(instructor.owns_or_admin(7));
        assert!(!instructor.owns_or_admin(8));
        assert!(!instructor.can_review());

        let admin = ActorContext::new(1, UserRole::Admin);
        assert!(admin.owns_or_admin(8));
        assert!(admin.can_review());

        // 经理可以审批但不是班级所有者
        let manager = ActorContext::new(3, UserRole::Manager);
        assert!(manager.can_review());
        assert!(!manager.owns_or_admin(3));
    }
}
