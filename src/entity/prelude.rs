//! 预导入模块，方便使用

pub use super::class_enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as ClassEnrollments, Model as EnrollmentModel,
};
pub use super::class_schedules::{
    ActiveModel as ScheduleActiveModel, Entity as ClassSchedules, Model as ScheduleModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
