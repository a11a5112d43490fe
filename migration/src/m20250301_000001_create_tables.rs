use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Classes::ClassCode)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Classes::ClassName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classes::Description).text().null())
                    .col(
                        ColumnDef::new(Classes::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Classes::Level).string().not_null())
                    .col(
                        ColumnDef::new(Classes::MaxStudents)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Classes::CurrentStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Classes::StartDate).date().not_null())
                    .col(ColumnDef::new(Classes::EndDate).date().null())
                    .col(ColumnDef::new(Classes::ApprovalStatus).string().not_null())
                    .col(ColumnDef::new(Classes::ApprovedBy).big_integer().null())
                    .col(ColumnDef::new(Classes::ApprovedAt).big_integer().null())
                    .col(ColumnDef::new(Classes::RejectionReason).text().null())
                    .col(
                        ColumnDef::new(Classes::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::InstructorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::ApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课表（每周固定时段）
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassSchedules::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSchedules::DayOfWeek)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSchedules::TimeStart).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::TimeEnd).time().not_null())
                    .col(
                        ColumnDef::new(ClassSchedules::Location)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(ClassSchedules::Notes).text().null())
                    .col(
                        ColumnDef::new(ClassSchedules::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ClassSchedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSchedules::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassSchedules::Table, ClassSchedules::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课记录表
        manager
            .create_table(
                Table::create()
                    .table(ClassEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassEnrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassEnrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(ClassEnrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassEnrollments::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ClassEnrollments::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEnrollments::Table, ClassEnrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 班级表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_instructor_id")
                    .table(Classes::Table)
                    .col(Classes::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_approval_status")
                    .table(Classes::Table)
                    .col(Classes::ApprovalStatus)
                    .to_owned(),
            )
            .await?;

        // 课表索引：同一班级同一天同一开始时间只能有一条
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_class_schedules_slot")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::ClassId)
                    .col(ClassSchedules::DayOfWeek)
                    .col(ClassSchedules::TimeStart)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_schedules_day")
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        // 选课记录索引：同一学生在同一班级只能有一条记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("uq_class_enrollments_class_student")
                    .table(ClassEnrollments::Table)
                    .col(ClassEnrollments::ClassId)
                    .col(ClassEnrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_enrollments_student_status")
                    .table(ClassEnrollments::Table)
                    .col(ClassEnrollments::StudentId)
                    .col(ClassEnrollments::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ClassEnrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    FullName,
    Phone,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    ClassCode,
    ClassName,
    Description,
    InstructorId,
    Level,
    MaxStudents,
    CurrentStudents,
    StartDate,
    EndDate,
    ApprovalStatus,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassSchedules {
    #[sea_orm(iden = "class_schedules")]
    Table,
    Id,
    ClassId,
    DayOfWeek,
    TimeStart,
    TimeEnd,
    Location,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassEnrollments {
    #[sea_orm(iden = "class_enrollments")]
    Table,
    Id,
    ClassId,
    StudentId,
    Status,
    EnrolledAt,
    CompletedAt,
    Notes,
}
