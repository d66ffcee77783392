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
                        ColumnDef::new(Users::UserId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表（标题唯一性由应用层按配置检查，不建唯一约束）
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::CourseId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Course::Identifier).string_len(20).not_null())
                    .col(ColumnDef::new(Course::Section).string_len(20).not_null())
                    .col(ColumnDef::new(Course::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师授课关联表
        manager
            .create_table(
                Table::create()
                    .table(InstructorTeachesCourse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstructorTeachesCourse::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorTeachesCourse::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(InstructorTeachesCourse::UserId)
                            .col(InstructorTeachesCourse::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                InstructorTeachesCourse::Table,
                                InstructorTeachesCourse::UserId,
                            )
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                InstructorTeachesCourse::Table,
                                InstructorTeachesCourse::CourseId,
                            )
                            .to(Course::Table, Course::CourseId),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生选课关联表
        manager
            .create_table(
                Table::create()
                    .table(StudentEnrollsCourse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentEnrollsCourse::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEnrollsCourse::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(StudentEnrollsCourse::UserId)
                            .col(StudentEnrollsCourse::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentEnrollsCourse::Table, StudentEnrollsCourse::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentEnrollsCourse::Table, StudentEnrollsCourse::CourseId)
                            .to(Course::Table, Course::CourseId),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignment::AssignmentId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignment::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Assignment::Description).text().not_null())
                    .col(ColumnDef::new(Assignment::DueDate).date_time().null())
                    .col(
                        ColumnDef::new(Assignment::PointsPossible)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignment::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignment::Table, Assignment::CourseId)
                            .to(Course::Table, Course::CourseId),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_course_id")
                    .table(Assignment::Table)
                    .col(Assignment::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_enrolls_course_course_id")
                    .table(StudentEnrollsCourse::Table)
                    .col(StudentEnrollsCourse::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentEnrollsCourse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InstructorTeachesCourse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Username,
    Password,
    Email,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
    Title,
    Identifier,
    Section,
    Description,
}

#[derive(DeriveIden)]
enum InstructorTeachesCourse {
    Table,
    UserId,
    CourseId,
}

#[derive(DeriveIden)]
enum StudentEnrollsCourse {
    Table,
    UserId,
    CourseId,
}

#[derive(DeriveIden)]
enum Assignment {
    Table,
    AssignmentId,
    Title,
    Description,
    DueDate,
    PointsPossible,
    CourseId,
}
