use super::SeaOrmStorage;
use crate::config::TitleScope;
use crate::entity::{
    courses::{ListingRow, Model},
    users::Model as UserModel,
};
use crate::errors::Result;
use crate::models::{
    courses::{
        entities::{Course, CourseSummary},
        requests::CreateCourseRequest,
    },
    users::entities::User,
};

impl SeaOrmStorage {
    /// 创建课程：插入课程和授课关系后一次提交
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let course_id = self
            .session
            .insert_returning_id(
                "insert into course (title, identifier, section, description) \
                 values ($1, $2, $3, $4) returning course_id",
                vec![
                    req.title.clone().into(),
                    req.identifier.clone().into(),
                    req.section.clone().into(),
                    req.description.clone().into(),
                ],
            )
            .await?;

        self.session
            .execute(
                "insert into instructor_teaches_course (user_id, course_id) values ($1, $2)",
                vec![req.instructor_id.into(), course_id.into()],
            )
            .await?;
        self.session.commit().await?;

        Ok(Course {
            course_id,
            title: req.title,
            identifier: req.identifier,
            section: req.section,
            description: req.description,
        })
    }

    /// 通过 ID 获取课程
    pub async fn get_course_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                "select course_id, title, identifier, section, description \
                 from course where course_id = $1",
                vec![course_id.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_course()))
    }

    /// 通过教师用户名和课程名获取课程
    pub async fn get_instructor_course_impl(
        &self,
        instructor: &str,
        title: &str,
    ) -> Result<Option<Course>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                "select c.course_id, c.title, c.identifier, c.section, c.description \
                 from course c \
                 join instructor_teaches_course i on i.course_id = c.course_id \
                 join users u on u.user_id = i.user_id \
                 where u.username = $1 and c.title = $2 \
                 order by c.course_id limit 1",
                vec![instructor.into(), title.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_course()))
    }

    /// 教师讲授的课程
    pub async fn list_instructor_courses_impl(&self, user_id: i64) -> Result<Vec<CourseSummary>> {
        let rows: Vec<ListingRow> = self
            .session
            .fetch_many(
                "select c.course_id, c.title, c.identifier, c.section, u.username as instructor \
                 from course c \
                 join instructor_teaches_course i on i.course_id = c.course_id \
                 join users u on u.user_id = i.user_id \
                 where i.user_id = $1 \
                 order by c.title",
                vec![user_id.into()],
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    /// 学生选修的课程
    pub async fn list_student_courses_impl(&self, user_id: i64) -> Result<Vec<CourseSummary>> {
        let rows: Vec<ListingRow> = self
            .session
            .fetch_many(
                "select c.course_id, c.title, c.identifier, c.section, u.username as instructor \
                 from course c \
                 join student_enrolls_course s on s.course_id = c.course_id \
                 join instructor_teaches_course i on i.course_id = c.course_id \
                 join users u on u.user_id = i.user_id \
                 where s.user_id = $1 \
                 order by c.title",
                vec![user_id.into()],
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    /// 课程名是否已存在；检查与插入之间没有加锁
    pub async fn course_title_exists_impl(
        &self,
        user_id: i64,
        title: &str,
        scope: TitleScope,
    ) -> Result<bool> {
        let exists = match scope {
            TitleScope::Instructor => {
                self.session
                    .exists(
                        "select 1 from course c \
                         join instructor_teaches_course i on i.course_id = c.course_id \
                         where i.user_id = $1 and c.title = $2",
                        vec![user_id.into(), title.into()],
                    )
                    .await?
            }
            TitleScope::Global => {
                self.session
                    .exists("select 1 from course where title = $1", vec![title.into()])
                    .await?
            }
        };
        Ok(exists)
    }

    /// 是否为课程教师
    pub async fn is_instructor_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        Ok(self
            .session
            .exists(
                "select 1 from instructor_teaches_course where user_id = $1 and course_id = $2",
                vec![user_id.into(), course_id.into()],
            )
            .await?)
    }

    /// 删除课程及其作业和选课记录
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        for sql in [
            "delete from assignment where course_id = $1",
            "delete from student_enrolls_course where course_id = $1",
            "delete from instructor_teaches_course where course_id = $1",
        ] {
            self.session.execute(sql, vec![course_id.into()]).await?;
        }

        let affected = self
            .session
            .execute_and_commit(
                "delete from course where course_id = $1",
                vec![course_id.into()],
            )
            .await?;

        Ok(affected > 0)
    }

    /// 学生选课
    pub async fn enroll_student_impl(&self, course_id: i64, user_id: i64) -> Result<()> {
        self.session
            .execute_and_commit(
                "insert into student_enrolls_course (user_id, course_id) values ($1, $2)",
                vec![user_id.into(), course_id.into()],
            )
            .await?;
        Ok(())
    }

    /// 是否已选课
    pub async fn is_enrolled_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        Ok(self
            .session
            .exists(
                "select 1 from student_enrolls_course where user_id = $1 and course_id = $2",
                vec![user_id.into(), course_id.into()],
            )
            .await?)
    }

    /// 课程学生名单
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<User>> {
        let rows: Vec<UserModel> = self
            .session
            .fetch_many(
                "select u.user_id, u.username, u.password, u.email, u.first_name, u.last_name \
                 from users u \
                 join student_enrolls_course s on s.user_id = u.user_id \
                 where s.course_id = $1 \
                 order by u.username",
                vec![course_id.into()],
            )
            .await?;

        Ok(rows.into_iter().map(|m| m.into_user()).collect())
    }
}
