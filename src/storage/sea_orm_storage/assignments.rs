use super::SeaOrmStorage;
use crate::entity::assignments::Model;
use crate::errors::Result;
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};

const ASSIGNMENT_COLUMNS: &str =
    "assignment_id, title, description, due_date, points_possible, course_id";

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let assignment_id = self
            .session
            .insert_returning_id(
                "insert into assignment (title, description, due_date, points_possible, course_id) \
                 values ($1, $2, $3, $4, $5) returning assignment_id",
                vec![
                    req.title.clone().into(),
                    req.description.clone().into(),
                    req.due_date.into(),
                    req.points_possible.into(),
                    req.course_id.into(),
                ],
            )
            .await?;
        self.session.commit().await?;

        Ok(Assignment {
            assignment_id,
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            points_possible: req.points_possible,
            course_id: req.course_id,
        })
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                &format!("select {ASSIGNMENT_COLUMNS} from assignment where assignment_id = $1"),
                vec![assignment_id.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_assignment()))
    }

    /// 通过课程和作业名获取作业
    pub async fn get_course_assignment_impl(
        &self,
        course_id: i64,
        title: &str,
    ) -> Result<Option<Assignment>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                &format!(
                    "select {ASSIGNMENT_COLUMNS} from assignment \
                     where course_id = $1 and title = $2 \
                     order by assignment_id limit 1"
                ),
                vec![course_id.into(), title.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_assignment()))
    }

    /// 课程作业列表，按截止时间排序
    pub async fn list_course_assignments_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let rows: Vec<Model> = self
            .session
            .fetch_many(
                &format!(
                    "select {ASSIGNMENT_COLUMNS} from assignment \
                     where course_id = $1 \
                     order by due_date, title"
                ),
                vec![course_id.into()],
            )
            .await?;

        Ok(rows.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let affected = self
            .session
            .execute_and_commit(
                "update assignment set title = $1, description = $2, due_date = $3, \
                 points_possible = $4 where assignment_id = $5",
                vec![
                    update.title.into(),
                    update.description.into(),
                    update.due_date.into(),
                    update.points_possible.into(),
                    assignment_id.into(),
                ],
            )
            .await?;

        if affected == 0 {
            return Ok(None);
        }
        self.get_assignment_impl(assignment_id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let affected = self
            .session
            .execute_and_commit(
                "delete from assignment where assignment_id = $1",
                vec![assignment_id.into()],
            )
            .await?;
        Ok(affected > 0)
    }
}
