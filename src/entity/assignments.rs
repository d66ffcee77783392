//! 作业表行

use chrono::NaiveDateTime;
use sea_orm::FromQueryResult;

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct Model {
    pub assignment_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDateTime>,
    pub points_possible: i32,
    pub course_id: i64,
}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;

        Assignment {
            assignment_id: self.assignment_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            points_possible: self.points_possible,
            course_id: self.course_id,
        }
    }
}
