//! 课程表行

use sea_orm::FromQueryResult;

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct Model {
    pub course_id: i64,
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub description: String,
}

/// 课程列表行，附带授课教师用户名
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct ListingRow {
    pub course_id: i64,
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub instructor: String,
}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;

        Course {
            course_id: self.course_id,
            title: self.title,
            identifier: self.identifier,
            section: self.section,
            description: self.description,
        }
    }
}

impl ListingRow {
    pub fn into_summary(self) -> crate::models::courses::entities::CourseSummary {
        use crate::models::courses::entities::CourseSummary;

        CourseSummary {
            course_id: self.course_id,
            title: self.title,
            identifier: self.identifier,
            section: self.section,
            instructor: self.instructor,
        }
    }
}
