use serde::{Deserialize, Serialize};

use crate::utils::url::course_url;

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub course_id: i64,
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub description: String,
}

// 课程列表项，附带授课教师
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseSummary {
    pub course_id: i64,
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub instructor: String,
}

impl CourseSummary {
    /// 课程主页地址
    pub fn url(&self) -> String {
        course_url(&self.instructor, &self.title)
    }
}
