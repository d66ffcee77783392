use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub assignment_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDateTime>,
    pub points_possible: i32,
    pub course_id: i64,
}

impl Assignment {
    /// 截止时间显示文本
    pub fn due_display(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "No due date".to_string())
    }

    /// 编辑表单里 datetime-local 输入框的值
    pub fn due_input_value(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}
