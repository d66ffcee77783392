use chrono::NaiveDateTime;
use serde::Deserialize;

use super::entities::Assignment;
use crate::models::common::FormErrors;
use crate::utils::validate::{FieldCheck, parse_due_date, parse_points};

// 创建作业请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDateTime>,
    pub points_possible: i32,
}

// 更新作业请求，编辑表单总是提交全部字段
#[derive(Debug, Clone)]
pub struct UpdateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDateTime>,
    pub points_possible: i32,
}

// 创建 / 编辑作业表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignmentForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub points: String,
}

impl AssignmentForm {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            due_date: assignment.due_input_value(),
            points: assignment.points_possible.to_string(),
        }
    }

    pub fn validate(&self) -> FormErrors {
        self.parse(0).err().unwrap_or_default()
    }

    /// 校验并转换为存储层请求
    pub fn parse(&self, course_id: i64) -> Result<CreateAssignmentRequest, FormErrors> {
        let mut errors = FormErrors::default();

        FieldCheck::new(&self.title)
            .required()
            .length(None, Some(100))
            .word()
            .finish("title", &mut errors);
        FieldCheck::new(&self.description)
            .required()
            .length(None, Some(50000))
            .finish("description", &mut errors);

        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            match parse_due_date(&self.due_date) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("due_date", "Please enter a date as YYYY-MM-DD HH:MM:SS");
                    None
                }
            }
        };

        let mut points = None;
        FieldCheck::new(&self.points)
            .required()
            .rule(|| {
                points = Some(parse_points(&self.points)?);
                Ok(())
            })
            .finish("points", &mut errors);

        match points {
            Some(points_possible) if errors.is_empty() => Ok(CreateAssignmentRequest {
                course_id,
                title: self.title.trim().to_string(),
                description: self.description.clone(),
                due_date,
                points_possible,
            }),
            _ => Err(errors),
        }
    }
}

impl From<CreateAssignmentRequest> for UpdateAssignmentRequest {
    fn from(req: CreateAssignmentRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            points_possible: req.points_possible,
        }
    }
}

// 删除作业表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAssignmentForm {
    pub title: String,
    pub confirm: String,
}

impl DeleteAssignmentForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.title)
            .required()
            .length(None, Some(100))
            .word()
            .finish("title", &mut errors);
        FieldCheck::new(&self.confirm)
            .required()
            .equal_to(&self.title, "Confirmation must match the title")
            .finish("confirm", &mut errors);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AssignmentForm {
        AssignmentForm {
            title: "test_asn".into(),
            description: "This is a test course".into(),
            due_date: "2014-5-4 23:59:59".into(),
            points: "100".into(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let req = form().parse(7).unwrap();
        assert_eq!(req.course_id, 7);
        assert_eq!(req.points_possible, 100);
        assert!(req.due_date.is_some());
    }

    #[test]
    fn test_blank_due_date_is_allowed() {
        let mut f = form();
        f.due_date = String::new();
        assert_eq!(f.parse(1).unwrap().due_date, None);
    }

    #[test]
    fn test_negative_points() {
        let mut f = form();
        f.points = "-5".into();
        assert!(f.validate().contains("Please enter a positive integer"));
    }

    #[test]
    fn test_title_must_be_word() {
        let mut f = form();
        f.title = "test asn!".into();
        assert!(f
            .validate()
            .contains("You can only use letters and underscores."));
    }

    #[test]
    fn test_delete_confirmation() {
        let f = DeleteAssignmentForm {
            title: "test_asn".into(),
            confirm: "other".into(),
        };
        assert!(f.validate().contains("Confirmation must match the title"));
    }
}
