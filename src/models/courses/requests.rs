use serde::Deserialize;

use crate::models::common::FormErrors;
use crate::utils::validate::FieldCheck;

// 创建课程请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateCourseRequest {
    pub instructor_id: i64,
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub description: String,
}

// 创建课程表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCourseForm {
    pub title: String,
    pub identifier: String,
    pub section: String,
    pub description: String,
}

impl CreateCourseForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.title)
            .required()
            .length(None, Some(100))
            .finish("title", &mut errors);
        FieldCheck::new(&self.identifier)
            .required()
            .length(None, Some(20))
            .finish("identifier", &mut errors);
        FieldCheck::new(&self.section)
            .required()
            .length(None, Some(20))
            .finish("section", &mut errors);
        FieldCheck::new(&self.description)
            .length(None, Some(4096))
            .finish("description", &mut errors);
        errors
    }

    pub fn into_request(self, instructor_id: i64) -> CreateCourseRequest {
        CreateCourseRequest {
            instructor_id,
            title: self.title.trim().to_string(),
            identifier: self.identifier.trim().to_string(),
            section: self.section.trim().to_string(),
            description: self.description,
        }
    }
}

// 删除课程表单：需要重复输入课程名确认
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteCourseForm {
    pub title: String,
    pub confirm: String,
}

impl DeleteCourseForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.title)
            .required()
            .length(None, Some(100))
            .finish("title", &mut errors);
        FieldCheck::new(&self.confirm)
            .required()
            .equal_to(&self.title, "Confirmation must match.")
            .finish("confirm", &mut errors);
        errors
    }
}

// 选课表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrollForm {
    pub student: String,
}

impl EnrollForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.student)
            .required()
            .length(None, Some(100))
            .finish("student", &mut errors);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_form() {
        let form = CreateCourseForm {
            title: "test_course".into(),
            identifier: "CSET".into(),
            section: "001".into(),
            description: "Test course description text".into(),
        };
        assert!(form.validate().is_empty());

        let errors = CreateCourseForm::default().validate();
        assert_eq!(errors.field("title"), ["This field is required.".to_string()]);
        assert_eq!(errors.field("identifier").len(), 1);
        assert!(errors.field("description").is_empty());
    }

    #[test]
    fn test_identifier_too_long() {
        let form = CreateCourseForm {
            title: "test_course".into(),
            identifier: "X".repeat(21),
            section: "001".into(),
            description: String::new(),
        };
        assert!(form
            .validate()
            .contains("Field cannot be longer than 20 characters."));
    }

    #[test]
    fn test_delete_confirmation() {
        let form = DeleteCourseForm {
            title: "test_course".into(),
            confirm: "test_curse".into(),
        };
        assert!(form.validate().contains("Confirmation must match."));
    }
}
