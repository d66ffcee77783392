use serde::Deserialize;

use crate::models::common::FormErrors;
use crate::utils::validate::FieldCheck;

// 用户创建请求（用于存储层，password 已经是哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// 用户更新请求，None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// 修改姓名表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameForm {
    pub first_name: String,
    pub last_name: String,
}

impl NameForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.first_name)
            .optional()
            .length(None, Some(100))
            .letters()
            .finish("first_name", &mut errors);
        FieldCheck::new(&self.last_name)
            .optional()
            .length(None, Some(100))
            .letters()
            .finish("last_name", &mut errors);
        errors
    }
}

// 修改邮箱表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailForm {
    pub email: String,
    pub confirm_email: String,
}

impl EmailForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.email)
            .required()
            .length(None, Some(100))
            .equal_to(&self.confirm_email, "Email addresses must match.")
            .email()
            .finish("email", &mut errors);
        errors
    }
}

// 修改密码表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.current_password)
            .required()
            .finish("current_password", &mut errors);
        FieldCheck::new(&self.new_password)
            .required()
            .equal_to(&self.confirm_password, "Passwords must match.")
            .length(Some(9), None)
            .finish("new_password", &mut errors);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_form_accepts_blank_and_letters() {
        assert!(NameForm::default().validate().is_empty());
        let form = NameForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_name_form_rejects_digits() {
        let form = NameForm {
            first_name: "Ada2".into(),
            last_name: String::new(),
        };
        assert!(form.validate().contains("You may only use letters A-Z"));
    }

    #[test]
    fn test_email_form_requires_confirmation() {
        let form = EmailForm {
            email: "new@codeta_test.com".into(),
            confirm_email: "old@codeta_test.com".into(),
        };
        assert!(form.validate().contains("Email addresses must match."));
    }

    #[test]
    fn test_password_form() {
        let form = PasswordForm {
            current_password: "old_password".into(),
            new_password: "short".into(),
            confirm_password: "short".into(),
        };
        let errors = form.validate();
        assert!(errors.contains("Field must be at least 9 characters long."));
        assert!(!errors.contains("Passwords must match."));
    }
}
