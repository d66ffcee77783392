use serde::Deserialize;

use crate::models::common::FormErrors;
use crate::utils::validate::FieldCheck;

// 登录表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        FieldCheck::new(&self.username)
            .required()
            .finish("username", &mut errors);
        FieldCheck::new(&self.password)
            .required()
            .finish("password", &mut errors);
        errors
    }
}

// 注册表单
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub confirm_email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationForm {
    /// 字段格式校验；用户名是否被占用由服务层检查
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        // 用户名会出现在 URL 和提交目录中
        FieldCheck::new(&self.username)
            .length(Some(1), Some(100))
            .word()
            .finish("username", &mut errors);

        FieldCheck::new(&self.email)
            .length(Some(1), Some(100))
            .required()
            .equal_to(&self.confirm_email, "Email addresses must match.")
            .email()
            .finish("email", &mut errors);

        FieldCheck::new(&self.confirm_email)
            .length(Some(3), Some(100))
            .finish("confirm_email", &mut errors);

        FieldCheck::new(&self.password)
            .required()
            .equal_to(&self.confirm_password, "Passwords must match.")
            .length(Some(9), None)
            .finish("password", &mut errors);

        FieldCheck::new(&self.first_name)
            .length(Some(1), Some(100))
            .finish("first_name", &mut errors);

        FieldCheck::new(&self.last_name)
            .length(Some(1), Some(100))
            .finish("last_name", &mut errors);

        errors
    }

    /// 重新渲染时不回填密码
    pub fn without_passwords(mut self) -> Self {
        self.password.clear();
        self.confirm_password.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm.into(),
            email: "derp@codeta_test.com".into(),
            confirm_email: "derp@codeta_test.com".into(),
            first_name: username.into(),
            last_name: username.into(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration("derp", "derp_password", "derp_password")
            .validate()
            .is_empty());
    }

    #[test]
    fn test_empty_username() {
        let errors = registration("", "derp_password", "derp_password").validate();
        assert!(errors.contains("Field must be between 1 and 100 characters long."));
    }

    #[test]
    fn test_missing_password() {
        let errors = registration("derp", "", "").validate();
        assert_eq!(errors.field("password"), ["This field is required.".to_string()]);
    }

    #[test]
    fn test_username_must_be_a_word() {
        for username in ["../../escape", "a/b", "two words", ".."] {
            let errors = registration(username, "derp_password", "derp_password").validate();
            assert_eq!(
                errors.field("username"),
                ["You can only use letters and underscores.".to_string()],
                "{username}"
            );
        }
        assert!(registration("test_student2", "derp_password", "derp_password")
            .validate()
            .is_empty());
    }

    #[test]
    fn test_password_mismatch_and_length() {
        let errors = registration("derp", "pass", "derp").validate();
        assert!(errors.contains("Passwords must match."));
        assert!(errors.contains("Field must be at least 9 characters long."));
    }

    #[test]
    fn test_email_checks() {
        let mut form = registration("derp", "derp_password", "derp_password");
        form.email = "broken".into();
        form.confirm_email = "broken".into();
        assert!(form.validate().contains("You must enter a valid email address."));

        let mut form = registration("derp", "derp_password", "derp_password");
        form.email = "broken@broken.com".into();
        assert!(form.validate().contains("Email addresses must match."));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate();
        assert_eq!(errors.field("username").len(), 1);
        assert_eq!(errors.field("password").len(), 1);
    }
}
