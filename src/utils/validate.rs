use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::common::FormErrors;

pub const REQUIRED: &str = "This field is required.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9._-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w*$").expect("Invalid word regex"));

static LETTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]*$").expect("Invalid letters regex"));

const DUE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("You must enter a valid email address.");
    }
    Ok(())
}

/// 长度校验（按字符计数）
pub fn validate_length(value: &str, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    let len = value.chars().count();
    let too_short = min.is_some_and(|min| len < min);
    let too_long = max.is_some_and(|max| len > max);
    if !too_short && !too_long {
        return Ok(());
    }

    Err(match (min, max) {
        (Some(min), Some(max)) => {
            format!("Field must be between {min} and {max} characters long.")
        }
        (Some(min), None) => format!("Field must be at least {min} characters long."),
        (_, max) => format!(
            "Field cannot be longer than {} characters.",
            max.unwrap_or_default()
        ),
    })
}

/// 截止时间：`YYYY-MM-DD HH:MM:SS` 或浏览器 datetime-local 的 `YYYY-MM-DDTHH:MM`
pub fn parse_due_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    DUE_DATE_FORMATS[1..].iter().fold(
        NaiveDateTime::parse_from_str(value, DUE_DATE_FORMATS[0]),
        |parsed, format| parsed.or_else(|_| NaiveDateTime::parse_from_str(value, format)),
    )
}

pub fn parse_points(value: &str) -> Result<i32, &'static str> {
    match value.trim().parse::<i32>() {
        Ok(points) if points >= 0 => Ok(points),
        _ => Err("Please enter a positive integer"),
    }
}

/// 单个字段的校验链
///
/// 依次执行校验器并收集错误；`required` / `optional` 遇到空值时终止后续校验。
pub struct FieldCheck<'a> {
    value: &'a str,
    errors: Vec<String>,
    stopped: bool,
}

impl<'a> FieldCheck<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            value,
            errors: Vec::new(),
            stopped: false,
        }
    }

    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn required(mut self) -> Self {
        if !self.stopped && self.is_blank() {
            self.errors.clear();
            self.errors.push(REQUIRED.to_string());
            self.stopped = true;
        }
        self
    }

    pub fn optional(mut self) -> Self {
        if !self.stopped && self.is_blank() {
            self.errors.clear();
            self.stopped = true;
        }
        self
    }

    pub fn length(self, min: Option<usize>, max: Option<usize>) -> Self {
        let value = self.value;
        self.rule(|| validate_length(value, min, max))
    }

    pub fn equal_to(self, other: &str, message: &str) -> Self {
        let matches = self.value == other;
        self.rule(|| {
            if matches {
                Ok(())
            } else {
                Err(message.to_string())
            }
        })
    }

    pub fn email(self) -> Self {
        let value = self.value;
        self.rule(|| validate_email(value).map_err(str::to_string))
    }

    pub fn word(self) -> Self {
        let value = self.value;
        self.rule(|| {
            if WORD_RE.is_match(value) {
                Ok(())
            } else {
                Err("You can only use letters and underscores.".to_string())
            }
        })
    }

    pub fn letters(self) -> Self {
        let value = self.value;
        self.rule(|| {
            if LETTERS_RE.is_match(value) {
                Ok(())
            } else {
                Err("You may only use letters A-Z".to_string())
            }
        })
    }

    /// 自定义校验
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if self.stopped {
            return self;
        }
        if let Err(message) = check() {
            self.errors.push(message);
        }
        self
    }

    pub fn finish(self, field: &str, errors: &mut FormErrors) {
        for message in self.errors {
            errors.add(field, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_messages() {
        assert_eq!(
            validate_length("", Some(1), Some(100)).unwrap_err(),
            "Field must be between 1 and 100 characters long."
        );
        assert_eq!(
            validate_length("pass", Some(9), None).unwrap_err(),
            "Field must be at least 9 characters long."
        );
        assert_eq!(
            validate_length("abcdef", None, Some(5)).unwrap_err(),
            "Field cannot be longer than 5 characters."
        );
        assert!(validate_length("derp", Some(1), Some(100)).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_length("ééé", None, Some(3)).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("derp@codeta_test.com").is_ok());
        assert!(validate_email("someone@example.org").is_ok());
        assert_eq!(
            validate_email("broken").unwrap_err(),
            "You must enter a valid email address."
        );
        assert!(validate_email("broken@").is_err());
    }

    #[test]
    fn test_required_stops_chain() {
        let mut errors = FormErrors::default();
        FieldCheck::new("")
            .length(Some(1), Some(100))
            .required()
            .email()
            .finish("email", &mut errors);
        assert_eq!(errors.field("email"), [REQUIRED.to_string()]);
    }

    #[test]
    fn test_optional_skips_rules() {
        let mut errors = FormErrors::default();
        FieldCheck::new("").optional().letters().finish("first_name", &mut errors);
        assert!(errors.is_empty());

        FieldCheck::new("Bob1")
            .optional()
            .letters()
            .finish("first_name", &mut errors);
        assert!(errors.contains("You may only use letters A-Z"));
    }

    #[test]
    fn test_chain_collects_every_failure() {
        let mut errors = FormErrors::default();
        FieldCheck::new("pass")
            .required()
            .equal_to("other", "Passwords must match.")
            .length(Some(9), None)
            .finish("password", &mut errors);
        assert_eq!(errors.field("password").len(), 2);
        assert!(errors.contains("Passwords must match."));
        assert!(errors.contains("Field must be at least 9 characters long."));
    }

    #[test]
    fn test_word() {
        let mut errors = FormErrors::default();
        FieldCheck::new("test asn").word().finish("title", &mut errors);
        assert!(errors.contains("You can only use letters and underscores."));
    }

    #[test]
    fn test_due_date_formats() {
        let date = parse_due_date("2014-5-4 23:59:59").unwrap();
        assert_eq!(date.to_string(), "2014-05-04 23:59:59");
        assert!(parse_due_date("2014-05-04T23:59").is_ok());
        assert!(parse_due_date("tomorrow").is_err());
    }

    #[test]
    fn test_points() {
        assert_eq!(parse_points("100"), Ok(100));
        assert_eq!(parse_points("0"), Ok(0));
        assert!(parse_points("-1").is_err());
        assert!(parse_points("ten").is_err());
    }
}
