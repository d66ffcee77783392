//! 路径片段编码

/// 对单个路径片段做百分号编码（保留 RFC 3986 unreserved 字符）
pub fn path_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// 用户主页 `/{username}/`
pub fn user_url(username: &str) -> String {
    format!("/{}/", path_segment(username))
}

/// 课程主页 `/{username}/{course}/`
pub fn course_url(instructor: &str, title: &str) -> String {
    format!("/{}/{}/", path_segment(instructor), path_segment(title))
}

/// 作业操作 `/{username}/{course}/{assignment}/{action}`
pub fn assignment_url(instructor: &str, course: &str, assignment: &str, action: &str) -> String {
    format!(
        "{}{}/{}",
        course_url(instructor, course),
        path_segment(assignment),
        action
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segment_unchanged() {
        assert_eq!(path_segment("test_course"), "test_course");
    }

    #[test]
    fn test_reserved_characters_encoded() {
        assert_eq!(path_segment("Intro to C"), "Intro%20to%20C");
        assert_eq!(path_segment("a/b"), "a%2Fb");
        assert_eq!(path_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_urls() {
        assert_eq!(user_url("derp"), "/derp/");
        assert_eq!(course_url("derp", "Intro C"), "/derp/Intro%20C/");
        assert_eq!(
            assignment_url("derp", "test_course", "test_asn", "edit"),
            "/derp/test_course/test_asn/edit"
        );
    }
}
