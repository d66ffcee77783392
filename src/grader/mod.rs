//! 学生提交的处理

pub mod archive;
