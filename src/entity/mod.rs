//! 数据库行定义
//!
//! 这些类型对应 SQL 查询的结果行，与 models 模块中的业务实体分离。
//! Storage 层查询得到这些行，然后转换为 models 中的业务实体。

pub mod assignments;
pub mod courses;
pub mod users;

use sea_orm::FromQueryResult;

/// `select count(*) as count` 的结果
#[derive(Clone, Debug, FromQueryResult)]
pub struct CountRow {
    pub count: i64,
}
