//! 用户表行

use sea_orm::FromQueryResult;

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct Model {
    pub user_id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// 从数据库行转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::User;

        User {
            user_id: self.user_id,
            username: self.username,
            password_hash: self.password,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
