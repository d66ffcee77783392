use super::SeaOrmStorage;
use crate::entity::{CountRow, users::Model};
use crate::errors::Result;
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
};

const USER_COLUMNS: &str = "user_id, username, password, email, first_name, last_name";

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let user_id = self
            .session
            .insert_returning_id(
                "insert into users (username, password, email, first_name, last_name) \
                 values ($1, $2, $3, $4, $5) returning user_id",
                vec![
                    req.username.clone().into(),
                    req.password.clone().into(),
                    req.email.clone().into(),
                    req.first_name.clone().into(),
                    req.last_name.clone().into(),
                ],
            )
            .await?;
        self.session.commit().await?;

        Ok(User {
            user_id,
            username: req.username,
            password_hash: req.password,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
        })
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, user_id: i64) -> Result<Option<User>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                &format!("select {USER_COLUMNS} from users where user_id = $1"),
                vec![user_id.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let row: Option<Model> = self
            .session
            .fetch_optional(
                &format!("select {USER_COLUMNS} from users where username = $1"),
                vec![username.into()],
            )
            .await?;

        Ok(row.map(|m| m.into_user()))
    }

    /// 用户名是否已被占用
    pub async fn username_exists_impl(&self, username: &str) -> Result<bool> {
        Ok(self
            .session
            .exists(
                "select 1 from users where username = $1",
                vec![username.into()],
            )
            .await?)
    }

    /// 更新用户，None 字段保持原值
    pub async fn update_user_impl(
        &self,
        user_id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let affected = self
            .session
            .execute_and_commit(
                "update users set \
                 password = coalesce($1, password), \
                 email = coalesce($2, email), \
                 first_name = coalesce($3, first_name), \
                 last_name = coalesce($4, last_name) \
                 where user_id = $5",
                vec![
                    update.password.into(),
                    update.email.into(),
                    update.first_name.into(),
                    update.last_name.into(),
                    user_id.into(),
                ],
            )
            .await?;

        if affected == 0 {
            return Ok(None);
        }
        self.get_user_by_id_impl(user_id).await
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        let row: CountRow = self
            .session
            .fetch_one("select count(*) as count from users", vec![])
            .await?;
        Ok(row.count.max(0) as u64)
    }
}
