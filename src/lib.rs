//! CodeTA - 课程管理系统
//!
//! 基于 Actix Web 构建的服务端渲染课程管理应用：教师创建课程、登记学生、发布作业，
//! 学生以 zip 压缩包提交作业。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: 数据库行定义
//! - `errors`: 统一错误处理
//! - `grader`: 提交压缩包解压
//! - `middlewares`: 请求作用域与登录检查中间件
//! - `models`: 业务实体与表单
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（请求级会话 + SeaORM）
//! - `utils`: 工具函数
//! - `views`: askama 页面渲染

pub mod config;
pub mod entity;
pub mod errors;
pub mod grader;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;
