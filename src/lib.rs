//! Rust Dojo System - 武馆排课与选课后端服务
//!
//! 基于 Actix Web 构建，负责开班审批、每周排课冲突检测与学员报名。
//!
//! # 架构
//! - `cache`: 进程内对象缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 处理层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `workflow`: 审批、排课与报名业务流程

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;
