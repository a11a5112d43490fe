//! 配置管理
//!
//! 分层加载：`config.toml` → `config.{APP_ENV}.toml` → `DOJO_*` 环境变量 → 显式覆盖。

#[path = "impl.rs"]
mod loader;
mod structs;

pub use structs::*;
