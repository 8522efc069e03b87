//! 紫夜公会管理系统 - 服务端
//!
//! 公会训练管理的后端：成员档案、课程目录、训练进度、考核/请假/
//! 黑点/退会等记录，以及催训提醒和学员自助门户。
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/       # 配置、状态、服务器
//! ├── auth/       # JWT 认证、口令、中间件
//! ├── training/   # 阶段同步、催训计算、课程重排 (纯函数)
//! ├── api/        # HTTP 路由和处理器
//! ├── db/         # SQLite 连接池、迁移、仓储
//! ├── videohost/  # 视频托管平台客户端
//! └── utils/      # 错误类型、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod training;
pub mod utils;
pub mod videohost;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
 _____ _                  __     __
|__  /(_) _   _   ___     \ \   / /___
  / / | || | | | / _ \     \ \_/ // _ \
 / /_ | || |_| ||  __/      \   /|  __/
/____||_| \__, | \___|       |_|  \___|
          |___/   guild server
    "#
    );
}

/// 启动前的环境准备：dotenv + 日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_dir = config.log_dir();
    let level = if config.is_production() { "info" } else { "debug" };
    init_logger_with_file(Some(level), log_dir.to_str());

    Ok(())
}
