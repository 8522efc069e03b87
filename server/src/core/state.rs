use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::admin;
use crate::videohost::VideoHostClient;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/池句柄实现浅拷贝，clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | video_host | Option<Arc<VideoHostClient>> | 视频托管平台客户端 (未配置时为 None) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 视频托管平台客户端
    pub video_host: Option<Arc<VideoHostClient>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/guild.db, 自动迁移)
    /// 3. JWT 服务、视频托管客户端
    /// 4. 管理员引导 (admin 表为空且配置了 ADMIN_PASSWORD 时)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("guild.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let state = Self::with_pool(config.clone(), db_service.pool);

        state.bootstrap_admin().await;

        state
    }

    /// 由现成连接池构造 (测试用 in-memory 池)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let video_host = match (&config.video_api_base_url, &config.video_api_key) {
            (Some(base), Some(key)) => Some(Arc::new(VideoHostClient::new(base, key))),
            _ => None,
        };
        Self {
            config,
            pool,
            jwt_service,
            video_host,
        }
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 视频托管客户端；未配置时报可读错误
    pub fn video_host(&self) -> Result<&VideoHostClient, crate::utils::AppError> {
        self.video_host
            .as_deref()
            .ok_or_else(|| crate::utils::AppError::validation("Video hosting is not configured"))
    }

    /// 首次启动引导管理员账号
    ///
    /// admin 表为空且设置了 ADMIN_PASSWORD 时创建；否则只提示。
    async fn bootstrap_admin(&self) {
        let count = match admin::count(&self.pool).await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!("Failed to count admins: {e}");
                return;
            }
        };
        if count > 0 {
            return;
        }

        let Some(password) = &self.config.bootstrap_admin_password else {
            tracing::warn!(
                "No admin accounts exist and ADMIN_PASSWORD is not set - admin login unavailable"
            );
            return;
        };

        let hash = match crate::auth::hash_password(password) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!("Failed to hash bootstrap admin password: {e}");
                return;
            }
        };

        let username = &self.config.bootstrap_admin_username;
        match admin::create(&self.pool, username, &hash, username).await {
            Ok(_) => tracing::info!(username = %username, "Bootstrap admin account created"),
            Err(e) => tracing::error!("Failed to create bootstrap admin: {e}"),
        }
    }
}
