//! 认证模块 - JWT + Argon2
//!
//! 管理端和学员端使用不同的令牌命名空间 (aud 不同)，
//! 中间件按路径强制对应角色。

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, Role};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
