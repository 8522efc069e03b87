//! Video Model (教学视频)
//!
//! 视频托管在第三方平台，这里只保存 slug / 链接等引用信息。

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Imported video reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: i64,
    pub title: String,
    /// 第三方平台的视频标识
    pub slug: String,
    pub url: String,
    pub course_id: Option<i64>,
    pub created_at: i64,
}

/// 从托管平台导入一条视频引用
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VideoImport {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 64))]
    pub slug: String,
    pub course_id: Option<i64>,
}

/// 托管平台上的一条视频 (列表接口透传)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedVideo {
    pub slug: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub folder: Option<String>,
}

/// 托管平台上的目录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedFolder {
    pub id: String,
    pub name: String,
}

/// 请求一条上传链接
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadLinkRequest {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    pub folder: Option<String>,
}

/// 托管平台返回的直传地址
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadLink {
    pub slug: String,
    pub upload_url: String,
}
