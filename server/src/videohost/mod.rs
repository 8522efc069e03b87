//! 视频托管平台客户端
//!
//! 教学视频托管在第三方平台，这里只做透传：列目录、列视频、
//! 申请直传地址。平台侧的数据结构对我们是黑盒，只取 slug/标题/链接。

use serde::Deserialize;

use crate::utils::AppError;
use shared::models::{HostedFolder, HostedVideo, UploadLink};

/// 平台客户端 (Authorization: AccessKey 头)
#[derive(Debug, Clone)]
pub struct VideoHostClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// 平台返回的视频条目 (只解析用得到的字段)
#[derive(Debug, Deserialize)]
struct ProviderVideo {
    guid: String,
    title: String,
    #[serde(default)]
    folder: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderVideoList {
    items: Vec<ProviderVideo>,
}

#[derive(Debug, Deserialize)]
struct ProviderFolder {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProviderFolderList {
    items: Vec<ProviderFolder>,
}

#[derive(Debug, Deserialize)]
struct ProviderUploadTicket {
    guid: String,
    upload_url: String,
}

impl VideoHostClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// 播放链接 (slug 即平台 guid)
    pub fn video_url(&self, slug: &str) -> String {
        format!("{}/play/{slug}", self.base_url)
    }

    /// 列出平台上的视频，可按目录过滤
    pub async fn list_videos(&self, folder: Option<&str>) -> Result<Vec<HostedVideo>, AppError> {
        let mut req = self
            .http
            .get(format!("{}/videos", self.base_url))
            .header("AccessKey", &self.api_key);
        if let Some(folder) = folder {
            req = req.query(&[("folder", folder)]);
        }

        let list: ProviderVideoList = send_json(req).await?;
        Ok(list
            .items
            .into_iter()
            .map(|v| HostedVideo {
                url: self.video_url(&v.guid),
                slug: v.guid,
                title: v.title,
                folder: v.folder,
            })
            .collect())
    }

    /// 列出平台上的目录
    pub async fn list_folders(&self) -> Result<Vec<HostedFolder>, AppError> {
        let req = self
            .http
            .get(format!("{}/folders", self.base_url))
            .header("AccessKey", &self.api_key);

        let list: ProviderFolderList = send_json(req).await?;
        Ok(list
            .items
            .into_iter()
            .map(|f| HostedFolder {
                id: f.id,
                name: f.name,
            })
            .collect())
    }

    /// 申请一条直传地址 (前端拿 upload_url 直接上传到平台)
    pub async fn create_upload_link(
        &self,
        title: &str,
        folder: Option<&str>,
    ) -> Result<UploadLink, AppError> {
        let req = self
            .http
            .post(format!("{}/videos", self.base_url))
            .header("AccessKey", &self.api_key)
            .json(&serde_json::json!({ "title": title, "folder": folder }));

        let ticket: ProviderUploadTicket = send_json(req).await?;
        Ok(UploadLink {
            slug: ticket.guid,
            upload_url: ticket.upload_url,
        })
    }
}

/// 发送请求并解析 JSON；非 2xx 一律归为上游错误
async fn send_json<T: serde::de::DeserializeOwned>(
    req: reqwest::RequestBuilder,
) -> Result<T, AppError> {
    let resp = req
        .send()
        .await
        .map_err(|e| AppError::upstream(format!("Video host unreachable: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::upstream(format!(
            "Video host returned {status}"
        )));
    }

    resp.json::<T>()
        .await
        .map_err(|e| AppError::upstream(format!("Video host returned malformed payload: {e}")))
}
