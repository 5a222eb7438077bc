//! YouTube URL 解析
//!
//! 识别视频、Shorts、播放列表与频道链接，生成缩略图下载地址和移动端 App 深链接。

use serde::Serialize;
use url::Url;

use super::url_validator::parse_http_url;
use crate::storage::models::UrlType;

const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// 缩略图规格（从高到低）
const THUMBNAIL_QUALITIES: &[(&str, &str, u32, u32)] = &[
    ("maxresdefault", "Max Resolution", 1280, 720),
    ("sddefault", "Standard Definition", 640, 480),
    ("hqdefault", "High Quality", 480, 360),
    ("mqdefault", "Medium Quality", 320, 180),
    ("default", "Default", 120, 90),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailVariant {
    pub quality: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

/// 解析出的 YouTube 目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YoutubeTarget {
    Video(String),
    Shorts(String),
    Playlist(String),
    /// 频道路径，不含前导 `/`，如 `channel/UCxxx`、`c/name`、`user/name`、`@handle`
    Channel(String),
}

impl YoutubeTarget {
    pub fn url_type(&self) -> UrlType {
        match self {
            Self::Video(_) => UrlType::Video,
            Self::Shorts(_) => UrlType::Shorts,
            Self::Playlist(_) => UrlType::Playlist,
            Self::Channel(_) => UrlType::Channel,
        }
    }

    /// App 内路径，iOS 与 Android 共用
    fn app_path(&self) -> String {
        match self {
            Self::Video(id) => format!("watch?v={}", id),
            Self::Shorts(id) => format!("shorts/{}", id),
            Self::Playlist(list) => format!("playlist?list={}", list),
            Self::Channel(path) => path.clone(),
        }
    }
}

/// iOS / Android 深链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinks {
    pub ios: String,
    pub android: String,
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com")
}

fn is_short_host(host: &str) -> bool {
    host == "youtu.be" || host == "www.youtu.be"
}

/// YouTube 视频 ID 字符集
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default()
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
}

/// 缩略图下载器接受的三种形状：watch?v=、/embed/<id>、youtu.be/<id>
pub fn watch_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let segs = segments(url);

    let id = if is_short_host(&host) {
        segs.first().map(|s| s.to_string())
    } else if is_youtube_host(&host) {
        match segs.as_slice() {
            ["watch"] => query_param(url, "v"),
            ["embed", id, ..] => Some(id.to_string()),
            _ => None,
        }
    } else {
        None
    };

    id.filter(|id| is_valid_id(id))
}

/// 解析 URL 指向的资源；非 YouTube 或无法识别的路径返回 `None`
pub fn parse_target(url: &Url) -> Option<YoutubeTarget> {
    if let Some(id) = watch_video_id(url) {
        return Some(YoutubeTarget::Video(id));
    }

    let host = url.host_str()?.to_lowercase();
    if !is_youtube_host(&host) {
        return None;
    }

    match segments(url).as_slice() {
        ["shorts", id, ..] if is_valid_id(id) => Some(YoutubeTarget::Shorts(id.to_string())),
        ["playlist"] => query_param(url, "list")
            .filter(|list| is_valid_id(list))
            .map(YoutubeTarget::Playlist),
        [kind @ ("channel" | "c" | "user"), name, ..] if !name.is_empty() => {
            Some(YoutubeTarget::Channel(format!("{}/{}", kind, name)))
        }
        [handle, ..] if handle.starts_with('@') && handle.len() > 1 => {
            Some(YoutubeTarget::Channel(handle.to_string()))
        }
        _ => None,
    }
}

/// 从字符串提取视频 ID（含 Shorts）
pub fn extract_video_id(input: &str) -> Option<String> {
    let url = parse_http_url(input).ok()?;
    match parse_target(&url)? {
        YoutubeTarget::Video(id) | YoutubeTarget::Shorts(id) => Some(id),
        _ => None,
    }
}

/// 识别链接类别
pub fn classify_url(input: &str) -> Option<UrlType> {
    let url = parse_http_url(input).ok()?;
    parse_target(&url).map(|t| t.url_type())
}

/// 为链接生成深链接
///
/// `url_type` 与链接实际类别不一致时返回 `None`。
pub fn deep_links(input: &str, url_type: UrlType) -> Option<DeepLinks> {
    let url = parse_http_url(input).ok()?;
    let target = parse_target(&url)?;
    if target.url_type() != url_type {
        return None;
    }

    let path = target.app_path();
    Some(DeepLinks {
        ios: format!("youtube://{}", path),
        android: format!("vnd.youtube://{}", path),
    })
}

/// 某个视频的全部可下载缩略图
pub fn thumbnail_variants(video_id: &str) -> Vec<ThumbnailVariant> {
    THUMBNAIL_QUALITIES
        .iter()
        .map(|&(quality, label, width, height)| ThumbnailVariant {
            quality,
            label,
            width,
            height,
            url: format!("{}/{}/{}.jpg", THUMBNAIL_HOST, video_id, quality),
        })
        .collect()
}
