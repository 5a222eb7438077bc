use serde::Deserialize;

use super::non_blank;
use crate::errors::{GinywowError, Result};
use crate::utils::url_validator::parse_http_url;
use crate::utils::youtube::watch_video_id;

/// Thumbnail downloader form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct YoutubeUrlInput {
    pub url: Option<String>,
}

/// 返回视频 ID
pub fn validate_youtube_url(input: &YoutubeUrlInput) -> Result<String> {
    non_blank(input.url.as_ref())
        .and_then(|raw| parse_http_url(raw).ok())
        .and_then(|url| watch_video_id(&url))
        .ok_or_else(|| GinywowError::validation("Please enter a valid YouTube URL"))
}
