//! 缩略图下载器

use actix_web::{Responder, web};
use tracing::debug;

use crate::utils::youtube::thumbnail_variants;
use crate::validation::{YoutubeUrlInput, validate_youtube_url};

use super::error_code::ApiDomain;
use super::helpers::api_result;
use super::types::YoutubeThumbnailsResponse;

pub async fn youtube_thumbnails(body: web::Json<YoutubeUrlInput>) -> impl Responder {
    let result = validate_youtube_url(&body).map(|video_id| {
        debug!("Thumbnail lookup for video {}", video_id);
        YoutubeThumbnailsResponse {
            thumbnails: thumbnail_variants(&video_id),
            video_id,
        }
    });
    api_result(result, ApiDomain::Youtube)
}
