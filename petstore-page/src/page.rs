//! Data loading for the pet page: image pre-check, optional upload, pet lookup.

use anyhow::{Context, Result};
use petstore_client::{ApiClient, ClientError};
use petstore_core::{
    ArgValue, BinaryPayload, EntityName, ExecutionContext, FileHandle, ValidationError,
    check_is_file_like, registry,
};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v3";
pub const DEFAULT_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/5/50/Adobe_Illustrator_icon.png";

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub base_url: String,
    pub pet_id: i64,
    pub image_url: String,
    pub upload: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            pet_id: 1,
            image_url: DEFAULT_IMAGE_URL.to_string(),
            upload: false,
        }
    }
}

/// Everything the page shows
#[derive(Debug, Clone)]
pub struct PageData {
    pub pet_id: i64,
    pub image_size: usize,
    /// `ApiResponse` of the upload, if one was requested
    pub upload: Option<Value>,
    pub pet: Value,
}

struct Image {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// Runs one page load: every step completes before the next one starts
pub async fn get_data(config: &PageConfig) -> Result<PageData> {
    let http = reqwest::Client::new();
    let image = fetch_image(&http, &config.image_url).await?;
    let image_size = image.bytes.len();

    check_is_file_like(
        ExecutionContext::Server,
        ArgValue::Binary(BinaryPayload::Buffer(image.bytes.clone())),
    )
    .inspect_err(|e| report_validation("downloaded image", e))
    .context("Downloaded image is not a byte buffer")?;
    log::info!("image is a valid {image_size} byte buffer");

    let upload = if config.upload {
        Some(upload_image(config, &http, image).await?)
    } else {
        None
    };

    let client = ApiClient::new(&config.base_url).with_http_client(http);
    let pet = client
        .get_pet_by_id(config.pet_id)
        .await
        .inspect_err(|e| report_client("get pet", e))
        .context(format!("Failed to load pet {}", config.pet_id))?;
    let pet = registry()
        .validate_entity(EntityName::Pet, &pet)
        .inspect_err(|e| report_validation("pet", e))
        .context(format!("Pet {} has an unexpected shape", config.pet_id))?;

    Ok(PageData {
        pet_id: config.pet_id,
        image_size,
        upload,
        pet,
    })
}

async fn fetch_image(http: &reqwest::Client, url: &str) -> Result<Image> {
    let response = http
        .get(url)
        .send()
        .await
        .context(format!("Failed to download image from {}", url))?
        .error_for_status()
        .context(format!("Image download from {} was refused", url))?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .bytes()
        .await
        .context("Failed to read image body")?;
    Ok(Image {
        bytes: bytes.to_vec(),
        content_type,
    })
}

async fn upload_image(config: &PageConfig, http: &reqwest::Client, image: Image) -> Result<Value> {
    let mut file = FileHandle::new("filename", image.bytes);
    if let Some(content_type) = image.content_type {
        file = file.with_content_type(content_type);
    }
    let payload = check_is_file_like(ExecutionContext::Client, ArgValue::Binary(file.into()))
        .inspect_err(|e| report_validation("image file", e))
        .context("Image is not a file handle")?;

    let client = ApiClient::new(&config.base_url)
        .with_context(ExecutionContext::Client)
        .with_http_client(http.clone());
    let response = client
        .upload_file(config.pet_id, payload, None)
        .await
        .inspect_err(|e| report_client("upload image", e))
        .context(format!("Failed to upload image for pet {}", config.pet_id))?;
    let response = registry()
        .validate_entity(EntityName::ApiResponse, &response)
        .inspect_err(|e| report_validation("upload response", e))
        .context("Upload response has an unexpected shape")?;
    log::info!("uploaded image for pet {}", config.pet_id);
    Ok(response)
}

fn report_validation(what: &str, e: &ValidationError) {
    log::error!("{what} failed validation:\n{}", e.report());
}

fn report_client(what: &str, e: &ClientError) {
    match e {
        ClientError::Validation(v) => report_validation(what, v),
        ClientError::Http(h) => log::error!("{what}: server answered {} with '{}'", h.status, h.body),
        other => log::error!("{what}: {other}"),
    }
}
