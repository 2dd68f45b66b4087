mod page;

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::classifier::ImageClassifier;
use crate::error::AppError;
use crate::nutrition::{normalize_label, NutritionClient, NutritionOutcome};

const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const PREVIEW_MAX_EDGE: u32 = 800;
const PREVIEW_JPEG_QUALITY: u8 = 85;

pub struct AppState {
    pub classifier: Arc<dyn ImageClassifier>,
    pub nutrition: NutritionClient,
}

/// What the page renders in the calorie section.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NutritionView {
    Found { data: Value },
    Failed { code: u16, body: String },
    Unavailable { message: String },
}

impl From<NutritionOutcome> for NutritionView {
    fn from(outcome: NutritionOutcome) -> Self {
        match outcome {
            NutritionOutcome::Found { data } => NutritionView::Found { data },
            NutritionOutcome::Failed { code, body } => NutritionView::Failed { code, body },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// JPEG data URL of the uploaded image.
    pub image: String,
    pub label: String,
    pub query: String,
    pub nutrition: NutritionView,
    pub processing_time_ms: u128,
}

pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/upload", post(upload_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let start = Instant::now();

    let data = read_image_field(&mut multipart).await?;
    let img = image::load_from_memory(&data)?;
    let preview = preview_data_url(&img)?;

    let classifier = Arc::clone(&state.classifier);
    let prediction = tokio::task::spawn_blocking(move || classifier.classify(&img))
        .await
        .map_err(|e| AppError::Classification(e.into()))?
        .map_err(AppError::Classification)?;

    info!(label = %prediction.label, score = prediction.score, "predicted food");

    let query = normalize_label(&prediction.label);
    let nutrition = match state.nutrition.lookup(&prediction.label).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            warn!(error = %e, "nutrition lookup unavailable");
            NutritionView::Unavailable {
                message: e.to_string(),
            }
        }
    };

    Ok(Json(AnalysisResponse {
        image: preview,
        label: prediction.label,
        query,
        nutrition,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}

/// Returns the bytes of the uploaded file: the field named `image`, or else
/// the first field that carries a file name.
async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        let file_name = field.file_name().map(str::to_owned);
        if field.name() != Some("image") && file_name.is_none() {
            continue;
        }

        let file_name = file_name.unwrap_or_default();
        if !has_accepted_extension(&file_name) {
            return Err(AppError::UnsupportedFileType(file_name));
        }

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::MissingImage);
        }
        return Ok(data.to_vec());
    }

    Err(AppError::MissingImage)
}

fn has_accepted_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

fn preview_data_url(img: &DynamicImage) -> Result<String, AppError> {
    let small = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
        img.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
    } else {
        img.clone()
    };
    let rgb = DynamicImage::ImageRgb8(small.to_rgb8());

    let mut jpeg_bytes = Vec::new();
    rgb.write_to(
        &mut Cursor::new(&mut jpeg_bytes),
        image::ImageOutputFormat::Jpeg(PREVIEW_JPEG_QUALITY),
    )
    .map_err(AppError::Preview)?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        general_purpose::STANDARD.encode(&jpeg_bytes)
    ))
}
