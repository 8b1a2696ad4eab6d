//! Tour package catalogue and lifecycle handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, warn};

use super::dto::{
    FinishedTourPayload, PackageForm, StartTourRequest, TourPackagePage, TourPackagePayload,
    TourPackagesPayload, UploadedImage,
};
use crate::application::TourService;
use crate::domain::Actor;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, ApiResult, PaginationParams, ValidatedJson,
};
use crate::shared::from_minor_units;

/// Public prefix under which stored images are served
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Clone)]
pub struct TourHandlerState {
    pub tours: Arc<TourService>,
    pub uploads_dir: PathBuf,
}

async fn read_form(mut multipart: Multipart) -> ApiResult<PackageForm> {
    let mut form = PackageForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            if !bytes.is_empty() {
                form.image = Some(UploadedImage::new(file_name.as_deref(), bytes)?);
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            form.fields.insert(name, value);
        }
    }
    Ok(form)
}

/// Write the image under `uploads_dir` and return `(path, public url)`.
async fn store_image(dir: &std::path::Path, image: &UploadedImage) -> ApiResult<(PathBuf, String)> {
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), image.extension);
    let path = dir.join(&file_name);
    let write = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &image.bytes).await
    };
    write.await.map_err(|e| {
        warn!(error = %e, dir = %dir.display(), "Failed to store package image");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store image")
    })?;
    Ok((path, format!("{}/{}", UPLOADS_ROUTE, file_name)))
}

/// `POST /TourPackage/registration` (multipart)
pub async fn register_tour_package(
    State(state): State<TourHandlerState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<TourPackagePayload>>)> {
    let form = read_form(multipart).await?;
    let mut input = form.to_publish()?;

    let stored = match &form.image {
        Some(image) => Some(store_image(&state.uploads_dir, image).await?),
        None => None,
    };
    input.image_url = stored.as_ref().map(|(_, url)| url.clone());

    let package = match state.tours.publish(&actor, input).await {
        Ok(package) => package,
        Err(e) => {
            if let Some((path, _)) = stored {
                let _ = tokio::fs::remove_file(path).await;
            }
            return Err(e.into());
        }
    };

    info!(package_id = %package.id, has_image = package.image_url.is_some(), "Tour package registered via API");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Tour package registered successfully",
            TourPackagePayload {
                tour_package: package.into(),
            },
        )),
    ))
}

/// `GET /TourPackage`: packages still open for booking
pub async fn list_tour_packages(
    State(state): State<TourHandlerState>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<TourPackagePage>>> {
    let (page, limit) = pagination.resolve();
    let result = state.tours.list_open(page, limit).await?;
    Ok(Json(ApiResponse::success(
        "Tour packages retrieved",
        result.into(),
    )))
}

/// `GET /TourPackage/{id}`
pub async fn get_tour_package(
    State(state): State<TourHandlerState>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<ApiResponse<TourPackagePayload>>> {
    let package = state.tours.get(&package_id).await?;
    Ok(Json(ApiResponse::success(
        "Tour package retrieved",
        TourPackagePayload {
            tour_package: package.into(),
        },
    )))
}

/// `GET /TourPackage/driver/{id}`
pub async fn list_driver_packages(
    State(state): State<TourHandlerState>,
    Path(driver_id): Path<String>,
) -> ApiResult<Json<ApiResponse<TourPackagesPayload>>> {
    let packages = state.tours.list_by_driver(&driver_id).await?;
    Ok(Json(ApiResponse::success(
        "Tour packages retrieved",
        TourPackagesPayload {
            tour_packages: packages.into_iter().map(Into::into).collect(),
        },
    )))
}

async fn start(
    state: &TourHandlerState,
    actor: &Actor,
    package_id: &str,
) -> ApiResult<Json<ApiResponse<TourPackagePayload>>> {
    let package = state.tours.start(actor, package_id).await?;
    Ok(Json(ApiResponse::success(
        "Tour started",
        TourPackagePayload {
            tour_package: package.into(),
        },
    )))
}

/// `PUT /TourPackage/{id}/start`
pub async fn start_tour_package(
    State(state): State<TourHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<ApiResponse<TourPackagePayload>>> {
    start(&state, &actor, &package_id).await
}

/// `PUT /driver/start-tourpackage`: same operation, id in the body
pub async fn driver_start_tour_package(
    State(state): State<TourHandlerState>,
    Extension(actor): Extension<Actor>,
    ValidatedJson(request): ValidatedJson<StartTourRequest>,
) -> ApiResult<Json<ApiResponse<TourPackagePayload>>> {
    start(&state, &actor, &request.tour_package_id).await
}

/// `PUT /TourPackage/{id}/finish`: finalise and settle held earnings
pub async fn finish_tour_package(
    State(state): State<TourHandlerState>,
    Extension(actor): Extension<Actor>,
    Path(package_id): Path<String>,
) -> ApiResult<Json<ApiResponse<FinishedTourPayload>>> {
    let finished = state.tours.finish(&actor, &package_id).await?;
    let settled_amount: i64 = finished.settled.iter().map(|e| e.amount).sum();
    Ok(Json(ApiResponse::success(
        "Tour finished",
        FinishedTourPayload {
            settled_entries: finished.settled.len(),
            settled_amount: from_minor_units(settled_amount),
            tour_package: finished.package.into(),
        },
    )))
}
