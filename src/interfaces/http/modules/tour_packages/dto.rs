//! Tour package DTOs and the multipart registration form

use std::collections::HashMap;
use std::str::FromStr;

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::PublishPackage;
use crate::domain::{TourPackage, TourType};
use crate::interfaces::http::common::{ApiError, ApiResult, PageMeta};
use crate::shared::{from_minor_units, to_minor_units, PaginatedResult};

/// Accepted image extensions for package pictures
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackageDto {
    pub id: String,
    pub driver_id: String,
    pub car_id: Option<String>,
    pub tourist_point_id: Option<String>,
    pub title: String,
    pub origin_local: String,
    pub destiny_local: String,
    pub date_tour: DateTime<Utc>,
    pub price: Decimal,
    pub seats_available: i32,
    pub vacancies: i32,
    #[serde(rename = "type")]
    pub tour_type: String,
    pub is_running: bool,
    pub is_finalised: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TourPackage> for TourPackageDto {
    fn from(p: TourPackage) -> Self {
        Self {
            id: p.id,
            driver_id: p.driver_id,
            car_id: p.car_id,
            tourist_point_id: p.tourist_point_id,
            title: p.title,
            origin_local: p.origin_local,
            destiny_local: p.destiny_local,
            date_tour: p.date_tour,
            price: from_minor_units(p.price),
            seats_available: p.seats_available,
            vacancies: p.vacancies,
            tour_type: p.tour_type.as_str().to_string(),
            is_running: p.is_running,
            is_finalised: p.is_finalised,
            start_date: p.start_date,
            end_date: p.end_date,
            image_url: p.image_url,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackagePayload {
    pub tour_package: TourPackageDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackagesPayload {
    pub tour_packages: Vec<TourPackageDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackagePage {
    pub tour_packages: Vec<TourPackageDto>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<PaginatedResult<TourPackage>> for TourPackagePage {
    fn from(page: PaginatedResult<TourPackage>) -> Self {
        Self {
            meta: PageMeta {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            },
            tour_packages: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedTourPayload {
    pub tour_package: TourPackageDto,
    pub settled_entries: usize,
    pub settled_amount: Decimal,
}

/// Body of `PUT /driver/start-tourpackage`
#[derive(Debug, Deserialize, Validate)]
pub struct StartTourRequest {
    #[serde(rename = "tourPackageId", alias = "tour_package_id")]
    #[validate(length(min = 1, message = "tourPackageId is required"))]
    pub tour_package_id: String,
}

/// Picture attached to a package registration
#[derive(Debug)]
pub struct UploadedImage {
    pub extension: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(file_name: Option<&str>, bytes: Bytes) -> ApiResult<Self> {
        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                ApiError::bad_request(format!(
                    "image must be one of: {}",
                    IMAGE_EXTENSIONS.join(", ")
                ))
            })?;
        Ok(Self { extension, bytes })
    }
}

/// Text fields and optional image of `POST /TourPackage/registration`
#[derive(Debug, Default)]
pub struct PackageForm {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl PackageForm {
    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> ApiResult<&str> {
        self.text(name)
            .ok_or_else(|| ApiError::bad_request(format!("{} is required", name)))
    }

    fn parsed<T: FromStr>(&self, name: &str) -> ApiResult<T> {
        self.required(name)?
            .parse()
            .map_err(|_| ApiError::bad_request(format!("{} is not a valid value", name)))
    }

    /// Validate the text fields. The image, if any, is stored separately.
    pub fn to_publish(&self) -> ApiResult<PublishPackage> {
        let date_tour = DateTime::parse_from_rfc3339(self.required("dateTour")?)
            .map_err(|_| ApiError::bad_request("dateTour must be an RFC 3339 timestamp"))?
            .with_timezone(&Utc);
        let price: Decimal = self.parsed("price")?;
        let tour_type = TourType::parse(self.required("type")?)
            .ok_or_else(|| ApiError::bad_request("type must be BUGGY, LANCHA or FOUR_BY_FOUR"))?;

        Ok(PublishPackage {
            car_id: self.text("carId").map(str::to_string),
            tourist_point_id: self.text("touristPointId").map(str::to_string),
            title: self.required("title")?.to_string(),
            origin_local: self.required("originLocal")?.to_string(),
            destiny_local: self.required("destinyLocal")?.to_string(),
            date_tour,
            price: to_minor_units(price)?,
            seats_available: self.parsed("seatsAvailable")?,
            tour_type,
            image_url: None,
        })
    }
}
