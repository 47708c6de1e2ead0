//! Typed secure DTOs
//!
//! Hand-shaped transfer objects for rows whose safe field set is known in
//! advance. Unlike the generic top-level strip in
//! [`create_secure_dto`](crate::core::sanitize::create_secure_dto), these
//! pick exactly the allowed fields, so nothing sensitive survives at any
//! nesting depth.

use serde::Serialize;
use serde_json::Value;

fn str_field(row: &Value, key: &str) -> Option<String> {
    row.get(key).and_then(Value::as_str).map(str::to_string)
}

fn f64_field(row: &Value, key: &str) -> Option<f64> {
    row.get(key).and_then(Value::as_f64)
}

fn bool_field(row: &Value, key: &str) -> bool {
    row.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Profile as shown to its own user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: Option<String>,
}

impl UserProfileDto {
    /// Build from a profile row, dropping credential and internal fields
    pub fn from_row(row: &Value) -> Self {
        Self {
            id: str_field(row, "id").unwrap_or_default(),
            email: str_field(row, "email"),
            display_name: str_field(row, "display_name"),
            avatar_url: str_field(row, "avatar_url"),
            phone: str_field(row, "phone"),
            role: str_field(row, "role").unwrap_or_else(|| "customer".to_string()),
            created_at: str_field(row, "created_at"),
        }
    }
}

/// Minimal public view of a profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileDto {
    pub id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl PublicProfileDto {
    /// Build from a profile row
    pub fn from_row(row: &Value) -> Self {
        Self {
            id: str_field(row, "id").unwrap_or_default(),
            display_name: str_field(row, "display_name"),
            avatar_url: str_field(row, "avatar_url"),
        }
    }
}

/// Appointment with role-dependent note visibility
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: String,
    pub salon_id: Option<String>,
    pub customer_id: Option<String>,
    pub staff_id: Option<String>,
    pub service_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub total_price: Option<f64>,
    pub confirmation_code: Option<String>,
    /// Present only when the caller may read private notes
    pub notes: Option<String>,
    pub created_at: Option<String>,
}

impl AppointmentDto {
    /// Build from an appointment row; `include_private_notes` controls the
    /// notes field
    pub fn from_row(row: &Value, include_private_notes: bool) -> Self {
        Self {
            id: str_field(row, "id").unwrap_or_default(),
            salon_id: str_field(row, "salon_id"),
            customer_id: str_field(row, "customer_id"),
            staff_id: str_field(row, "staff_id"),
            service_id: str_field(row, "service_id"),
            start_time: str_field(row, "start_time"),
            end_time: str_field(row, "end_time"),
            status: str_field(row, "status"),
            total_price: f64_field(row, "total_price"),
            confirmation_code: str_field(row, "confirmation_code"),
            notes: if include_private_notes {
                str_field(row, "notes")
            } else {
                None
            },
            created_at: str_field(row, "created_at"),
        }
    }
}

/// Public salon listing view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonPublicDto {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub is_accepting_bookings: bool,
    pub is_featured: bool,
    pub is_verified: bool,
    pub rating: Option<f64>,
    pub review_count: u64,
}

impl SalonPublicDto {
    /// Build from a salon row, dropping owner and financial fields
    pub fn from_row(row: &Value) -> Self {
        Self {
            id: str_field(row, "id").unwrap_or_default(),
            name: str_field(row, "name"),
            slug: str_field(row, "slug"),
            description: str_field(row, "description"),
            logo_url: str_field(row, "logo_url"),
            address: str_field(row, "address"),
            city: str_field(row, "city"),
            phone: str_field(row, "phone"),
            email: str_field(row, "email"),
            website: str_field(row, "website"),
            is_active: bool_field(row, "is_active"),
            is_accepting_bookings: bool_field(row, "is_accepting_bookings"),
            is_featured: bool_field(row, "is_featured"),
            is_verified: bool_field(row, "is_verified"),
            rating: f64_field(row, "average_rating"),
            review_count: row
                .get("total_reviews")
                .and_then(Value::as_u64)
                .unwrap_or(0),
        }
    }
}

/// Public staff listing view, professional information only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPublicDto {
    pub id: String,
    pub display_name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub specialties: Vec<String>,
    pub rating: Option<f64>,
    pub is_bookable: bool,
    pub is_featured: bool,
}

impl StaffPublicDto {
    /// Build from a staff row, dropping contact and compensation fields
    pub fn from_row(row: &Value) -> Self {
        let display_name = str_field(row, "display_name").unwrap_or_else(|| {
            let first = str_field(row, "first_name").unwrap_or_default();
            let last = str_field(row, "last_name").unwrap_or_default();
            format!("{} {}", first, last).trim().to_string()
        });
        Self {
            id: str_field(row, "id").unwrap_or_default(),
            display_name,
            title: str_field(row, "title"),
            bio: str_field(row, "bio"),
            avatar_url: str_field(row, "avatar_url"),
            specialties: row
                .get("specialties")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            rating: f64_field(row, "average_rating"),
            is_bookable: bool_field(row, "is_bookable"),
            is_featured: bool_field(row, "is_featured"),
        }
    }
}
