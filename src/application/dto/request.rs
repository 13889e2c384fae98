//! Request DTOs
//!
//! Forms submitted by the operator, over HTTP or through a console
//! controller. Each carries its field checks as `validator` attributes; the
//! services run them before touching a repository.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::{NewsStatus, PointStatus};
use crate::shared::validation::{
    academic_year, clock_time, iso_date, meaningful_text, non_blank, strong_password,
    CLASS_NAME_RE, PHONE_RE, TAG_NAME_RE, USERNAME_RE, ZIP_CODE_RE,
};

// =============================================================================
// eTour
// =============================================================================

/// Fields of a news item as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewsForm {
    #[validate(
        custom(function = "non_blank", message = "Title cannot be empty"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,

    #[validate(custom(function = "non_blank", message = "Content cannot be empty"))]
    pub content: String,

    #[validate(custom(function = "non_blank", message = "Author cannot be empty"))]
    pub author: String,

    #[validate(custom(
        function = "iso_date",
        message = "Publication date must be in YYYY-MM-DD format"
    ))]
    pub publication_date: String,

    #[serde(default = "default_news_status")]
    #[validate(custom(
        function = "news_status",
        message = "Status must be one of Draft, Published, Archived"
    ))]
    pub status: String,
}

fn default_news_status() -> String {
    NewsStatus::default().to_string()
}

fn news_status(value: &str) -> Result<(), ValidationError> {
    match NewsStatus::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("news_status")),
    }
}

/// Cultural site form, used for insert and modify.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CulturalHeritageForm {
    #[validate(
        custom(function = "non_blank", message = "Name cannot be empty"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "non_blank", message = "City cannot be empty"),
        length(max = 50, message = "City must be at most 50 characters")
    )]
    pub city: String,

    #[validate(custom(function = "non_blank", message = "Kind cannot be empty"))]
    pub kind: String,

    #[validate(
        custom(function = "non_blank", message = "Description cannot be empty"),
        length(max = 2000, message = "Description must be at most 2000 characters")
    )]
    pub description: String,

    #[validate(length(max = 200, message = "Opening hours must be at most 200 characters"))]
    pub opening_hours: Option<String>,
}

/// Search criteria for cultural sites; both optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeritageSearchQuery {
    pub keyword: Option<String>,
    pub city: Option<String>,
}

/// Tourist self-registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TouristRegistrationForm {
    #[validate(regex(
        path = *USERNAME_RE,
        message = "Username must be 3-20 letters, digits or underscores"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        custom(function = "non_blank", message = "First name cannot be empty"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "non_blank", message = "Last name cannot be empty"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,

    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[validate(custom(function = "strong_password"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Profile fields an operator may change on a tourist account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TouristUpdateForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        custom(function = "non_blank", message = "First name cannot be empty"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "non_blank", message = "Last name cannot be empty"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,

    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: Option<String>,

    pub active: Option<bool>,
}

/// A tourist choosing a new password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordChangeForm {
    #[validate(custom(function = "non_blank", message = "Current password cannot be empty"))]
    pub current_password: String,

    #[validate(custom(function = "strong_password"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TouristSearchQuery {
    /// Fragment of username, first or last name
    pub name: Option<String>,
    pub active: Option<bool>,
}

/// Card of a refreshment point as edited by the operator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshmentPointForm {
    #[validate(
        custom(function = "non_blank", message = "Name cannot be empty"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "non_blank", message = "City cannot be empty"),
        length(max = 50, message = "City must be at most 50 characters")
    )]
    pub city: String,

    #[validate(
        custom(function = "non_blank", message = "Address cannot be empty"),
        length(max = 200, message = "Address must be at most 200 characters")
    )]
    pub address: String,

    #[serde(default = "default_point_status")]
    #[validate(custom(
        function = "point_status",
        message = "Status must be one of Open, Closed, Under Maintenance"
    ))]
    pub status: String,

    #[validate(range(min = 1, max = 10000, message = "Capacity must be a positive number"))]
    pub capacity: Option<u32>,

    #[validate(length(max = 200, message = "Opening hours must be at most 200 characters"))]
    pub opening_hours: Option<String>,
}

fn default_point_status() -> String {
    PointStatus::default().to_string()
}

fn point_status(value: &str) -> Result<(), ValidationError> {
    match PointStatus::parse(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("point_status")),
    }
}

/// Search criteria for refreshment points; both optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointSearchQuery {
    /// Fragment of the point's name
    pub name: Option<String>,
    pub city: Option<String>,
}

/// A search tag offered to tourists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagForm {
    #[validate(regex(
        path = *TAG_NAME_RE,
        message = "Tag name must be 2-30 letters, digits, hyphens or underscores"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagSearchQuery {
    pub keyword: Option<String>,
}

/// Tags picked for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagSelection {
    #[validate(length(min = 1, message = "Select at least one tag"))]
    pub ids: Vec<i64>,
}

/// A refreshment point's menu for one day.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuForm {
    #[validate(
        length(min = 1, message = "At least one dish is required"),
        custom(function = "dish_names")
    )]
    pub dishes: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "Special notes must be at most 500 characters"))]
    pub special_notes: String,
}

fn dish_names(dishes: &[String]) -> Result<(), ValidationError> {
    if dishes.iter().any(|d| d.trim().is_empty()) {
        let mut err = ValidationError::new("blank_dish");
        err.message = Some("Dish names cannot be empty".into());
        return Err(err);
    }
    if dishes.iter().any(|d| d.chars().count() > 100) {
        let mut err = ValidationError::new("long_dish");
        err.message = Some("Dish names must be at most 100 characters".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackForm {
    pub tourist_id: i64,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[serde(default)]
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: String,
}

// =============================================================================
// SMOS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressForm {
    #[validate(
        custom(function = "non_blank", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(
        custom(function = "non_blank", message = "Street is required"),
        length(max = 200, message = "Street must be at most 200 characters")
    )]
    pub street: String,

    #[validate(
        custom(function = "non_blank", message = "City is required"),
        length(max = 50, message = "City must be at most 50 characters")
    )]
    pub city: String,

    #[validate(regex(
        path = *ZIP_CODE_RE,
        message = "Zip code must be 5 digits, optionally followed by -4 digits"
    ))]
    pub zip_code: String,

    #[validate(
        custom(function = "non_blank", message = "Country is required"),
        length(max = 50, message = "Country must be at most 50 characters")
    )]
    pub country: String,

    #[serde(default)]
    pub associated_classes: Vec<String>,
}

/// A class held at an address in one academic year.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassForm {
    #[validate(
        custom(function = "non_blank", message = "Class name cannot be empty"),
        length(max = 100, message = "Class name must be at most 100 characters"),
        regex(
            path = *CLASS_NAME_RE,
            message = "Class name can only contain letters, digits, spaces and hyphens"
        )
    )]
    pub name: String,

    #[validate(custom(function = "academic_year"))]
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassQuery {
    /// `YYYY-YYYY`; all years when absent
    pub academic_year: Option<String>,
}

/// Teachings to add to and take off an address in one go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeachingAssignmentForm {
    #[serde(default)]
    pub assign: Vec<i64>,
    #[serde(default)]
    pub remove: Vec<i64>,
}

/// A delay recorded in the class register.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LateEntryForm {
    pub student_id: i64,

    #[validate(custom(function = "iso_date", message = "Date must be in YYYY-MM-DD format"))]
    pub date: String,

    #[validate(custom(function = "clock_time", message = "Time must be in HH:MM format"))]
    pub entry_time: String,

    #[validate(length(max = 200, message = "Note must be at most 200 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LateEntryQuery {
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JustificationForm {
    #[validate(
        length(min = 5, max = 500, message = "Reason must be between 5 and 500 characters"),
        custom(function = "meaningful_text", message = "Reason must contain words")
    )]
    pub reason: String,
}

// =============================================================================
// Accounts and simulation
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "non_blank", message = "Username cannot be empty"))]
    pub username: String,

    #[validate(custom(function = "non_blank", message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleAssignmentRequest {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionToggleRequest {
    pub connected: bool,
}
