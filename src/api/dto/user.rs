//! DTOs for the user resource.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::fields::{blank_as_none, trimmed};
use crate::application::services::UserInput;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::utils::resource_url::ResourceLinks;

/// Letters, digits and `@ . + - _` only.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

/// Request body for `POST /general/users/` and `PUT /general/users/{id}`.
///
/// `password` is write-only. `groups` holds group URLs as returned by the
/// group endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has between 1 and 150 characters."
        ),
        regex(
            path = *USERNAME_REGEX,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 128,
            message = "Ensure this field has between 1 and 128 characters."
        )
    )]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,

    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,

    #[serde(default)]
    pub groups: Vec<String>,
}

impl UserRequest {
    /// Converts a validated request into service input, resolving group URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on the `groups` field if a URL does not
    /// point at a group resource.
    pub fn into_input(self, links: &ResourceLinks) -> Result<UserInput, AppError> {
        let groups = self
            .groups
            .iter()
            .map(|url| {
                links.parse_group(url).ok_or_else(|| {
                    AppError::field("groups", format!("Invalid hyperlink - No URL match: {url}"))
                })
            })
            .collect::<Result<Vec<i64>, AppError>>()?;

        Ok(UserInput {
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            is_staff: self.is_staff.unwrap_or(false),
            is_active: self.is_active.unwrap_or(true),
            is_superuser: self.is_superuser.unwrap_or(false),
            groups,
        })
    }
}

/// Wire representation of a user.
///
/// Identity is carried by `url`; related groups are listed as URLs.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub url: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    pub groups: Vec<String>,
}

impl UserResponse {
    pub fn new(user: User, links: &ResourceLinks) -> Self {
        Self {
            url: links.user(user.id),
            groups: user.groups.iter().map(|id| links.group(*id)).collect(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_staff: user.is_staff,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            last_login: user.last_login,
            date_joined: user.date_joined,
        }
    }
}
