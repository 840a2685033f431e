//! DTOs for the group resource.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields::trimmed;
use crate::domain::entities::Group;
use crate::utils::resource_url::ResourceLinks;

/// Request body for `POST /general/groups/` and `PUT /general/groups/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct GroupRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 150,
            message = "Ensure this field has between 1 and 150 characters."
        )
    )]
    pub name: Option<String>,
}

impl GroupRequest {
    pub fn into_name(self) -> String {
        self.name.unwrap_or_default()
    }
}

/// Wire representation of a group: its URL and name only.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub url: String,
    pub name: String,
}

impl GroupResponse {
    pub fn new(group: Group, links: &ResourceLinks) -> Self {
        Self {
            url: links.group(group.id),
            name: group.name,
        }
    }
}
