//! Crustacean DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Crustacean, CrustaceanChanges, CrustaceanFilter, NewCrustacean};
use crate::shared::pagination::{PaginatedResult, PaginationParams};

/// Trims surrounding whitespace before validation sees the value.
fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrustaceanResponse {
    pub id: i32,
    pub name: String,
    pub group: String,
    pub sub_group: String,
    pub description: String,
    pub habitat: String,
    /// Centimeters
    pub average_size: f64,
    pub scientific_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Crustacean> for CrustaceanResponse {
    fn from(c: Crustacean) -> Self {
        Self {
            id: c.id,
            name: c.name,
            group: c.group,
            sub_group: c.sub_group,
            description: c.description,
            habitat: c.habitat,
            average_size: c.average_size,
            scientific_name: c.scientific_name,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Body of `POST /api/crustaceans`. The group is always assigned by the server.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCrustaceanRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters")
    )]
    #[schema(example = "American Lobster")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Sub-group is required"),
        length(min = 1, max = 50, message = "Sub-group must be between 1 and 50 characters")
    )]
    #[schema(example = "Lobster")]
    pub sub_group: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Description is required"),
        length(min = 10, max = 500, message = "Description must be between 10 and 500 characters")
    )]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Habitat is required"),
        length(min = 5, max = 200, message = "Habitat must be between 5 and 200 characters")
    )]
    pub habitat: Option<String>,

    #[validate(
        required(message = "Average size is required"),
        range(min = 0.1, max = 100.0, message = "Average size must be between 0.1 and 100 centimeters")
    )]
    #[schema(example = 25.0)]
    pub average_size: Option<f64>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "Scientific name is required"),
        length(min = 5, max = 100, message = "Scientific name must be between 5 and 100 characters")
    )]
    #[schema(example = "Homarus americanus")]
    pub scientific_name: Option<String>,
}

impl From<CreateCrustaceanRequest> for NewCrustacean {
    /// Call only after validation: missing fields become empty values.
    fn from(r: CreateCrustaceanRequest) -> Self {
        Self {
            name: r.name.unwrap_or_default(),
            sub_group: r.sub_group.unwrap_or_default(),
            description: r.description.unwrap_or_default(),
            habitat: r.habitat.unwrap_or_default(),
            average_size: r.average_size.unwrap_or_default(),
            scientific_name: r.scientific_name.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /api/crustaceans/{id}`: only supplied fields change.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCrustaceanRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Sub-group must be between 1 and 50 characters"))]
    pub sub_group: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 10, max = 500, message = "Description must be between 10 and 500 characters"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 200, message = "Habitat must be between 5 and 200 characters"))]
    pub habitat: Option<String>,

    #[validate(range(min = 0.1, max = 100.0, message = "Average size must be between 0.1 and 100 centimeters"))]
    pub average_size: Option<f64>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 100, message = "Scientific name must be between 5 and 100 characters"))]
    pub scientific_name: Option<String>,
}

impl From<UpdateCrustaceanRequest> for CrustaceanChanges {
    fn from(r: UpdateCrustaceanRequest) -> Self {
        Self {
            name: r.name,
            sub_group: r.sub_group,
            description: r.description,
            habitat: r.habitat,
            average_size: r.average_size,
            scientific_name: r.scientific_name,
        }
    }
}

/// Query of `GET /api/crustaceans`.
///
/// `limit` and `page` arrive as raw strings so a non-integer can be
/// reported in the response envelope instead of a bare extractor error.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCrustaceansParams {
    /// Exact group match
    pub group: Option<String>,
    /// Exact sub-group match (e.g. `Lobster`, `Prawn`, `Shrimp`)
    pub sub_group: Option<String>,
    /// Page size, 1-100 (default 10)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

fn parse_integer(raw: Option<&str>, label: &str, errors: &mut Vec<String>) -> Option<i64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(format!("{} must be an integer", label));
            None
        }
    }
}

impl ListCrustaceansParams {
    pub fn filter(&self) -> CrustaceanFilter {
        CrustaceanFilter::new(self.group.clone(), self.sub_group.clone())
    }

    /// Parses `limit` and `page`; blank values count as absent.
    pub fn pagination(&self) -> Result<PaginationParams, Vec<String>> {
        let mut errors = Vec::new();
        let limit = parse_integer(self.limit.as_deref(), "Limit", &mut errors);
        let page = parse_integer(self.page.as_deref(), "Page", &mut errors);
        if errors.is_empty() {
            Ok(PaginationParams::new(limit, page))
        } else {
            Err(errors)
        }
    }
}

/// Paginated list envelope. Page metadata sits beside `data`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedCrustaceanResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<CrustaceanResponse>,
    pub total_rows: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginatedCrustaceanResponse {
    pub fn new(message: impl Into<String>, result: PaginatedResult<Crustacean>) -> Self {
        let info = result.info;
        Self {
            success: true,
            message: message.into(),
            data: result.items.into_iter().map(CrustaceanResponse::from).collect(),
            total_rows: info.total_rows,
            total_pages: info.total_pages,
            current_page: info.current_page,
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_trims_before_validation() {
        let req: CreateCrustaceanRequest = serde_json::from_value(json!({
            "name": "  A  ",
            "subGroup": "Lobster",
            "description": "Large marine crustacean",
            "habitat": "North Atlantic",
            "averageSize": 25,
            "scientificName": "Homarus americanus"
        }))
        .unwrap();

        assert_eq!(req.name.as_deref(), Some("A"));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn create_request_reports_missing_fields() {
        let req: CreateCrustaceanRequest = serde_json::from_value(json!({})).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 6);
    }

    #[test]
    fn update_request_accepts_empty_body() {
        let req: UpdateCrustaceanRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_ok());
        assert!(CrustaceanChanges::from(req).is_empty());
    }

    #[test]
    fn update_request_checks_only_supplied_fields() {
        let req: UpdateCrustaceanRequest =
            serde_json::from_value(json!({"averageSize": 150})).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn list_params_parse_integers() {
        let params = ListCrustaceansParams {
            limit: Some("5".into()),
            page: Some("".into()),
            ..Default::default()
        };
        assert_eq!(params.pagination().unwrap(), PaginationParams::new(Some(5), None));
    }

    #[test]
    fn list_params_reject_non_integers() {
        let params = ListCrustaceansParams {
            limit: Some("ten".into()),
            page: Some("1.5".into()),
            ..Default::default()
        };
        assert_eq!(
            params.pagination().unwrap_err(),
            vec!["Limit must be an integer", "Page must be an integer"]
        );
    }

    #[test]
    fn empty_filters_mean_no_filter() {
        let params = ListCrustaceansParams {
            group: Some("".into()),
            sub_group: Some("Prawn".into()),
            ..Default::default()
        };
        assert_eq!(params.filter(), CrustaceanFilter::new(None, Some("Prawn".into())));
    }
}
