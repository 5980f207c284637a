//! List devices query
//!
//! Filters by status and/or type, or searches by free text. A non-blank `q`
//! takes precedence and the status/type filters are ignored. Search is a
//! case-insensitive substring match over name, IP address and location.

use mediator::Request;
use netdev_common::{DeviceStatus, DeviceType};
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;
use crate::features::shared::pagination::{Paginated, PaginationParams};
use crate::features::shared::validation::{parse_enum, ValidationErrors};
use crate::models::Device;
use crate::store::{DeviceFilter, DeviceQuery, DeviceSort, SharedStore};

/// Query string of `GET /api/v1/devices`
///
/// `?status=ACTIVE&type=ROUTER&q=rack&page=0&size=20&sort=name,asc`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDevicesQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
    /// `field` or `field,asc|desc`
    #[serde(default)]
    pub sort: Option<String>,
}

pub type ListDevicesResponse = Paginated<Device>;

impl Request<ServerResult<ListDevicesResponse>> for ListDevicesQuery {}

impl crate::cqrs::middleware::Query for ListDevicesQuery {}

impl ListDevicesQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }

    /// Resolve the raw parameters into a store query
    ///
    /// Unknown status, type or sort values are rejected even when `q` makes
    /// the filters irrelevant.
    pub fn to_store_query(&self) -> Result<DeviceQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let status: Option<DeviceStatus> =
            parse_enum(&mut errors, "status", self.status.as_deref(), false);
        let device_type: Option<DeviceType> =
            parse_enum(&mut errors, "type", self.device_type.as_deref(), false);

        let sort = match self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => DeviceSort::default(),
            Some(raw) => raw.parse().unwrap_or_else(|message: String| {
                errors.add("sort", message);
                DeviceSort::default()
            }),
        };

        errors.into_result()?;

        let pagination = self.pagination();
        Ok(DeviceQuery {
            filter: DeviceFilter::resolve(status, device_type, self.q.as_deref()),
            sort,
            limit: pagination.size(),
            offset: pagination.offset(),
        })
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, query: ListDevicesQuery) -> ServerResult<ListDevicesResponse> {
    let store_query = query.to_store_query()?;
    let (devices, total) = store.list_devices(&store_query).await?;

    tracing::debug!(count = devices.len(), total, "Devices listed");
    Ok(Paginated::from_items(devices, &query.pagination(), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::features::shared::test_helpers::{memory_store, TestDevice};
    use crate::store::{SortDirection, SortField};

    #[test]
    fn test_defaults() {
        let query = ListDevicesQuery::default().to_store_query().unwrap();
        assert_eq!(query.filter, DeviceFilter::All);
        assert_eq!(query.sort, DeviceSort::default());
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_search_overrides_filters() {
        let query = ListDevicesQuery {
            status: Some("inactive".to_string()),
            device_type: Some("router".to_string()),
            q: Some(" Rack ".to_string()),
            ..Default::default()
        }
        .to_store_query()
        .unwrap();
        assert_eq!(query.filter, DeviceFilter::Search("Rack".to_string()));
    }

    #[test]
    fn test_rejects_unknown_values() {
        let errors = ListDevicesQuery {
            status: Some("sleepy".to_string()),
            device_type: Some("toaster".to_string()),
            sort: Some("colour,up".to_string()),
            ..Default::default()
        }
        .to_store_query()
        .unwrap_err();
        assert!(errors.contains("status"));
        assert!(errors.contains("type"));
        assert!(errors.contains("sort"));
    }

    #[test]
    fn test_sort_and_paging() {
        let query = ListDevicesQuery {
            page: Some(3),
            size: Some(10),
            sort: Some("updated_at,desc".to_string()),
            ..Default::default()
        }
        .to_store_query()
        .unwrap();
        assert_eq!(query.sort.field, SortField::UpdatedAt);
        assert_eq!(query.sort.direction, SortDirection::Desc);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 30);
    }

    #[tokio::test]
    async fn test_list_by_status_and_type() {
        let store = memory_store();
        TestDevice::new("r-active").insert(&store).await;
        TestDevice::new("r-maint").with_status("MAINTENANCE").insert(&store).await;
        TestDevice::new("s-active")
            .with_type(DeviceType::Switch)
            .insert(&store)
            .await;

        let page = handle(
            store.clone(),
            ListDevicesQuery {
                status: Some("ACTIVE".to_string()),
                device_type: Some("ROUTER".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].name, "r-active");

        let page = handle(
            store,
            ListDevicesQuery {
                status: Some("ACTIVE".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_search_matches_location_and_ip() {
        let store = memory_store();
        TestDevice::new("core").with_location("Server RACK 2").insert(&store).await;
        TestDevice::new("edge").with_ip("10.9.8.7").insert(&store).await;
        TestDevice::new("rack-switch")
            .with_status("INACTIVE")
            .insert(&store)
            .await;
        TestDevice::new("other").insert(&store).await;

        let page = handle(
            store.clone(),
            ListDevicesQuery {
                q: Some("rack".to_string()),
                status: Some("ACTIVE".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = page.items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["core", "rack-switch"]);

        let page = handle(
            store,
            ListDevicesQuery {
                q: Some("10.9".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "edge");
    }

    #[tokio::test]
    async fn test_invalid_filter_is_validation_error() {
        let store = memory_store();
        let err = handle(
            store,
            ListDevicesQuery {
                status: Some("NOPE".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
