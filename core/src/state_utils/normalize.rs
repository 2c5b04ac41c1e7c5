//! Normalization of paged list responses.
//!
//! A list response is split into an id-keyed map of records and the page of
//! ids in response order. The map feeds the entity cache for that record type;
//! the page is stored under the query's key (see [`serialize_search_config`]).
//! Records that repeat an id keep one position each in the page while the
//! map holds the last one.

use super::entity::EntityState;
use super::processes::ProcessesLoaderState;
use crate::error::StateError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pagination of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationModel {
    /// Zero-based page index
    pub current_page: u32,
    /// Records per page
    pub page_size: u32,
    /// Active sort code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Number of pages
    pub total_pages: u32,
    /// Number of records across all pages
    pub total_results: u64,
}

/// Sort option offered by a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortModel {
    /// Sort code
    pub code: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether this sort is active
    #[serde(default)]
    pub selected: bool,
}

/// A page of full records as returned by a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitiesModel<T> {
    /// Records in response order
    pub values: Vec<T>,
    /// Pagination, if the endpoint pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationModel>,
    /// Sort options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortModel>,
}

/// A page of ids, stored per query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListModel {
    /// Ids in response order, repeats preserved
    pub ids: Vec<String>,
    /// Pagination of the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationModel>,
    /// Sort options of the response
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortModel>,
}

/// Result of [`normalize_list_page`]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListPage<T> {
    /// Records by id, last occurrence wins
    pub values: HashMap<String, T>,
    /// Page of ids
    pub page: ListModel,
}

impl<T> NormalizedListPage<T> {
    /// Records in first-appearance order of their id, plus the page
    #[must_use]
    pub fn into_ordered_parts(self) -> (Vec<T>, ListModel) {
        let Self { mut values, page } = self;
        let ordered = page.ids.iter().filter_map(|id| values.remove(id)).collect();
        (ordered, page)
    }
}

/// Split a list response using a typed id extractor
pub fn normalize_list_page<T, F>(list: EntitiesModel<T>, mut id_of: F) -> NormalizedListPage<T>
where
    F: FnMut(&T) -> String,
{
    let mut values = HashMap::with_capacity(list.values.len());
    let mut ids = Vec::with_capacity(list.values.len());

    for record in list.values {
        let id = id_of(&record);
        ids.push(id.clone());
        values.insert(id, record);
    }

    NormalizedListPage {
        values,
        page: ListModel {
            ids,
            pagination: list.pagination,
            sorts: list.sorts,
        },
    }
}

/// Split a list response using a named field of each record
///
/// The field is read from the record's serialized form and may be a string
/// or a number.
///
/// # Errors
///
/// Returns [`StateError::MissingIdField`] if a record lacks the field, or
/// [`StateError::Serialization`] if a record cannot be serialized.
pub fn normalize_list_page_by_key<T>(
    list: EntitiesModel<T>,
    key: &str,
) -> Result<NormalizedListPage<T>, StateError>
where
    T: Serialize,
{
    let ids = list
        .values
        .iter()
        .enumerate()
        .map(|(index, record)| match serde_json::to_value(record)?.get(key) {
            Some(serde_json::Value::String(id)) => Ok(id.clone()),
            Some(serde_json::Value::Number(id)) => Ok(id.to_string()),
            _ => Err(StateError::MissingIdField {
                key: key.to_string(),
                index,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut ids = ids.into_iter();
    Ok(normalize_list_page(list, |_| ids.next().unwrap_or_default()))
}

/// Rebuild a page of records from a stored page and the entity cache
///
/// Ids whose entity holds no value are skipped.
#[must_use]
pub fn denormalize_list_page<T: Clone>(
    page: &ListModel,
    entities: &EntityState<ProcessesLoaderState<T>>,
) -> EntitiesModel<T> {
    let values = page
        .ids
        .iter()
        .filter_map(|id| entities.get(id).and_then(|entity| entity.loader.value.clone()))
        .collect();

    EntitiesModel {
        values,
        pagination: page.pagination.clone(),
        sorts: page.sorts.clone(),
    }
}

/// Paging and sorting parameters of a list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Zero-based page index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// Records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Sort code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Cache key of a list query: `"{id}?currentPage=..&pageSize=..&sort=.."`
///
/// Only set parameters appear, always in that order, so equal configs give
/// equal keys.
#[must_use]
pub fn serialize_search_config(config: &SearchConfig, id: Option<&str>) -> String {
    let mut params = Vec::with_capacity(3);
    if let Some(current_page) = config.current_page {
        params.push(format!("currentPage={current_page}"));
    }
    if let Some(page_size) = config.page_size {
        params.push(format!("pageSize={page_size}"));
    }
    if let Some(sort) = &config.sort {
        params.push(format!("sort={sort}"));
    }

    format!("{}?{}", id.unwrap_or_default(), params.join("&"))
}
