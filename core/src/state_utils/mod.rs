//! Generic state machinery shared by every feature.
//!
//! - [`loader`]: load/success/fail/reset lifecycle of one value
//! - [`processes`]: per-id counter of in-flight commands
//! - [`entity`]: id-keyed collections driven by [`entity::EntityMeta`]
//! - [`normalize`]: list responses split into entity values and pages of ids
//! - [`selectors`]: read-side accessors with defaults for unknown ids

pub mod entity;
pub mod loader;
pub mod normalize;
pub mod processes;
pub mod selectors;

pub use entity::{EntityId, EntityLoaderReducer, EntityMeta, EntityPayload, EntityState};
pub use loader::{LoaderError, LoaderFlags, LoaderMeta, LoaderReducer, LoaderState, LoaderTransition};
pub use normalize::{
    denormalize_list_page, normalize_list_page, normalize_list_page_by_key, serialize_search_config,
    EntitiesModel, ListModel, NormalizedListPage, PaginationModel, SearchConfig, SortModel,
};
pub use processes::{ProcessTransition, ProcessesLoaderState};
