//! List query engine: parameter parsing, filtering, sorting and pagination
//!
//! Every list endpoint runs the same pipeline over an in-memory snapshot:
//! `ListParams` → [`apply_filters`] → [`apply_sorting`] → [`paginate`].

pub mod filter;
pub mod paginate;
pub mod params;
pub mod sort;

pub use filter::{
    apply_filters, contains_ci, is_pass_through, parse_id, parse_instant, FilterSet, Predicate,
};
pub use paginate::paginate;
pub use params::{ListParams, SortOrder, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use sort::apply_sorting;
