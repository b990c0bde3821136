pub mod debounce;
pub mod filter;
pub mod query;

pub use debounce::{DebouncedSearch, Debouncer, DEFAULT_QUIESCENCE};
pub use filter::{filter_tree_for_search, is_included, subtree_matches};
pub use query::SearchQuery;
