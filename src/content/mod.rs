//! Main-content ("top node") detection: stopword-density and link-density scoring
//! over candidate block elements (C8).

pub mod topnode;

pub use topnode::{calculate_best_node, post_cleanup, post_cleanup_with_config};
