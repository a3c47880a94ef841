//! Support modules for the repository data BDD tests.

pub(crate) mod state;

pub(crate) use state::{AggregationState, REPO_PATH, run_load};
