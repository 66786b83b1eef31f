pub mod candidate_fetcher;
pub mod catalog;
pub mod providers;
pub mod query_expander;
pub mod rank_fuser;
pub mod similarity;
pub mod text;
pub mod title_search;
