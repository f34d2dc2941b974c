//! Bilingual (English/Amharic) recipe records.
//!
//! Two pieces carry the weight here:
//!
//! - [`pipeline`] fills in the second language of a newly submitted recipe
//!   through a chain of translation strategies, degrading to the source
//!   text instead of failing.
//! - [`normalize`] projects any stored recipe, legacy or bilingual, into
//!   plain strings for the viewer's language.

pub mod category;
pub mod config;
pub mod dictionary;
pub mod i18n;
pub mod lines;
pub mod normalize;
pub mod pipeline;
pub mod recipe;
pub mod search;
pub mod store;
pub mod submission;
pub mod translation;
