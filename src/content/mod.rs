//! Content module - navigation state and page assembly

pub mod insights;
mod menu;
mod pages;

pub use menu::{Category, MenuState, Selection};
pub use pages::{build_all_pages, build_page, DataContext, GrowthData, Notice, PageContent};
