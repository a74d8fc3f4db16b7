//! PG Portal - render the postgraduate admissions portal from category data
//!
//! Loads the six category resources (home, entrance exams, institutes,
//! scholarships, eligibility criteria, resources), turns every record into a
//! card, and writes a tabbed static HTML site.

pub mod cards;
pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod search;
pub mod server;
pub mod source;
pub mod tabs;

// Re-export main types
pub use cards::Card;
pub use category::Category;
pub use config::Config;
pub use error::{Error, Result};
pub use loader::{load_category, Loader, Notice, Panel, PanelBody, Portal};
pub use output::{PageMeta, SiteConfig, SiteGenerator, TemplateEngine};
pub use search::SearchIndex;
pub use server::StaticServer;
pub use source::{DirectoryFetcher, Fetch, HttpFetcher, Response, Source};
pub use tabs::TabSet;
