//! Category loading.
//!
//! Every category is loaded independently: a failure is caught inside
//! [`load_category`] and turned into a notice in that category's panel only.
//! [`Loader::load`] adds the outer catch for errors raised before the
//! fan-out, which replaces every panel with a shared fallback notice.

use crate::cards::{build_cards, Card};
use crate::category::Category;
use crate::error::{Error, Result};
use crate::source::{Fetch, Source};
use crate::tabs::TabSet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Rendered content of one category container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub category: Category,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelBody {
    Cards { cards: Vec<Card> },
    Notice { notice: Notice },
}

/// Single non-data card shown in place of records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The array field was missing or empty
    Empty { message: String },
    /// This category failed to load
    Failed { message: String, detail: String },
    /// Shared fallback for the local-file protocol
    LocalFile { problem: String },
    /// Shared fallback for any other escaped error
    Unavailable { detail: Option<String> },
}

impl Notice {
    /// Shared fallback notice for an error that escaped the category loaders
    pub fn fallback(err: &Error) -> Self {
        match err {
            Error::LocalFileProtocol => Notice::LocalFile {
                problem: err.to_string(),
            },
            other => Notice::Unavailable {
                detail: Some(other.to_string()),
            },
        }
    }
}

impl Panel {
    pub fn cards(category: Category, cards: Vec<Card>) -> Self {
        Self {
            category,
            body: PanelBody::Cards { cards },
        }
    }

    pub fn notice(category: Category, notice: Notice) -> Self {
        Self {
            category,
            body: PanelBody::Notice { notice },
        }
    }

    /// Data cards, empty when the panel shows a notice
    pub fn data_cards(&self) -> &[Card] {
        match &self.body {
            PanelBody::Cards { cards } => cards,
            PanelBody::Notice { .. } => &[],
        }
    }

    pub fn notice_ref(&self) -> Option<&Notice> {
        match &self.body {
            PanelBody::Notice { notice } => Some(notice),
            PanelBody::Cards { .. } => None,
        }
    }

    /// Total cards rendered in the container, notices included
    pub fn card_count(&self) -> usize {
        match &self.body {
            PanelBody::Cards { cards } => cards.len(),
            PanelBody::Notice { .. } => 1,
        }
    }

    /// True when the category failed or fell back
    pub fn is_error(&self) -> bool {
        matches!(
            self.notice_ref(),
            Some(Notice::Failed { .. } | Notice::LocalFile { .. } | Notice::Unavailable { .. })
        )
    }
}

/// Load one category into its panel. Never fails.
pub fn load_category(fetcher: &dyn Fetch, category: Category) -> Panel {
    match fetch_cards(fetcher, category) {
        Ok(Some(cards)) => {
            debug!(%category, cards = cards.len(), "category loaded");
            Panel::cards(category, cards)
        }
        Ok(None) => {
            debug!(%category, "category has no records");
            Panel::notice(
                category,
                Notice::Empty {
                    message: category.empty_message(),
                },
            )
        }
        Err(err) => {
            error!(%category, error = %err, "error loading category");
            Panel::notice(
                category,
                Notice::Failed {
                    message: category.error_message(),
                    detail: err.to_string(),
                },
            )
        }
    }
}

/// `Ok(None)` when the array field has no records to show
fn fetch_cards(fetcher: &dyn Fetch, category: Category) -> Result<Option<Vec<Card>>> {
    let resource = category.resource_path();
    let response = fetcher.fetch(resource)?;
    if !response.is_success() {
        return Err(Error::fetch(resource, response.status));
    }

    let mut document: Value = serde_json::from_str(&response.body)?;
    let Some(fields) = document.as_object_mut() else {
        return Err(Error::other(format!("{} is not a JSON object", resource)));
    };
    let records = match fields.remove(category.array_field()) {
        Some(records) if has_records(&records) => records,
        _ => return Ok(None),
    };

    build_cards(category, records).map(Some)
}

/// Positive `length`: a non-empty array, a non-empty string, or an object
/// carrying a positive `length` field. Anything else is shown as empty.
fn has_records(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => map.get("length").and_then(Value::as_f64).map_or(false, |n| n > 0.0),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Loads every category from a data source
pub struct Loader {
    source: Source,
    show_progress: bool,
}

impl Loader {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            show_progress: false,
        }
    }

    /// Show a progress bar while categories load
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Load all categories concurrently, in category order.
    ///
    /// Per-category failures are already folded into their panels; an `Err`
    /// here means loading could not start at all.
    pub fn load_all(&self) -> Result<Vec<Panel>> {
        let fetcher = self.source.fetcher()?;
        info!(source = %self.source, "loading categories");

        let progress = self.progress_bar();
        let panels: Vec<Panel> = Category::ALL
            .par_iter()
            .map(|&category| {
                let panel = load_category(fetcher.as_ref(), category);
                if let Some(pb) = &progress {
                    pb.set_message(category.label());
                    pb.inc(1);
                }
                panel
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        Ok(panels)
    }

    /// Load all categories, replacing every panel with the shared fallback
    /// when loading could not start
    pub fn load(&self) -> Portal {
        let panels = self.load_all().unwrap_or_else(|err| {
            warn!(error = %err, "showing fallback content");
            fallback_panels(&err)
        });
        Portal::new(panels)
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new(Category::ALL.len() as u64);
        let template = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

/// The same fallback notice in every category
pub fn fallback_panels(err: &Error) -> Vec<Panel> {
    let notice = Notice::fallback(err);
    Category::ALL
        .iter()
        .map(|&category| Panel::notice(category, notice.clone()))
        .collect()
}

/// Loaded page content: tab state plus one panel per category
#[derive(Debug, Clone)]
pub struct Portal {
    pub tabs: TabSet,
    pub panels: Vec<Panel>,
}

impl Portal {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            tabs: TabSet::for_categories(),
            panels,
        }
    }

    pub fn panel(&self, category: Category) -> Option<&Panel> {
        self.panels.iter().find(|p| p.category == category)
    }

    /// Make `tab_id` the initially active tab
    pub fn activate(&mut self, tab_id: &str) -> bool {
        self.tabs.activate(tab_id)
    }

    /// Number of data cards across all panels
    pub fn total_cards(&self) -> usize {
        self.panels.iter().map(|p| p.data_cards().len()).sum()
    }

    pub fn failed_categories(&self) -> Vec<Category> {
        self.panels
            .iter()
            .filter(|p| p.is_error())
            .map(|p| p.category)
            .collect()
    }
}
