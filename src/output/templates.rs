// Template engine for rendering the portal page

use crate::cards::{Card, FEATURED_HOME_CARDS};
use crate::category::Category;
use crate::error::Result;
use crate::loader::{Notice, Panel, PanelBody, Portal};
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

/// Template engine wrapping Tera with the embedded portal templates
pub struct TemplateEngine {
    tera: Tera,
}

/// Page-level text
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub tagline: Option<String>,
}

#[derive(Serialize)]
struct TabView<'a> {
    id: &'a str,
    label: &'a str,
    active: bool,
}

#[derive(Serialize)]
struct PanelView<'a> {
    id: &'static str,
    label: &'static str,
    container_id: &'static str,
    active: bool,
    grid: bool,
    notice: Option<&'a Notice>,
    cards: &'a [Card],
    featured: &'a [Card],
    secondary: &'a [Card],
}

impl<'a> PanelView<'a> {
    fn new(panel: &'a Panel, active: bool) -> Self {
        let category = panel.category;
        let (notice, cards): (Option<&Notice>, &[Card]) = match &panel.body {
            PanelBody::Notice { notice } => (Some(notice), &[][..]),
            PanelBody::Cards { cards } => (None, cards.as_slice()),
        };
        let split = FEATURED_HOME_CARDS.min(cards.len());
        let (featured, secondary) = cards.split_at(split);

        Self {
            id: category.tab_id(),
            label: category.label(),
            container_id: category.container_id(),
            active,
            grid: category == Category::Home,
            notice,
            cards,
            featured,
            secondary,
        }
    }
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html.tera")),
            ("index.html", include_str!("../../templates/index.html.tera")),
            ("card.html", include_str!("../../templates/card.html.tera")),
            ("notice.html", include_str!("../../templates/notice.html.tera")),
        ])?;

        Ok(Self { tera })
    }

    /// Create a template engine from a custom directory.
    ///
    /// The directory must provide the same template names as the embedded set.
    pub fn from_dir(template_dir: &Path) -> Result<Self> {
        let pattern = format!("{}/**/*.html", template_dir.display());
        let tera = Tera::new(&pattern)?;
        Ok(Self { tera })
    }

    /// Render the portal page
    pub fn render_index(&self, portal: &Portal, meta: &PageMeta) -> Result<String> {
        let tabs: Vec<TabView> = portal
            .tabs
            .states()
            .map(|(tab, active)| TabView {
                id: &tab.id,
                label: &tab.label,
                active,
            })
            .collect();

        let panels: Vec<PanelView> = portal
            .panels
            .iter()
            .map(|panel| PanelView::new(panel, portal.tabs.is_active(panel.category.tab_id())))
            .collect();

        let mut context = Context::new();
        context.insert("title", &meta.title);
        context.insert("tagline", &meta.tagline);
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("tabs", &tabs);
        context.insert("panels", &panels);

        Ok(self.tera.render("index.html", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{home_card, resource_card};
    use crate::error::Error;
    use crate::loader::fallback_panels;
    use crate::model::{HomeCategory, ResourceSection};

    fn meta() -> PageMeta {
        PageMeta {
            title: "PG Portal".to_string(),
            tagline: Some("Your guide to postgraduate admissions".to_string()),
        }
    }

    fn home(n: usize) -> Panel {
        let cards = (0..n)
            .map(|i| {
                home_card(
                    &HomeCategory {
                        icon: "🎓".to_string(),
                        name: format!("Stream {}", i),
                        description: "Programs and exams".to_string(),
                    },
                    i < FEATURED_HOME_CARDS,
                )
            })
            .collect();
        Panel::cards(Category::Home, cards)
    }

    #[test]
    fn test_render_marks_single_active_tab() {
        let engine = TemplateEngine::new().unwrap();
        let mut portal = Portal::new(vec![home(2)]);
        portal.activate("resources");

        let html = engine.render_index(&portal, &meta()).unwrap();
        assert_eq!(html.matches("nav-tab active").count(), 1);
        assert!(html.contains(r#"class="nav-tab active" data-tab="resources""#));
        assert!(html.contains(r#"<section id="home" class="tab-content">"#));
    }

    #[test]
    fn test_render_home_grids() {
        let engine = TemplateEngine::new().unwrap();
        let portal = Portal::new(vec![home(5)]);

        let html = engine.render_index(&portal, &meta()).unwrap();
        assert!(html.contains(r#"id="home-container""#));
        assert!(html.contains("grid grid-3"));
        assert!(html.contains("grid grid-2"));
        assert_eq!(html.matches(r#"class="btn""#).count(), 3);
        assert_eq!(html.matches(r#"class="btn btn-secondary""#).count(), 2);
        assert!(html.contains(r#"data-tab-target="entrance_exams""#));
    }

    #[test]
    fn test_render_home_without_secondary_row() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine.render_index(&Portal::new(vec![home(2)]), &meta()).unwrap();
        assert!(!html.contains("grid grid-2"));
    }

    #[test]
    fn test_render_escapes_record_text() {
        let engine = TemplateEngine::new().unwrap();
        let panel = Panel::cards(
            Category::Resources,
            vec![resource_card(&ResourceSection {
                title: "<script>alert(1)</script>".to_string(),
                items: vec!["A & B".to_string()],
            })],
        );
        let html = engine.render_index(&Portal::new(vec![panel]), &meta()).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn test_render_local_file_fallback() {
        let engine = TemplateEngine::new().unwrap();
        let portal = Portal::new(fallback_panels(&Error::LocalFileProtocol));
        let html = engine.render_index(&portal, &meta()).unwrap();
        assert_eq!(html.matches("CORS Error - Local File Access").count(), 6);
    }

    #[test]
    fn test_render_unavailable_fallback() {
        let engine = TemplateEngine::new().unwrap();
        let portal = Portal::new(fallback_panels(&Error::other("database offline")));
        let html = engine.render_index(&portal, &meta()).unwrap();
        assert_eq!(html.matches("Information Temporarily Unavailable").count(), 6);
        assert!(html.contains("database offline"));
    }
}
