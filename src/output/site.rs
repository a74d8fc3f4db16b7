// Static site generator
//
// Writes the portal to disk: index.html, assets, search.json, and a copy of
// the category data when it came from a local directory.

use crate::error::Result;
use crate::loader::Portal;
use crate::output::templates::{PageMeta, TemplateEngine};
use crate::search::SearchIndex;
use crate::source::Source;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Configuration for site generation
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Output directory
    pub output_dir: PathBuf,
    /// Page title and tagline
    pub meta: PageMeta,
    /// Whether to write the CSS/JS assets
    pub copy_assets: bool,
    /// Whether to copy `data/*.json` from a directory source
    pub copy_data: bool,
    /// Directory of replacement templates
    pub templates: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("site"),
            meta: PageMeta {
                title: "PG Portal".to_string(),
                tagline: None,
            },
            copy_assets: true,
            copy_data: true,
            templates: None,
        }
    }
}

/// Static site generator
pub struct SiteGenerator {
    config: SiteConfig,
    template_engine: TemplateEngine,
}

impl SiteGenerator {
    /// Create a new site generator
    pub fn new(config: SiteConfig) -> Result<Self> {
        let template_engine = match &config.templates {
            Some(dir) => TemplateEngine::from_dir(dir)?,
            None => TemplateEngine::new()?,
        };
        Ok(Self {
            config,
            template_engine,
        })
    }

    /// Generate the complete static site
    pub fn generate(&self, portal: &Portal, source: &Source) -> Result<GenerationReport> {
        let mut report = GenerationReport {
            cards_rendered: portal.total_cards(),
            failed_categories: portal.failed_categories().len(),
            ..Default::default()
        };

        self.create_directories()?;

        if self.config.copy_assets {
            self.copy_assets()?;
            report.assets_copied = true;
        }

        self.generate_index(portal)?;
        report.pages_generated += 1;

        report.search_entries = self.generate_search_index(portal)?;

        if self.config.copy_data {
            if let Some(root) = source.directory() {
                report.data_files_copied = self.copy_data(root)?;
            }
        }

        info!(output = %self.config.output_dir.display(), "site generated");
        Ok(report)
    }

    /// Create the output directory structure
    fn create_directories(&self) -> Result<()> {
        let dirs = [
            self.config.output_dir.clone(),
            self.config.output_dir.join("assets"),
        ];

        for dir in &dirs {
            fs::create_dir_all(dir)?;
        }

        Ok(())
    }

    /// Write embedded static assets (CSS, JS)
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = self.config.output_dir.join("assets");

        let css_content = include_str!("../../assets/style.css");
        fs::write(assets_dir.join("style.css"), css_content)?;

        let js_content = include_str!("../../assets/script.js");
        fs::write(assets_dir.join("script.js"), js_content)?;

        Ok(())
    }

    fn generate_index(&self, portal: &Portal) -> Result<()> {
        let html = self.template_engine.render_index(portal, &self.config.meta)?;
        let path = self.config.output_dir.join("index.html");
        fs::write(&path, html)?;
        debug!(path = %path.display(), "wrote page");
        Ok(())
    }

    /// Write search.json, returning the number of entries
    fn generate_search_index(&self, portal: &Portal) -> Result<usize> {
        let index = SearchIndex::build(portal);
        let json = serde_json::to_string_pretty(&index)?;
        fs::write(self.config.output_dir.join("search.json"), json)?;
        Ok(index.len())
    }

    /// Copy `data/**/*.json` from the source root, returning the file count
    fn copy_data(&self, root: &Path) -> Result<usize> {
        let data_dir = root.join("data");
        if !data_dir.is_dir() {
            return Ok(0);
        }

        let target_dir = self.config.output_dir.join("data");
        fs::create_dir_all(&target_dir)?;
        if same_dir(&data_dir, &target_dir) {
            debug!("output already holds the data directory");
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(&data_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let relative = path.strip_prefix(&data_dir).unwrap_or(path);
            let target = target_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            copied += 1;
        }

        Ok(copied)
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Report of what was generated
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub pages_generated: usize,
    pub assets_copied: bool,
    pub search_entries: usize,
    pub data_files_copied: usize,
    pub cards_rendered: usize,
    pub failed_categories: usize,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} page(s) with {} cards, assets: {}, search entries: {}, data files: {}, failed categories: {}",
            self.pages_generated,
            self.cards_rendered,
            if self.assets_copied { "yes" } else { "no" },
            self.search_entries,
            self.data_files_copied,
            self.failed_categories
        )
    }
}
