//! The six content categories and their fixed resource/DOM contract.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the portal's content categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Home,
    EntranceExams,
    TopInstitutes,
    Scholarships,
    EligibilityCriteria,
    Resources,
}

impl Category {
    /// All categories in tab order
    pub const ALL: [Category; 6] = [
        Category::Home,
        Category::EntranceExams,
        Category::TopInstitutes,
        Category::Scholarships,
        Category::EligibilityCriteria,
        Category::Resources,
    ];

    /// Resource path relative to the site root
    pub fn resource_path(self) -> &'static str {
        match self {
            Category::Home => "data/home.json",
            Category::EntranceExams => "data/entrance_exams.json",
            Category::TopInstitutes => "data/top_institutes.json",
            Category::Scholarships => "data/scholarships.json",
            Category::EligibilityCriteria => "data/eligibility_criteria.json",
            Category::Resources => "data/resources.json",
        }
    }

    /// Top-level array field holding the records
    pub fn array_field(self) -> &'static str {
        match self {
            Category::Home => "categories",
            Category::EntranceExams => "exams",
            Category::TopInstitutes => "institutes",
            Category::Scholarships => "scholarships",
            Category::EligibilityCriteria => "programs",
            Category::Resources => "sections",
        }
    }

    /// Id of the element the cards are rendered into
    pub fn container_id(self) -> &'static str {
        match self {
            Category::Home => "home-container",
            Category::EntranceExams => "entrance-exams-container",
            Category::TopInstitutes => "top-institutes-container",
            Category::Scholarships => "scholarships-container",
            Category::EligibilityCriteria => "eligibility-container",
            Category::Resources => "resources-container",
        }
    }

    /// Id shared by the nav tab and its content section
    pub fn tab_id(self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::EntranceExams => "entrance_exams",
            Category::TopInstitutes => "top_institutes",
            Category::Scholarships => "scholarships",
            Category::EligibilityCriteria => "eligibility_criteria",
            Category::Resources => "resources",
        }
    }

    /// Nav tab label
    pub fn label(self) -> &'static str {
        match self {
            Category::Home => "Home",
            Category::EntranceExams => "Entrance Exams",
            Category::TopInstitutes => "Top Institutes",
            Category::Scholarships => "Scholarships",
            Category::EligibilityCriteria => "Eligibility",
            Category::Resources => "Resources",
        }
    }

    /// What the category's records describe, as used in notices
    fn subject(self) -> &'static str {
        match self {
            Category::Home => "home content",
            Category::EntranceExams => "exam information",
            Category::TopInstitutes => "institute information",
            Category::Scholarships => "scholarship information",
            Category::EligibilityCriteria => "eligibility information",
            Category::Resources => "resource information",
        }
    }

    /// Placeholder text when the category has no records
    pub fn empty_message(self) -> String {
        let what = match self {
            Category::Home => "categories",
            Category::Resources => "resources",
            other => other.subject(),
        };
        format!("No {} available at the moment.", what)
    }

    /// Error text when the category could not be loaded
    pub fn error_message(self) -> String {
        format!("Error loading {}. Please try again later.", self.subject())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_id())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts the tab id or the container-style kebab form
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.tab_id() == normalized || c.array_field() == normalized)
            .ok_or_else(|| Error::other(format!("Unknown tab: {}", s)))
    }
}
