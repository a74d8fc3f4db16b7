//! Card builders.
//!
//! Each builder turns one record into a [`Card`]. Detail cards are assembled
//! from an ordered list of [`DetailSection`]s; optional sections appear only
//! when their field is present.

use crate::category::Category;
use crate::error::Result;
use crate::model::{Exam, HomeCategory, Institute, Program, ResourceSection, Scholarship};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Number of home cards shown in the featured row
pub const FEATURED_HOME_CARDS: usize = 3;

/// A rendered record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum Card {
    /// Plain `card` tile with a heading
    Tile(TileCard),
    /// `exam-card` with named detail sections
    Detail(DetailCard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileCard {
    pub title: String,
    pub text: Option<String>,
    pub items: Vec<String>,
    pub action: Option<Action>,
}

/// Button that switches the page to another tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub label: String,
    pub target: String,
    pub secondary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailCard {
    pub name: String,
    pub sections: Vec<DetailSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSection {
    pub icon: &'static str,
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    List(Vec<String>),
    Text(String),
    Emphasis(String),
    Fields(Vec<Field>),
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Card {
    /// Title or name shown at the top of the card
    pub fn title(&self) -> &str {
        match self {
            Card::Tile(tile) => &tile.title,
            Card::Detail(detail) => &detail.name,
        }
    }

    /// All visible text, used for search
    pub fn text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title()];
        match self {
            Card::Tile(tile) => {
                parts.extend(tile.text.as_deref());
                parts.extend(tile.items.iter().map(String::as_str));
                parts.extend(tile.action.as_ref().map(|a| a.label.as_str()));
            }
            Card::Detail(detail) => {
                for section in &detail.sections {
                    parts.push(section.heading);
                    match &section.body {
                        SectionBody::List(items) => parts.extend(items.iter().map(String::as_str)),
                        SectionBody::Text(text) | SectionBody::Emphasis(text) => parts.push(text),
                        SectionBody::Fields(fields) => {
                            for field in fields {
                                parts.push(field.label);
                                parts.push(&field.value);
                            }
                        }
                        // Link targets are not visible text
                        SectionBody::Link(_) => {}
                    }
                }
            }
        }
        parts.join(" ")
    }

    /// Find a detail section by heading
    pub fn section(&self, heading: &str) -> Option<&DetailSection> {
        match self {
            Card::Detail(detail) => detail.sections.iter().find(|s| s.heading == heading),
            Card::Tile(_) => None,
        }
    }
}

impl DetailSection {
    fn new(icon: &'static str, heading: &'static str, body: SectionBody) -> Self {
        Self { icon, heading, body }
    }

    fn list(icon: &'static str, heading: &'static str, items: &[String]) -> Self {
        Self::new(icon, heading, SectionBody::List(items.to_vec()))
    }

    fn optional_list(icon: &'static str, heading: &'static str, items: &Option<Vec<String>>) -> Option<Self> {
        items.as_deref().map(|items| Self::list(icon, heading, items))
    }

    fn website(url: &Option<String>) -> Option<Self> {
        url.as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| Self::new("🌐", "Official Website", SectionBody::Link(u.to_string())))
    }
}

/// Build the cards for a category's array field, in source order
pub fn build_cards(category: Category, records: Value) -> Result<Vec<Card>> {
    let cards: Vec<Card> = match category {
        Category::Home => parse::<HomeCategory>(records)?
            .iter()
            .enumerate()
            .map(|(i, c)| home_card(c, i < FEATURED_HOME_CARDS))
            .collect(),
        Category::EntranceExams => parse::<Exam>(records)?.iter().map(exam_card).collect(),
        Category::TopInstitutes => parse::<Institute>(records)?.iter().map(institute_card).collect(),
        Category::Scholarships => parse::<Scholarship>(records)?.iter().map(scholarship_card).collect(),
        Category::EligibilityCriteria => parse::<Program>(records)?.iter().map(eligibility_card).collect(),
        Category::Resources => parse::<ResourceSection>(records)?.iter().map(resource_card).collect(),
    };
    Ok(cards)
}

fn parse<T: DeserializeOwned>(records: Value) -> Result<Vec<T>> {
    Ok(serde_json::from_value(records)?)
}

/// Home tile linking to the entrance exams tab
pub fn home_card(category: &HomeCategory, featured: bool) -> Card {
    Card::Tile(TileCard {
        title: format!("{} {}", category.icon, category.name),
        text: Some(category.description.clone()),
        items: Vec::new(),
        action: Some(Action {
            label: format!("Explore {}", category.name),
            target: Category::EntranceExams.tab_id().to_string(),
            secondary: !featured,
        }),
    })
}

pub fn exam_card(exam: &Exam) -> Card {
    let mut sections = vec![DetailSection::new(
        "📋",
        "Category & Programs",
        SectionBody::Fields(vec![
            Field {
                label: "Category",
                value: exam.category.clone(),
            },
            Field {
                label: "Programs",
                value: exam.programs.join(", "),
            },
        ]),
    )];

    sections.extend(
        [
            DetailSection::optional_list("📋", "Eligibility", &exam.eligibility),
            DetailSection::optional_list("📚", "Syllabus", &exam.syllabus),
            DetailSection::optional_list("📅", "Important Dates", &exam.important_dates),
            DetailSection::optional_list("📝", "Application Process", &exam.application_process),
            DetailSection::website(&exam.website),
        ]
        .into_iter()
        .flatten(),
    );

    Card::Detail(DetailCard {
        name: exam.name.clone(),
        sections,
    })
}

pub fn institute_card(institute: &Institute) -> Card {
    let mut sections = vec![
        DetailSection::list("🎓", "Programs Offered", &institute.programs),
        DetailSection::list("🔬", "Specializations", &institute.specializations),
    ];
    sections.extend(DetailSection::website(&institute.website));

    Card::Detail(DetailCard {
        name: institute.name.clone(),
        sections,
    })
}

pub fn scholarship_card(scholarship: &Scholarship) -> Card {
    Card::Detail(DetailCard {
        name: scholarship.name.clone(),
        sections: vec![
            DetailSection::new("📋", "Eligibility", SectionBody::Text(scholarship.eligibility.clone())),
            DetailSection::new("💰", "Coverage", SectionBody::Text(scholarship.coverage.clone())),
            DetailSection::new("📝", "Application", SectionBody::Text(scholarship.application.clone())),
        ],
    })
}

pub fn eligibility_card(program: &Program) -> Card {
    Card::Detail(DetailCard {
        name: program.name.clone(),
        sections: vec![
            DetailSection::list("📋", "Eligibility", &program.eligibility),
            DetailSection::new("⏱️", "Duration", SectionBody::Emphasis(program.duration.clone())),
            DetailSection::list("🎯", "Specializations", &program.specializations),
        ],
    })
}

pub fn resource_card(section: &ResourceSection) -> Card {
    Card::Tile(TileCard {
        title: section.title.clone(),
        text: None,
        items: section.items.clone(),
        action: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bare_exam() -> Exam {
        Exam {
            name: "GATE".to_string(),
            category: "Engineering".to_string(),
            programs: vec!["M.Tech".to_string(), "Ph.D".to_string()],
            eligibility: None,
            syllabus: None,
            important_dates: None,
            application_process: None,
            website: None,
        }
    }

    fn headings(card: &Card) -> Vec<&'static str> {
        match card {
            Card::Detail(detail) => detail.sections.iter().map(|s| s.heading).collect(),
            Card::Tile(_) => Vec::new(),
        }
    }

    #[test]
    fn test_exam_card_omits_absent_sections() {
        let card = exam_card(&bare_exam());
        assert_eq!(headings(&card), vec!["Category & Programs"]);
        let programs = card.section("Category & Programs").unwrap();
        assert_eq!(
            programs.body,
            SectionBody::Fields(vec![
                Field { label: "Category", value: "Engineering".to_string() },
                Field { label: "Programs", value: "M.Tech, Ph.D".to_string() },
            ])
        );
    }

    #[test]
    fn test_exam_card_keeps_present_sections_in_order() {
        let exam = Exam {
            eligibility: Some(vec!["B.E./B.Tech".to_string()]),
            syllabus: Some(vec!["Engineering Mathematics".to_string()]),
            important_dates: Some(vec!["Exam: February".to_string()]),
            application_process: Some(vec!["Register on GOAPS".to_string()]),
            website: Some("https://gate.example.org".to_string()),
            ..bare_exam()
        };
        let card = exam_card(&exam);
        assert_eq!(
            headings(&card),
            vec![
                "Category & Programs",
                "Eligibility",
                "Syllabus",
                "Important Dates",
                "Application Process",
                "Official Website",
            ]
        );
    }

    #[test]
    fn test_empty_list_is_still_present() {
        let exam = Exam {
            syllabus: Some(Vec::new()),
            ..bare_exam()
        };
        let card = exam_card(&exam);
        assert_eq!(card.section("Syllabus").unwrap().body, SectionBody::List(Vec::new()));
    }

    #[test]
    fn test_blank_website_is_omitted() {
        let institute = Institute {
            name: "IISc Bangalore".to_string(),
            programs: vec!["M.Tech".to_string()],
            specializations: vec!["Aerospace".to_string()],
            website: Some(String::new()),
        };
        let card = institute_card(&institute);
        assert_eq!(headings(&card), vec!["Programs Offered", "Specializations"]);
    }

    #[test]
    fn test_home_cards_featured_then_secondary() {
        let records = json!([
            {"icon": "🎓", "name": "Engineering", "description": "a"},
            {"icon": "💼", "name": "Management", "description": "b"},
            {"icon": "🩺", "name": "Medical", "description": "c"},
            {"icon": "🔬", "name": "Science", "description": "d"},
        ]);
        let cards = build_cards(Category::Home, records).unwrap();
        assert_eq!(cards.len(), 4);
        let secondary: Vec<bool> = cards
            .iter()
            .map(|c| match c {
                Card::Tile(tile) => tile.action.as_ref().unwrap().secondary,
                Card::Detail(_) => panic!("home cards are tiles"),
            })
            .collect();
        assert_eq!(secondary, vec![false, false, false, true]);
        assert_eq!(cards[0].title(), "🎓 Engineering");
    }

    #[test]
    fn test_build_cards_preserves_order() {
        let records = json!([
            {"title": "Books", "items": ["x"]},
            {"title": "Websites", "items": []},
            {"title": "Apps", "items": ["y", "z"]},
        ]);
        let cards = build_cards(Category::Resources, records).unwrap();
        let titles: Vec<&str> = cards.iter().map(Card::title).collect();
        assert_eq!(titles, vec!["Books", "Websites", "Apps"]);
    }

    #[test]
    fn test_build_cards_rejects_malformed_records() {
        assert!(build_cards(Category::EligibilityCriteria, json!(["M.Tech"])).is_err());
        assert!(build_cards(Category::Resources, json!([{"items": ["x"]}])).is_err());
        assert!(build_cards(Category::Scholarships, json!("not an array")).is_err());
    }

    #[test]
    fn test_falsy_exam_fields_drop_their_sections() {
        for falsy in [json!(null), json!(false), json!(0), json!("")] {
            let records = json!([{
                "name": "GATE",
                "category": "Engineering",
                "programs": ["M.Tech"],
                "eligibility": falsy,
                "syllabus": falsy,
                "importantDates": falsy,
                "applicationProcess": falsy,
                "website": falsy,
            }]);
            let cards = build_cards(Category::EntranceExams, records).unwrap();
            assert_eq!(cards.len(), 1);
            assert_eq!(headings(&cards[0]), vec!["Category & Programs"], "fields set to {}", falsy);
        }
    }

    #[test]
    fn test_sparse_record_keeps_its_neighbours() {
        let records = json!([
            {"name": "GATE Scholarship", "eligibility": "GATE qualified", "coverage": "Stipend", "application": "Via institute"},
            {"name": "INSPIRE", "eligibility": "Top 1%", "application": "Online"},
        ]);
        let cards = build_cards(Category::Scholarships, records).unwrap();
        let titles: Vec<&str> = cards.iter().map(Card::title).collect();
        assert_eq!(titles, vec!["GATE Scholarship", "INSPIRE"]);
    }

    #[test]
    fn test_card_text_includes_sections() {
        let program = Program {
            name: "MBA".to_string(),
            eligibility: vec!["Bachelor's degree with 50%".to_string()],
            duration: "2 years".to_string(),
            specializations: vec!["Finance".to_string()],
        };
        let text = eligibility_card(&program).text();
        assert!(text.contains("MBA"));
        assert!(text.contains("2 years"));
        assert!(text.contains("Finance"));
    }

    #[test]
    fn test_card_serializes_with_style_tag() {
        let card = scholarship_card(&Scholarship {
            name: "INSPIRE".to_string(),
            eligibility: "Top 1%".to_string(),
            coverage: "Monthly stipend".to_string(),
            application: "Online".to_string(),
        });
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["style"], "detail");
        assert_eq!(value["sections"][1]["body"]["kind"], "text");
        assert_eq!(value["sections"][1]["body"]["value"], "Monthly stipend");
    }
}
