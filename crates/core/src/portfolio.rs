//! Portfolio content: the owner's profile, skills and projects.
//!
//! Pure value types plus the two bits of logic the site needs: ordering and
//! filtering the project list, and a wrap-around carousel over featured items.

use serde::{Deserialize, Serialize};

/// Who the site belongs to.
///
/// Every field is optional in config; missing ones come from `Profile::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub years_experience: u8,
    pub bio: Vec<String>,
    pub companies: Vec<String>,
    pub stats: Vec<Stat>,
}

/// A headline number shown in the about section ("5+ Years Experience").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Idah Daniel".into(),
            title: "Software Developer".into(),
            email: "idahdaniel@example.com".into(),
            years_experience: 5,
            bio: vec![
                "I'm a passionate Software Developer with over 5 years of professional experience, \
                 from backend work at Aledoy Solutions to frontend expertise at Setime Technologies \
                 and Cizar Consult."
                    .into(),
            ],
            companies: vec![
                "Aledoy Solutions".into(),
                "Setime Technologies".into(),
                "Cizar Consult".into(),
            ],
            stats: vec![
                Stat { value: "5+".into(), label: "Years Experience".into() },
                Stat { value: "50+".into(), label: "Projects Completed".into() },
                Stat { value: "3".into(), label: "Companies".into() },
            ],
        }
    }
}

/// Accent color a skill bar is drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillAccent {
    #[default]
    Primary,
    Secondary,
    Accent,
}

/// One skill bar. `level` is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub accent: SkillAccent,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: u8, accent: SkillAccent) -> Self {
        Self {
            name: name.into(),
            level: level.min(100),
            accent,
        }
    }
}

/// The built-in skill list.
pub fn default_skills() -> Vec<Skill> {
    use SkillAccent::*;
    vec![
        Skill::new("React.js", 95, Primary),
        Skill::new("TypeScript", 90, Primary),
        Skill::new("Node.js", 88, Secondary),
        Skill::new("Express.js", 85, Secondary),
        Skill::new("MongoDB", 85, Accent),
        Skill::new("PHP", 80, Accent),
        Skill::new("MySQL", 82, Primary),
        Skill::new("JavaScript", 95, Secondary),
        Skill::new("SQL", 80, Accent),
    ]
}

/// A portfolio project card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Projects held in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Sort by `display_order` ascending. Equal orders keep their input order.
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.display_order);
        Self { projects }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// What the projects grid shows: everything, or only featured items.
    pub fn displayed(&self, show_all: bool) -> Vec<&Project> {
        if show_all {
            self.projects.iter().collect()
        } else {
            self.featured()
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Index into a list of `len` items that wraps in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance one slot. No-op when empty.
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    /// Step back one slot. No-op when empty.
    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// The current item of `items`, if any.
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.index)
    }
}
