// Profile data store
//
// Read-only portfolio data: personal info, skills, projects, contact and CV.
// Ships embedded as TOML; a custom file can replace it.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::errors::{Result, TermfolioError};

const EMBEDDED_PROFILE: &str = include_str!("../../assets/profile.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub location: String,
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub contact: Contact,
    #[serde(default)]
    pub cv: Cv,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    live_demo: Option<String>,
    #[serde(default)]
    github_repo: Option<String>,
}

impl Project {
    pub fn new(name: &str, description: &str, tech: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tech: tech.iter().map(|t| t.to_string()).collect(),
            live_demo: None,
            github_repo: None,
        }
    }

    pub fn with_live_demo(mut self, url: &str) -> Self {
        self.live_demo = Some(url.to_string());
        self
    }

    pub fn with_github_repo(mut self, url: &str) -> Self {
        self.github_repo = Some(url.to_string());
        self
    }

    /// Live demo URL, `None` when absent or empty.
    pub fn live_demo(&self) -> Option<&str> {
        non_empty(&self.live_demo)
    }

    /// Source repository URL, `None` when absent or empty.
    pub fn github_repo(&self) -> Option<&str> {
        non_empty(&self.github_repo)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub email: String,
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cv {
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub position: String,
    #[serde(default)]
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

impl Profile {
    /// The profile bundled with the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_PROFILE)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| TermfolioError::Parse {
            what: "profile",
            source,
        })
    }

    /// Load from `path`, or the embedded profile when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::embedded();
        };
        let contents = fs::read_to_string(path).map_err(|source| TermfolioError::Read {
            what: "profile",
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Project at a 0-based position.
    pub fn project_by_index(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    /// Case-insensitive exact name lookup.
    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        let wanted = name.to_lowercase();
        self.projects.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// 1-based position of `project` in the canonical list.
    pub fn display_number(&self, project: &Project) -> usize {
        self.projects
            .iter()
            .position(|p| p.name == project.name)
            .map_or(0, |i| i + 1)
    }
}
