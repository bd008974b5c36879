// Interactive CV
//
// Each section is drawn as fixed-width panels. Panel borders appear
// instantly; the text rows inside are typed out.

use super::Writer;
use crate::cli::layout::Panel;
use crate::config::constants::{
    CV_CERTIFICATION_PANEL_WIDTH, CV_LANGUAGE_PANEL_WIDTH, CV_WIDE_PANEL_WIDTH,
};
use crate::services::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvSection {
    Education,
    Experience,
    Languages,
    Certifications,
}

impl CvSection {
    pub const ALL: [CvSection; 4] = [
        CvSection::Education,
        CvSection::Experience,
        CvSection::Languages,
        CvSection::Certifications,
    ];

    /// Section by name or menu number
    pub fn parse(arg: &str) -> Option<Self> {
        match arg.trim().to_lowercase().as_str() {
            "1" | "education" => Some(Self::Education),
            "2" | "experience" => Some(Self::Experience),
            "3" | "languages" => Some(Self::Languages),
            "4" | "certifications" => Some(Self::Certifications),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Languages => "languages",
            Self::Certifications => "certifications",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Languages => "Languages",
            Self::Certifications => "Certifications",
        }
    }
}

/// `cv [section]`
pub async fn cv(out: &Writer<'_>, profile: &Profile, arg: &str) {
    if arg.is_empty() {
        return menu(out, profile).await;
    }
    match CvSection::parse(arg) {
        Some(section) => show(out, profile, section).await,
        None => {
            out.line(format!("Unknown CV section: {arg}")).await;
            out.blank().await;
            menu(out, profile).await;
        }
    }
}

pub async fn menu(out: &Writer<'_>, profile: &Profile) {
    out.line(format!("Interactive CV - {}", profile.name)).await;
    out.blank().await;
    out.line("Available sections:").await;
    for (i, section) in CvSection::ALL.iter().enumerate() {
        let usage = format!("cv {}", section.keyword());
        out.line(format!("  [{}] {:<20} - Show {}", i + 1, usage, section.keyword()))
            .await;
    }
    out.blank().await;
    out.line("Direct access with \"cv 1\", \"cv 2\", etc.").await;
}

pub async fn show(out: &Writer<'_>, profile: &Profile, section: CvSection) {
    out.line(format!("[ {} ]", section.title())).await;
    out.blank().await;

    let cv = &profile.cv;
    match section {
        CvSection::Education => {
            let panel = Panel::new(CV_WIDE_PANEL_WIDTH);
            for entry in &cv.education {
                let body = [
                    entry.degree.clone(),
                    format!("{} ({})", entry.institution, entry.year),
                    String::new(),
                    entry.description.clone(),
                ];
                draw(out, panel, &body).await;
                out.blank().await;
            }
        }
        CvSection::Experience => {
            let panel = Panel::new(CV_WIDE_PANEL_WIDTH);
            for entry in &cv.experience {
                let mut body = vec![entry.position.clone()];
                if !entry.company.trim().is_empty() {
                    body.push(entry.company.clone());
                }
                body.push(format!("Period: {}", entry.period));
                body.push(String::new());
                body.push(entry.description.clone());
                draw(out, panel, &body).await;
                out.blank().await;
            }
        }
        CvSection::Languages => {
            let body: Vec<String> = cv
                .languages
                .iter()
                .map(|l| format!("{}: {}", l.name, l.level))
                .collect();
            draw(out, Panel::new(CV_LANGUAGE_PANEL_WIDTH), &body).await;
        }
        CvSection::Certifications => {
            let body: Vec<String> = cv
                .certifications
                .iter()
                .map(|c| format!("{} ({}, {})", c.name, c.issuer, c.year))
                .collect();
            draw(out, Panel::new(CV_CERTIFICATION_PANEL_WIDTH), &body).await;
        }
    }
}

/// One panel: instant borders around typed rows. Empty paragraphs become a
/// blank interior row.
async fn draw(out: &Writer<'_>, panel: Panel, paragraphs: &[String]) {
    out.instant(panel.top());
    for paragraph in paragraphs {
        for row in panel.rows(paragraph) {
            out.line(row).await;
        }
    }
    out.instant(panel.bottom());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_and_number() {
        assert_eq!(CvSection::parse("education"), Some(CvSection::Education));
        assert_eq!(CvSection::parse("2"), Some(CvSection::Experience));
        assert_eq!(CvSection::parse(" Languages "), Some(CvSection::Languages));
        assert_eq!(CvSection::parse("4"), Some(CvSection::Certifications));
        assert_eq!(CvSection::parse("5"), None);
        assert_eq!(CvSection::parse("hobbies"), None);
    }
}
