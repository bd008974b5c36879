// Project showcase: list, detail view and the open/code shortcuts
//
// Projects are addressed by 1-based number or by exact name (any case). A
// numeric argument in range always means the number, even if a project
// happens to be called that.

use tracing::warn;

use super::Writer;
use crate::cli::layout::header_box;
use crate::config::constants::PROJECT_BOX_WIDTH;
use crate::services::{Navigator, Profile, Project};

#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a Project),
    /// A number outside 1..=N that is not a project name either
    OutOfRange,
    NotFound,
}

pub fn resolve<'a>(profile: &'a Profile, arg: &str) -> Lookup<'a> {
    let arg = arg.trim();
    let number = arg.parse::<u64>().ok();

    if let Some(n) = number {
        let in_range = n >= 1 && n <= profile.projects.len() as u64;
        if in_range {
            if let Some(project) = profile.project_by_index(n as usize - 1) {
                return Lookup::Found(project);
            }
        }
    }

    match (profile.project_by_name(arg), number) {
        (Some(project), _) => Lookup::Found(project),
        (None, Some(_)) => Lookup::OutOfRange,
        (None, None) => Lookup::NotFound,
    }
}

/// Which link `open`/`code` follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    LiveDemo,
    SourceCode,
}

impl Link {
    fn url(self, project: &Project) -> Option<&str> {
        match self {
            Link::LiveDemo => project.live_demo(),
            Link::SourceCode => project.github_repo(),
        }
    }

    fn missing(self, name: &str) -> String {
        match self {
            Link::LiveDemo => format!("Live demo for \"{name}\" not found."),
            Link::SourceCode => format!("Source code for \"{name}\" not found."),
        }
    }

    fn opening(self, name: &str) -> String {
        match self {
            Link::LiveDemo => format!("Opening {name} live demo..."),
            Link::SourceCode => format!("Opening {name} source code repository..."),
        }
    }
}

pub async fn list(out: &Writer<'_>, profile: &Profile) {
    out.line("Project Showcase:").await;
    out.blank().await;
    for (i, project) in profile.projects.iter().enumerate() {
        out.line(format!("{}. {}", i + 1, project.name)).await;
    }
    out.blank().await;
    out.line("Type \"showcase [number]\" to view project details").await;
    out.line("Type \"open [number]\" to open live demo").await;
    out.line("Type \"code [number]\" to view source code").await;
}

/// `showcase [arg]`
pub async fn showcase(out: &Writer<'_>, profile: &Profile, arg: &str) {
    if arg.is_empty() {
        return list(out, profile).await;
    }
    if let Some(project) = found_or_report(out, profile, arg).await {
        details(out, profile, project).await;
    }
}

/// `open [arg]` and `code [arg]`
pub async fn open_link(
    out: &Writer<'_>,
    profile: &Profile,
    navigator: &dyn Navigator,
    arg: &str,
    link: Link,
) {
    if arg.is_empty() {
        return list(out, profile).await;
    }
    let Some(project) = found_or_report(out, profile, arg).await else {
        return;
    };
    let Some(url) = link.url(project) else {
        out.line(link.missing(&project.name)).await;
        return;
    };

    out.line(link.opening(&project.name)).await;
    if let Err(e) = navigator.open(url) {
        warn!(error = %e, url, "Navigation failed");
        out.line(format!("Could not open browser: {e}")).await;
    }
}

async fn found_or_report<'p>(out: &Writer<'_>, profile: &'p Profile, arg: &str) -> Option<&'p Project> {
    match resolve(profile, arg) {
        Lookup::Found(project) => Some(project),
        Lookup::OutOfRange => {
            out.line(format!(
                "Project number out of range. Available: 1-{}",
                profile.projects.len()
            ))
            .await;
            None
        }
        Lookup::NotFound => {
            out.line(format!("Project \"{arg}\" not found.")).await;
            out.line("Available projects:").await;
            for (i, project) in profile.projects.iter().enumerate() {
                out.line(format!("  {}. {}", i + 1, project.name)).await;
            }
            None
        }
    }
}

/// Detail view. The hints use the project's canonical number, whatever the
/// user typed to get here. A missing link is a single row with no spacer.
pub async fn details(out: &Writer<'_>, profile: &Profile, project: &Project) {
    let number = profile.display_number(project);

    out.blank().await;
    for row in header_box(&project.name, PROJECT_BOX_WIDTH) {
        out.instant(row);
    }
    out.blank().await;
    out.line("Description:").await;
    out.line(&project.description).await;
    out.blank().await;
    out.line("Technologies:").await;
    out.line(project.tech.join(", ")).await;
    out.blank().await;

    match project.live_demo() {
        Some(url) => {
            out.line("Live Demo:").await;
            out.line(format!("  {url}")).await;
            out.line(format!("Type \"open {number}\" to visit the live demo"))
                .await;
            out.blank().await;
        }
        None => out.line(Link::LiveDemo.missing(&project.name)).await,
    }

    match project.github_repo() {
        Some(url) => {
            out.line("Source Code:").await;
            out.line(format!("  {url}")).await;
            out.line(format!("Type \"code {number}\" to view the source code"))
                .await;
            out.blank().await;
        }
        None => out.line(Link::SourceCode.missing(&project.name)).await,
    }
}
