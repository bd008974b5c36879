// Informational commands: help, about, skills, projects, contact and the
// small shell lookalikes.

use chrono::Local;

use super::Writer;
use crate::cli::commands::COMMANDS;
use crate::services::Profile;

pub async fn help(out: &Writer<'_>) {
    out.line("Available commands:").await;
    for spec in COMMANDS {
        out.line(format!("  {:<24} - {}", spec.usage, spec.description))
            .await;
    }
    out.blank().await;
    out.line("Try to find the hidden easter eggs!").await;
}

pub async fn about(out: &Writer<'_>, profile: &Profile) {
    out.line(format!("Name: {}", profile.name)).await;
    out.line(format!("Title: {}", profile.title)).await;
    out.line(format!("Location: {}", profile.location)).await;
    out.blank().await;
    out.line("Bio:").await;
    out.line(profile.bio.trim()).await;
}

pub async fn skills(out: &Writer<'_>, profile: &Profile) {
    out.line("Technical Skills:").await;
    out.blank().await;
    for group in &profile.skills {
        out.line(format!("[{}]", group.category)).await;
        out.line(group.items.join(", ")).await;
        out.blank().await;
    }
}

pub async fn projects(out: &Writer<'_>, profile: &Profile) {
    out.line("Projects:").await;
    out.blank().await;
    for (i, project) in profile.projects.iter().enumerate() {
        out.line(format!("{}. {}", i + 1, project.name)).await;
        out.line(format!("   {}", project.description)).await;
        out.line(format!("   Technologies: {}", project.tech.join(", ")))
            .await;
        out.blank().await;
    }
    out.line("For more details, type: showcase [number/name]").await;
}

pub async fn contact(out: &Writer<'_>, profile: &Profile) {
    let contact = &profile.contact;
    out.line("Contact Information:").await;
    out.blank().await;
    out.line(format!("Email: {}", contact.email)).await;
    out.line(format!("GitHub: {}", contact.github)).await;
    out.line(format!("LinkedIn: {}", contact.linkedin)).await;
}

pub async fn list_directory(out: &Writer<'_>) {
    out.lines(&[
        "Directory contents:",
        "",
        "drwxr-xr-x  about.txt",
        "drwxr-xr-x  skills.md",
        "drwxr-xr-x  projects/",
        "drwxr-xr-x  contact.json",
        "drwxr-xr-x  cv/",
        "drwxr-xr-x  secrets/",
    ])
    .await;
}

pub async fn whoami(out: &Writer<'_>, profile: &Profile) {
    out.line(&profile.name).await;
}

pub async fn date(out: &Writer<'_>) {
    out.line(Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
        .await;
}

pub async fn echo(out: &Writer<'_>, text: &str) {
    out.line(text).await;
}
