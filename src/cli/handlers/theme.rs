// `theme [name]`

use super::Writer;
use crate::services::ThemeRegistry;

pub async fn theme(out: &Writer<'_>, themes: &ThemeRegistry, arg: &str) {
    if arg.is_empty() {
        return list(out, themes).await;
    }
    if themes.set_theme(arg) {
        let theme = themes.current_theme();
        out.line(format!("Theme changed to {}.", theme.display_name))
            .await;
    } else {
        out.line(format!(
            "Theme \"{arg}\" not found. Type \"theme\" to see available themes."
        ))
        .await;
    }
}

pub async fn list(out: &Writer<'_>, themes: &ThemeRegistry) {
    let current = themes.current_theme().name.clone();
    out.line("Available themes:").await;
    out.blank().await;
    for theme in themes.list_themes() {
        let marker = if theme.name == current { "* " } else { "  " };
        out.line(format!("{marker}{} - {}", theme.name, theme.description))
            .await;
    }
    out.blank().await;
    out.line("Usage: theme [name]  - Change to specified theme").await;
}
