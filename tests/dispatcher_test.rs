// Integration tests for the command dispatcher
//
// Every test drives the dispatcher the way the REPL does (one awaited submit
// per line) and inspects the rows left on the output surface.

use std::sync::Arc;
use std::time::Duration;

use termfolio::cli::{
    Dispatcher, LineRenderer, LineStyle, NullDisplay, OutputManager, RenderSettings, Services,
    COMMANDS,
};
use termfolio::config::Config;
use termfolio::services::{AuthGate, Profile, RecordingNavigator, StateStore, ThemeRegistry};

struct Harness {
    dispatcher: Dispatcher,
    navigator: Arc<RecordingNavigator>,
    themes: Arc<ThemeRegistry>,
    auth: Arc<AuthGate>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(Config::instant())
    }

    fn with_config(config: Config) -> Self {
        let store = Arc::new(StateStore::in_memory());
        let navigator = Arc::new(RecordingNavigator::new());
        let themes = Arc::new(ThemeRegistry::new(store.clone(), "matrix"));
        let auth = Arc::new(AuthGate::new(store, Duration::ZERO));
        auth.complete_authentication();

        let services = Services {
            profile: Arc::new(Profile::embedded().unwrap()),
            themes: themes.clone(),
            auth: auth.clone(),
            navigator: navigator.clone(),
        };
        let renderer = Arc::new(LineRenderer::new(
            OutputManager::new(),
            Arc::new(NullDisplay),
            RenderSettings::from(&config),
            Some(11),
        ));
        Self {
            dispatcher: Dispatcher::new(renderer, services, &config),
            navigator,
            themes,
            auth,
        }
    }

    async fn run(&mut self, input: &str) -> Vec<String> {
        self.dispatcher.renderer().clear();
        self.dispatcher.submit(input).await;
        self.rows()
    }

    fn rows(&self) -> Vec<String> {
        self.dispatcher.renderer().output().contents()
    }
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let mut h = Harness::new();
    assert!(h.run("").await.is_empty());
    assert!(h.run("   ").await.is_empty());
    assert!(h.dispatcher.history().is_empty());
}

#[tokio::test]
async fn test_about_renders_in_order() {
    let mut h = Harness::new();
    let rows = h.run("about").await;
    assert_eq!(
        rows,
        vec![
            "> about",
            "Name: Alex Morgan",
            "Title: Junior Frontend Developer",
            "Location: Bremen, Germany",
            "",
            "Bio:",
            "Specialized in creating innovative web applications using modern technologies.",
            "Always looking for the next challenge in the digital realm.",
            "",
        ]
    );
}

#[tokio::test]
async fn test_command_names_are_case_insensitive() {
    let mut h = Harness::new();
    let rows = h.run("WhoAmI").await;
    assert_eq!(rows, vec!["> WhoAmI", "Alex Morgan", ""]);
}

#[tokio::test]
async fn test_echo_keeps_argument_case() {
    let mut h = Harness::new();
    let rows = h.run("echo Hello   World").await;
    assert_eq!(rows[1], "Hello   World");
}

#[tokio::test]
async fn test_bare_echo_is_unknown() {
    let mut h = Harness::new();
    let rows = h.run("echo").await;
    assert_eq!(
        rows,
        vec![
            "> echo",
            "Command not found: echo",
            "Type \"help\" to see available commands.",
            "",
        ]
    );
}

#[tokio::test]
async fn test_showcase_index_and_name_converge() {
    let mut h = Harness::new();
    let by_index = h.run("showcase 2").await;
    let by_name = h.run("showcase pixel runner").await;
    assert_eq!(by_index[1..], by_name[1..]);
    assert!(by_index.iter().any(|r| r.contains("Pixel Runner")));
}

#[tokio::test]
async fn test_showcase_detail_layout() {
    let mut h = Harness::new();
    let rows = h.run("showcase budget buddy").await;

    let top = rows.iter().position(|r| r.starts_with('╔')).unwrap();
    assert_eq!(rows[top], format!("╔{}╗", "═".repeat(60)));
    assert_eq!(rows[top + 1].chars().count(), 62);
    assert!(rows[top + 1].contains("Budget Buddy"));
    assert_eq!(rows[top + 2], format!("╚{}╝", "═".repeat(60)));

    assert!(rows.contains(&"Angular, HTML5, CSS3, TypeScript, Supabase".to_string()));
    // no live demo for this one, the rest still renders
    let missing = rows
        .iter()
        .position(|r| r == "Live demo for \"Budget Buddy\" not found.")
        .unwrap();
    assert_eq!(rows[missing + 1], "Source Code:");
    assert_eq!(
        rows[rows.len() - 3..],
        [
            "Type \"code 3\" to view the source code".to_string(),
            String::new(),
            String::new(),
        ]
    );
}

#[tokio::test]
async fn test_present_links_end_with_spacer() {
    let mut h = Harness::new();
    let rows = h.run("showcase 1").await;
    let demo = rows.iter().position(|r| r == "Live Demo:").unwrap();
    assert_eq!(rows[demo + 3], "");
    assert_eq!(rows[demo + 4], "Source Code:");
}

#[tokio::test]
async fn test_showcase_hint_uses_canonical_number() {
    let mut h = Harness::new();
    let rows = h.run("showcase KANBAN BOARD").await;
    assert!(rows.contains(&"Type \"open 1\" to visit the live demo".to_string()));
    assert!(rows.contains(&"Type \"code 1\" to view the source code".to_string()));
}

#[tokio::test]
async fn test_showcase_out_of_range() {
    let mut h = Harness::new();
    let rows = h.run("showcase 99").await;
    assert_eq!(
        rows,
        vec!["> showcase 99", "Project number out of range. Available: 1-3", ""]
    );
    assert!(h.navigator.opened().is_empty());
    assert_eq!(h.themes.current_theme().name, "matrix");
}

#[tokio::test]
async fn test_unknown_project_name_lists_projects() {
    let mut h = Harness::new();
    let rows = h.run("open Nope").await;
    assert_eq!(
        rows,
        vec![
            "> open Nope",
            "Project \"Nope\" not found.",
            "Available projects:",
            "  1. Kanban Board",
            "  2. Pixel Runner",
            "  3. Budget Buddy",
            "",
        ]
    );
    assert!(h.navigator.opened().is_empty());
}

#[tokio::test]
async fn test_open_navigates_once() {
    let mut h = Harness::new();
    let rows = h.run("open 1").await;
    assert_eq!(
        rows,
        vec!["> open 1", "Opening Kanban Board live demo...", ""]
    );
    assert_eq!(
        h.navigator.opened(),
        vec!["https://kanban.example.dev/login.html"]
    );
}

#[tokio::test]
async fn test_open_without_demo_does_not_navigate() {
    let mut h = Harness::new();
    let rows = h.run("open 3").await;
    assert_eq!(rows[1], "Live demo for \"Budget Buddy\" not found.");
    assert!(h.navigator.opened().is_empty());
}

#[tokio::test]
async fn test_code_opens_repository() {
    let mut h = Harness::new();
    let rows = h.run("code Budget Buddy").await;
    assert_eq!(rows[1], "Opening Budget Buddy source code repository...");
    assert_eq!(
        h.navigator.opened(),
        vec!["https://github.com/example/budget-buddy"]
    );
}

#[tokio::test]
async fn test_project_commands_without_argument_list_projects() {
    let mut h = Harness::new();
    for command in ["showcase", "open", "code"] {
        let rows = h.run(command).await;
        assert_eq!(rows[1], "Project Showcase:");
        assert!(rows.contains(&"3. Budget Buddy".to_string()));
    }
    assert!(h.navigator.opened().is_empty());
}

#[tokio::test]
async fn test_theme_listing_marks_active() {
    let mut h = Harness::new();
    let rows = h.run("theme").await;
    assert!(rows.contains(&"* matrix - Classic green on black terminal style".to_string()));
    assert!(rows.contains(&"  retro - Vintage amber on black terminal".to_string()));
}

#[tokio::test]
async fn test_theme_switching() {
    let mut h = Harness::new();

    let rows = h.run("theme nonexistent").await;
    assert_eq!(
        rows[1],
        "Theme \"nonexistent\" not found. Type \"theme\" to see available themes."
    );
    assert_eq!(h.themes.current_theme().name, "matrix");

    let rows = h.run("theme CyberPunk").await;
    assert_eq!(rows[1], "Theme changed to Cyberpunk.");
    assert_eq!(h.themes.current_theme().name, "cyberpunk");
}

#[tokio::test]
async fn test_glitch_toggle() {
    let mut h = Harness::new();

    let rows = h.run("glitch").await;
    assert_eq!(rows[1], "Glitch mode enabled. System unstable.");
    assert!(h.dispatcher.glitch_enabled());

    // glitch never changes the final text
    let rows = h.run("whoami").await;
    assert_eq!(rows, vec!["> whoami", "Alex Morgan", ""]);
    let lines = h.dispatcher.renderer().output().lines();
    assert!(lines[1].glitch_enabled);

    let rows = h.run("glitch").await;
    assert_eq!(rows[1], "Glitch mode disabled. System stabilized.");
    assert!(!h.dispatcher.glitch_enabled());
}

#[tokio::test]
async fn test_glitch_mode_reaches_cv_rows() {
    let mut h = Harness::new();
    h.dispatcher.submit("glitch").await;
    h.run("cv languages").await;

    let lines = h.dispatcher.renderer().output().lines();
    let rows: Vec<_> = lines.iter().filter(|l| l.content.starts_with('│')).collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert!(row.glitch_enabled, "{:?}", row.content);
        assert_eq!(row.content.chars().count(), 42);
    }
}

#[tokio::test]
async fn test_cv_menu_and_unknown_section() {
    let mut h = Harness::new();
    let menu = h.run("cv").await;
    assert_eq!(menu[1], "Interactive CV - Alex Morgan");

    let rows = h.run("cv hobbies").await;
    assert_eq!(rows[1], "Unknown CV section: hobbies");
    assert!(rows.contains(&"Interactive CV - Alex Morgan".to_string()));
}

#[tokio::test]
async fn test_cv_synonyms_match() {
    let mut h = Harness::new();
    for (number, name) in [("1", "education"), ("2", "experience"), ("3", "languages"), ("4", "certifications")] {
        let by_number = h.run(&format!("cv {number}")).await;
        let by_name = h.run(&format!("cv {name}")).await;
        assert_eq!(by_number[1..], by_name[1..], "cv {number} vs cv {name}");
    }
}

#[tokio::test]
async fn test_cv_panels_have_fixed_width() {
    let mut h = Harness::new();
    let rows = h.run("cv experience").await;

    let panel: Vec<&String> = rows
        .iter()
        .filter(|r| r.starts_with('┌') || r.starts_with('│') || r.starts_with('└'))
        .collect();
    assert!(panel.len() > 5, "long description should wrap over several rows");
    for row in panel {
        assert_eq!(row.chars().count(), 60, "{row:?}");
    }

    // the empty company gets no row
    let top = rows.iter().position(|r| r.starts_with('┌')).unwrap();
    assert!(rows[top + 1].starts_with("│ Junior Frontend Developer (career changer)"));
    assert!(rows[top + 2].starts_with("│ Period: 2024 - today"));
}

#[tokio::test]
async fn test_languages_panel() {
    let mut h = Harness::new();
    let rows = h.run("cv languages").await;
    assert_eq!(rows[1], "[ Languages ]");
    assert!(rows.iter().any(|r| r.starts_with("│ German: Native")));
    assert!(rows
        .iter()
        .filter(|r| r.starts_with('│'))
        .all(|r| r.chars().count() == 42));
}

#[tokio::test]
async fn test_clear_then_render_shows_only_new_rows() {
    let mut h = Harness::new();
    h.dispatcher.submit("about").await;
    h.dispatcher.submit("clear").await;
    assert_eq!(h.rows(), vec![""]);

    h.dispatcher.renderer().clear();
    h.dispatcher.submit("whoami").await;
    assert_eq!(h.rows(), vec!["> whoami", "Alex Morgan", ""]);
}

#[tokio::test]
async fn test_unknown_command() {
    let mut h = Harness::new();
    let rows = h.run("rm -rf").await;
    assert_eq!(
        rows,
        vec![
            "> rm -rf",
            "Command not found: rm -rf",
            "Type \"help\" to see available commands.",
            "",
        ]
    );
    let lines = h.dispatcher.renderer().output().lines();
    assert_eq!(lines[0].style, LineStyle::Echo);
    assert_eq!(lines[1].style, LineStyle::Glitch);
    assert_eq!(lines[2].style, LineStyle::Normal);
}

#[tokio::test]
async fn test_no_argument_commands_reject_arguments() {
    let mut h = Harness::new();
    let rows = h.run("about me").await;
    assert_eq!(rows[1], "Command not found: about me");
}

#[tokio::test]
async fn test_easter_egg() {
    let mut h = Harness::new();
    let rows = h.run("sudo rm -rf /").await;
    assert_eq!(
        rows,
        vec![
            "> sudo rm -rf /",
            "Nice try. This terminal has advanced security features!",
            "",
        ]
    );
}

#[tokio::test]
async fn test_help_lists_every_command() {
    let mut h = Harness::new();
    let rows = h.run("help").await;
    for spec in COMMANDS {
        assert!(
            rows.iter().any(|r| r.trim_start().starts_with(spec.usage) && r.contains(spec.description)),
            "missing {}",
            spec.name
        );
    }
    assert_eq!(rows[rows.len() - 2], "Try to find the hidden easter eggs!");
}

#[tokio::test]
async fn test_ls_and_dir_are_the_same() {
    let mut h = Harness::new();
    let ls = h.run("ls").await;
    let dir = h.run("dir").await;
    assert_eq!(ls[1..], dir[1..]);
    assert!(ls.contains(&"drwxr-xr-x  secrets/".to_string()));
}

#[tokio::test]
async fn test_hack_is_instant_and_styled() {
    let mut h = Harness::new();
    h.run("hack").await;
    let lines = h.dispatcher.renderer().output().lines();

    // echo, announcement, 10 hex lines, completion, blank
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[1].content, "INITIATING HACK SEQUENCE...");
    assert_eq!(lines[12].content, "HACK COMPLETE. ACCESS GRANTED.");
    for line in &lines[1..13] {
        assert_eq!(line.style, LineStyle::Glitch);
    }
    for line in &lines[2..12] {
        assert!((30..80).contains(&line.content.len()));
        assert!(line.content.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[tokio::test]
async fn test_matrix_rain() {
    let mut h = Harness::new();
    let rows = h.run("matrix").await;
    assert_eq!(rows[1], "Initiating Matrix rain sequence...");
    assert_eq!(rows[rows.len() - 2], "Matrix rain sequence complete.");

    let rain = &rows[3..11];
    assert_eq!(rain.len(), 8);
    for line in rain {
        assert_eq!(line.chars().count(), 50);
    }
}

#[tokio::test]
async fn test_history_is_bounded() {
    let mut h = Harness::new();
    for i in 1..=51 {
        h.dispatcher.submit(&format!("echo {i}")).await;
    }
    assert_eq!(h.dispatcher.history().len(), 50);
    assert_eq!(h.dispatcher.recall_previous(), "echo 51");
    assert!(!h.dispatcher.history().entries().any(|e| e == "echo 1"));
}

#[tokio::test(start_paused = true)]
async fn test_logout_fires_after_delay() {
    let mut h = Harness::with_config(Config {
        logout_delay_ms: 1000,
        ..Config::instant()
    });
    let mut session = h.auth.subscribe();

    let rows = h.run("logout").await;
    assert_eq!(rows, vec!["> logout", "Logging out...", ""]);
    assert!(h.auth.is_authenticated());
    assert!(h.dispatcher.logout_pending());

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(h.auth.is_authenticated());

    session.changed().await.unwrap();
    assert!(!*session.borrow());
    assert!(!h.auth.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_typewriter_output_matches_instant_output() {
    let mut slow = Harness::with_config(Config {
        typewriter_speed_ms: 15,
        ..Config::instant()
    });
    let mut fast = Harness::new();

    let start = tokio::time::Instant::now();
    let animated = slow.run("contact").await;
    assert!(start.elapsed() > Duration::from_millis(100));

    assert_eq!(animated, fast.run("contact").await);
}
