// Collaborator services
//
// Everything the command interpreter reads from but does not own: the fake
// authentication gate, the profile data, the theme registry, browser
// navigation and the small persisted session state behind them.

pub mod auth;
pub mod navigator;
pub mod profile;
pub mod state;
pub mod theme;

pub use auth::AuthGate;
pub use navigator::{BrowserNavigator, Navigator, RecordingNavigator};
pub use profile::{Certification, Contact, Cv, Education, Experience, Language, Profile, Project, SkillGroup};
pub use state::{SessionState, StateStore};
pub use theme::{Theme, ThemeRegistry};
