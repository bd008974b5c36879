// Command parsing and the command table

/// The easter egg, matched on the whole trimmed, lowercased line
pub const EASTER_EGG: &str = "sudo rm -rf /";

/// A submitted line split into command name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Exactly as typed
    pub raw: String,
    /// Lowercased first token
    pub name: String,
    /// Everything after the first space, original case, trimmed
    pub args: String,
}

impl CommandLine {
    /// Split `raw`. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (name, args) = match trimmed.split_once(' ') {
            Some((name, args)) => (name, args.trim()),
            None => (trimmed, ""),
        };
        Some(Self {
            raw: raw.to_string(),
            name: name.to_lowercase(),
            args: args.to_string(),
        })
    }

    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn is_easter_egg(&self) -> bool {
        self.raw.trim().to_lowercase() == EASTER_EGG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Skills,
    Projects,
    Contact,
    Cv,
    Showcase,
    Open,
    Code,
    Theme,
    Glitch,
    Hack,
    Matrix,
    Echo,
    Date,
    Whoami,
    Ls,
    Clear,
    Logout,
}

/// What may follow a command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Optional,
    /// Only matches with text after the name (`echo` alone is unknown)
    Required,
}

impl Arity {
    fn accepts(self, has_args: bool) -> bool {
        match self {
            Arity::None => !has_args,
            Arity::Optional => true,
            Arity::Required => has_args,
        }
    }
}

pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Left column of `help`
    pub usage: &'static str,
    pub description: &'static str,
    pub command: Command,
    pub arity: Arity,
}

const fn spec(
    name: &'static str,
    usage: &'static str,
    description: &'static str,
    command: Command,
    arity: Arity,
) -> CommandSpec {
    CommandSpec {
        name,
        aliases: &[],
        usage,
        description,
        command,
        arity,
    }
}

/// Every command, in `help` order
pub const COMMANDS: &[CommandSpec] = &[
    spec("help", "help", "Show this help message", Command::Help, Arity::None),
    spec("about", "about", "Show information about me", Command::About, Arity::None),
    spec("skills", "skills", "Show my technical skills", Command::Skills, Arity::None),
    spec("projects", "projects", "List my projects", Command::Projects, Arity::None),
    spec("contact", "contact", "Display contact information", Command::Contact, Arity::None),
    spec("cv", "cv [section]", "Show interactive resume", Command::Cv, Arity::Optional),
    spec("clear", "clear", "Clear terminal", Command::Clear, Arity::None),
    spec("date", "date", "Show current date and time", Command::Date, Arity::None),
    spec("whoami", "whoami", "Show user name", Command::Whoami, Arity::None),
    CommandSpec {
        name: "ls",
        aliases: &["dir"],
        usage: "ls/dir",
        description: "List directory contents",
        command: Command::Ls,
        arity: Arity::None,
    },
    spec("echo", "echo [text]", "Echo a message", Command::Echo, Arity::Required),
    spec("hack", "hack", "Start hacking animation", Command::Hack, Arity::None),
    spec("matrix", "matrix", "Start Matrix rain effect", Command::Matrix, Arity::None),
    spec("glitch", "glitch", "Toggle glitch mode", Command::Glitch, Arity::None),
    spec(
        "theme",
        "theme [name]",
        "Show or change terminal themes",
        Command::Theme,
        Arity::Optional,
    ),
    spec("logout", "logout", "Log out of the terminal", Command::Logout, Arity::None),
    spec(
        "showcase",
        "showcase [number/name]",
        "List all projects or show details about one",
        Command::Showcase,
        Arity::Optional,
    ),
    spec("open", "open [number/name]", "Open project live demo", Command::Open, Arity::Optional),
    spec("code", "code [number/name]", "View project source code", Command::Code, Arity::Optional),
];

impl Command {
    /// Find the command for a parsed line. The name must match and the
    /// presence of arguments must fit the command's arity.
    pub fn lookup(line: &CommandLine) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name == line.name || spec.aliases.contains(&line.name.as_str()))
            .filter(|spec| spec.arity.accepts(line.has_args()))
            .map(|spec| spec.command)
    }
}
