//! In-game map creation commands

use serde::Serialize;

const MAP_CREATE: &str = "/mapcreate";

/// `/mapcreate <url>` for one uploaded tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapCommand {
    pub url: String,
}

impl MapCommand {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl std::fmt::Display for MapCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", MAP_CREATE, self.url)
    }
}

/// Join commands one per line, without a trailing newline
pub fn render_commands(commands: &[MapCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let cmd = MapCommand::new("https://i.imgur.com/abc123.png");
        assert_eq!(cmd.to_string(), "/mapcreate https://i.imgur.com/abc123.png");
    }

    #[test]
    fn test_render_commands() {
        let commands = vec![MapCommand::new("a"), MapCommand::new("b")];
        assert_eq!(render_commands(&commands), "/mapcreate a\n/mapcreate b");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_commands(&[]), "");
    }
}
