// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level commands recognised in the idle layer.

use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

/// A command label a user can send when no continuation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Command {
    #[strum(serialize = "/start")]
    Start,
    #[strum(serialize = "/hello-world")]
    HelloWorld,
    #[strum(serialize = "🎬 Film search (by title)")]
    FilmSearch,
    #[strum(serialize = "🔎 Film advanced search (by params)")]
    AdvancedSearch,
    #[strum(serialize = "🕒 Last arrivals")]
    LastArrivals,
    #[strum(serialize = "📜 History")]
    History,
    #[strum(serialize = "👋 Hello")]
    Hello,
    #[strum(serialize = "📞 Help")]
    Help,
}

/// Menu entries in display order.
pub const MENU: [Command; 6] = [
    Command::FilmSearch,
    Command::AdvancedSearch,
    Command::LastArrivals,
    Command::History,
    Command::Hello,
    Command::Help,
];

impl Command {
    /// Matches `text` against the command labels.
    ///
    /// Menu labels must match exactly. Slash commands match on their first
    /// word, with an optional `@botname` suffix, as Telegram sends them in
    /// group chats.
    pub fn parse(text: &str) -> Option<Self> {
        if text.starts_with('/') {
            let word = text.split_whitespace().next().unwrap_or(text);
            let name = word.split('@').next().unwrap_or(word);
            return match Self::from_str(name) {
                Ok(cmd @ (Self::Start | Self::HelloWorld)) => Some(cmd),
                _ => None,
            };
        }
        Self::from_str(text)
            .ok()
            .filter(|cmd| !matches!(cmd, Self::Start | Self::HelloWorld))
    }

    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Slash commands bypass the conversation log and leave `last_request`
    /// untouched.
    pub fn is_slash(self) -> bool {
        matches!(self, Self::Start | Self::HelloWorld)
    }
}

/// Labels of [`MENU`], ready for a reply keyboard.
pub fn menu_labels() -> Vec<&'static str> {
    MENU.iter().map(|cmd| cmd.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels_match_exactly() {
        for cmd in MENU {
            assert_eq!(Command::parse(cmd.label()), Some(cmd));
        }
        assert_eq!(Command::parse("📜 history"), None);
        assert_eq!(Command::parse(" 📜 History"), None);
    }

    #[test]
    fn slash_commands_accept_mentions_and_arguments() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/start@reel_bot"), Some(Command::Start));
        assert_eq!(Command::parse("/hello-world now"), Some(Command::HelloWorld));
        assert_eq!(Command::parse("/help"), None);
    }

    #[test]
    fn menu_labels_are_in_display_order() {
        assert_eq!(
            menu_labels(),
            vec![
                "🎬 Film search (by title)",
                "🔎 Film advanced search (by params)",
                "🕒 Last arrivals",
                "📜 History",
                "👋 Hello",
                "📞 Help",
            ]
        );
        assert!(Command::Start.is_slash());
        assert!(!Command::Help.is_slash());
    }
}
