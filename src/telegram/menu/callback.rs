//! Callback identifiers carried by inline buttons

use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Every callback identifier the bot puts on an inline button.
///
/// Parsing is exact-match; anything else is not ours and gets ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MenuCallback {
    Stats,
    Leaderboard,
    Help,
    Developer,
    BackToMain,
}

impl MenuCallback {
    /// Parses raw callback data, returning `None` for unknown identifiers
    pub fn parse(data: &str) -> Option<Self> {
        data.parse().ok()
    }

    /// Identifier placed on the button
    pub fn data(self) -> &'static str {
        self.into()
    }
}
