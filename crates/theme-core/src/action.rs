//! Sync actions a client may request

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// What triggered a sync.
///
/// `All` rebuilds the whole theme. Every other action except `Ping` touches
/// only the entities it names and is gated on the commit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    All,
    PostType,
    Taxonomy,
    Block,
    BlockGroup,
    Part,
    Template,
    MenuPage,
    OptionsPage,
    ScssPartial,
    JsModule,
    FieldSet,
    Ping,
}

impl SyncAction {
    pub const ALL: [SyncAction; 13] = [
        Self::All,
        Self::PostType,
        Self::Taxonomy,
        Self::Block,
        Self::BlockGroup,
        Self::Part,
        Self::Template,
        Self::MenuPage,
        Self::OptionsPage,
        Self::ScssPartial,
        Self::JsModule,
        Self::FieldSet,
        Self::Ping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::PostType => "post-type",
            Self::Taxonomy => "taxonomy",
            Self::Block => "block",
            Self::BlockGroup => "block-group",
            Self::Part => "part",
            Self::Template => "template",
            Self::MenuPage => "menu-page",
            Self::OptionsPage => "options-page",
            Self::ScssPartial => "scss-partial",
            Self::JsModule => "js-module",
            Self::FieldSet => "field-set",
            Self::Ping => "ping",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::InvalidAction(s.to_string()))
    }
}
