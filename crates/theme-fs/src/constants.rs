//! Well-known files inside a generated theme directory.

/// Aggregate and metadata files every sync reads back before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePath {
    /// Theme header with the persisted theme id and commit counter
    Stylesheet,
    /// Hand-editable entry point, created once and never overwritten
    Functions,
    /// Aggregated logic file made of chunks
    GeneratedFunctions,
    /// Aggregated stylesheet-import file
    StylesScss,
    /// Aggregated script-import file
    MainJs,
}

impl ThemePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stylesheet => "style.css",
            Self::Functions => "functions.php",
            Self::GeneratedFunctions => "tw-functions.php",
            Self::StylesScss => "assets/scss/styles.scss",
            Self::MainJs => "assets/js/main.js",
        }
    }
}

impl AsRef<str> for ThemePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
