use std::path::Path;

/// Syntax style of an open file, derived from its extension only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SyntaxStyle {
    #[default]
    None,
    C,
    Cpp,
    Java,
    Python,
    CSharp,
    JavaScript,
    Ruby,
    Php,
    Go,
    Scala,
    Lua,
    Perl,
    Dart,
}

impl SyntaxStyle {
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|s| s.to_str())
            .map(Self::from_file_name)
            .unwrap_or_default()
    }

    pub fn from_file_name(name: &str) -> Self {
        match file_extension(name).as_deref() {
            Some("c" | "h") => Self::C,
            Some("cpp" | "hpp") => Self::Cpp,
            Some("java") => Self::Java,
            Some("py") => Self::Python,
            Some("cs") => Self::CSharp,
            Some("js") => Self::JavaScript,
            Some("rb") => Self::Ruby,
            Some("php") => Self::Php,
            Some("go") => Self::Go,
            Some("scala") => Self::Scala,
            Some("lua") => Self::Lua,
            Some("pl") => Self::Perl,
            Some("dart") => Self::Dart,
            _ => Self::None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "Plain Text",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::Python => "Python",
            Self::CSharp => "C#",
            Self::JavaScript => "JavaScript",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
            Self::Go => "Go",
            Self::Scala => "Scala",
            Self::Lua => "Lua",
            Self::Perl => "Perl",
            Self::Dart => "Dart",
        }
    }
}

/// Lower-cased text after the last dot. A leading dot (`.bashrc`) or a
/// trailing one (`notes.`) yields no extension.
pub fn file_extension(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot + 1..].to_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
