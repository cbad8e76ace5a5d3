//! Default styles for syntax highlighting
//!
//! Grammars never name colors directly. Each attribute ("item data")
//! points at one of the Kate default styles (`dsKeyword`, `dsComment`, ...)
//! and this module maps those to a visual format and a text type.

use super::style::{Color, Style, TextFormat};

/// Kate default styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultStyle {
    Normal,
    Keyword,
    ControlFlow,
    Operator,
    BuiltIn,
    Extension,
    Preprocessor,
    Attribute,
    Function,
    Variable,
    Constant,
    DataType,
    DecVal,
    BaseN,
    Float,
    Char,
    SpecialChar,
    String,
    VerbatimString,
    SpecialString,
    Import,
    Comment,
    Documentation,
    Annotation,
    CommentVar,
    RegionMarker,
    Information,
    Warning,
    Alert,
    Others,
    Error,
}

impl DefaultStyle {
    /// Get the format used for this default style
    pub fn default_format(&self) -> TextFormat {
        match self {
            DefaultStyle::Normal => TextFormat::default(),
            DefaultStyle::Keyword => TextFormat::fg(Color::Magenta).with_bold(),
            DefaultStyle::ControlFlow => TextFormat::fg(Color::Magenta).with_bold(),
            DefaultStyle::Operator => TextFormat::fg(Color::BrightWhite),
            DefaultStyle::BuiltIn => TextFormat::fg(Color::BrightBlue),
            DefaultStyle::Extension => TextFormat::fg(Color::Blue).with_bold(),
            DefaultStyle::Preprocessor => TextFormat::fg(Color::BrightMagenta),
            DefaultStyle::Attribute => TextFormat::fg(Color::BrightBlue),
            DefaultStyle::Function => TextFormat::fg(Color::Blue),
            DefaultStyle::Variable => TextFormat::fg(Color::BrightCyan),
            DefaultStyle::Constant => TextFormat::fg(Color::BrightRed),
            DefaultStyle::DataType => TextFormat::fg(Color::Yellow),
            DefaultStyle::DecVal => TextFormat::fg(Color::Cyan),
            DefaultStyle::BaseN => TextFormat::fg(Color::Cyan),
            DefaultStyle::Float => TextFormat::fg(Color::Cyan),
            DefaultStyle::Char => TextFormat::fg(Color::Green),
            DefaultStyle::SpecialChar => TextFormat::fg(Color::BrightYellow),
            DefaultStyle::String => TextFormat::fg(Color::Green),
            DefaultStyle::VerbatimString => TextFormat::fg(Color::Green),
            DefaultStyle::SpecialString => TextFormat::fg(Color::BrightGreen),
            DefaultStyle::Import => TextFormat::fg(Color::BrightMagenta),
            DefaultStyle::Comment => TextFormat::fg(Color::BrightBlack).with_italic(),
            DefaultStyle::Documentation => TextFormat::fg(Color::BrightBlack).with_italic(),
            DefaultStyle::Annotation => TextFormat::fg(Color::BrightBlue).with_italic(),
            DefaultStyle::CommentVar => TextFormat::fg(Color::Blue).with_italic(),
            DefaultStyle::RegionMarker => TextFormat::fg(Color::Blue).with_bg(Color::BrightBlack),
            DefaultStyle::Information => TextFormat::fg(Color::Yellow),
            DefaultStyle::Warning => TextFormat::fg(Color::BrightYellow).with_bold(),
            DefaultStyle::Alert => TextFormat::fg(Color::BrightRed).with_bold(),
            DefaultStyle::Others => TextFormat::fg(Color::Green),
            DefaultStyle::Error => TextFormat::fg(Color::Red).with_underline(),
        }
    }

    /// Get the Kate name of this default style
    pub fn name(&self) -> &'static str {
        match self {
            DefaultStyle::Normal => "dsNormal",
            DefaultStyle::Keyword => "dsKeyword",
            DefaultStyle::ControlFlow => "dsControlFlow",
            DefaultStyle::Operator => "dsOperator",
            DefaultStyle::BuiltIn => "dsBuiltIn",
            DefaultStyle::Extension => "dsExtension",
            DefaultStyle::Preprocessor => "dsPreprocessor",
            DefaultStyle::Attribute => "dsAttribute",
            DefaultStyle::Function => "dsFunction",
            DefaultStyle::Variable => "dsVariable",
            DefaultStyle::Constant => "dsConstant",
            DefaultStyle::DataType => "dsDataType",
            DefaultStyle::DecVal => "dsDecVal",
            DefaultStyle::BaseN => "dsBaseN",
            DefaultStyle::Float => "dsFloat",
            DefaultStyle::Char => "dsChar",
            DefaultStyle::SpecialChar => "dsSpecialChar",
            DefaultStyle::String => "dsString",
            DefaultStyle::VerbatimString => "dsVerbatimString",
            DefaultStyle::SpecialString => "dsSpecialString",
            DefaultStyle::Import => "dsImport",
            DefaultStyle::Comment => "dsComment",
            DefaultStyle::Documentation => "dsDocumentation",
            DefaultStyle::Annotation => "dsAnnotation",
            DefaultStyle::CommentVar => "dsCommentVar",
            DefaultStyle::RegionMarker => "dsRegionMarker",
            DefaultStyle::Information => "dsInformation",
            DefaultStyle::Warning => "dsWarning",
            DefaultStyle::Alert => "dsAlert",
            DefaultStyle::Others => "dsOthers",
            DefaultStyle::Error => "dsError",
        }
    }

    /// Parse a default style from its Kate name
    pub fn from_name(name: &str) -> Option<Self> {
        let style = match name {
            "dsNormal" => DefaultStyle::Normal,
            "dsKeyword" => DefaultStyle::Keyword,
            "dsControlFlow" => DefaultStyle::ControlFlow,
            "dsOperator" => DefaultStyle::Operator,
            "dsBuiltIn" => DefaultStyle::BuiltIn,
            "dsExtension" => DefaultStyle::Extension,
            "dsPreprocessor" => DefaultStyle::Preprocessor,
            "dsAttribute" => DefaultStyle::Attribute,
            "dsFunction" => DefaultStyle::Function,
            "dsVariable" => DefaultStyle::Variable,
            "dsConstant" => DefaultStyle::Constant,
            "dsDataType" => DefaultStyle::DataType,
            "dsDecVal" => DefaultStyle::DecVal,
            "dsBaseN" => DefaultStyle::BaseN,
            "dsFloat" => DefaultStyle::Float,
            "dsChar" => DefaultStyle::Char,
            "dsSpecialChar" => DefaultStyle::SpecialChar,
            "dsString" => DefaultStyle::String,
            "dsVerbatimString" => DefaultStyle::VerbatimString,
            "dsSpecialString" => DefaultStyle::SpecialString,
            "dsImport" => DefaultStyle::Import,
            "dsComment" => DefaultStyle::Comment,
            "dsDocumentation" => DefaultStyle::Documentation,
            "dsAnnotation" => DefaultStyle::Annotation,
            "dsCommentVar" => DefaultStyle::CommentVar,
            "dsRegionMarker" => DefaultStyle::RegionMarker,
            "dsInformation" => DefaultStyle::Information,
            "dsWarning" => DefaultStyle::Warning,
            "dsAlert" => DefaultStyle::Alert,
            "dsOthers" => DefaultStyle::Others,
            "dsError" => DefaultStyle::Error,
            _ => return None,
        };
        Some(style)
    }

    /// Derive the text type for an attribute using this default style
    ///
    /// The attribute name refines the answer: Ruby's here-docs and block
    /// comments are only distinguishable by how the grammar names them.
    pub fn text_type(&self, attribute: &str) -> char {
        let attribute = attribute.to_lowercase();
        match self {
            DefaultStyle::Others if attribute.contains("here") => 'h',
            DefaultStyle::Comment if attribute.contains("block") => 'b',
            DefaultStyle::String
            | DefaultStyle::RegionMarker
            | DefaultStyle::Char
            | DefaultStyle::Others => 's',
            DefaultStyle::Comment => 'c',
            _ => ' ',
        }
    }

    /// Resolve to a style handle for the given attribute
    pub fn style_for(&self, attribute: &str) -> Style {
        Style::new(self.default_format(), self.text_type(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats_not_empty() {
        assert!(!DefaultStyle::Comment.default_format().is_default());
        assert!(!DefaultStyle::String.default_format().is_default());
        assert!(!DefaultStyle::Keyword.default_format().is_default());
        assert!(DefaultStyle::Normal.default_format().is_default());
    }

    #[test]
    fn test_from_name_roundtrip() {
        let styles = [
            DefaultStyle::Normal,
            DefaultStyle::Keyword,
            DefaultStyle::Comment,
            DefaultStyle::RegionMarker,
            DefaultStyle::Error,
        ];
        for style in styles {
            assert_eq!(DefaultStyle::from_name(style.name()), Some(style));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(DefaultStyle::from_name("Keyword"), None);
        assert_eq!(DefaultStyle::from_name(""), None);
    }

    #[test]
    fn test_text_types() {
        assert_eq!(DefaultStyle::Comment.text_type("Comment"), 'c');
        assert_eq!(DefaultStyle::Comment.text_type("Block Comment"), 'b');
        assert_eq!(DefaultStyle::String.text_type("String"), 's');
        assert_eq!(DefaultStyle::Char.text_type("Char"), 's');
        assert_eq!(DefaultStyle::Others.text_type("Here Document"), 'h');
        assert_eq!(DefaultStyle::Others.text_type("Symbol"), 's');
        assert_eq!(DefaultStyle::Keyword.text_type("Keyword"), ' ');
    }
}
