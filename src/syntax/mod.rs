//! Syntax highlighting using syntect
//!
//! The content panels and exam solutions are almost entirely SQL, so the
//! fallback highlighter is built for it: case-insensitive keywords, `--`
//! comments, single-quoted string literals.

use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::highlighting::{
    FontStyle, HighlightState, Highlighter, RangedHighlightIterator, ThemeSet,
};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::theme::Theme;

/// Global syntax set with all default syntaxes
static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Global theme set (colors come from our theme; syntect needs its own structure)
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Map language names/aliases used in our content to syntect syntax names
fn normalize_language(lang: &str) -> &str {
    match lang.trim().to_lowercase().as_str() {
        "sql" | "postgres" | "postgresql" | "mysql" | "sqlite" => "SQL",
        "json" => "JSON",
        "sh" | "bash" | "shell" | "console" => "Bourne Again Shell (bash)",
        "csv" | "text" | "txt" => "Plain Text",
        _ => lang,
    }
}

/// Find the syntax definition for a given language
fn find_syntax(language: Option<&str>) -> Option<&'static SyntaxReference> {
    let lang = language?;
    let normalized = normalize_language(lang);

    SYNTAX_SET
        .find_syntax_by_name(normalized)
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(normalized.to_lowercase().as_str()))
        .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
}

/// Convert a syntect color to a ratatui color
fn syntect_to_ratatui_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Highlight a single line of code and return styled spans
///
/// Pure: same inputs, same spans. No state is read or written.
pub fn highlight_line(line: &str, language: Option<&str>, theme: &Theme) -> Vec<Span<'static>> {
    if let Some(syntax) = find_syntax(language) {
        if let Some(syntect_theme) = THEME_SET.themes.get("base16-ocean.dark") {
            let highlighter = Highlighter::new(syntect_theme);
            let mut highlight_state =
                HighlightState::new(&highlighter, syntect::parsing::ScopeStack::new());

            let mut parse_state = syntect::parsing::ParseState::new(syntax);
            let parsed = parse_state.parse_line(line, &SYNTAX_SET);

            let ranges: Vec<_> = RangedHighlightIterator::new(
                &mut highlight_state,
                &parsed.unwrap_or_default(),
                line,
                &highlighter,
            )
            .collect();

            if !ranges.is_empty() {
                return ranges
                    .into_iter()
                    .map(|(style, text, _range)| {
                        let fg = syntect_to_ratatui_color(style.foreground);
                        let mut ratatui_style = Style::default().fg(fg).bg(theme.bg_secondary);

                        if style.font_style.contains(FontStyle::BOLD) {
                            ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
                        }
                        if style.font_style.contains(FontStyle::ITALIC) {
                            ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
                        }

                        Span::styled(text.to_string(), ratatui_style)
                    })
                    .collect();
            }
        }
    }

    highlight_sql_basic(line, theme)
}

/// SQL keywords recognized by the fallback highlighter
const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP", "BY", "HAVING", "ORDER", "LIMIT", "OFFSET", "JOIN",
    "LEFT", "RIGHT", "FULL", "INNER", "OUTER", "CROSS", "ON", "AS", "AND", "OR", "NOT", "IN",
    "EXISTS", "BETWEEN", "LIKE", "IS", "NULL", "DISTINCT", "UNION", "ALL", "WITH", "RECURSIVE",
    "CASE", "WHEN", "THEN", "ELSE", "END", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE",
    "CREATE", "TABLE", "INDEX", "VIEW", "DROP", "ALTER", "PARTITION", "OVER", "ASC", "DESC",
    "INTERVAL", "CAST", "DATE", "EXPLAIN", "TRUE", "FALSE",
];

/// Builtin functions recognized by the fallback highlighter
const SQL_FUNCTIONS: &[&str] = &[
    "COUNT", "SUM", "AVG", "MIN", "MAX", "COALESCE", "NULLIF", "ROW_NUMBER", "RANK",
    "DENSE_RANK", "NTILE", "LAG", "LEAD", "DATE_TRUNC", "UPPER", "LOWER", "LENGTH", "NOW",
];

/// SQL-aware fallback when no syntect definition is available
fn highlight_sql_basic(line: &str, theme: &Theme) -> Vec<Span<'static>> {
    let base_style = Style::default().fg(theme.fg_primary).bg(theme.bg_secondary);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            // String literals: single quotes, doubled quote as escape
            '\'' => {
                flush_word(&mut spans, &mut current, base_style, theme);
                let mut literal = String::from('\'');
                while let Some(ch) = chars.next() {
                    literal.push(ch);
                    if ch == '\'' {
                        if chars.peek() == Some(&'\'') {
                            literal.push(chars.next().unwrap());
                        } else {
                            break;
                        }
                    }
                }
                spans.push(Span::styled(
                    literal,
                    Style::default().fg(theme.syntax_string).bg(theme.bg_secondary),
                ));
            }
            // Line comments
            '-' if chars.peek() == Some(&'-') => {
                flush_word(&mut spans, &mut current, base_style, theme);
                let mut comment = String::from('-');
                for ch in chars.by_ref() {
                    comment.push(ch);
                }
                spans.push(Span::styled(
                    comment,
                    Style::default().fg(theme.syntax_comment).bg(theme.bg_secondary),
                ));
            }
            // Numbers
            '0'..='9' if current.is_empty() => {
                let mut number = String::from(c);
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' || ch == '_' {
                        number.push(chars.next().unwrap());
                    } else {
                        break;
                    }
                }
                spans.push(Span::styled(
                    number,
                    Style::default().fg(theme.syntax_number).bg(theme.bg_secondary),
                ));
            }
            // Word characters
            c if c.is_alphanumeric() || c == '_' => {
                current.push(c);
            }
            // Operators and punctuation
            _ => {
                flush_word(&mut spans, &mut current, base_style, theme);
                let style = if "+-*/%=<>!|,.()".contains(c) {
                    Style::default().fg(theme.syntax_operator).bg(theme.bg_secondary)
                } else {
                    base_style
                };
                spans.push(Span::styled(c.to_string(), style));
            }
        }
    }
    flush_word(&mut spans, &mut current, base_style, theme);

    if spans.is_empty() {
        spans.push(Span::styled(line.to_string(), base_style));
    }

    spans
}

/// Emit the pending word with keyword/function styling
fn flush_word(spans: &mut Vec<Span<'static>>, current: &mut String, base: Style, theme: &Theme) {
    if current.is_empty() {
        return;
    }
    let upper = current.to_ascii_uppercase();
    let style = if SQL_KEYWORDS.contains(&upper.as_str()) {
        Style::default()
            .fg(theme.syntax_keyword)
            .bg(theme.bg_secondary)
            .add_modifier(Modifier::BOLD)
    } else if SQL_FUNCTIONS.contains(&upper.as_str()) {
        Style::default().fg(theme.syntax_function).bg(theme.bg_secondary)
    } else {
        base
    };
    spans.push(Span::styled(std::mem::take(current), style));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sql_dialects() {
        assert_eq!(normalize_language("sql"), "SQL");
        assert_eq!(normalize_language("postgres"), "SQL");
        assert_eq!(normalize_language("SQLite"), "SQL");
    }

    #[test]
    fn find_sql_syntax() {
        assert!(find_syntax(Some("sql")).is_some());
    }

    #[test]
    fn highlight_sql_line_produces_spans() {
        let theme = Theme::default();
        let spans = highlight_line("SELECT * FROM orders;", Some("sql"), &theme);
        assert!(!spans.is_empty());
    }

    #[test]
    fn fallback_keywords_are_case_insensitive() {
        let theme = Theme::default();
        let keyword_style =
            Style::default().fg(theme.syntax_keyword).bg(theme.bg_secondary).add_modifier(Modifier::BOLD);

        for line in ["select 1", "SELECT 1"] {
            let spans = highlight_sql_basic(line, &theme);
            assert!(spans.iter().any(|s| s.style == keyword_style), "no keyword in {line:?}");
        }
    }

    #[test]
    fn fallback_highlights_string_literal() {
        let theme = Theme::default();
        let spans = highlight_sql_basic("WHERE status = 'paid'", &theme);
        assert!(spans.iter().any(|s| s.content.contains("'paid'")));
    }

    #[test]
    fn fallback_highlights_comment_to_end_of_line() {
        let theme = Theme::default();
        let spans = highlight_sql_basic("-- keep unmatched customers", &theme);
        let comment_style = Style::default().fg(theme.syntax_comment).bg(theme.bg_secondary);
        assert!(spans.iter().any(|s| s.style == comment_style));
    }

    #[test]
    fn fallback_handles_doubled_quote_escape() {
        let theme = Theme::default();
        let spans = highlight_sql_basic("SELECT 'it''s fine'", &theme);
        assert!(spans.iter().any(|s| s.content.contains("it''s")));
    }

    #[test]
    fn unknown_language_still_renders() {
        let theme = Theme::default();
        let spans = highlight_line("plain words", Some("nonexistent_lang"), &theme);
        assert!(!spans.is_empty());
    }
}
