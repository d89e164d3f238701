//! Chart page templates.
//!
//! Templates are plain text with named `{{placeholder}}` tags. Names are
//! ASCII letters, digits and underscores, optionally padded with spaces.
//! `{{{{` produces a literal `{{`; a lone `}}` is ordinary text.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Built-in ECharts candlestick page.
const CANDLESTICK: &str = include_str!("../templates/candlestick.html");

/// Errors raised while parsing or rendering a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{{` without a matching `}}`.
    #[error("Unterminated placeholder at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening braces.
        offset: usize,
    },

    /// A placeholder whose name is empty or has invalid characters.
    #[error("Invalid placeholder name '{name}' at byte {offset}")]
    InvalidName {
        /// Raw text between the braces.
        name: String,
        /// Byte offset of the opening braces.
        offset: usize,
    },

    /// A placeholder with no value supplied at render time.
    #[error("No value for placeholder '{0}'")]
    MissingValue(String),

    /// Template file could not be read.
    #[error("Failed to read template {path}: {message}")]
    Read {
        /// Template path.
        path: String,
        /// Underlying error message.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed chart page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTemplate {
    segments: Vec<Segment>,
}

impl ChartTemplate {
    /// Parses a template.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder is unterminated or badly named.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            text.push_str(&rest[..open]);
            let tag_offset = offset + open;
            let after = &rest[open + 2..];

            if let Some(tail) = after.strip_prefix("{{") {
                text.push_str("{{");
                offset = tag_offset + 4;
                rest = tail;
                continue;
            }

            let close = after
                .find("}}")
                .ok_or(TemplateError::Unterminated { offset: tag_offset })?;
            let raw = &after[..close];
            let name = raw.trim();
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(TemplateError::InvalidName {
                    name: raw.to_string(),
                    offset: tag_offset,
                });
            }

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Placeholder(name.to_string()));

            let consumed = open + 2 + close + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { segments })
    }

    /// Returns the built-in candlestick page template.
    ///
    /// It expects `title`, `width`, `height` and `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to parse.
    pub fn candlestick() -> Result<Self, TemplateError> {
        Self::parse(CANDLESTICK)
    }

    /// Reads and parses a template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| TemplateError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&source)
    }

    /// Returns the distinct placeholder names, in order of first use.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    /// Renders the template, substituting every placeholder.
    ///
    /// Values are inserted verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first placeholder without a value.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| TemplateError::MissingValue(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl std::str::FromStr for ChartTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Values for a chart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPage {
    /// Chart title.
    pub title: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Chart record, as written by [`ChartWriter`](crate::ChartWriter).
    pub data: String,
}

impl ChartPage {
    /// Default chart width in pixels.
    pub const DEFAULT_WIDTH: u32 = 1600;
    /// Default chart height in pixels.
    pub const DEFAULT_HEIGHT: u32 = 600;

    /// Creates a page with the default size.
    #[must_use]
    pub fn new(title: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            data: data.into(),
        }
    }

    /// Sets the chart size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns the placeholder values for this page.
    ///
    /// `title` is a quoted JavaScript string literal.
    #[must_use]
    pub fn values(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            ("title", js_string(&self.title)),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("data", self.data.clone()),
        ])
    }

    /// Renders this page with `template`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template uses a placeholder the page lacks.
    pub fn render(&self, template: &ChartTemplate) -> Result<String, TemplateError> {
        template.render(&self.values())
    }
}

fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(pairs: &[(&'a str, &str)]) -> HashMap<&'a str, String> {
        pairs.iter().map(|&(k, v)| (k, v.to_string())).collect()
    }

    #[test]
    fn test_render() {
        let template = ChartTemplate::parse("<h1>{{ title }}</h1>{{data}}{{title}}").unwrap();
        assert_eq!(template.placeholders(), vec!["title", "data"]);

        let html = template
            .render(&values(&[("title", "RB"), ("data", "[1]")]))
            .unwrap();
        assert_eq!(html, "<h1>RB</h1>[1]RB");
    }

    #[test]
    fn test_escape_and_plain_braces() {
        let template = ChartTemplate::parse("{{{{x}} {a:{b:1}}}").unwrap();
        assert!(template.placeholders().is_empty());
        assert_eq!(template.render(&HashMap::new()).unwrap(), "{{x}} {a:{b:1}}}");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ChartTemplate::parse("ok {{title").unwrap_err(),
            TemplateError::Unterminated { offset: 3 }
        );
        assert!(matches!(
            ChartTemplate::parse("{{not-a-name}}"),
            Err(TemplateError::InvalidName { offset: 0, .. })
        ));
        assert!(matches!(
            ChartTemplate::parse("{{ }}"),
            Err(TemplateError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        let template = ChartTemplate::parse("{{data}}").unwrap();
        assert_eq!(
            template.render(&HashMap::new()).unwrap_err(),
            TemplateError::MissingValue("data".to_string())
        );
    }

    #[test]
    fn test_candlestick_template() {
        let template = ChartTemplate::parse(CANDLESTICK).unwrap();
        assert_eq!(template, ChartTemplate::candlestick().unwrap());
        let mut names = template.placeholders();
        names.sort_unstable();
        assert_eq!(names, vec!["data", "height", "title", "width"]);
    }

    #[test]
    fn test_page_render() {
        let page = ChartPage::new("RB \"Daily\" </script>", "['2024/01/02',1,2,0.5,3]")
            .with_size(800, 400);
        let html = page.render(&ChartTemplate::candlestick().unwrap()).unwrap();

        assert!(html.contains("width:800px;height:400px"));
        assert!(html.contains(r#""RB \"Daily\" \u003c/script\u003e""#));
        assert!(html.contains("['2024/01/02',1,2,0.5,3]"));
        assert!(!html.contains("{{"));
    }
}
