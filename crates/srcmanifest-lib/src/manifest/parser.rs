use super::directive::{BundleSource, Directive, FileSource, Keyword, MemberSource};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed directive `{content}`: {reason}")]
    MalformedDirective {
        line: usize,
        content: String,
        reason: MalformedReason,
    },

    #[error("line {line}: member `{name}` is not preceded by any bundle")]
    OrphanMember { line: usize, name: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedDirective { line, .. } | ParseError::OrphanMember { line, .. } => {
                *line
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("expected `<keyword>: <value>`")]
    MissingSeparator,

    #[error("unknown keyword `{0}`, expected one of file, bundle, member")]
    UnknownKeyword(String),

    #[error("value is empty")]
    EmptyValue,

    #[error("not an absolute URL: {0}")]
    InvalidUrl(url::ParseError),
}

/// Streaming manifest parser.
///
/// Yields one [`Directive`] per directive line. Comment lines (first non-blank
/// character is `#`) and blank lines are skipped. The first error ends the
/// stream: every later call to `next` returns `None`.
#[derive(Debug)]
pub struct Parser<I> {
    lines: I,
    line_number: usize,
    current_bundle: Option<Url>,
    failed: bool,
}

impl<I, S> Parser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I, Item = S>) -> Self {
        Self {
            lines: lines.into_iter(),
            line_number: 0,
            current_bundle: None,
            failed: false,
        }
    }

    /// URL of the most recent `bundle` directive seen so far.
    pub fn current_bundle(&self) -> Option<&Url> {
        self.current_bundle.as_ref()
    }

    fn parse_line(&mut self, raw: &str) -> Result<Option<Directive>, ParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let malformed = |reason| ParseError::MalformedDirective {
            line: self.line_number,
            content: trimmed.to_string(),
            reason,
        };

        let Some((keyword, value)) = trimmed.split_once(':') else {
            return Err(malformed(MalformedReason::MissingSeparator));
        };
        let keyword = keyword.trim();
        let value = value.trim();
        // `file https://...` splits inside the URL scheme.
        if keyword.contains(char::is_whitespace) {
            return Err(malformed(MalformedReason::MissingSeparator));
        }

        let Some(keyword) = Keyword::from_keyword(keyword) else {
            return Err(malformed(MalformedReason::UnknownKeyword(
                keyword.to_string(),
            )));
        };
        if value.is_empty() {
            return Err(malformed(MalformedReason::EmptyValue));
        }

        let directive = match keyword {
            Keyword::File => {
                let url = Url::parse(value)
                    .map_err(|e| malformed(MalformedReason::InvalidUrl(e)))?;
                Directive::File(FileSource { url })
            }
            Keyword::Bundle => {
                let url = Url::parse(value)
                    .map_err(|e| malformed(MalformedReason::InvalidUrl(e)))?;
                self.current_bundle = Some(url.clone());
                Directive::Bundle(BundleSource { url })
            }
            Keyword::Member => {
                let bundle = self.current_bundle.clone().ok_or_else(|| {
                    ParseError::OrphanMember {
                        line: self.line_number,
                        name: value.to_string(),
                    }
                })?;
                Directive::Member(MemberSource {
                    name: value.to_string(),
                    bundle,
                })
            }
        };

        tracing::trace!(line = self.line_number, directive = %directive, "Parsed directive");
        Ok(Some(directive))
    }
}

impl<I, S> Iterator for Parser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Directive, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(line) = self.lines.next() {
            self.line_number += 1;
            match self.parse_line(line.as_ref()) {
                Ok(Some(directive)) => return Some(Ok(directive)),
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl<I, S> std::iter::FusedIterator for Parser<I>
where
    I: std::iter::FusedIterator<Item = S>,
    S: AsRef<str>,
{
}

/// Parses a whole manifest, stopping at the first error.
pub fn parse_str(input: &str) -> Result<Vec<Directive>, ParseError> {
    Parser::new(input.lines()).collect()
}
