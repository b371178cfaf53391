//! Transcode command template: `ffmpeg -y -i "{{ .InputFile }}" "{{ .OutputFile }}"`.
//!
//! The template is split into words first (single quotes, double quotes and backslash
//! escapes behave like a POSIX shell) and the placeholders are substituted afterwards,
//! so a path with spaces or quotes in it always stays exactly one argument.

use std::ffi::OsString;
use std::path::Path;

use crate::error::TemplateError;

const INPUT_PLACEHOLDER: &str = ".InputFile";
const OUTPUT_PLACEHOLDER: &str = ".OutputFile";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Input,
    Output,
}

/// A parsed command template: a list of words, each made of literal text and placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandTemplate {
    words: Vec<Vec<Segment>>,
}

/// Accumulates the segments of the word currently being scanned.
#[derive(Default)]
struct WordBuilder {
    segments: Vec<Segment>,
    literal: String,
    started: bool,
}

impl WordBuilder {
    fn push_char(&mut self, c: char) {
        self.literal.push(c);
        self.started = true;
    }

    fn push_placeholder(&mut self, segment: Segment) {
        self.flush_literal();
        self.segments.push(segment);
        self.started = true;
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.segments
                .push(Segment::Literal(std::mem::take(&mut self.literal)));
        }
    }

    /// Finish the current word (if any) into `words`.
    fn finish(&mut self, words: &mut Vec<Vec<Segment>>) {
        if !self.started {
            return;
        }
        self.flush_literal();
        let mut segments = std::mem::take(&mut self.segments);
        // `""` is a real (empty) argument.
        if segments.is_empty() {
            segments.push(Segment::Literal(String::new()));
        }
        words.push(segments);
        self.started = false;
    }
}

impl CommandTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let chars: Vec<char> = template.chars().collect();
        let mut words = Vec::new();
        let mut word = WordBuilder::default();
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '{' && chars.get(i + 1) == Some(&'{') {
                let (segment, next) = parse_placeholder(&chars, i)?;
                word.push_placeholder(segment);
                i = next;
                continue;
            }

            match quote {
                None => match c {
                    c if c.is_whitespace() => word.finish(&mut words),
                    '\'' | '"' => {
                        quote = Some(c);
                        word.started = true;
                    }
                    '\\' => {
                        let escaped = chars.get(i + 1).ok_or(TemplateError::TrailingEscape)?;
                        word.push_char(*escaped);
                        i += 1;
                    }
                    c => word.push_char(c),
                },
                Some('\'') => match c {
                    '\'' => quote = None,
                    c => word.push_char(c),
                },
                Some(_) => match c {
                    '"' => quote = None,
                    '\\' if matches!(chars.get(i + 1), Some('"' | '\\' | '$' | '`')) => {
                        word.push_char(chars[i + 1]);
                        i += 1;
                    }
                    c => word.push_char(c),
                },
            }
            i += 1;
        }

        if let Some(q) = quote {
            return Err(TemplateError::UnterminatedQuote(q));
        }
        word.finish(&mut words);

        if words.is_empty() {
            return Err(TemplateError::Empty);
        }
        Ok(Self { words })
    }

    /// The program (first word) when it contains no placeholder.
    pub fn program(&self) -> Option<String> {
        let first = self.words.first()?;
        first
            .iter()
            .map(|segment| match segment {
                Segment::Literal(s) => Some(s.as_str()),
                _ => None,
            })
            .collect::<Option<String>>()
    }

    /// Substitute the placeholders and return the argv (program first).
    pub fn render(&self, input: &Path, output: &Path) -> Vec<OsString> {
        self.words
            .iter()
            .map(|segments| {
                let mut arg = OsString::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(s) => arg.push(s),
                        Segment::Input => arg.push(input.as_os_str()),
                        Segment::Output => arg.push(output.as_os_str()),
                    }
                }
                arg
            })
            .collect()
    }
}

/// Parse `{{ .Name }}` starting at `start`. Returns the segment and the index after `}}`.
fn parse_placeholder(chars: &[char], start: usize) -> Result<(Segment, usize), TemplateError> {
    let body_start = start + 2;
    let end = (body_start..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == '}' && chars[j + 1] == '}')
        .ok_or(TemplateError::UnclosedPlaceholder(start))?;
    let name: String = chars[body_start..end].iter().collect();
    let segment = match name.trim() {
        INPUT_PLACEHOLDER => Segment::Input,
        OUTPUT_PLACEHOLDER => Segment::Output,
        other => return Err(TemplateError::UnknownPlaceholder(other.to_string())),
    };
    Ok((segment, end + 2))
}

/// Parse `template` and render it for one file.
pub fn render(template: &str, input: &Path, output: &Path) -> Result<Vec<OsString>, TemplateError> {
    Ok(CommandTemplate::parse(template)?.render(input, output))
}
