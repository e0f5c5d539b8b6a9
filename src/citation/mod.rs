use std::fmt;

use thiserror::Error;
use tracing::debug;

pub mod compose;
pub mod date;
pub mod source;

use crate::citation::{compose::compose, date::TemporalResolver, source::resolve_source};

pub use date::{DateError, ResolvedDate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CitationError {
    #[error("the word to cite must not be empty")]
    EmptyWord,
}

/// Everything the user told us about a citation. Nothing here is inferred; the resolvers derive
/// new values from it and leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationFields {
    word: String,
    part_of_speech: Option<String>,
    definition: Option<String>,
    quote: Option<String>,
    source_name: Option<String>,
    source_is_roman: bool,
    date_text: Option<String>,
    url: Option<String>,
}

impl CitationFields {
    pub fn new(word: impl Into<String>) -> Result<Self, CitationError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(CitationError::EmptyWord);
        }
        Ok(CitationFields {
            word,
            part_of_speech: None,
            definition: None,
            quote: None,
            source_name: None,
            source_is_roman: false,
            date_text: None,
            url: None,
        })
    }

    pub fn with_part_of_speech(mut self, pos: Option<String>) -> Self {
        self.part_of_speech = non_blank(pos);
        self
    }

    pub fn with_definition(mut self, definition: Option<String>) -> Self {
        self.definition = non_blank(definition);
        self
    }

    pub fn with_quote(mut self, quote: Option<String>) -> Self {
        self.quote = non_blank(quote);
        self
    }

    pub fn with_source(mut self, source: Option<String>, roman: bool) -> Self {
        self.source_name = non_blank(source);
        self.source_is_roman = roman;
        self
    }

    pub fn with_date(mut self, date_text: Option<String>) -> Self {
        self.date_text = non_blank(date_text);
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = non_blank(url);
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn part_of_speech(&self) -> Option<&str> {
        self.part_of_speech.as_deref()
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn quote(&self) -> Option<&str> {
        self.quote.as_deref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn source_is_roman(&self) -> bool {
        self.source_is_roman
    }

    pub fn date_text(&self) -> Option<&str> {
        self.date_text.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

// Empty strings from the command line mean "not given".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The finished citation: up to three blocks (headword, attribution, quotation), each non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationText {
    lines: Vec<String>,
}

impl CitationText {
    pub(crate) fn push(&mut self, line: String) {
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for CitationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n\n"))
    }
}

/// Resolve the source and date for `fields` and compose the citation.
///
/// A source given by the caller always wins over one inferred from the URL. The date comes from,
/// in order: the explicit date text (whose parse errors are returned, never papered over), a date
/// embedded in the URL, and finally today.
pub fn cite(fields: &CitationFields, dates: &TemporalResolver) -> Result<CitationText, DateError> {
    let source = match fields.source_name() {
        Some(s) => Some(s.to_string()),
        None => {
            let inferred = resolve_source(fields.url());
            debug!(url = ?fields.url(), source = ?inferred, "inferred source from URL");
            inferred
        }
    };
    let date = dates.resolve(fields.date_text(), fields.url())?;
    debug!(date = %date, "resolved citation date");
    Ok(compose(fields, source.as_deref(), Some(&date)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn resolver() -> TemporalResolver {
        TemporalResolver::new(NaiveDate::from_ymd_opt(2016, 6, 15).unwrap())
    }

    #[test]
    fn empty_word_is_rejected() {
        assert_eq!(CitationFields::new("  "), Err(CitationError::EmptyWord));
    }

    #[test]
    fn blank_optional_fields_count_as_absent() {
        let fields = CitationFields::new("word")
            .unwrap()
            .with_quote(Some(String::new()))
            .with_url(Some("  ".into()));
        assert_eq!(fields.quote(), None);
        assert_eq!(fields.url(), None);
    }

    #[test]
    fn cite_full_record() {
        let fields = CitationFields::new("spinning rust")
            .unwrap()
            .with_part_of_speech(Some("n.".into()))
            .with_definition(Some("A computer hard disk.".into()))
            .with_source(Some("erics".into()), true)
            .with_date(Some("16 March 2015".into()))
            .with_url(Some("https://twitter.com/wiredfool/status/577541476214706176".into()))
            .with_quote(Some("I moved 10 gigs of email archives to spinning rust.".into()));

        let text = cite(&fields, &resolver()).unwrap();
        assert_eq!(
            text.to_string(),
            "<b>spinning rust</b>, <i>n.</i> A computer hard disk.\n\n\
             <a href=\"https://twitter.com/wiredfool/status/577541476214706176\">erics, 16 March 2015</a>:\n\n\
             <blockquote>I moved 10 gigs of email archives to <b>spinning rust</b>.</blockquote>"
        );
    }

    #[test]
    fn cite_infers_source_and_date_from_url() {
        let fields = CitationFields::new("drone").unwrap().with_url(Some(
            "https://www.washingtonpost.com/news/checkpoint/wp/2016/01/19/more-drones/".into(),
        ));
        let text = cite(&fields, &resolver()).unwrap();
        assert_eq!(
            text.lines()[1],
            "<a href=\"https://www.washingtonpost.com/news/checkpoint/wp/2016/01/19/more-drones/\">\
             <i>Washington Post</i>, 19 January 2016</a>:"
        );
    }

    #[test]
    fn explicit_date_beats_url_date() {
        let fields = CitationFields::new("planet")
            .unwrap()
            .with_date(Some("2 Feb 2016".into()))
            .with_url(Some("http://www.theguardian.com/science/2016/jan/20/ninth-planet".into()));
        let text = cite(&fields, &resolver()).unwrap();
        assert!(text.lines()[1].contains("<i>The Guardian</i>, 2 February 2016"));
    }

    #[test]
    fn invalid_date_text_propagates() {
        let fields = CitationFields::new("word")
            .unwrap()
            .with_date(Some("not a date".into()));
        let err = cite(&fields, &resolver()).unwrap_err();
        assert!(matches!(err, DateError::Invalid { .. }));
    }

    #[test]
    fn word_only_citation_falls_back_to_today() {
        let fields = CitationFields::new("word").unwrap();
        let text = cite(&fields, &resolver()).unwrap();
        assert_eq!(text.lines(), ["<b>word</b>", "15 June 2016:"]);
    }
}
