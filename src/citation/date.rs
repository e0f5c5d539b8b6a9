use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("unrecognised date: {text:?}")]
    Invalid { text: String },
}

impl DateError {
    fn invalid(text: &str) -> Self {
        DateError::Invalid {
            text: text.to_string(),
        }
    }
}

/// A calendar date together with the way it's written in a citation, e.g. "3 February 2016".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    date: NaiveDate,
    display: String,
}

impl ResolvedDate {
    pub fn new(date: NaiveDate) -> Self {
        ResolvedDate {
            date,
            display: date.format("%-d %B %Y").to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Turns free-text and URL-embedded dates into citation dates, relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct TemporalResolver {
    today: NaiveDate,
}

impl TemporalResolver {
    pub fn new(today: NaiveDate) -> Self {
        TemporalResolver { today }
    }

    pub fn from_local_clock() -> Self {
        TemporalResolver::new(Local::now().date_naive())
    }

    pub fn today(&self) -> ResolvedDate {
        ResolvedDate::new(self.today)
    }

    /// Parse a date typed by a human.
    ///
    /// Numbers are read day first ("03-02" is 3 February), components that are left out are taken
    /// from today, and a date that would lie in the future is moved back a year, so "14 December"
    /// typed in January means last December.
    pub fn resolve_from_text(&self, text: &str) -> Result<ResolvedDate, DateError> {
        let tokens = tokenize(text).ok_or_else(|| DateError::invalid(text))?;
        let date = assemble(&tokens, self.today).ok_or_else(|| DateError::invalid(text))?;
        let date = self.not_in_future(date).ok_or_else(|| DateError::invalid(text))?;
        Ok(ResolvedDate::new(date))
    }

    /// Look for a publication date in the path of `url`, as in `/2016/01/19/` or `/2016/jan/20/`.
    pub fn resolve_from_url(&self, url: &str) -> Option<ResolvedDate> {
        let date = URL_DATE_RES
            .iter()
            .flat_map(|re| re.captures_iter(url))
            .find_map(|c| {
                let year = c.get(1)?.as_str().parse().ok()?;
                let month = c.get(2)?.as_str();
                let month = month
                    .parse()
                    .ok()
                    .or_else(|| month_number(&month.to_ascii_lowercase()))?;
                let day = c.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })?;
        debug!(%url, %date, "found date in URL");
        self.not_in_future(date).map(ResolvedDate::new)
    }

    /// The date for a citation: explicit text first, then the URL, then today.
    pub fn resolve(
        &self,
        text: Option<&str>,
        url: Option<&str>,
    ) -> Result<ResolvedDate, DateError> {
        if let Some(text) = text {
            return self.resolve_from_text(text);
        }
        Ok(url
            .and_then(|u| self.resolve_from_url(u))
            .unwrap_or_else(|| self.today()))
    }

    fn not_in_future(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date > self.today {
            debug!(%date, today = %self.today, "date is in the future, using the year before");
            date.checked_sub_months(Months::new(12))
        } else {
            Some(date)
        }
    }
}

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}(?::\d{2}(?:[.,]\d+)?)?").unwrap());

static URL_DATE_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        // /2016/01/19/, /2016/jan/20/, 2016-01-19
        Regex::new(r"(?:^|[/_.-])((?:19|20)\d{2})[/_-](\d{1,2}|[A-Za-z]{3,9})[/_-](\d{1,2})(?:$|[/_.?#-])")
            .unwrap(),
        // 20160119
        Regex::new(r"(?:^|[/_-])((?:19|20)\d{2})(\d{2})(\d{2})(?:$|[/_.?#-])").unwrap(),
    ]
});

static MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

// Words that may appear in a date without carrying any part of it.
static SKIPPED_WORDS: &[&str] = &[
    "at", "on", "and", "of", "the", "ad", "t", "z", "m", "am", "pm", "utc", "gmt", "st", "nd",
    "rd", "th", "mon", "monday", "tue", "tues", "tuesday", "wed", "wednesday", "thu", "thur",
    "thurs", "thursday", "fri", "friday", "sat", "saturday", "sun", "sunday",
];

fn month_number(word: &str) -> Option<u32> {
    if word == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|m| *m == word || (word.len() == 3 && m.starts_with(word)))
        .map(|i| i as u32 + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number { value: u32, digits: usize },
    Month(u32),
}

/// Split `text` into numbers and month names. Any other word makes the text unparsable.
fn tokenize(text: &str) -> Option<Vec<Token>> {
    let lowered = text.to_lowercase();
    let cleaned = TIME_RE.replace_all(&lowered, " ");
    let mut tokens = Vec::new();
    let mut chars = cleaned.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let is_digit = c.is_ascii_digit();
        if !is_digit && !c.is_alphabetic() {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            let same_kind = if is_digit {
                next.is_ascii_digit()
            } else {
                next.is_alphabetic()
            };
            if !same_kind {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        let run = &cleaned[start..end];

        if is_digit {
            // Nothing in a date is longer than YYYYMMDD.
            if run.len() > 8 {
                return None;
            }
            tokens.push(Token::Number {
                value: run.parse().ok()?,
                digits: run.len(),
            });
        } else if let Some(month) = month_number(run) {
            tokens.push(Token::Month(month));
        } else if !SKIPPED_WORDS.contains(&run) {
            return None;
        }
    }

    Some(tokens)
}

fn is_year_like(value: u32, digits: usize) -> bool {
    digits >= 3 || value > 31
}

/// Read a two-digit year as the one within fifty years of `today`.
fn expand_year(value: u32, digits: usize, today: NaiveDate) -> i32 {
    let value = value as i32;
    if digits > 2 {
        return value;
    }
    let current = today.year();
    let mut year = current - current.rem_euclid(100) + value;
    if year >= current + 50 {
        year -= 100;
    } else if year < current - 50 {
        year += 100;
    }
    year
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first.checked_add_months(Months::new(1))?.pred_opt()?.day())
}

/// Work out which number is the day, month and year, filling the gaps from `today`.
fn assemble(tokens: &[Token], today: NaiveDate) -> Option<NaiveDate> {
    let mut months = tokens.iter().filter_map(|t| match t {
        Token::Month(m) => Some(*m),
        Token::Number { .. } => None,
    });
    let named_month = months.next();
    if months.next().is_some() {
        return None;
    }
    let numbers: Vec<(u32, usize)> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Number { value, digits } => Some((*value, *digits)),
            Token::Month(_) => None,
        })
        .collect();

    // (year, month, day) with the year still as (value, digits)
    let (year, month, day): (Option<(u32, usize)>, Option<u32>, Option<u32>) =
        match (named_month, numbers.as_slice()) {
            (None, []) => return None,
            (Some(m), []) => (None, Some(m), None),
            (Some(m), [(v, d)]) if is_year_like(*v, *d) => (Some((*v, *d)), Some(m), None),
            (Some(m), [(v, _)]) => (None, Some(m), Some(*v)),
            (Some(m), [(a, ad), (b, _)]) if is_year_like(*a, *ad) => {
                (Some((*a, *ad)), Some(m), Some(*b))
            }
            (Some(m), [(a, _), (b, bd)]) => (Some((*b, *bd)), Some(m), Some(*a)),
            (Some(_), _) => return None,

            (None, [(v, 8)]) => {
                let (b, c) = (v / 100 % 100, v % 100);
                if c <= 12 {
                    (Some((v / 10_000, 4)), Some(c), Some(b))
                } else {
                    (Some((v / 10_000, 4)), Some(b), Some(c))
                }
            }
            (None, [(v, 6)]) => (Some((v / 10_000, 2)), Some(v / 100 % 100), Some(v % 100)),
            (None, [(v, d)]) if is_year_like(*v, *d) => (Some((*v, *d)), None, None),
            (None, [(v, _)]) => (None, None, Some(*v)),
            (None, [(a, ad), (b, _)]) if is_year_like(*a, *ad) => {
                (Some((*a, *ad)), Some(*b), None)
            }
            (None, [(a, _), (b, bd)]) if is_year_like(*b, *bd) => {
                (Some((*b, *bd)), Some(*a), None)
            }
            (None, [(a, _), (b, _)]) if *b > 12 && *a <= 12 => (None, Some(*a), Some(*b)),
            (None, [(a, _), (b, _)]) => (None, Some(*b), Some(*a)),
            // Still day first after a leading year: 2016-02-03 is 2 March.
            (None, [(a, ad), (b, _), (c, _)]) if is_year_like(*a, *ad) => {
                if *c <= 12 {
                    (Some((*a, *ad)), Some(*c), Some(*b))
                } else {
                    (Some((*a, *ad)), Some(*b), Some(*c))
                }
            }
            (None, [(a, _), (b, _), (c, cd)]) => {
                if *b > 12 && *a <= 12 {
                    (Some((*c, *cd)), Some(*a), Some(*b))
                } else {
                    (Some((*c, *cd)), Some(*b), Some(*a))
                }
            }
            (None, _) => return None,
        };

    let year = year.map_or(today.year(), |(v, d)| expand_year(v, d, today));
    let month = month.unwrap_or(today.month());
    let day = match day {
        Some(day) => day,
        None => today.day().min(days_in_month(year, month)?),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
