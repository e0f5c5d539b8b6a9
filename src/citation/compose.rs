use regex::RegexBuilder;

use crate::citation::{CitationFields, CitationText, ResolvedDate};

/// Lay out a citation as Wordnik comment HTML:
///
/// ```text
/// <b>spinning rust</b>, <i>n.</i> A computer hard disk.
///
/// <a href="https://twitter.com/wiredfool/status/577541476214706176">erics, 16 March 2015</a>:
///
/// <blockquote>... email archives to <b>spinning rust</b> this morning.</blockquote>
/// ```
///
/// Each of the three blocks is left out entirely when none of its fields are present.
pub fn compose(
    fields: &CitationFields,
    source: Option<&str>,
    date: Option<&ResolvedDate>,
) -> CitationText {
    let mut text = CitationText::default();
    text.push(headword_line(fields));
    text.push(attribution_line(fields, source, date));
    if let Some(quote) = fields.quote() {
        text.push(format!(
            "<blockquote>{}</blockquote>",
            embolden(fields.word(), quote)
        ));
    }
    text
}

fn headword_line(fields: &CitationFields) -> String {
    let mut line = format!("<b>{}</b>", fields.word());
    if let Some(pos) = fields.part_of_speech() {
        line.push_str(&format!(", <i>{pos}</i>"));
    }
    if let Some(definition) = fields.definition() {
        line.push(' ');
        line.push_str(definition);
    }
    line
}

fn attribution_line(
    fields: &CitationFields,
    source: Option<&str>,
    date: Option<&ResolvedDate>,
) -> String {
    let url = fields.url();
    if url.is_none() && source.is_none() && date.is_none() {
        return String::new();
    }

    let mut line = String::new();
    if let Some(url) = url {
        line.push_str(&format!("<a href=\"{url}\">"));
    }
    if let Some(source) = source {
        if fields.source_is_roman() {
            line.push_str(source);
        } else {
            line.push_str(&format!("<i>{source}</i>"));
        }
    }
    if let Some(date) = date {
        if source.is_some() {
            line.push_str(", ");
        }
        line.push_str(date.as_str());
    }
    if url.is_some() {
        line.push_str("</a>");
    }
    line.push(':');
    line
}

/// Wrap every occurrence of `word` in `quote` in `<b>` tags, ignoring case but keeping the
/// quote's own casing.
///
/// Occurrences inside longer words count too: "thing" is emboldened inside "things".
pub fn embolden(word: &str, quote: &str) -> String {
    if word.is_empty() {
        return quote.to_string();
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    else {
        return quote.to_string();
    };
    let mut out = String::with_capacity(quote.len());
    let mut last = 0;
    for m in re.find_iter(quote) {
        out.push_str(&quote[last..m.start()]);
        out.push_str("<b>");
        out.push_str(m.as_str());
        out.push_str("</b>");
        last = m.end();
    }
    out.push_str(&quote[last..]);
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date() -> ResolvedDate {
        ResolvedDate::new(NaiveDate::from_ymd_opt(2015, 3, 16).unwrap())
    }

    #[test]
    fn embolden_lower_lower_lower() {
        assert_eq!(
            embolden("this", "make this and this bold"),
            "make <b>this</b> and <b>this</b> bold"
        );
    }

    #[test]
    fn embolden_upper_upper_upper() {
        assert_eq!(
            embolden("THIS", "make THIS and THIS bold"),
            "make <b>THIS</b> and <b>THIS</b> bold"
        );
    }

    #[test]
    fn embolden_keeps_quote_casing() {
        assert_eq!(
            embolden("this", "make this and THIS bold"),
            "make <b>this</b> and <b>THIS</b> bold"
        );
        assert_eq!(
            embolden("THis", "make thIS and ThiS bold"),
            "make <b>thIS</b> and <b>ThiS</b> bold"
        );
    }

    #[test]
    fn embolden_inside_longer_word() {
        assert_eq!(embolden("thing", "make things bold"), "make <b>thing</b>s bold");
    }

    #[test]
    fn embolden_phrase() {
        assert_eq!(
            embolden(
                "this phrase",
                "Embolden this phrase and 'This Phrase' and \"THIS PHRASE\"."
            ),
            "Embolden <b>this phrase</b> and '<b>This Phrase</b>' and \"<b>THIS PHRASE</b>\"."
        );
    }

    #[test]
    fn embolden_treats_word_literally() {
        assert_eq!(embolden("c++", "I like C++ a lot"), "I like <b>C++</b> a lot");
        assert_eq!(embolden("a.b", "axb a.b"), "axb <b>a.b</b>");
        assert_eq!(embolden("$1", "costs $1"), "costs <b>$1</b>");
    }

    #[test]
    fn embolden_only_adds_markup() {
        proptest::proptest!(|(word in "[a-z]{1,6}", quote in "[A-Za-z ]{0,64}")| {
            let out = embolden(&word, &quote);
            proptest::prop_assert_eq!(out.replace("<b>", "").replace("</b>", ""), quote);
        })
    }

    #[test]
    fn word_only_is_a_single_line() {
        let fields = CitationFields::new("word").unwrap();
        let text = compose(&fields, None, None);
        assert_eq!(text.lines(), ["<b>word</b>"]);
        assert_eq!(text.to_string(), "<b>word</b>");
    }

    #[test]
    fn headword_without_part_of_speech() {
        let fields = CitationFields::new("word")
            .unwrap()
            .with_definition(Some("A unit of language.".into()));
        assert_eq!(headword_line(&fields), "<b>word</b> A unit of language.");
    }

    #[test]
    fn attribution_with_link_and_italic_source() {
        let fields = CitationFields::new("word")
            .unwrap()
            .with_url(Some("https://example.com/a".into()));
        assert_eq!(
            attribution_line(&fields, Some("Example"), Some(&date())),
            "<a href=\"https://example.com/a\"><i>Example</i>, 16 March 2015</a>:"
        );
    }

    #[test]
    fn attribution_roman_source_without_link() {
        let fields = CitationFields::new("word")
            .unwrap()
            .with_source(Some("erics".into()), true);
        assert_eq!(
            attribution_line(&fields, fields.source_name(), Some(&date())),
            "erics, 16 March 2015:"
        );
    }

    #[test]
    fn attribution_without_source_has_no_dangling_comma() {
        let fields = CitationFields::new("word").unwrap();
        assert_eq!(attribution_line(&fields, None, Some(&date())), "16 March 2015:");
    }

    #[test]
    fn blocks_are_separated_by_one_blank_line() {
        let fields = CitationFields::new("thing")
            .unwrap()
            .with_quote(Some("make things bold".into()));
        let text = compose(&fields, None, Some(&date()));
        assert_eq!(
            text.to_string(),
            "<b>thing</b>\n\n16 March 2015:\n\n<blockquote>make <b>thing</b>s bold</blockquote>"
        );
    }
}
