use url::Url;

/// Publications whose name can't be derived from their domain.
///
/// NOTE: Ordering is important here, as it signifies priority. The first entry whose domain
/// appears anywhere in the URL wins.
static KNOWN_SOURCES: &[(&str, &str)] = &[
    ("washingtonpost.com", "Washington Post"),
    ("bikeradar.com", "BikeRadar"),
    ("nytimes.com", "New York Times"),
    ("bbc.co.uk", "BBC"),
    ("bbc.com", "BBC"),
];

/// URL prefixes whose first path segment is a user handle.
static HANDLE_PREFIXES: &[&str] = &[
    "https://twitter.com/",
    "http://twitter.com/",
    "https://www.twitter.com/",
    "http://www.twitter.com/",
    "https://mobile.twitter.com/",
    "http://mobile.twitter.com/",
    "https://x.com/",
    "http://x.com/",
    "https://www.x.com/",
    "http://www.x.com/",
];

// Second-level labels that sit under a country code, as in `co.uk` or `com.au`.
static SECOND_LEVEL_LABELS: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu", "ne", "or"];

/// Guess the name of the publication behind `url`.
///
/// Returns `None` only when there is no URL, or no host can be found in it at all.
pub fn resolve_source(url: Option<&str>) -> Option<String> {
    let url = url?.trim();

    if let Some((_, name)) = KNOWN_SOURCES.iter().find(|(domain, _)| url.contains(domain)) {
        return Some(name.to_string());
    }

    if let Some(handle) = handle_from_url(url) {
        return Some(format!("@{handle}"));
    }

    let host = host_of(url)?;
    let label = registrable_label(&host)?;
    Some(name_from_label(label))
}

fn handle_from_url(url: &str) -> Option<&str> {
    let rest = HANDLE_PREFIXES.iter().find_map(|p| url.strip_prefix(p))?;
    let handle = match rest.find(['/', '?', '#']) {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    (!handle.is_empty()).then_some(handle)
}

fn host_of(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        return Some(host.to_ascii_lowercase());
    }

    // Not a URL the parser accepts (e.g. no scheme). Scan for something host-shaped instead.
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    let end = rest.find(['/', '?', '#', ':']).unwrap_or(rest.len());
    let host = rest[..end].trim_matches('.');
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

/// The label just left of the public suffix: `theguardian` in `www.theguardian.com`, `bbc` in
/// `news.bbc.co.uk`.
fn registrable_label(host: &str) -> Option<&str> {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    match labels.as_slice() {
        [] => None,
        [only] => Some(*only),
        [.., label, second, tld]
            if tld.len() == 2 && SECOND_LEVEL_LABELS.contains(second) =>
        {
            Some(*label)
        }
        [.., label, _tld] => Some(*label),
    }
}

fn name_from_label(label: &str) -> String {
    let titled = title_case(label);
    match titled.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("the") && titled.len() > 3 => {
            format!("The {}", title_case(&titled[3..]))
        }
        _ => titled,
    }
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_url_no_source() {
        assert_eq!(resolve_source(None), None);
    }

    #[test]
    fn known_source_washington_post() {
        let url = "https://www.washingtonpost.com/news/checkpoint/wp/2016/01/19/\
                   more-u-s-military-drones-are-crashing-than-ever-as-new-problems-emerge/";
        assert_eq!(resolve_source(Some(url)).as_deref(), Some("Washington Post"));
    }

    #[test]
    fn known_source_bikeradar() {
        let url = "http://www.bikeradar.com/road/gear/article/some-review-48000/";
        assert_eq!(resolve_source(Some(url)).as_deref(), Some("BikeRadar"));
    }

    #[test]
    fn twitter_handle() {
        let url = "https://twitter.com/Chris_Boardman/status/691588823419977728";
        assert_eq!(resolve_source(Some(url)).as_deref(), Some("@Chris_Boardman"));
    }

    #[test]
    fn twitter_handle_without_trailing_path() {
        assert_eq!(
            resolve_source(Some("https://twitter.com/wiredfool")).as_deref(),
            Some("@wiredfool")
        );
    }

    #[test]
    fn handle_on_every_twitter_host() {
        for url in [
            "https://www.twitter.com/jack/status/20",
            "http://www.twitter.com/jack",
            "http://mobile.twitter.com/jack/status/20",
            "http://x.com/jack/status/20",
            "https://www.x.com/jack?s=20",
        ] {
            assert_eq!(resolve_source(Some(url)).as_deref(), Some("@jack"), "{url}");
        }
    }

    #[test]
    fn twitter_without_handle_uses_domain() {
        assert_eq!(
            resolve_source(Some("https://twitter.com/")).as_deref(),
            Some("Twitter")
        );
    }

    #[test]
    fn generic_with_www_and_the() {
        let url = "http://www.theguardian.com/science/2016/jan/20/\
                   ninth-planet-solar-system-edge-discovery-pluto";
        assert_eq!(resolve_source(Some(url)).as_deref(), Some("The Guardian"));
    }

    #[test]
    fn generic_no_www() {
        let url = "http://yle.fi/uutiset/officials_see_signs_of_hybrid_warfare_in\
                   _migrant_crisis/8672574";
        assert_eq!(resolve_source(Some(url)).as_deref(), Some("Yle"));
    }

    #[test]
    fn generic_subdomain_and_second_level_suffix() {
        assert_eq!(
            resolve_source(Some("https://www.independent.co.uk/news/x")).as_deref(),
            Some("Independent")
        );
        assert_eq!(
            resolve_source(Some("https://blog.example.com/post")).as_deref(),
            Some("Example")
        );
    }

    #[test]
    fn malformed_url_is_best_effort() {
        assert_eq!(
            resolve_source(Some("theatlantic.com/technology/archive")).as_deref(),
            Some("The Atlantic")
        );
        assert_eq!(resolve_source(Some("///")), None);
    }

    #[test]
    fn bare_the_is_not_split() {
        assert_eq!(name_from_label("the"), "The");
    }

    #[test]
    fn title_case_like_python() {
        assert_eq!(title_case("new-scientist"), "New-Scientist");
        assert_eq!(title_case("WIRED"), "Wired");
    }
}
