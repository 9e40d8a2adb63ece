//! Parsing of the `Link` response header used by paginated listings.
//!
//! A header looks like
//! `<https://api.github.com/repositories/1/releases?page=2>; rel="next", <…?page=5>; rel="last"`.

use url::Url;

/// Returns the page number carried by the `next` relation of a `Link` header.
///
/// Anything unexpected (no header, no `next` relation, a target that is not a
/// URL, a missing or non-numeric `page` parameter) means there is no next page.
pub fn next_page(link: Option<&str>) -> Option<u32> {
    let target = link?.split(',').find_map(next_target)?;

    // relative targets are resolved against a throwaway base
    let url = Url::parse("http://localhost/").ok()?.join(target).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

fn next_target(entry: &str) -> Option<&str> {
    let mut parts = entry.split(';');
    let target = parts
        .next()?
        .trim()
        .strip_prefix('<')?
        .strip_suffix('>')?;

    parts.any(is_next_relation).then_some(target)
}

fn is_next_relation(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else {
        return false;
    };

    key.trim().eq_ignore_ascii_case("rel")
        && value
            .trim()
            .trim_matches('"')
            .split_whitespace()
            .any(|relation| relation == "next")
}
