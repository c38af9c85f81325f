//! URL inspection for deduplication and filtering.

use url::Url;

/// Deduplication key for a result link.
///
/// Lowercased host with one leading `www.` label removed. Links that do
/// not parse, or have no host, fall back to the raw link string.
///
/// # Examples
///
/// ```
/// use scholar_search::orchestrator::domain::registrable_domain;
///
/// assert_eq!(registrable_domain("https://WWW.MIT.edu/physics"), "mit.edu");
/// assert_eq!(registrable_domain("not a url"), "not a url");
/// ```
pub fn registrable_domain(link: &str) -> String {
    let Some(host) = Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase))
    else {
        return link.to_owned();
    };
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => host,
    }
}

/// Number of non-empty path segments in `link`, or `None` if it does not
/// parse as a URL.
pub fn path_depth(link: &str) -> Option<usize> {
    let url = Url::parse(link).ok()?;
    Some(url.path().split('/').filter(|seg| !seg.is_empty()).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_and_lowercases() {
        assert_eq!(registrable_domain("https://www.mit.edu/physics/grad"), "mit.edu");
        assert_eq!(registrable_domain("https://mit.edu/physics"), "mit.edu");
        assert_eq!(registrable_domain("HTTP://Physics.Stanford.EDU"), "physics.stanford.edu");
    }

    #[test]
    fn only_one_www_label_stripped() {
        assert_eq!(registrable_domain("https://www.www.odd.edu/"), "www.odd.edu");
        assert_eq!(registrable_domain("https://wwwx.edu/"), "wwwx.edu");
    }

    #[test]
    fn port_is_not_part_of_domain() {
        assert_eq!(registrable_domain("https://www.ox.ac.uk:8443/x"), "ox.ac.uk");
    }

    #[test]
    fn malformed_links_fall_back_to_raw() {
        assert_eq!(registrable_domain(""), "");
        assert_eq!(registrable_domain("/relative/path"), "/relative/path");
        assert_eq!(registrable_domain("mailto:office@uni.edu"), "mailto:office@uni.edu");
    }

    #[test]
    fn path_depth_counts_non_empty_segments() {
        assert_eq!(path_depth("https://mit.edu"), Some(0));
        assert_eq!(path_depth("https://mit.edu/"), Some(0));
        assert_eq!(path_depth("https://mit.edu/physics"), Some(1));
        assert_eq!(path_depth("https://mit.edu/physics/"), Some(1));
        assert_eq!(path_depth("https://uni.edu/dept/admissions/2024"), Some(3));
        assert_eq!(path_depth("https://uni.edu//a//b"), Some(2));
    }

    #[test]
    fn path_depth_of_malformed_link() {
        assert_eq!(path_depth("not a url"), None);
    }
}
