// src/utils/url.rs

//! URL construction and identifier extraction.

/// Index of the show identifier within a catalog URL split on '/':
/// `https:` / `` / `host` / `en` / `<identifier>`.
const SHOW_ID_SEGMENT: usize = 4;

/// Build the en-locale title search URL. Spaces become '+', the only
/// escaping the site's search endpoint requires.
pub fn search_url(base: &str, title: &str) -> String {
    format!(
        "{base}/en/search.php?stext={}&stype=title",
        title.replace(' ', "+")
    )
}

/// Build the es-locale review-listing URL for one page of one show.
///
/// The resolver and the crawler deliberately hit different locales: title
/// search runs against `/en/`, reviews are only listed under `/es/`.
pub fn reviews_url(base: &str, page: u32, identifier: &str) -> String {
    format!("{base}/es/reviews/{page}/{identifier}.html")
}

/// Extract the show identifier path segment from a catalog show URL,
/// e.g. `film123456.html` from `https://host/en/film123456.html`.
pub fn show_id_segment(url: &str) -> Option<&str> {
    url.split('/')
        .nth(SHOW_ID_SEGMENT)
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_replaces_spaces() {
        assert_eq!(
            search_url("https://www.filmaffinity.com", "Breaking Bad"),
            "https://www.filmaffinity.com/en/search.php?stext=Breaking+Bad&stype=title"
        );
    }

    #[test]
    fn test_reviews_url() {
        assert_eq!(
            reviews_url("https://www.filmaffinity.com", 3, "film123456"),
            "https://www.filmaffinity.com/es/reviews/3/film123456.html"
        );
    }

    #[test]
    fn test_show_id_segment() {
        assert_eq!(
            show_id_segment("https://www.filmaffinity.com/en/film595457.html"),
            Some("film595457.html")
        );
    }

    #[test]
    fn test_show_id_segment_too_short() {
        assert_eq!(show_id_segment("https://www.filmaffinity.com/en"), None);
        assert_eq!(show_id_segment("not a url"), None);
    }
}
