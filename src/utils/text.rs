// src/utils/text.rs

//! Accent normalization for review text.

/// Replace accented Spanish vowels (and ñ) with their unaccented
/// equivalents, then trim surrounding whitespace.
///
/// The mapping covers lowercase characters only, matching the upstream
/// data where review bodies are lowercase-accented Spanish prose.
/// Uppercase accented characters pass through unchanged.
///
/// # Examples
/// ```
/// use affinity_scraper::utils::text::normalize;
///
/// assert_eq!(normalize("Ñandú"), "Ñandu");
/// assert_eq!(normalize("  hola  "), "hola");
/// ```
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect();
    mapped.trim().to_string()
}
