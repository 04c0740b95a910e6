//! Header row handling.

use std::collections::HashSet;

/// Builds unique column names from a raw header record.
///
/// Blank names become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
/// appended in order of appearance. Whitespace is kept as-is, it is the
/// normalization pass that trims names.
pub fn header_names<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (idx, value) in raw.into_iter().enumerate() {
        let value = if idx == 0 {
            value.trim_start_matches('\u{feff}')
        } else {
            value
        };
        let base = if value.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            value.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_names_verbatim() {
        assert_eq!(
            header_names([" Fecha UTC ", "PAX"]),
            vec![" Fecha UTC ", "PAX"]
        );
    }

    #[test]
    fn strips_bom_from_first_name() {
        assert_eq!(header_names(["\u{feff}Fecha", "PAX"]), vec!["Fecha", "PAX"]);
    }

    #[test]
    fn disambiguates_duplicates() {
        assert_eq!(
            header_names(["A", "A", "B", "A"]),
            vec!["A", "A.1", "B", "A.2"]
        );
    }

    #[test]
    fn generated_names_do_not_collide() {
        assert_eq!(header_names(["A.1", "A", "A"]), vec!["A.1", "A", "A.2"]);
    }

    #[test]
    fn names_blank_headers() {
        assert_eq!(header_names(["A", ""]), vec!["A", "Unnamed: 1"]);
    }
}
