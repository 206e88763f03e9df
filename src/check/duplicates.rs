use super::{ErrorKind, ValidationError};
use hashbrown::HashSet;

/// A fragment name that was declared again after its first declaration.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DuplicateFragment<'a> {
    pub name: &'a str,
    /// The position of this declaration in the list of names that was checked.
    pub occurrence: usize,
}

impl<'a> From<DuplicateFragment<'a>> for ValidationError {
    fn from(duplicate: DuplicateFragment<'a>) -> Self {
        ValidationError::new(
            ErrorKind::DuplicateFragment,
            format!("Name of '{}' fragment is not unique", duplicate.name),
        )
    }
}

/// Finds every declaration of a fragment name past its first one.
///
/// `names` must list the names of all fragment declarations of a run, in order and without
/// removing repeats. A name that's declared three times yields two duplicates.
pub fn find_duplicate_fragments<'a, I>(names: I) -> Vec<DuplicateFragment<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| !seen.insert(*name))
        .map(|(occurrence, name)| DuplicateFragment { name, occurrence })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names() {
        let duplicates = find_duplicate_fragments(["A", "B", "A", "A"]);
        assert_eq!(
            duplicates,
            vec![
                DuplicateFragment {
                    name: "A",
                    occurrence: 2
                },
                DuplicateFragment {
                    name: "A",
                    occurrence: 3
                },
            ]
        );
        let error = ValidationError::from(duplicates[0]);
        assert_eq!(error.kind, ErrorKind::DuplicateFragment);
        assert_eq!(error.message, "Name of 'A' fragment is not unique");
    }

    #[test]
    fn unique_names() {
        assert!(find_duplicate_fragments(["A", "B", "C"]).is_empty());
        assert!(find_duplicate_fragments(std::iter::empty()).is_empty());
    }
}
