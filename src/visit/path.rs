use crate::error::Error;
use std::fmt;

/// The position of a node inside a document, as a list of segments leading from the document down
/// to the node.
///
/// Paths are written as their segments joined with dots, e.g. `0.selectionSet.1.arguments.0`
/// points at the first argument of the second selection in the first definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment)
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the index of the document definition that this path starts in.
    #[inline]
    pub fn definition_index(&self) -> Option<usize> {
        match self.segments.first() {
            Some(PathSegment::Index(index)) => Some(*index),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Path {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let segments = value
            .split('.')
            .map(PathSegment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for Path {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),

    Arguments,
    Directives,
    SelectionSet,
    VariableDefinitions,
}

impl TryFrom<&str> for PathSegment {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<usize>() {
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => match value {
                "arguments" => Ok(PathSegment::Arguments),
                "directives" => Ok(PathSegment::Directives),
                "selectionSet" => Ok(PathSegment::SelectionSet),
                "variableDefinitions" => Ok(PathSegment::VariableDefinitions),
                _ => Err(Error::new(format!("Invalid path segment {value}"), None)),
            },
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Arguments => f.write_str("arguments"),
            PathSegment::Directives => f.write_str("directives"),
            PathSegment::SelectionSet => f.write_str("selectionSet"),
            PathSegment::VariableDefinitions => f.write_str("variableDefinitions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path = Path::try_from("2.selectionSet.0.arguments.1").unwrap();
        assert_eq!(
            path.segments,
            vec![
                PathSegment::Index(2),
                PathSegment::SelectionSet,
                PathSegment::Index(0),
                PathSegment::Arguments,
                PathSegment::Index(1),
            ]
        );
        assert_eq!(path.to_string(), "2.selectionSet.0.arguments.1");
        assert_eq!(path.definition_index(), Some(2));
        assert_eq!(Path::default().definition_index(), None);
    }

    #[test]
    fn invalid_segment() {
        let error = Path::try_from("0.fields").unwrap_err();
        assert_eq!(error.message(), "Invalid path segment fields");
    }
}
