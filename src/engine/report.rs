use crate::check::{DeprecationWarning, ValidationError};

/// The findings of a validation run for one document that has at least one of them.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InvalidDocument {
    pub origin: String,
    pub errors: Vec<ValidationError>,
    pub deprecated: Vec<DeprecationWarning>,
}

impl InvalidDocument {
    pub fn new<S: Into<String>>(origin: S) -> Self {
        InvalidDocument {
            origin: origin.into(),
            errors: Vec::new(),
            deprecated: Vec::new(),
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[inline]
    pub fn has_deprecated(&self) -> bool {
        !self.deprecated.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.deprecated.is_empty()
    }
}

/// Receives a record for every document with findings, in the order documents are validated.
pub trait ReportSink {
    fn report(&mut self, document: InvalidDocument);
}

impl ReportSink for Vec<InvalidDocument> {
    #[inline]
    fn report(&mut self, document: InvalidDocument) {
        self.push(document);
    }
}

/// All records of a validation run, with the summaries a CI pipeline decides on.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Report {
    pub documents: Vec<InvalidDocument>,
}

impl ReportSink for Report {
    #[inline]
    fn report(&mut self, document: InvalidDocument) {
        self.documents.push(document);
    }
}

impl From<Vec<InvalidDocument>> for Report {
    fn from(documents: Vec<InvalidDocument>) -> Self {
        Report { documents }
    }
}

impl Report {
    /// Treats every deprecated usage as an error, appending the warnings of each document to its
    /// errors.
    pub fn fail_on_deprecated(mut self) -> Self {
        for document in self.documents.iter_mut() {
            let deprecated = std::mem::take(&mut document.deprecated);
            document
                .errors
                .extend(deprecated.into_iter().map(ValidationError::from));
        }
        self
    }

    /// Iterates over the records whose origin contains any of the patterns, or over all records
    /// when no patterns are given.
    pub fn filter<'r, S: AsRef<str>>(
        &'r self,
        patterns: &'r [S],
    ) -> impl Iterator<Item = &'r InvalidDocument> + 'r {
        self.documents.iter().filter(move |document| {
            patterns.is_empty()
                || patterns
                    .iter()
                    .any(|pattern| document.origin.contains(pattern.as_ref()))
        })
    }

    /// The number of documents with at least one error.
    pub fn error_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.has_errors()).count()
    }

    /// The number of documents with at least one deprecated usage.
    pub fn deprecated_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|doc| doc.has_deprecated())
            .count()
    }

    /// Whether all documents are valid, which deprecated usages alone don't change.
    #[inline]
    pub fn status(&self) -> bool {
        self.error_count() == 0
    }

    /// Summarises the report for output, keeping only the records that match the patterns.
    ///
    /// The status always reflects all records.
    pub fn output<'r, S: AsRef<str>>(&'r self, patterns: &'r [S]) -> ReportOutput<'r> {
        ReportOutput {
            status: self.status(),
            documents: self.filter(patterns).collect(),
        }
    }
}

/// The output form of a [`Report`], which serializes as `{ "status": bool, "documents": [...] }`.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ReportOutput<'r> {
    pub status: bool,
    pub documents: Vec<&'r InvalidDocument>,
}

#[cfg(feature = "json")]
impl<'r> ReportOutput<'r> {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::check::ErrorKind;
    use crate::error::Location;
    use crate::visit::Path;

    fn warning(message: &str) -> DeprecationWarning {
        DeprecationWarning {
            message: message.into(),
            location: Some(Location { line: 1, column: 10 }),
            path: Path::try_from("0.selectionSet.0").unwrap(),
            span: Span::new(9, 17),
        }
    }

    fn sample() -> Report {
        let mut broken = InvalidDocument::new("src/queries/broken.graphql");
        broken.errors.push(ValidationError::new(
            ErrorKind::DepthExceeded,
            "Query exceeds maximum depth of 2",
        ));
        let mut outdated = InvalidDocument::new("src/queries/outdated.graphql");
        outdated
            .deprecated
            .push(warning("The field 'User.oldEmail' is deprecated."));
        Report::from(vec![broken, outdated])
    }

    #[test]
    fn counts_and_status() {
        let report = sample();
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.deprecated_count(), 1);
        assert!(!report.status());
        assert!(Report::default().status());
    }

    #[test]
    fn deprecated_usages_become_errors() {
        let report = sample().fail_on_deprecated();
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.deprecated_count(), 0);
        let error = &report.documents[1].errors[0];
        assert_eq!(error.kind, ErrorKind::DeprecatedUsage);
        assert_eq!(error.location, Some(Location { line: 1, column: 10 }));
    }

    #[test]
    fn filters_by_origin() {
        let report = sample();
        let origins: Vec<&str> = report
            .filter(&["outdated"])
            .map(|doc| doc.origin.as_str())
            .collect();
        assert_eq!(origins, vec!["src/queries/outdated.graphql"]);
        assert_eq!(report.filter(&[] as &[&str]).count(), 2);
        assert_eq!(report.filter(&["missing", "broken"]).count(), 1);
    }

    #[test]
    fn sinks_receive_records() {
        let mut records: Vec<InvalidDocument> = Vec::new();
        records.report(InvalidDocument::new("a.graphql"));
        let mut report = Report::default();
        report.report(InvalidDocument::new("b.graphql"));
        assert_eq!(records[0].origin, "a.graphql");
        assert_eq!(report.documents[0].origin, "b.graphql");
    }

    #[cfg(feature = "json")]
    #[test]
    fn serializes_output() {
        let report = sample();
        let output = report.output(&["outdated"]).to_json().unwrap();
        assert_eq!(
            output,
            serde_json::json!({
                "status": false,
                "documents": [{
                    "origin": "src/queries/outdated.graphql",
                    "errors": [],
                    "deprecated": [{
                        "message": "The field 'User.oldEmail' is deprecated.",
                        "location": { "line": 1, "column": 10 },
                        "path": "0.selectionSet.0"
                    }]
                }]
            })
        );
    }
}
