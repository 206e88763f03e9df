/// Options that enable or configure the checks of a validation run.
///
/// With the `json` feature these deserialize from camelCase JSON configuration, where every
/// missing option falls back to its default.
///
/// ```
/// use graphql_validate::ValidateOptions;
///
/// let options = ValidateOptions::default().with_max_depth(5);
/// assert!(options.strict_fragments);
/// assert!(options.strict_deprecated);
/// assert_eq!(options.max_depth, Some(5));
/// assert!(!options.vendor_directives);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(
    feature = "json",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ValidateOptions {
    /// Report fragment names that are declared more than once.
    pub strict_fragments: bool,
    /// Scan for usages of deprecated fields, arguments and enum values.
    pub strict_deprecated: bool,
    /// The deepest that an operation may nest its fields. `None` or zero disable the check.
    pub max_depth: Option<usize>,
    /// Support client-side directives, such as `@client` and `@connection`, before validating.
    #[cfg_attr(feature = "json", serde(alias = "apollo"))]
    pub vendor_directives: bool,
    /// Keep fields marked with `@client` and only strip the directive instead of deleting them.
    #[cfg_attr(feature = "json", serde(alias = "keepClientFields"))]
    pub keep_tagged_fields: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        ValidateOptions {
            strict_fragments: true,
            strict_deprecated: true,
            max_depth: None,
            vendor_directives: false,
            keep_tagged_fields: false,
        }
    }
}

impl ValidateOptions {
    pub fn with_strict_fragments(mut self, strict_fragments: bool) -> Self {
        self.strict_fragments = strict_fragments;
        self
    }

    pub fn with_strict_deprecated(mut self, strict_deprecated: bool) -> Self {
        self.strict_deprecated = strict_deprecated;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_vendor_directives(mut self, vendor_directives: bool) -> Self {
        self.vendor_directives = vendor_directives;
        self
    }

    pub fn with_keep_tagged_fields(mut self, keep_tagged_fields: bool) -> Self {
        self.keep_tagged_fields = keep_tagged_fields;
        self
    }

    /// The depth limit, unless the depth check is disabled.
    #[inline]
    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth.filter(|max_depth| *max_depth > 0)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let options: ValidateOptions = serde_json::from_str(r#"{ "maxDepth": 4 }"#).unwrap();
        assert_eq!(options, ValidateOptions::default().with_max_depth(4));

        let options: ValidateOptions = serde_json::from_str(
            r#"{ "strictFragments": false, "apollo": true, "keepClientFields": true }"#,
        )
        .unwrap();
        assert!(!options.strict_fragments);
        assert!(options.strict_deprecated);
        assert!(options.vendor_directives);
        assert!(options.keep_tagged_fields);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn zero_depth_disables_the_limit() {
        assert_eq!(ValidateOptions::default().with_max_depth(0).depth_limit(), None);
        assert_eq!(ValidateOptions::default().with_max_depth(2).depth_limit(), Some(2));
    }
}
