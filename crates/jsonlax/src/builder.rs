//! String-keyed configuration bag.
//!
//! [`ReaderBuilder`] is the settings surface for callers that configure the
//! reader from external data (config files, language bindings): keys are
//! strings, values are [`Value`]s, and [`ReaderBuilder::validate`] reports
//! any key outside the recognized set. Internally everything collapses into
//! the typed [`ParserOptions`] record.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use thiserror::Error;

use crate::options::ParserOptions;
use crate::reader::CharReader;
use crate::value::Value;

const VALID_KEYS: &[&str] = &[
    "collectComments",
    "allowComments",
    "strictRoot",
    "allowDroppedNullPlaceholders",
    "allowNumericKeys",
    "allowSingleQuotes",
    "stackLimit",
    "failIfExtra",
    "rejectDupKeys",
    "allowSpecialFloats",
];

/// Settings keys outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized reader settings: {}", .keys.join(", "))]
pub struct UnknownSettings {
    pub keys: Vec<String>,
}

/// Builds [`CharReader`]s from a string-keyed settings bag.
///
/// # Examples
///
/// ```
/// use jsonlax::ReaderBuilder;
///
/// let mut builder = ReaderBuilder::new();
/// builder
///     .set("allowSingleQuotes", true)
///     .set("stackLimit", 64i64);
/// builder.validate().unwrap();
///
/// let reader = builder.new_reader();
/// assert!(reader.parse_str("['ok']").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReaderBuilder {
    settings: BTreeMap<String, Value>,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderBuilder {
    /// A bag pre-populated with the default (lenient) profile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: profile(&ParserOptions::default()),
        }
    }

    /// A bag pre-populated with the strict profile.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            settings: profile(&ParserOptions::strict()),
        }
    }

    /// Updates one setting. Unknown keys are stored as-is and surface later
    /// through [`validate`](Self::validate).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Checks every key in the bag against the recognized set.
    ///
    /// # Errors
    ///
    /// Returns the offending keys, in sorted order.
    pub fn validate(&self) -> Result<(), UnknownSettings> {
        let keys: Vec<String> = self
            .settings
            .keys()
            .filter(|key| !VALID_KEYS.contains(&key.as_str()))
            .map(ToString::to_string)
            .collect();
        if keys.is_empty() {
            Ok(())
        } else {
            Err(UnknownSettings { keys })
        }
    }

    /// Collapses the bag into the typed options record. Missing or
    /// wrongly-typed entries fall back to the default profile's values.
    #[must_use]
    pub fn options(&self) -> ParserOptions {
        let defaults = ParserOptions::default();
        ParserOptions {
            collect_comments: self.bool_setting("collectComments", defaults.collect_comments),
            allow_comments: self.bool_setting("allowComments", defaults.allow_comments),
            strict_root: self.bool_setting("strictRoot", defaults.strict_root),
            allow_dropped_null_placeholders: self.bool_setting(
                "allowDroppedNullPlaceholders",
                defaults.allow_dropped_null_placeholders,
            ),
            allow_numeric_keys: self.bool_setting("allowNumericKeys", defaults.allow_numeric_keys),
            allow_single_quotes: self
                .bool_setting("allowSingleQuotes", defaults.allow_single_quotes),
            stack_limit: self
                .settings
                .get("stackLimit")
                .and_then(Value::as_i64)
                .map_or(defaults.stack_limit, |limit| {
                    usize::try_from(limit).unwrap_or(0)
                }),
            fail_if_extra: self.bool_setting("failIfExtra", defaults.fail_if_extra),
            reject_dup_keys: self.bool_setting("rejectDupKeys", defaults.reject_dup_keys),
            allow_special_floats: self
                .bool_setting("allowSpecialFloats", defaults.allow_special_floats),
        }
    }

    /// Builds a reader from the current settings.
    #[must_use]
    pub fn new_reader(&self) -> CharReader {
        CharReader::new(self.options())
    }

    fn bool_setting(&self, key: &str, default: bool) -> bool {
        self.settings
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }
}

fn profile(options: &ParserOptions) -> BTreeMap<String, Value> {
    let mut settings = BTreeMap::new();
    let mut put = |key: &str, value: Value| {
        settings.insert(key.to_string(), value);
    };
    put("collectComments", options.collect_comments.into());
    put("allowComments", options.allow_comments.into());
    put("strictRoot", options.strict_root.into());
    put(
        "allowDroppedNullPlaceholders",
        options.allow_dropped_null_placeholders.into(),
    );
    put("allowNumericKeys", options.allow_numeric_keys.into());
    put("allowSingleQuotes", options.allow_single_quotes.into());
    put("stackLimit", i64::try_from(options.stack_limit).unwrap_or(i64::MAX).into());
    put("failIfExtra", options.fail_if_extra.into());
    put("rejectDupKeys", options.reject_dup_keys.into());
    put("allowSpecialFloats", options.allow_special_floats.into());
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bag_matches_default_options() {
        assert_eq!(ReaderBuilder::new().options(), ParserOptions::default());
    }

    #[test]
    fn strict_bag_matches_strict_options() {
        assert_eq!(ReaderBuilder::strict().options(), ParserOptions::strict());
    }

    #[test]
    fn set_overrides_profile() {
        let mut builder = ReaderBuilder::new();
        builder.set("rejectDupKeys", true).set("stackLimit", 12i64);
        let options = builder.options();
        assert!(options.reject_dup_keys);
        assert_eq!(options.stack_limit, 12);
    }

    #[test]
    fn validate_flags_unknown_keys() {
        let mut builder = ReaderBuilder::new();
        builder.set("collectComments", false);
        assert!(builder.validate().is_ok());

        builder.set("frobnicate", true).set("allowTabs", false);
        let err = builder.validate().unwrap_err();
        assert_eq!(err.keys, ["allowTabs", "frobnicate"]);
    }

    #[test]
    fn wrong_typed_setting_falls_back() {
        let mut builder = ReaderBuilder::new();
        builder.set("stackLimit", "lots");
        assert_eq!(builder.options().stack_limit, 1000);
    }
}
