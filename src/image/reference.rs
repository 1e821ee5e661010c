//! `name[:tag]` image references as typed on the command line

use std::fmt;
use std::str::FromStr;

use crate::error::handlers::ValidationErrorHandler;
use crate::error::RegistryError;

pub const DEFAULT_TAG: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub name: String,
    pub tag: String,
}

impl ImageReference {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Split `name[:tag]` on the first colon. A missing or empty tag becomes
    /// `latest`.
    ///
    /// Anything after the first colon belongs to the tag, so a name that
    /// itself carries a colon (`host:5000/app`) cannot be expressed here.
    pub fn parse(input: &str) -> Self {
        let (name, tag) = match input.split_once(':') {
            Some((name, tag)) => (name, tag),
            None => (input, ""),
        };

        let tag = if tag.is_empty() { DEFAULT_TAG } else { tag };

        Self::new(name, tag)
    }
}

impl FromStr for ImageReference {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reference = Self::parse(s.trim());
        ValidationErrorHandler::validate_image_name(&reference.name)?;
        Ok(reference)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_tag() {
        assert_eq!(ImageReference::parse("foo"), ImageReference::new("foo", "latest"));
        assert_eq!(ImageReference::parse("foo:"), ImageReference::new("foo", "latest"));
    }

    #[test]
    fn test_parse_explicit_tag() {
        assert_eq!(ImageReference::parse("foo:1.2"), ImageReference::new("foo", "1.2"));
        assert_eq!(
            ImageReference::parse("team/app:2024-01"),
            ImageReference::new("team/app", "2024-01")
        );
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let reference = ImageReference::parse("host:5000/app:v1");
        assert_eq!(reference.name, "host");
        assert_eq!(reference.tag, "5000/app:v1");
    }

    #[test]
    fn test_from_str_rejects_empty_name() {
        assert!("".parse::<ImageReference>().is_err());
        assert!(":v1".parse::<ImageReference>().is_err());
        assert_eq!(
            "app:v1".parse::<ImageReference>().unwrap().to_string(),
            "app:v1"
        );
    }
}
