// ABOUTME: Container image reference composition.
// ABOUTME: Builds the `{registry}/{function}:{version}` reference pushed to ECR.

use std::fmt;

use super::{FunctionName, VersionTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: Option<String>,
    name: String,
    tag: VersionTag,
}

impl ImageRef {
    /// Compose the reference a function image is built and pushed under.
    ///
    /// The registry is normalized first, so a proxy endpoint such as
    /// `https://123.dkr.ecr.eu-west-1.amazonaws.com` is accepted as is.
    pub fn for_function(registry: &str, function: &FunctionName, version: &VersionTag) -> Self {
        let registry = normalize_registry(registry);
        Self {
            registry: (!registry.is_empty()).then(|| registry.to_string()),
            name: function.to_string(),
            tag: version.clone(),
        }
    }

    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        self.tag.as_str()
    }

    /// Reference without tag, as expected by the push endpoint.
    pub fn repository(&self) -> String {
        match &self.registry {
            Some(registry) => format!("{}/{}", registry, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository(), self.tag)
    }
}

/// Strip the URL scheme and trailing slashes from a registry endpoint.
pub fn normalize_registry(endpoint: &str) -> &str {
    let endpoint = endpoint.trim();
    let endpoint = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);
    endpoint.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_scheme_and_slash() {
        assert_eq!(
            normalize_registry("https://1234.dkr.ecr.us-east-1.amazonaws.com/"),
            "1234.dkr.ecr.us-east-1.amazonaws.com"
        );
        assert_eq!(normalize_registry("http://localhost:5000"), "localhost:5000");
        assert_eq!(normalize_registry("ghcr.io"), "ghcr.io");
    }

    #[test]
    fn repository_drops_tag() {
        let img = ImageRef::for_function(
            "http://localhost:5000",
            &FunctionName::new("fn").unwrap(),
            &VersionTag::new("v1").unwrap(),
        );
        assert_eq!(img.repository(), "localhost:5000/fn");
        assert_eq!(img.to_string(), "localhost:5000/fn:v1");
    }

    #[test]
    fn empty_registry_leaves_bare_name() {
        let img = ImageRef::for_function(
            "https://",
            &FunctionName::new("fn").unwrap(),
            &VersionTag::latest(),
        );
        assert!(img.registry().is_none());
        assert_eq!(img.to_string(), "fn:latest");
    }
}
