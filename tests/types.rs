// ABOUTME: Integration tests for validated identifiers and image references.
// ABOUTME: Tests validation, reference composition and registry normalization.

use lambship::types::*;

mod function_name_tests {
    use super::*;

    #[test]
    fn accepts_lambda_style_names() {
        for name in ["my_lambda_function", "api-handler", "fn2", "a"] {
            assert!(FunctionName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(FunctionName::new(""), Err(FunctionNameError::Empty)));
    }

    #[test]
    fn rejects_uppercase() {
        assert!(matches!(
            FunctionName::new("MyFunction"),
            Err(FunctionNameError::NotLowercase)
        ));
    }

    #[test]
    fn rejects_path_separators() {
        assert!(matches!(
            FunctionName::new("../escape"),
            Err(FunctionNameError::InvalidChar('.'))
        ));
        assert!(matches!(
            FunctionName::new("a/b"),
            Err(FunctionNameError::InvalidChar('/'))
        ));
    }

    #[test]
    fn rejects_leading_and_trailing_separators() {
        assert!(matches!(
            FunctionName::new("-fn"),
            Err(FunctionNameError::InvalidStart)
        ));
        assert!(matches!(
            FunctionName::new("fn_"),
            Err(FunctionNameError::InvalidEnd)
        ));
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "a".repeat(65);
        assert!(matches!(
            FunctionName::new(&name),
            Err(FunctionNameError::TooLong)
        ));
        assert!(FunctionName::new(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn derives_handler_and_source_file() {
        let name = FunctionName::new("my_lambda_function").unwrap();
        assert_eq!(name.handler(), "my_lambda_function.handler");
        assert_eq!(name.source_file(), "my_lambda_function.py");
    }
}

mod version_tag_tests {
    use super::*;

    #[test]
    fn default_is_latest() {
        assert_eq!(VersionTag::default().as_str(), "latest");
        assert_eq!(VersionTag::latest().to_string(), "latest");
    }

    #[test]
    fn accepts_docker_tags() {
        for tag in ["v1.0", "1.2.3", "release_2024-01", "sha-abc123"] {
            assert!(VersionTag::new(tag).is_ok(), "{tag} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_tags() {
        assert!(matches!(VersionTag::new(""), Err(VersionTagError::Empty)));
        assert!(matches!(
            VersionTag::new(".hidden"),
            Err(VersionTagError::InvalidStart('.'))
        ));
        assert!(matches!(
            VersionTag::new("v1:2"),
            Err(VersionTagError::InvalidChar(':'))
        ));
        assert!(matches!(
            VersionTag::new(&"a".repeat(129)),
            Err(VersionTagError::TooLong)
        ));
    }
}

mod image_ref_tests {
    use super::*;

    fn function() -> FunctionName {
        FunctionName::new("my_lambda_function").unwrap()
    }

    #[test]
    fn for_function_strips_proxy_scheme() {
        let image = ImageRef::for_function(
            "https://123456789012.dkr.ecr.us-east-1.amazonaws.com",
            &function(),
            &VersionTag::new("v1.0").unwrap(),
        );
        assert_eq!(
            image.to_string(),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/my_lambda_function:v1.0"
        );
        assert_eq!(
            image.registry(),
            Some("123456789012.dkr.ecr.us-east-1.amazonaws.com")
        );
        assert_eq!(image.name(), "my_lambda_function");
        assert_eq!(image.tag(), "v1.0");
    }

    #[test]
    fn for_function_accepts_bare_host() {
        let image = ImageRef::for_function(
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/",
            &function(),
            &VersionTag::latest(),
        );
        assert_eq!(
            image.to_string(),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/my_lambda_function:latest"
        );
    }

    #[test]
    fn repository_omits_tag() {
        let image = ImageRef::for_function(
            "https://registry.example.com",
            &function(),
            &VersionTag::latest(),
        );
        assert_eq!(image.repository(), "registry.example.com/my_lambda_function");
    }

    #[test]
    fn normalize_registry_variants() {
        assert_eq!(normalize_registry("https://host.example.com"), "host.example.com");
        assert_eq!(normalize_registry("http://host.example.com/"), "host.example.com");
        assert_eq!(normalize_registry("host.example.com"), "host.example.com");
    }
}
