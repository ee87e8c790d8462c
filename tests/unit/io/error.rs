//! Tests for error types including parent attribution and message formatting

#[cfg(test)]
mod tests {
    use kinmorph::io::error::{file_system_error, invalid_parameter};
    use kinmorph::{KinError, Parent};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/mesh.json", "read JSON", io_error);

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read JSON"));
        assert!(error.to_string().contains("/tmp/mesh.json"));
    }

    // Tests per-parent errors name the parent
    // Verified by formatting the parent with its debug name
    #[test]
    fn test_parent_attribution() {
        let error = KinError::NoFaceDetected { parent: Parent::B };
        assert_eq!(error.parent(), Some(Parent::B));
        assert!(error.to_string().contains("parent B"));

        let error = KinError::DecodeFailure {
            parent: Parent::A,
            reason: "truncated".to_string(),
        };
        assert_eq!(error.parent(), Some(Parent::A));
        assert!(error.to_string().contains("parent A"));
        assert!(error.to_string().contains("truncated"));
        assert!(error.source().is_none());
    }

    // Tests incomplete landmark counts appear in the message
    // Verified by swapping found and required
    #[test]
    fn test_incomplete_landmarks_message() {
        let error = KinError::IncompleteLandmarks {
            parent: Parent::A,
            required: 455,
            found: 68,
        };
        assert_eq!(
            error.to_string(),
            "Incomplete landmarks for parent A: 68 found, 455 required"
        );
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("alpha", &1.5, &"must lie in [0, 1]");

        let message = error.to_string();
        assert!(message.contains("alpha"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must lie in [0, 1]"));
        assert_eq!(error.parent(), None);
    }

    // Tests parse errors chain to the JSON error
    // Verified by dropping the parse source
    #[test]
    fn test_config_parse_source() {
        let source = serde_json::from_str::<u32>("oops").unwrap_err();
        let error = KinError::ConfigParse {
            path: "genetics.json".into(),
            source,
        };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("genetics.json"));
    }

    // Tests parents serialize as lowercase tags
    // Verified by removing the rename attribute
    #[test]
    fn test_parent_json() {
        assert_eq!(serde_json::to_string(&Parent::A).unwrap(), "\"a\"");
        assert_eq!(Parent::B.to_string(), "parent B");
    }
}
