//! Tests for genetics configuration loading and validation

#[cfg(test)]
mod tests {
    use kinmorph::KinError;
    use kinmorph::genetics::config::GeneticsConfig;
    use kinmorph::genetics::sampling::LambdaSpec;
    use kinmorph::genetics::tables::HeritabilityTable;
    use std::io::Write;
    use std::path::Path;

    // Tests the built-in configuration passes validation
    // Verified by setting a default probability above one
    #[test]
    fn test_defaults_validate() {
        let config = GeneticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.version, "2024.1");
    }

    // Tests partial documents keep defaults for omitted tables
    // Verified by removing serde defaults from the config struct
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_partial_document() {
        let json = r#"{ "version": "lab-7", "heritability": { "face_width": 0.9 } }"#;
        let config = GeneticsConfig::from_json_str(json, Path::new("inline.json")).unwrap();

        assert_eq!(config.version, "lab-7");
        assert_eq!(config.heritability.get("face_width"), 0.9);
        assert!(!config.heritability.contains("jaw_width"));
        assert_eq!(config.mendelian, GeneticsConfig::default().mendelian);
        assert_eq!(config.blending, GeneticsConfig::default().blending);
    }

    // Tests nested blending overrides only replace the named field
    // Verified by dropping the serde default on blending parameters
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_nested_override() {
        let json = r#"{ "blending": { "skin_noise_scale": 1.5 } }"#;
        let config = GeneticsConfig::from_json_str(json, Path::new("inline.json")).unwrap();
        assert_eq!(config.blending.skin_noise_scale, 1.5);
        assert_eq!(config.blending.polygenic_noise_scale, 0.15);
    }

    // Tests heritability above one is rejected
    // Verified by skipping heritability validation
    #[test]
    fn test_rejects_heritability_out_of_range() {
        let config = GeneticsConfig {
            heritability: HeritabilityTable::new([("nose_width".to_string(), 1.2)]),
            ..GeneticsConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert!(matches!(
            error,
            KinError::InvalidParameter { parameter: "heritability", ref value, .. }
                if value.contains("nose_width")
        ));
    }

    // Tests inverted lambda bounds are rejected
    // Verified by clamping with min and max swapped
    #[test]
    fn test_rejects_inverted_lambda() {
        let mut config = GeneticsConfig::default();
        config.blending.skin_lambda = LambdaSpec::new(0.5, 0.1, 0.8, 0.2);
        assert!(matches!(
            config.validate(),
            Err(KinError::InvalidParameter {
                parameter: "blending.skin_lambda",
                ..
            })
        ));

        config.blending.skin_lambda = LambdaSpec::new(0.5, -0.1, 0.2, 0.8);
        assert!(config.validate().is_err());
    }

    // Tests a Mendelian entry that rises as dominant parents drop is rejected
    // Verified by checking only the unit interval
    #[test]
    fn test_rejects_non_monotonic_mendelian() {
        let json = r#"{ "mendelian": { "dimple": { "both_dominant": 0.1, "one_dominant": 0.5, "both_recessive": 0.9 } } }"#;
        let result = GeneticsConfig::from_json_str(json, Path::new("genetics.json"));
        assert!(matches!(
            result,
            Err(KinError::InvalidParameter { parameter: "mendelian", ref value, .. })
                if value == "dimple"
        ));
    }

    // Tests negative noise and out-of-range probabilities are rejected
    // Verified by accepting any finite value
    #[test]
    fn test_rejects_bad_scalars() {
        let mut config = GeneticsConfig::default();
        config.blending.polygenic_noise_scale = -0.1;
        assert!(config.validate().is_err());

        let mut config = GeneticsConfig::default();
        config.blending.narrow_nose_probability = 1.5;
        assert!(config.validate().is_err());

        let json = r#"{ "mendelian": { "dimple": { "both_dominant": 2.0, "one_dominant": 0.5, "both_recessive": 0.1 } } }"#;
        assert!(GeneticsConfig::from_json_str(json, Path::new("inline.json")).is_err());
    }

    // Tests malformed JSON reports a parse error with its origin
    // Verified by mapping parse errors to InvalidParameter
    #[test]
    fn test_parse_error() {
        let result = GeneticsConfig::from_json_str("{ not json", Path::new("broken.json"));
        assert!(matches!(
            result,
            Err(KinError::ConfigParse { ref path, .. }) if path == Path::new("broken.json")
        ));
    }

    // Tests loading from disk and reporting missing files
    // Verified by reading from the working directory instead
    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "version": "disk" }}"#).unwrap();
        let config = GeneticsConfig::from_path(file.path()).unwrap();
        assert_eq!(config.version, "disk");

        let missing = GeneticsConfig::from_path("/nonexistent/genetics.json");
        assert!(matches!(missing, Err(KinError::FileSystem { .. })));
    }

    // Tests a serialized default configuration loads back unchanged
    // Verified by renaming a field on serialization only
    #[test]
    fn test_serialized_defaults_reload() {
        let json = serde_json::to_string(&GeneticsConfig::default()).unwrap();
        let config = GeneticsConfig::from_json_str(&json, Path::new("defaults.json")).unwrap();
        assert_eq!(config, GeneticsConfig::default());
    }
}
