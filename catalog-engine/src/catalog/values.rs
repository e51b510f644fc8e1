//! Metadata value validation
//!
//! Two checks share this module: parsing the raw value string an admin
//! enters for an assignment, and checking a variation's metadata against
//! the effective schema of its category.

use std::collections::BTreeSet;

use market_shared::models::{MetadataSchema, MetadataShape, VariationMetadata, metadata_value_text};

use super::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy)]
pub struct MetadataFieldValueValidator {
    separator: char,
}

impl Default for MetadataFieldValueValidator {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl MetadataFieldValueValidator {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Parse an assignment's raw value string
    ///
    /// Tokens are trimmed and blank tokens dropped. Fails with
    /// `MetadataValuesRequired` when nothing is left and with
    /// `DuplicateMetadataValue` when two tokens are equal (case-sensitive).
    pub fn validate_assignment_values(
        &self,
        raw: &str,
        field_name: &str,
    ) -> CatalogResult<BTreeSet<String>> {
        let mut values = BTreeSet::new();

        for token in raw.split(self.separator).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            if !values.insert(token.to_string()) {
                return Err(CatalogError::DuplicateMetadataValue {
                    field: field_name.to_string(),
                    value: token.to_string(),
                });
            }
        }

        if values.is_empty() {
            return Err(CatalogError::MetadataValuesRequired {
                field: field_name.to_string(),
            });
        }
        Ok(values)
    }

    /// Check variation metadata against its category's schema and siblings
    ///
    /// Order: non-empty, same field names as every sibling variation that
    /// carries metadata, then each entry against the schema.
    pub fn validate_variation_metadata(
        &self,
        metadata: &VariationMetadata,
        schema: &MetadataSchema,
        sibling_shapes: &[MetadataShape],
    ) -> CatalogResult<()> {
        if metadata.is_empty() {
            return Err(CatalogError::MetadataRequired);
        }

        let shape: MetadataShape = metadata.keys().cloned().collect();
        if let Some(expected) = sibling_shapes
            .iter()
            .filter(|s| !s.is_empty())
            .find(|s| **s != shape)
        {
            return Err(CatalogError::MetadataStructureMismatch {
                expected: expected.clone(),
                actual: shape,
            });
        }

        for (field, value) in metadata {
            let allowed = schema
                .get(field)
                .ok_or_else(|| CatalogError::UnknownMetadataField {
                    field: field.clone(),
                })?;
            let text = metadata_value_text(value);
            if !allowed.contains(&text) {
                return Err(CatalogError::InvalidMetadataValue {
                    field: field.clone(),
                    value: text,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|v| v.to_string()).collect()
    }

    fn metadata(value: serde_json::Value) -> VariationMetadata {
        serde_json::from_value(value).unwrap()
    }

    fn schema() -> MetadataSchema {
        MetadataSchema::from([
            ("Color".to_string(), set(&["Red", "Blue"])),
            ("Size".to_string(), set(&["S", "M", "L"])),
            ("Pack".to_string(), set(&["6", "12"])),
        ])
    }

    #[test]
    fn test_values_are_trimmed_and_blanks_dropped() {
        let validator = MetadataFieldValueValidator::default();
        let values = validator
            .validate_assignment_values(" Red ,, Blue , ", "Color")
            .unwrap();
        assert_eq!(values, set(&["Red", "Blue"]));
    }

    #[test]
    fn test_values_are_case_sensitive() {
        let validator = MetadataFieldValueValidator::default();
        let values = validator
            .validate_assignment_values("Red, red, Blue", "Color")
            .unwrap();
        assert_eq!(values, set(&["Red", "red", "Blue"]));
    }

    #[test]
    fn test_duplicate_after_trim() {
        let validator = MetadataFieldValueValidator::default();
        let err = validator
            .validate_assignment_values("Red, Red", "Color")
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateMetadataValue { ref field, ref value }
                if field == "Color" && value == "Red"
        ));
    }

    #[test]
    fn test_all_blank_requires_values() {
        let validator = MetadataFieldValueValidator::default();
        for raw in ["", "   ", " , ,"] {
            assert!(matches!(
                validator.validate_assignment_values(raw, "Color"),
                Err(CatalogError::MetadataValuesRequired { .. })
            ));
        }
    }

    #[test]
    fn test_rejoined_values_validate_to_same_set() {
        let validator = MetadataFieldValueValidator::default();
        for raw in ["Red, Blue", " a ,b,, c", "XL"] {
            let first = validator.validate_assignment_values(raw, "F").unwrap();
            let joined = first.iter().cloned().collect::<Vec<_>>().join(",");
            let second = validator.validate_assignment_values(&joined, "F").unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_custom_separator() {
        let validator = MetadataFieldValueValidator::new('|');
        let values = validator
            .validate_assignment_values("1,5 kg | 2 kg", "Weight")
            .unwrap();
        assert_eq!(values, set(&["1,5 kg", "2 kg"]));
    }

    #[test]
    fn test_variation_accepts_schema_values() {
        let validator = MetadataFieldValueValidator::default();
        let result = validator.validate_variation_metadata(
            &metadata(json!({"Color": "Red", "Pack": 12})),
            &schema(),
            &[],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_variation_requires_metadata() {
        let validator = MetadataFieldValueValidator::default();
        assert!(matches!(
            validator.validate_variation_metadata(&VariationMetadata::new(), &schema(), &[]),
            Err(CatalogError::MetadataRequired)
        ));
    }

    #[test]
    fn test_variation_unknown_field() {
        let validator = MetadataFieldValueValidator::default();
        assert!(matches!(
            validator.validate_variation_metadata(&metadata(json!({"Weight": "1kg"})), &schema(), &[]),
            Err(CatalogError::UnknownMetadataField { ref field }) if field == "Weight"
        ));
    }

    #[test]
    fn test_variation_invalid_value() {
        let validator = MetadataFieldValueValidator::default();
        assert!(matches!(
            validator.validate_variation_metadata(&metadata(json!({"Color": "red"})), &schema(), &[]),
            Err(CatalogError::InvalidMetadataValue { ref value, .. }) if value == "red"
        ));
        assert!(matches!(
            validator.validate_variation_metadata(&metadata(json!({"Pack": 24})), &schema(), &[]),
            Err(CatalogError::InvalidMetadataValue { ref value, .. }) if value == "24"
        ));
    }

    #[test]
    fn test_variation_shape_must_match_siblings() {
        let validator = MetadataFieldValueValidator::default();
        let siblings = vec![set(&["Color"])];
        assert!(matches!(
            validator.validate_variation_metadata(
                &metadata(json!({"Color": "Red", "Size": "M"})),
                &schema(),
                &siblings
            ),
            Err(CatalogError::MetadataStructureMismatch { .. })
        ));
        // Different values, same names
        assert!(validator
            .validate_variation_metadata(&metadata(json!({"Color": "Blue"})), &schema(), &siblings)
            .is_ok());
    }

    #[test]
    fn test_shape_checked_before_schema() {
        let validator = MetadataFieldValueValidator::default();
        let siblings = vec![set(&["Color"])];
        // "Weight" is unknown too, but the shape mismatch is reported
        assert!(matches!(
            validator.validate_variation_metadata(
                &metadata(json!({"Weight": "1kg"})),
                &schema(),
                &siblings
            ),
            Err(CatalogError::MetadataStructureMismatch { .. })
        ));
    }

    #[test]
    fn test_siblings_without_metadata_are_ignored() {
        let validator = MetadataFieldValueValidator::default();
        let siblings = vec![MetadataShape::new()];
        assert!(validator
            .validate_variation_metadata(&metadata(json!({"Size": "S"})), &schema(), &siblings)
            .is_ok());
    }
}
