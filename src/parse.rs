//! Variant-line parsing: `VariantName : Type1 field1, Type2 field2, …`
//!
//! The grammar is deliberately strict. The generated output is compiled
//! downstream, so a mis-sliced token must fail the run here rather than
//! surface later as a rustc error inside a generated file.

use indexmap::IndexSet;
use thiserror::Error;

use crate::config::RawHierarchy;
use crate::model::{FieldSpec, GeneratorConfig, HierarchySpec, VariantSpec};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedSpecError {
    #[error("variant line `{line}` has no `:` separating the name from its field list")]
    MissingColon { line: String },

    #[error("variant line `{line}` must start with a single non-empty name token")]
    BadVariantName { line: String },

    #[error("field entry `{entry}` in variant line `{line}` must be exactly `Type name`")]
    BadFieldEntry { line: String, entry: String },

    #[error("hierarchy base name `{base}` must be a single non-empty token")]
    BadBaseName { base: String },

    #[error("hierarchy `{base}` declares variant `{name}` more than once")]
    DuplicateVariant { base: String, name: String },

    #[error("variant `{variant}` declares field `{field}` more than once")]
    DuplicateField { variant: String, field: String },
}

/// Parse one DSL line into a [`VariantSpec`].
///
/// Accepted shape: `WS* name WS* ':' WS* field (',' WS* field)* WS*` with
/// `field := type WS+ name`. A line whose portion after the colon is blank
/// defines a marker variant with zero fields (`Break :`). The colon is
/// never optional.
pub fn parse_variant_line(line: &str) -> Result<VariantSpec, MalformedSpecError> {
    let (name, field_src) = line.split_once(':').ok_or_else(|| {
        MalformedSpecError::MissingColon { line: line.to_string() }
    })?;

    let name = name.trim();
    if name.is_empty() || name.split_whitespace().count() != 1 {
        return Err(MalformedSpecError::BadVariantName { line: line.to_string() });
    }

    let mut fields = Vec::new();
    if !field_src.trim().is_empty() {
        for entry in field_src.split(',') {
            let mut tokens = entry.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(type_name), Some(field_name), None) => fields.push(FieldSpec {
                    type_name: type_name.to_string(),
                    field_name: field_name.to_string(),
                }),
                _ => {
                    return Err(MalformedSpecError::BadFieldEntry {
                        line: line.to_string(),
                        entry: entry.trim().to_string(),
                    });
                }
            }
        }
    }

    // Duplicate fields would generate a struct that rustc rejects.
    let mut seen = IndexSet::new();
    for field in &fields {
        if !seen.insert(field.field_name.as_str()) {
            return Err(MalformedSpecError::DuplicateField {
                variant: name.to_string(),
                field: field.field_name.clone(),
            });
        }
    }

    Ok(VariantSpec { name: name.to_string(), fields })
}

/// Parse every variant line of one raw hierarchy, checking variant-name
/// uniqueness. Order of the input lines is preserved.
pub fn resolve_hierarchy(raw: &RawHierarchy) -> Result<HierarchySpec, MalformedSpecError> {
    let base = raw.base.trim();
    if base.is_empty() || base.split_whitespace().count() != 1 {
        return Err(MalformedSpecError::BadBaseName { base: raw.base.clone() });
    }

    let mut names = IndexSet::new();
    let mut variants = Vec::with_capacity(raw.variants.len());
    for line in &raw.variants {
        let variant = parse_variant_line(line)?;
        if !names.insert(variant.name.clone()) {
            return Err(MalformedSpecError::DuplicateVariant {
                base: base.to_string(),
                name: variant.name,
            });
        }
        variants.push(variant);
    }

    Ok(HierarchySpec {
        base_name: base.to_string(),
        uses: raw.uses.clone(),
        variants,
    })
}

/// Resolve the whole table up front. A bad line anywhere fails the run
/// before a single file is written.
pub fn resolve(raws: &[RawHierarchy]) -> Result<GeneratorConfig, MalformedSpecError> {
    let hierarchies = raws
        .iter()
        .map(resolve_hierarchy)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GeneratorConfig { hierarchies })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fielded_line_parses_in_order() {
        let v = parse_variant_line("Binary : Expr left, Token operator, Expr right").unwrap();
        assert_eq!(v.name, "Binary");
        let pairs: Vec<(&str, &str)> = v
            .fields
            .iter()
            .map(|f| (f.type_name.as_str(), f.field_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Expr", "left"), ("Token", "operator"), ("Expr", "right")]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        let tight = parse_variant_line("Unary:Token operator,Expr right").unwrap();
        let loose = parse_variant_line("  Unary  :   Token   operator ,  Expr   right  ").unwrap();
        assert_eq!(tight, loose);
    }

    #[test]
    fn marker_variant_has_zero_fields() {
        let v = parse_variant_line("Break :").unwrap();
        assert_eq!(v.name, "Break");
        assert!(v.fields.is_empty());
    }

    #[test]
    fn missing_colon_is_rejected() {
        let err = parse_variant_line("Break").unwrap_err();
        assert!(matches!(err, MalformedSpecError::MissingColon { .. }));
    }

    #[test]
    fn missing_comma_is_rejected() {
        // four tokens in one entry, the classic dropped-comma typo
        let err = parse_variant_line("Binary : Expr left Expr right").unwrap_err();
        assert!(matches!(err, MalformedSpecError::BadFieldEntry { .. }));
    }

    #[test]
    fn lone_type_token_is_rejected() {
        let err = parse_variant_line("Unary : Expr").unwrap_err();
        assert!(matches!(err, MalformedSpecError::BadFieldEntry { .. }));
    }

    #[test]
    fn multi_token_variant_name_is_rejected() {
        let err = parse_variant_line("Bin ary : Expr left, Expr right").unwrap_err();
        assert!(matches!(err, MalformedSpecError::BadVariantName { .. }));
    }

    #[test]
    fn duplicate_field_name_is_rejected() {
        let err = parse_variant_line("Binary : Expr left, Token left").unwrap_err();
        assert_eq!(
            err,
            MalformedSpecError::DuplicateField {
                variant: "Binary".to_string(),
                field: "left".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_variant_name_is_rejected() {
        let raw = RawHierarchy {
            base: "Expr".to_string(),
            uses: Vec::new(),
            variants: vec![
                "Literal : Object value".to_string(),
                "Literal : Object other".to_string(),
            ],
        };
        let err = resolve_hierarchy(&raw).unwrap_err();
        assert_eq!(
            err,
            MalformedSpecError::DuplicateVariant {
                base: "Expr".to_string(),
                name: "Literal".to_string(),
            }
        );
    }

    #[test]
    fn generic_type_tokens_pass_through_verbatim() {
        let v = parse_variant_line("Block : Vec<Stmt> statements").unwrap();
        assert_eq!(v.fields[0].type_name, "Vec<Stmt>");
        assert_eq!(v.fields[0].field_name, "statements");
    }

    #[test]
    fn bad_base_name_is_rejected() {
        let raw = RawHierarchy {
            base: "  ".to_string(),
            uses: Vec::new(),
            variants: Vec::new(),
        };
        let err = resolve_hierarchy(&raw).unwrap_err();
        assert!(matches!(err, MalformedSpecError::BadBaseName { .. }));
    }
}
