//! Identifier helpers shared by the emitters.

use convert_case::{Boundary, Case, Casing};

use crate::errors::{GenerateError, Result};

/// Convert a model or type name to PascalCase.
///
/// Hyphenated, snake_cased and camelCased input all produce the same result.
/// Digits stay attached to the word they follow, so `model2d` becomes `Model2d`.
pub fn to_pascal_case(name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(GenerateError::EmptyName);
    }

    let pascal = name
        .remove_boundaries(&Boundary::digits())
        .remove_empty()
        .to_case(Case::Pascal);
    if pascal.is_empty() {
        return Err(GenerateError::EmptyName);
    }
    Ok(pascal)
}

/// Join `prefix` and `name` with a hyphen. An empty prefix leaves `name` unchanged.
pub fn to_prefixed_name(name: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}-{name}"),
        _ => name.to_string(),
    }
}

/// PascalCase of the prefixed name, the stem of every model-derived identifier.
///
/// The model name itself must carry a word; a prefix alone never names a model.
pub fn to_interface_stem(name: &str, prefix: Option<&str>) -> Result<String> {
    to_pascal_case(name)?;
    to_pascal_case(&to_prefixed_name(name, prefix))
}

pub fn starts_with_capital(name: &str) -> Result<bool> {
    let first = name.chars().next().ok_or(GenerateError::EmptyName)?;
    Ok(first.is_uppercase())
}
