//! Template component operations: scanning `{token}` components out of a
//! template string, deleting a random component, and locating fields via
//! the token catalogs.
//!
//! Components are always handled WITH their braces. Because every catalog
//! token is brace-delimited, `{m}` is never a substring of `{mm}`, so
//! plain substring containment is a sound field-location test.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::catalog;
use crate::error::{SynthError, SynthResult};
use crate::types::Field;

/// Scan all `{...}` components out of a template, braces included, in
/// order of appearance. A `{` inside an open component restarts the
/// component, matching lazy left-to-right scanning.
pub fn extract_components(template: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current: Option<String> = None;
    for c in template.chars() {
        match c {
            '{' => current = Some(String::from("{")),
            '}' => {
                if let Some(mut open) = current.take() {
                    open.push('}');
                    components.push(open);
                }
            }
            _ => {
                if let Some(open) = current.as_mut() {
                    open.push(c);
                }
            }
        }
    }
    components
}

/// Remove one uniformly chosen component from the template.
///
/// Returns the new template and the removed component (braces included).
/// Components must be pairwise distinct; the composers guarantee this and
/// a violation here would silently delete two fields at once.
pub fn remove_random_component<R: Rng + ?Sized>(
    template: &str,
    rng: &mut R,
) -> SynthResult<(String, String)> {
    let components = extract_components(template);
    if components.is_empty() {
        return Err(SynthError::EmptyTemplate(template.to_string()));
    }
    for (i, a) in components.iter().enumerate() {
        if components[i + 1..].contains(a) {
            return Err(match component_field(a) {
                Some(field) => SynthError::DuplicateFieldToken {
                    field,
                    template: template.to_string(),
                    token: a.clone(),
                },
                None => SynthError::DuplicateComponent {
                    template: template.to_string(),
                    component: a.clone(),
                },
            });
        }
    }

    let removed = components
        .choose(rng)
        .cloned()
        .unwrap_or_default();
    Ok((template.replace(&removed, ""), removed))
}

/// The field a catalog component belongs to, if any. Structural
/// placeholders such as `{separator}` belong to no field.
pub fn component_field(component: &str) -> Option<Field> {
    for field in catalog::TRACKED_FIELDS {
        if catalog::tokens_for(*field).contains(&component) {
            return Some(*field);
        }
    }
    None
}

/// Map each tracked field to the concrete catalog token present in the
/// template, skipping fields with no token. Two tokens for the same
/// field is an internal consistency violation.
pub fn visible_components(template: &str) -> SynthResult<BTreeMap<Field, &'static str>> {
    let mut visible = BTreeMap::new();
    for field in catalog::TRACKED_FIELDS {
        for token in catalog::tokens_for(*field) {
            if template.contains(token) {
                if visible.insert(*field, *token).is_some() {
                    return Err(SynthError::DuplicateFieldToken {
                        field: *field,
                        template: template.to_string(),
                        token: token.to_string(),
                    });
                }
            }
        }
    }
    Ok(visible)
}

/// Locate the concrete token rendering `field` in the template, if any.
pub fn locate_field(field: Field, template: &str) -> SynthResult<Option<&'static str>> {
    let mut found: Option<&'static str> = None;
    for token in catalog::tokens_for(field) {
        if template.contains(token) {
            if found.is_some() {
                return Err(SynthError::DuplicateFieldToken {
                    field,
                    template: template.to_string(),
                    token: token.to_string(),
                });
            }
            found = Some(token);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn extracts_components_in_order() {
        let template = "{h} {a} {m}:{ss} {zzzz} {d} {M} {yy}";
        assert_eq!(
            extract_components(template),
            vec!["{h}", "{a}", "{m}", "{ss}", "{zzzz}", "{d}", "{M}", "{yy}"]
        );
    }

    #[test]
    fn extracts_parenthesized_custom_tokens() {
        assert_eq!(
            extract_components("{ON(day)}-{X(month)}-{yyyy}"),
            vec!["{ON(day)}", "{X(month)}", "{yyyy}"]
        );
    }

    #[test]
    fn literal_text_between_components_is_ignored() {
        assert_eq!(
            extract_components("{H}h{mm}m and {ss} seconds"),
            vec!["{H}", "{mm}", "{ss}"]
        );
        assert!(extract_components("no components here").is_empty());
    }

    #[test]
    fn removal_drops_exactly_one_component() {
        let template = "{d}.{MM}.{yyyy} {H}:{mm}";
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (reduced, removed) = remove_random_component(template, &mut rng).unwrap();
        assert!(template.contains(&removed));
        assert!(!reduced.contains(&removed));
        assert_eq!(
            extract_components(&reduced).len(),
            extract_components(template).len() - 1
        );
    }

    #[test]
    fn removal_rejects_duplicate_components() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = remove_random_component("{d} {MM} {d}", &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DuplicateFieldToken {
                field: Field::Day,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_non_field_components_name_the_component() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = remove_random_component("{foo} {d} {foo}", &mut rng).unwrap_err();
        match err {
            SynthError::DuplicateComponent { component, .. } => assert_eq!(component, "{foo}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn removal_rejects_empty_template() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = remove_random_component("plain text", &mut rng).unwrap_err();
        assert!(matches!(err, SynthError::EmptyTemplate(_)));
    }

    #[test]
    fn visible_components_maps_fields_to_tokens() {
        let template = "{h}:{mm}:{s} {a} {ZZ} {MMMM}#{EEEE} {ON(day)}#{yyyy}";
        let visible = visible_components(template).unwrap();
        assert_eq!(visible[&Field::Year], "{yyyy}");
        assert_eq!(visible[&Field::Month], "{MMMM}");
        assert_eq!(visible[&Field::Day], "{ON(day)}");
        assert_eq!(visible[&Field::Hour], "{h}");
        assert_eq!(visible[&Field::Minute], "{mm}");
        assert_eq!(visible[&Field::Second], "{s}");
        assert_eq!(visible[&Field::Timezone], "{ZZ}");
        assert_eq!(visible[&Field::Weekday], "{EEEE}");
        assert_eq!(visible[&Field::Period], "{a}");
        assert!(!visible.contains_key(&Field::Microsecond));
    }

    #[test]
    fn visible_components_rejects_duplicate_fields() {
        let err = visible_components("{d} of {MMM} ({MM})").unwrap_err();
        assert!(matches!(
            err,
            SynthError::DuplicateFieldToken {
                field: Field::Month,
                ..
            }
        ));
    }

    #[test]
    fn locate_field_finds_single_token_or_none() {
        let template = "{dd}-{MMM}-{yyyy}";
        assert_eq!(locate_field(Field::Month, template).unwrap(), Some("{MMM}"));
        assert_eq!(locate_field(Field::Hour, template).unwrap(), None);
    }
}
