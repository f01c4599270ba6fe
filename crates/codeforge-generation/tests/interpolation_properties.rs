//! Property-based tests for `{variable}` interpolation
//! **Covers: complete contexts leave no tokens, missing variables always
//! fail, deep interpolation preserves shape**

use proptest::prelude::*;
use serde_json::{json, Value};

use codeforge_generation::templates::{
    extract_variables, has_interpolation, interpolate, interpolate_deep, TemplateContext,
};

/// Strategy for variable names
fn variable_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

/// Strategy for literal text between tokens (never contains braces)
fn literal_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .;:=()<>-]{0,12}"
}

/// Strategy for substituted values (never contains braces)
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{0,10}"
}

/// A template made of literals and tokens, plus a context defining every token
fn template_with_context() -> impl Strategy<Value = (String, TemplateContext)> {
    prop::collection::vec(
        (literal_strategy(), variable_name_strategy(), value_strategy()),
        0..6,
    )
    .prop_map(|parts| {
        let mut template = String::new();
        let mut context = TemplateContext::new();
        for (literal, name, value) in parts {
            template.push_str(&literal);
            template.push('{');
            template.push_str(&name);
            template.push('}');
            context.insert(name, value);
        }
        (template, context)
    })
}

/// JSON values whose string leaves only use `{known}` tokens
fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        literal_strategy().prop_map(Value::String),
        literal_strategy().prop_map(|s| Value::String(format!("{s}{{known}}"))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z{}]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn same_shape(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(_), Value::String(_)) => true,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| same_shape(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((kl, vl), (kr, vr))| kl == kr && same_shape(vl, vr))
        }
        (l, r) => l == r,
    }
}

proptest! {
    /// Property: interpolating with a complete context leaves no tokens
    #[test]
    fn prop_complete_context_leaves_no_tokens((template, context) in template_with_context()) {
        let result = interpolate(&template, &context);
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert!(!has_interpolation(&result));
        prop_assert!(extract_variables(&result).is_empty());
    }

    /// Property: a template without tokens comes back unchanged
    #[test]
    fn prop_no_tokens_is_identity(text in literal_strategy()) {
        prop_assert_eq!(interpolate(&text, &TemplateContext::new()).unwrap(), text);
    }

    /// Property: any undefined variable fails, naming the first one missing
    #[test]
    fn prop_missing_variable_always_fails(
        (template, context) in template_with_context(),
        missing in "zzmissing_[a-z0-9]{1,6}",
        suffix in literal_strategy(),
    ) {
        let template = format!("{template}{{{missing}}}{suffix}");
        let err = interpolate(&template, &context).unwrap_err();
        prop_assert_eq!(err.variable, missing);
    }

    /// Property: extracted variables are unique and in first-occurrence order
    #[test]
    fn prop_extract_variables_dedupes((template, _context) in template_with_context()) {
        let doubled = format!("{template}{template}");
        let variables = extract_variables(&doubled);
        prop_assert_eq!(&variables, &extract_variables(&template));

        let mut seen = std::collections::HashSet::new();
        for variable in &variables {
            prop_assert!(seen.insert(variable.clone()));
        }
    }

    /// Property: deep interpolation keeps keys, non-string leaves and shape
    #[test]
    fn prop_interpolate_deep_preserves_shape(value in json_strategy(), known in value_strategy()) {
        let context = TemplateContext::new().with("known", known);
        let result = interpolate_deep(&value, &context).unwrap();
        prop_assert!(same_shape(&value, &result));
    }
}

#[test]
fn test_extract_variables_example() {
    assert_eq!(extract_variables("{a}{a}{b}"), vec!["a", "b"]);
}
