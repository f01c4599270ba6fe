//! Property-based tests for naming derivation
//! **Covers: derived variants are views of one word list and re-deriving
//! from `fileName` is stable**

use proptest::prelude::*;

use codeforge_generation::naming::{create_context_from_name, NamingOptions};
use codeforge_generation::templates::TemplateContext;

/// Strategy for lower-case words
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

/// Strategy for base names: words joined by mixed separators or camelCase
fn base_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((word_strategy(), 0..4usize), 1..5).prop_map(|parts| {
        let mut name = String::new();
        for (i, (word, separator)) in parts.into_iter().enumerate() {
            if i == 0 {
                name.push_str(&word);
                continue;
            }
            match separator {
                0 => name.push('-'),
                1 => name.push('_'),
                2 => name.push(' '),
                _ => {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        name.extend(first.to_uppercase());
                        name.push_str(chars.as_str());
                    }
                    continue;
                }
            }
            name.push_str(&word);
        }
        name
    })
}

fn variants(ctx: &TemplateContext) -> [String; 4] {
    ["className", "fileName", "propertyName", "constantName"]
        .map(|key| ctx.get_str(key).unwrap_or_default().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

proptest! {
    /// Property: deriving from a previous fileName reproduces all variants
    #[test]
    fn prop_rederiving_from_file_name_is_stable(name in base_name_strategy()) {
        let options = NamingOptions::default();
        let first = create_context_from_name(&name, &options).unwrap();
        let file_name = first.get_str("fileName").unwrap().to_string();
        let second = create_context_from_name(&file_name, &options).unwrap();

        prop_assert_eq!(variants(&first), variants(&second));
    }

    /// Property: every variant is a casing of the fileName word list
    #[test]
    fn prop_variants_share_one_word_list(name in base_name_strategy()) {
        let ctx = create_context_from_name(&name, &NamingOptions::default()).unwrap();
        let file_name = ctx.get_str("fileName").unwrap();
        let words: Vec<&str> = file_name.split('-').collect();

        prop_assert!(words.iter().all(|w| !w.is_empty()));
        prop_assert_eq!(
            ctx.get_str("className").unwrap(),
            words.iter().map(|w| capitalize(w)).collect::<String>()
        );
        let property: String = words[0].to_string()
            + &words[1..].iter().map(|w| capitalize(w)).collect::<String>();
        prop_assert_eq!(ctx.get_str("propertyName").unwrap(), property);
        prop_assert_eq!(
            ctx.get_str("constantName").unwrap(),
            words.join("_").to_uppercase()
        );
    }

    /// Property: package and project names are built from fileName
    #[test]
    fn prop_package_names_follow_file_name(
        name in base_name_strategy(),
        scope in "@[a-z]{1,8}",
        library_type in "[a-z]{1,6}(-[a-z]{1,6})?",
    ) {
        let options = NamingOptions::default()
            .with_scope(scope.clone())
            .with_library_type(library_type.clone());
        let ctx = create_context_from_name(&name, &options).unwrap();
        let file_name = ctx.get_str("fileName").unwrap();

        prop_assert_eq!(ctx.get_str("packageName").unwrap(), format!("{scope}/{file_name}"));
        prop_assert_eq!(
            ctx.get_str("projectName").unwrap(),
            format!("{library_type}-{file_name}")
        );
        prop_assert_eq!(ctx.get_str("name").unwrap(), name.as_str());
    }

    /// Property: names without letters or digits are rejected
    #[test]
    fn prop_symbol_only_names_are_rejected(name in "[-_ .]{0,8}") {
        prop_assert!(create_context_from_name(&name, &NamingOptions::default()).is_err());
    }
}

#[test]
fn test_user_profile_variants() {
    let ctx = create_context_from_name("user-profile", &NamingOptions::default()).unwrap();
    assert_eq!(
        variants(&ctx),
        ["UserProfile", "user-profile", "userProfile", "USER_PROFILE"]
    );
}
