//! Table naming conventions

/// Convert `TestModel` into `test_model`
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Words whose plural does not follow the suffix rules
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Words that are the same in singular and plural
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "series",
    "sheep",
    "species",
];

/// Simple pluralization (English-centric)
///
/// Only the last `_`-separated word is inflected, so `blog_person` becomes
/// `blog_people`.
pub fn pluralize(name: &str) -> String {
    let (prefix, word) = match name.rfind('_') {
        Some(pos) => name.split_at(pos + 1),
        None => ("", name),
    };

    if UNCOUNTABLE.contains(&word) {
        return name.to_string();
    }
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(singular, _)| *singular == word) {
        return format!("{}{}", prefix, plural);
    }

    let vowel_y = ["ay", "ey", "iy", "oy", "uy"];
    if name.ends_with('y') && !vowel_y.iter().any(|suffix| name.ends_with(suffix)) {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s')
        || name.ends_with("sh")
        || name.ends_with("ch")
        || name.ends_with('x')
        || name.ends_with('z')
    {
        format!("{}es", name)
    } else {
        format!("{}s", name)
    }
}

/// Default table name for a model type name: snake case, last word plural
pub fn table_name_for(model_name: &str) -> String {
    pluralize(&to_snake_case(model_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("TestModel"), "test_model");
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
    }

    #[test]
    fn test_pluralize_irregular_words() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("blog_person"), "blog_people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("human"), "humans");
    }

    #[test]
    fn test_table_name_for() {
        assert_eq!(table_name_for("TestModel"), "test_models");
        assert_eq!(table_name_for("BlogCategory"), "blog_categories");
        assert_eq!(table_name_for("Person"), "people");
    }
}
