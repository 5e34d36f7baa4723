//! Identifier casing and collision-free class names.
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

// Dart words that cannot name a member.
const RESERVED: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

/// Convert a JSON key to a Dart identifier: `UpperCamel` for types, `lowerCamel` for members.
pub fn to_identifier(raw: &str, pascal: bool) -> String {
    let cased = if pascal { raw.to_upper_camel_case() } else { raw.to_lower_camel_case() };
    let ident = NON_IDENT.replace_all(&cased, "").into_owned();
    match ident.chars().next() {
        None if pascal => "Value".to_string(),
        None => "value".to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}{ident}", if pascal { 'N' } else { 'n' }),
        Some(_) if !pascal && RESERVED.contains(&ident.as_str()) => format!("{ident}_"),
        Some(_) => ident,
    }
}

/// File stem for a generated class, e.g. `UserProfile` -> `user_profile`.
pub fn file_stem(class_name: &str) -> String {
    class_name.to_snake_case()
}

// dart:core types the generated classes use; a class with one of these names would hide it.
const CORE_TYPES: &[&str] = &[
    "Map", "List", "String", "Object", "Null", "Function", "Type", "Iterable",
];

// Names every generated class already defines or takes as a parameter.
const TEMPLATE_MEMBERS: &[&str] = &["json", "fromJson", "toJson", "copyWith", "fromList"];

/// Hands out identifiers that are unique within one scope: class names for a
/// whole run, or member names within one class.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    pascal: bool,
    reserved: &'static [&'static str],
    used: IndexSet<String>,
}

impl Default for NameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameAllocator {
    /// Class-name scope, with the core types already taken.
    pub fn new() -> Self {
        Self::with_reserved(true, CORE_TYPES)
    }

    /// Member-name scope for one class.
    pub fn for_members() -> Self {
        Self::with_reserved(false, TEMPLATE_MEMBERS)
    }

    fn with_reserved(pascal: bool, reserved: &'static [&'static str]) -> Self {
        let used = reserved.iter().map(|s| s.to_string()).collect();
        Self { pascal, reserved, used }
    }

    /// Reserve the cased form of `raw_key`, suffixing `1`, `2`, … until it is free.
    pub fn allocate(&mut self, raw_key: &str) -> String {
        let base = to_identifier(raw_key, self.pascal);
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut i = 1usize;
        loop {
            let candidate = format!("{base}{i}");
            if self.used.insert(candidate.clone()) {
                tracing::debug!(key = raw_key, name = %candidate, "name collision suffixed");
                return candidate;
            }
            i += 1;
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Allocated names in order, without the reserved ones.
    pub fn allocated(&self) -> impl Iterator<Item = &str> {
        self.used.iter().skip(self.reserved.len()).map(String::as_str)
    }

    /// Back to the initial reserved set.
    pub fn reset(&mut self) {
        self.used.truncate(self.reserved.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing() {
        assert_eq!(to_identifier("user_name", false), "userName");
        assert_eq!(to_identifier("user-name", true), "UserName");
        assert_eq!(to_identifier("first name", true), "FirstName");
        assert_eq!(to_identifier("ID", false), "id");
    }

    #[test]
    fn awkward_keys_still_yield_identifiers() {
        assert_eq!(to_identifier("", false), "value");
        assert_eq!(to_identifier("$$", true), "Value");
        assert_eq!(to_identifier("2fa", false), "n2fa");
        assert_eq!(to_identifier("3d_model", true), "N3dModel");
        assert_eq!(to_identifier("class", false), "class_");
        assert_eq!(to_identifier("class", true), "Class");
    }

    #[test]
    fn collisions_get_smallest_free_suffix() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("item"), "Item");
        assert_eq!(names.allocate("item"), "Item1");
        assert_eq!(names.allocate("Item"), "Item2");
        // a literal "Item3" key takes the next slot away from the suffix search
        assert_eq!(names.allocate("item3"), "Item3");
        assert_eq!(names.allocate("item"), "Item4");
        assert_eq!(
            names.allocated().collect::<Vec<_>>(),
            ["Item", "Item1", "Item2", "Item3", "Item4"]
        );
    }

    #[test]
    fn reset_forgets_names() {
        let mut names = NameAllocator::new();
        names.allocate("user");
        assert!(names.is_used("User"));
        names.reset();
        assert!(!names.is_used("User"));
        assert_eq!(names.allocate("user"), "User");
    }

    #[test]
    fn core_types_are_never_class_names() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("map"), "Map1");
        assert_eq!(names.allocate("list"), "List1");
        assert_eq!(names.allocate("string"), "String1");
        assert_eq!(names.allocate("object"), "Object1");
        names.reset();
        assert!(names.is_used("Map"));
        assert!(!names.is_used("Map1"));
        assert_eq!(names.allocate("map"), "Map1");
    }

    #[test]
    fn member_scope() {
        let mut members = NameAllocator::for_members();
        assert_eq!(members.allocate("user_name"), "userName");
        assert_eq!(members.allocate("userName"), "userName1");
        assert_eq!(members.allocate("json"), "json1");
        assert_eq!(members.allocate("to_json"), "toJson1");
        assert_eq!(members.allocate("class"), "class_");
        assert_eq!(members.allocated().collect::<Vec<_>>(), ["userName", "userName1", "json1", "toJson1", "class_"]);
    }

    #[test]
    fn snake_file_stem() {
        assert_eq!(file_stem("UserProfile1"), "user_profile1");
    }
}
