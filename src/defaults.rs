//! The built-in canonical-title vocabulary.

/// Default canonical titles and their synonyms, union-merged into every index
/// at build time. Plain data so index tests can swap it out.
pub(crate) const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &["java", "c#", "python", "developer", "programmer", "coder"],
    ),
    ("Architect", &["designer"]),
    ("Accountant", &["financial", "bookkeeper"]),
    ("Quantity Surveyor", &["construction"]),
];
