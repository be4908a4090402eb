//! Normalizes a handful of raw job titles against the built-in vocabulary.

use title_normalizer::Normalizer;

fn main() {
    let normalizer = Normalizer::new();
    for input in ["Java engineer", "C# engineer", "Chief Accountant"] {
        match normalizer.normalize(input) {
            Some(title) => println!("{input} -> {title}"),
            None => println!("{input} -> (no match)"),
        }
    }
}
