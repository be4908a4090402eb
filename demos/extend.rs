//! Extends the vocabulary at runtime and turns on typo tolerance.
//! Run with `RUST_LOG=debug` styling in mind: the normalizer emits `tracing`
//! events at its match decision points.

use title_normalizer::Normalizer;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut normalizer = Normalizer::new();
    normalizer.add_mapping("Data Scientist", ["statistics", "pandas"]);
    normalizer.set_allow_typos(true);

    for input in ["statistics expert", "data scietist", "violinist"] {
        match normalizer.normalize(input) {
            Some(title) => println!("{input} -> {title}"),
            None => println!("{input} -> (no match)"),
        }
    }
}
