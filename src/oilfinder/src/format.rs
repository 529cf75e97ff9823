//! Display formatting for makes and models

/// Title-case a name word by word.
///
/// Splits on single spaces, upper-cases the first character of each word and
/// lower-cases the rest: `"ALFA ROMEO"` → `"Alfa Romeo"`. Runs of spaces are
/// kept as empty words.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Label for a make suggestion or a make tile
pub fn make_label(make: &str) -> String {
    make.to_uppercase()
}

/// Label for a make+model suggestion: `"Alfa Romeo GIULIA"`
pub fn model_label(make: &str, model: &str) -> String {
    format!("{} {}", title_case(make), model.to_uppercase())
}
