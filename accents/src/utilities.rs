use std::io::{self, Write};

pub fn input(prompt: &str) -> io::Result<String> {
    let mut line = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str = str.trim().to_lowercase();
    match &str[..] {
        "s" | "si" | "sí" | "y" | "yes" | "true" | "on" => Some(true),
        "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Picks the option the user typed, tolerating small typos. Returns `None`
/// when the input is too far from every option or equally close to several.
pub fn match_option<'a>(typed: &str, options: &'a [String]) -> Option<&'a str> {
    let typed = typed.trim().to_lowercase();
    if let Some(option) = options.iter().find(|option| option.to_lowercase() == typed) {
        return Some(option.as_str());
    }
    let mut scored = options
        .iter()
        .map(|option| (option, strsim::jaro(&option.to_lowercase(), &typed)))
        .collect::<Vec<(&String, f64)>>();
    // most similar at the start
    scored.sort_unstable_by(|(_, a), (_, b)| b.total_cmp(a));
    let (best, similarity) = *scored.first()?;
    let runner_up = scored.get(1).map_or(0.0, |(_, similarity)| *similarity);
    if similarity > 0.9 && similarity - runner_up > 0.25 {
        return Some(best.as_str());
    }
    None
}
