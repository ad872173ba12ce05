/// Words looked up during this session, oldest first.
#[derive(Debug, Default)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Records a lookup unless it repeats the previous one.
    pub fn push(&mut self, word: &str) {
        if self.entries.last().map(String::as_str) != Some(word) {
            self.entries.push(word.to_owned());
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
