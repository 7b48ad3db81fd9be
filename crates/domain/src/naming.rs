use std::collections::HashMap;

/// Tracks how often each base filename has been handed out during one run.
#[derive(Debug, Clone, Default)]
pub struct FilenameRegistry {
    counts: HashMap<String, u32>,
}

impl FilenameRegistry {
    /// Returns `base` the first time it is claimed, then `base (2)`, `base (3)`, ...
    pub fn claim(&mut self, base: &str) -> String {
        let count = self
            .counts
            .entry(base.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);

        if *count == 1 {
            base.to_string()
        } else {
            format!("{base} ({count})")
        }
    }

    #[cfg(test)]
    fn occurrences(&self, base: &str) -> u32 {
        self.counts.get(base).copied().unwrap_or_default()
    }
}
