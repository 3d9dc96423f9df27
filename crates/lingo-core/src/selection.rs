use lingo_types::TranslationResult;

/// The output currently shown, copied and used by swaps.
///
/// Any string is accepted by [`Selection::select`]; membership in the
/// result's outputs is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: String,
}

impl Selection {
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Default selection for a newly arrived result
    pub fn seed(&mut self, result: &TranslationResult) {
        self.active = result.main_translation.clone();
    }

    pub fn select(&mut self, text: impl Into<String>) {
        self.active = text.into();
    }

    /// Index 0 is the main translation, `n` is the n-th alternative
    pub fn select_index(&mut self, result: &TranslationResult, index: usize) -> Option<&str> {
        let output = result.outputs().nth(index)?;
        self.active = output.to_string();
        Some(&self.active)
    }

    pub fn is_active(&self, candidate: &str) -> bool {
        self.active == candidate
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
