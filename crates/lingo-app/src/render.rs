use std::fmt::Write;

use lingo_core::Phase;
use lingo_types::HistoryRecord;

use crate::state::SessionView;

pub fn render_session(view: &SessionView) -> String {
    let state = &view.state;
    let mut out = String::new();

    let _ = writeln!(out, "[{}]", view.pair_label);
    if !state.source_text.is_empty() {
        let _ = writeln!(out, "Text: {}", state.source_text);
    }

    match &state.phase {
        Phase::Idle => {}
        Phase::Loading => {
            let _ = writeln!(out, "Translating...");
        }
        Phase::Result => {}
        Phase::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
    }

    if let Some(result) = &state.result {
        let marker = |text: &str| if state.selection.is_active(text) { '*' } else { ' ' };

        let _ = writeln!(out, "{} 0. {}", marker(&result.main_translation), result.main_translation);
        for (i, alt) in result.alternatives.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} {}. {} ({})",
                marker(&alt.translation),
                i + 1,
                alt.translation,
                alt.context
            );
            if !alt.explanation.is_empty() {
                let _ = writeln!(out, "     {}", alt.explanation);
            }
        }
    }

    if !state.selected_output().is_empty() {
        let _ = writeln!(out, "Output: {}", state.selected_output());
    }

    out
}

pub fn render_history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "No translations yet\n".to_string();
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let result = &record.result;
        let _ = writeln!(
            out,
            "{:>2}. [{} -> {}] {} => {}  ({})",
            i + 1,
            result.source_pair.source,
            result.source_pair.target,
            result.source_text,
            result.main_translation,
            result.timestamp.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn render_languages(languages: &[(String, String)]) -> String {
    let mut out = String::new();
    for (code, name) in languages {
        let _ = writeln!(out, "{code:>4}  {name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lingo_core::{Selection, SessionState};
    use lingo_types::{Alternative, LanguagePair, TranslationResult};

    use super::*;

    fn view(phase: Phase, selected: &str) -> SessionView {
        let result = TranslationResult {
            main_translation: "hello".to_string(),
            alternatives: vec![Alternative::new("hi", "informal", "casual greeting")],
            source_pair: LanguagePair::new("tr", "en"),
            source_text: "merhaba".to_string(),
            timestamp: Utc::now(),
        };
        let mut selection = Selection::default();
        selection.select(selected);

        SessionView {
            state: SessionState {
                source_text: "merhaba".to_string(),
                pair: LanguagePair::new("tr", "en"),
                phase,
                result: Some(result),
                selection,
            },
            pair_label: "Türkçe → English".to_string(),
        }
    }

    #[test]
    fn active_output_is_marked() {
        let out = render_session(&view(Phase::Result, "hi"));
        assert!(out.contains("  0. hello"));
        assert!(out.contains("* 1. hi (informal)"));
        assert!(out.contains("casual greeting"));
        assert!(out.contains("Output: hi"));
    }

    #[test]
    fn error_is_shown_next_to_stale_result() {
        let out = render_session(&view(Phase::Error("Translation failed".to_string()), "hello"));
        assert!(out.contains("Error: Translation failed"));
        assert!(out.contains("* 0. hello"));
    }

    #[test]
    fn empty_history_message() {
        assert_eq!(render_history(&[]), "No translations yet\n");
    }
}
