//! Command-line summary of the notes store.
//!
//! # Responsibility
//! - Open the device store (argument path, or `BLOCO_NOTAS_DB_PATH`, or the
//!   default) and print a statistics summary.
//! - Exit non-zero when the store cannot be opened.

use bloco_notas_core::{
    core_version, init_logging_from_config, EngineConfig, NotesEngine, Statistics,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut config = EngineConfig::from_env();
    if let Some(path) = std::env::args().nth(1) {
        config.db_path = PathBuf::from(path);
    }

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let engine = match NotesEngine::open(&config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("cannot open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let stats = engine.stats();
    println!("bloco_notas_core version={}", core_version());
    println!("store={}", config.db_path.display());
    for line in summary_lines(&stats, engine.preferences().is_dark_mode()) {
        println!("{line}");
    }

    ExitCode::SUCCESS
}

fn summary_lines(stats: &Statistics, dark_mode: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "notes={} chars={} dark_mode={dark_mode}",
        stats.total_notes, stats.total_chars
    )];
    lines.extend(
        stats
            .category_stats
            .iter()
            .map(|entry| format!("  {:<14} {}", entry.category.label(), entry.count)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::summary_lines;
    use bloco_notas_core::{stats, Note};
    use chrono::Utc;

    #[test]
    fn summary_prints_raw_note_count() {
        let now = Utc::now();
        let notes = [
            Note::new(1, "a", "abc", "📝 Pessoal", now),
            Note::new(2, "b", "de", "💼 Trabalho", now),
            Note::new(3, "c", "f", "📝 Pessoal", now),
        ];
        let lines = summary_lines(&stats(&notes), true);

        assert_eq!(lines[0], "notes=3 chars=6 dark_mode=true");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("📝 Pessoal") && lines[1].ends_with(" 2"));
    }
}
