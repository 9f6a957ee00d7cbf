// src/validator.rs

use std::collections::BTreeMap;

use crate::model::Level;

/// Respuestas del usuario: línea del hueco -> texto escrito.
pub type Submissions = BTreeMap<usize, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelVerdict {
    pub all_correct: bool,
    pub per_blank: BTreeMap<usize, bool>,
}

impl LevelVerdict {
    pub fn correct_count(&self) -> usize {
        self.per_blank.values().filter(|ok| **ok).count()
    }
}

/// Canonicaliza un valor CSS para compararlo sin importar mayúsculas,
/// espacios ni los `;` finales.
pub fn normalize_value(value: &str) -> String {
    let lowered = value.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        match c {
            ' ' if out.ends_with(['(', ')', ',']) => continue,
            '(' | ')' | ',' => {
                if out.ends_with(' ') {
                    out.pop();
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    // `;` y espacios finales se quitan juntos
    out.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
        .trim_start()
        .to_string()
}

pub fn validate_blank(user_value: &str, expected_answer: &str) -> bool {
    normalize_value(user_value) == normalize_value(expected_answer)
}

/// Comprueba todos los huecos del nivel (sin cortocircuito, la UI necesita
/// el resultado de cada uno). Un hueco sin respuesta cuenta como cadena vacía.
pub fn validate_level(level: &Level, submissions: &Submissions) -> LevelVerdict {
    let per_blank: BTreeMap<usize, bool> = level
        .blanks
        .iter()
        .map(|blank| {
            let raw = submissions
                .get(&blank.line_index)
                .map(String::as_str)
                .unwrap_or("");
            (blank.line_index, validate_blank(raw, &blank.expected_answer))
        })
        .collect();

    LevelVerdict {
        all_correct: per_blank.values().all(|ok| *ok),
        per_blank,
    }
}
