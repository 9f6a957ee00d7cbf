use serde::{Deserialize, Serialize};

use crate::config::BLANK_PLACEHOLDER;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Blank {
    #[serde(alias = "line")]
    pub line_index: usize, // línea del código que contiene el hueco
    #[serde(alias = "answer")]
    pub expected_answer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: Vec<String>,
    pub blanks: Vec<Blank>,
    /// Texto que revela la pista "Show Solution".
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub topic_description: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    /// Bloque de declaraciones que se aplica a la bola al acertar.
    #[serde(alias = "expected_css")]
    pub expected_declaration: String,
}

/// Trozos de una línea de código, para pintar el hueco en su sitio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLine<'a> {
    Text(&'a str),
    Blank {
        before: &'a str,
        after: &'a str,
        line_index: usize,
    },
}

impl Level {
    pub fn blank_on_line(&self, line_index: usize) -> Option<&Blank> {
        self.blanks.iter().find(|b| b.line_index == line_index)
    }

    /// Parte cada línea en texto fijo y hueco. Si una línea tiene varios
    /// marcadores, el texto entre ellos forma parte de la respuesta.
    pub fn code_lines(&self) -> Vec<CodeLine<'_>> {
        self.code
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                match (self.blank_on_line(idx), line.find(BLANK_PLACEHOLDER)) {
                    (Some(_), Some(start)) => {
                        let end = line
                            .rfind(BLANK_PLACEHOLDER)
                            .map(|i| i + BLANK_PLACEHOLDER.len())
                            .unwrap_or(start + BLANK_PLACEHOLDER.len());
                        CodeLine::Blank {
                            before: &line[..start],
                            after: &line[end..],
                            line_index: idx,
                        }
                    }
                    _ => CodeLine::Text(line),
                }
            })
            .collect()
    }

    /// Código con las respuestas esperadas ya escritas.
    pub fn solved_code(&self) -> String {
        self.code_lines()
            .iter()
            .map(|line| match line {
                CodeLine::Text(text) => text.to_string(),
                CodeLine::Blank {
                    before,
                    after,
                    line_index,
                } => {
                    let answer = self
                        .blank_on_line(*line_index)
                        .map(|b| b.expected_answer.as_str())
                        .unwrap_or_default();
                    format!("{before}{answer}{after}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Playing,
    Completed,
    LoadError,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(code: &[&str], blanks: &[(usize, &str)]) -> Level {
        Level {
            id: 1,
            title: "t".into(),
            description: String::new(),
            code: code.iter().map(|s| s.to_string()).collect(),
            blanks: blanks
                .iter()
                .map(|(line, answer)| Blank {
                    line_index: *line,
                    expected_answer: answer.to_string(),
                })
                .collect(),
            solution: String::new(),
            keyword: None,
            topic_description: None,
            question: None,
            expected_declaration: "transform: scale(2);".into(),
        }
    }

    #[test]
    fn code_lines_split_around_placeholder() {
        let lvl = level(&[".ball {", "  transform: _____;", "}"], &[(1, "scale(2)")]);
        let lines = lvl.code_lines();
        assert_eq!(lines[0], CodeLine::Text(".ball {"));
        assert_eq!(
            lines[1],
            CodeLine::Blank {
                before: "  transform: ",
                after: ";",
                line_index: 1
            }
        );
    }

    #[test]
    fn several_placeholders_share_one_input() {
        let lvl = level(
            &[".ball {", "  transition: _____, _____;", "}"],
            &[(1, "transform 2s, opacity 1s")],
        );
        assert_eq!(
            lvl.solved_code(),
            ".ball {\n  transition: transform 2s, opacity 1s;\n}"
        );
    }
}
