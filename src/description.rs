use crate::model::Level;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionParts {
    /// Primera frase resaltada (sólo en el primer nivel).
    pub highlight: Option<String>,
    pub body: String,
    pub question: Option<String>,
}

pub fn format_description(level: &Level) -> DescriptionParts {
    let question = level
        .question
        .as_ref()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    if level.id != 1 {
        return DescriptionParts {
            highlight: None,
            body: level.description.clone(),
            question,
        };
    }

    let text = level.description.as_str();
    let split_at = text
        .find(['.', '!', '?'])
        .map(|i| i + 1)
        .unwrap_or(text.len());
    let first = text[..split_at].trim();

    DescriptionParts {
        highlight: (!first.is_empty()).then(|| first.to_string()),
        body: text[split_at..].trim().to_string(),
        question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Blank;

    fn level(id: u32, description: &str, question: Option<&str>) -> Level {
        Level {
            id,
            title: format!("Level {id}"),
            description: description.into(),
            code: vec!["  transform: _____;".into()],
            blanks: vec![Blank {
                line_index: 0,
                expected_answer: "scale(2)".into(),
            }],
            solution: "scale(2)".into(),
            keyword: None,
            topic_description: None,
            question: question.map(str::to_string),
            expected_declaration: "transform: scale(2);".into(),
        }
    }

    #[test]
    fn first_level_highlights_first_sentence() {
        let parts = format_description(&level(
            1,
            "Welcome to Animation Arcade! In this level, you'll learn transforms.",
            Some("Can you move the ball?"),
        ));
        assert_eq!(parts.highlight.as_deref(), Some("Welcome to Animation Arcade!"));
        assert_eq!(parts.body, "In this level, you'll learn transforms.");
        assert_eq!(parts.question.as_deref(), Some("Can you move the ball?"));
    }

    #[test]
    fn sentence_without_terminator_is_all_highlight() {
        let parts = format_description(&level(1, "Just one line", None));
        assert_eq!(parts.highlight.as_deref(), Some("Just one line"));
        assert!(parts.body.is_empty());
        assert_eq!(parts.question, None);
    }

    #[test]
    fn other_levels_are_plain() {
        let parts = format_description(&level(3, "Scale things. Really.", Some("  ")));
        assert_eq!(parts.highlight, None);
        assert_eq!(parts.body, "Scale things. Really.");
        assert_eq!(parts.question, None);
    }
}
