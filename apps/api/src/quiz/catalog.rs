//! Built-in quizzes that can be played without a generation call.

use serde::Serialize;

use crate::quiz::models::{Difficulty, GeneratedQuiz, QuizOption, QuizQuestion};

pub const JS_BASICS_ID: &str = "js-basics";

/// Catalog listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub questions: usize,
    pub difficulty: String,
    pub time: String,
}

pub fn list_catalog() -> Vec<CatalogEntry> {
    [js_basics()]
        .into_iter()
        .map(|quiz| CatalogEntry {
            questions: quiz.questions.len(),
            id: quiz.id,
            title: quiz.title,
            difficulty: quiz.difficulty,
            time: quiz.time,
        })
        .collect()
}

pub fn find_catalog_quiz(id: &str) -> Option<GeneratedQuiz> {
    match id {
        JS_BASICS_ID => Some(js_basics()),
        _ => None,
    }
}

fn js_basics() -> GeneratedQuiz {
    GeneratedQuiz::new(
        JS_BASICS_ID,
        "JavaScript Basics",
        Difficulty::Beginner,
        vec![
            question(
                1,
                "Which of the following is a valid JavaScript variable declaration?",
                &["variable x = 5;", "let x = 5;", "x := 5;", "int x = 5;"],
                1,
                "In JavaScript, variables can be declared using 'let', 'const', or 'var'. \
                 'let x = 5;' declares a variable holding 5.",
            ),
            question(
                2,
                "What will be the output of: console.log(typeof []);",
                &["array", "object", "list", "undefined"],
                1,
                "Arrays are objects in JavaScript, so 'typeof []' returns 'object'.",
            ),
            question(
                3,
                "Which method is used to add an element to the end of an array?",
                &["append()", "push()", "add()", "insertLast()"],
                1,
                "push() appends one or more elements and returns the new length of the array.",
            ),
            question(
                4,
                "What is the result of '2' + 2 in JavaScript?",
                &["4", "22", "Error", "'22'"],
                1,
                "With a string operand, + converts the number to a string and concatenates, \
                 giving the string '22'.",
            ),
            question(
                5,
                "Which of these is NOT a JavaScript data type?",
                &["Boolean", "Undefined", "Float", "Symbol"],
                2,
                "JavaScript has no distinct 'Float' type; all numbers are of type Number.",
            ),
        ],
    )
}

/// Builds a question with options lettered a, b, c, ...
fn question(
    id: u32,
    text: &str,
    options: &[&str],
    correct: usize,
    explanation: &str,
) -> QuizQuestion {
    QuizQuestion {
        id,
        text: text.to_string(),
        options: options
            .iter()
            .zip('a'..)
            .enumerate()
            .map(|(i, (option, letter))| QuizOption {
                id: letter.to_string(),
                text: option.to_string(),
                is_correct: i == correct,
            })
            .collect(),
        explanation: explanation.to_string(),
    }
}
