use super::{Difficulty, Question, QuestionCategory};

fn question(
    id: &str,
    prompt: &str,
    options: &[&str],
    correct_option: usize,
    category: QuestionCategory,
    difficulty: Difficulty,
) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_option,
        category,
        difficulty,
    }
}

/// The fixed ten-question sheet every assessment attempt answers.
pub(super) fn standard_questions() -> Vec<Question> {
    vec![
        question(
            "1",
            "What is the correct basic structure of an HTML document?",
            &[
                "<html><head></head><body></body></html>",
                "<html><body><head></head></body></html>",
                "<head><body><html></html></body></head>",
                "<body><html><head></head></html></body>",
            ],
            0,
            QuestionCategory::Html,
            Difficulty::Easy,
        ),
        question(
            "2",
            "Which CSS property changes an element's background color?",
            &["color", "background-color", "bgcolor", "background"],
            1,
            QuestionCategory::Css,
            Difficulty::Easy,
        ),
        question(
            "3",
            "What is a correct way to declare a variable in modern JavaScript (ES6+)?",
            &[
                "var myVariable = \"value\";",
                "let myVariable = \"value\";",
                "const myVariable = \"value\";",
                "All of the above are valid",
            ],
            3,
            QuestionCategory::Javascript,
            Difficulty::Medium,
        ),
        question(
            "4",
            "Which HTML tag creates a hyperlink?",
            &["<link>", "<a>", "<href>", "<url>"],
            1,
            QuestionCategory::Html,
            Difficulty::Easy,
        ),
        question(
            "5",
            "What is the main difference between \"let\" and \"const\" in JavaScript?",
            &[
                "There is no difference",
                "let is for numbers, const for text",
                "const cannot be reassigned after declaration",
                "let only works inside functions",
            ],
            2,
            QuestionCategory::Javascript,
            Difficulty::Medium,
        ),
        question(
            "6",
            "What does CSS stand for?",
            &[
                "Computer Style Sheets",
                "Creative Style Sheets",
                "Cascading Style Sheets",
                "Colorful Style Sheets",
            ],
            2,
            QuestionCategory::Css,
            Difficulty::Easy,
        ),
        question(
            "7",
            "Which is a correct way to select an element by its ID in JavaScript?",
            &[
                "document.getElementById(\"myId\")",
                "document.getElement(\"myId\")",
                "document.querySelector(\"#myId\")",
                "Both A and C are correct",
            ],
            3,
            QuestionCategory::Javascript,
            Difficulty::Medium,
        ),
        question(
            "8",
            "Which CSS property is commonly used to make an element responsive?",
            &["responsive", "media-query", "max-width", "flex"],
            2,
            QuestionCategory::Css,
            Difficulty::Medium,
        ),
        question(
            "9",
            "Which HTML tag marks the most important heading?",
            &["<header>", "<h1>", "<head>", "<title>"],
            1,
            QuestionCategory::Html,
            Difficulty::Easy,
        ),
        question(
            "10",
            "What is an arrow function in JavaScript?",
            &[
                "A function that points upward",
                "A shorter syntax for writing functions: () => {}",
                "A function that only works with arrays",
                "A special function for events",
            ],
            1,
            QuestionCategory::Javascript,
            Difficulty::Hard,
        ),
    ]
}
