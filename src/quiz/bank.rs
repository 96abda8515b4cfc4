use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::quiz::{OptionLabel, Question};

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question bank is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// The built-in reference bank, in canonical order.
    pub fn load() -> Self {
        Self {
            questions: vec![
                item(
                    "Which keyword is used to create a subclass in Java?",
                    ["A) implements", "B) extends", "C) inherits", "D) override"],
                    OptionLabel::B,
                ),
                item(
                    "What is the output of: System.out.println(10 + 20 + \"Java\")?",
                    ["A) 30Java", "B) Java1020", "C) Java30", "D) 1020Java"],
                    OptionLabel::A,
                ),
                item(
                    "Which of these is a valid way to create an object in Java?",
                    [
                        "A) MyClass obj = new MyClass();",
                        "B) obj = new MyClass();",
                        "C) class obj = MyClass();",
                        "D) new MyClass obj();",
                    ],
                    OptionLabel::A,
                ),
                item(
                    "What is the output of: System.out.println(10 > 5 ? 'Yes' : 'No');",
                    ["A) Yes", "B) No", "C) true", "D) false"],
                    OptionLabel::A,
                ),
                item(
                    "What will be the output of: System.out.println(\"Java\".charAt(2));",
                    ["A) a", "B) v", "C) J", "D) Exception"],
                    OptionLabel::B,
                ),
            ],
        }
    }

    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Reads a JSON array of questions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BankError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path)?;
        let bank = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} questions from {}",
            bank.len(),
            path.display()
        );
        Ok(bank)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        shuffle(&self.questions, rng)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::load()
    }
}

/// Returns a uniformly random permutation of `questions` (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    let mut shuffled = questions.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

fn item(text: &str, options: [&str; 4], correct: OptionLabel) -> Question {
    Question::new(text.to_string(), options.map(str::to_string), correct)
}
