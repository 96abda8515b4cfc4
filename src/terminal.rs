//! Line-based terminal front end: turns stdin lines into commands and
//! prints the events a session emits.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::quiz::{Command, QuizEvent, OPTIONS_PER_QUESTION};

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("terminal io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let command = match line.trim().to_lowercase().as_str() {
        "a" | "1" => Command::Select(0),
        "b" | "2" => Command::Select(1),
        "c" | "3" => Command::Select(2),
        "d" | "4" => Command::Select(3),
        "s" | "skip" | "next" => Command::Skip,
        "r" | "restart" => Command::Restart,
        "q" | "quit" => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Command(command))
}

/// Forwards parsed input lines until quit, end of input, or the runner
/// going away.
pub async fn read_commands<R: AsyncBufRead + Unpin>(
    reader: R,
    commands: mpsc::Sender<Command>,
) -> Result<(), TerminalError> {
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Some(Input::Command(command)) => {
                if commands.send(command).await.is_err() {
                    break;
                }
            }
            Some(Input::Quit) => break,
            None if line.trim().is_empty() => {}
            None => {
                log::warn!("Unrecognised input {:?}", line);
                eprintln!("Unknown command. Use a-d to answer, s to skip, r to restart, q to quit.");
            }
        }
    }
    Ok(())
}

/// Renders events as text. Remembers the options of the question on screen
/// so a resolution can name the correct one.
#[derive(Default)]
pub struct Renderer {
    options: Option<[String; OPTIONS_PER_QUESTION]>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<W: Write>(&mut self, event: &QuizEvent, out: &mut W) -> std::io::Result<()> {
        match event {
            QuizEvent::QuestionShown {
                index,
                text,
                options,
                time_remaining,
                ..
            } => {
                writeln!(out)?;
                writeln!(out, "{}. {}", index + 1, text)?;
                for option in options {
                    writeln!(out, "  {}", option)?;
                }
                writeln!(out, "Time left: {}s", time_remaining)?;
                self.options = Some(options.clone());
            }
            QuizEvent::Tick { time_remaining } => {
                writeln!(out, "Time left: {}s", time_remaining)?;
            }
            QuizEvent::AnswerResolved {
                selected,
                correct_index,
                was_correct,
                score,
            } => {
                let correct = self
                    .options
                    .as_ref()
                    .and_then(|options| options.get(*correct_index))
                    .map(String::as_str)
                    .unwrap_or("?");
                match (selected, *was_correct) {
                    (_, true) => writeln!(out, "Correct!")?,
                    (Some(_), false) => writeln!(out, "Wrong! Correct answer: {}", correct)?,
                    (None, false) => writeln!(out, "Time's up! Correct answer: {}", correct)?,
                }
                writeln!(out, "Score: {}", score)?;
            }
            QuizEvent::SessionEnded { score, total } => {
                writeln!(out)?;
                writeln!(out, "Your final score is: {} / {}", score, total)?;
                writeln!(out, "Press r to play again or q to quit.")?;
                self.options = None;
            }
        }
        out.flush()
    }
}

/// Renders every event until the session's sender is dropped.
pub async fn render_events<W: Write>(
    mut events: mpsc::UnboundedReceiver<QuizEvent>,
    mut out: W,
) -> Result<(), TerminalError> {
    let mut renderer = Renderer::new();
    while let Some(event) = events.recv().await {
        log::trace!("event {}", serde_json::to_string(&event)?);
        renderer.render(&event, &mut out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown() -> QuizEvent {
        QuizEvent::QuestionShown {
            index: 2,
            total: 5,
            text: "Pick B".to_string(),
            options: [
                "A) no".to_string(),
                "B) yes".to_string(),
                "C) no".to_string(),
                "D) no".to_string(),
            ],
            time_remaining: 10,
        }
    }

    fn render_all(events: &[QuizEvent]) -> String {
        let mut renderer = Renderer::new();
        let mut out = Vec::new();
        for event in events {
            renderer.render(event, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_answers_and_controls() {
        assert_eq!(parse_input("a"), Some(Input::Command(Command::Select(0))));
        assert_eq!(parse_input(" D \n"), Some(Input::Command(Command::Select(3))));
        assert_eq!(parse_input("3"), Some(Input::Command(Command::Select(2))));
        assert_eq!(parse_input("next"), Some(Input::Command(Command::Skip)));
        assert_eq!(parse_input("R"), Some(Input::Command(Command::Restart)));
        assert_eq!(parse_input("quit"), Some(Input::Quit));
        assert_eq!(parse_input("e"), None);
        assert_eq!(parse_input("5"), None);
    }

    #[test]
    fn renders_question_and_countdown() {
        let text = render_all(&[shown(), QuizEvent::Tick { time_remaining: 9 }]);
        assert!(text.contains("3. Pick B"));
        assert!(text.contains("  B) yes"));
        assert!(text.contains("Time left: 10s"));
        assert!(text.contains("Time left: 9s"));
    }

    #[test]
    fn renders_each_resolution_kind() {
        let resolved = |selected, was_correct| QuizEvent::AnswerResolved {
            selected,
            correct_index: 1,
            was_correct,
            score: 0,
        };
        let text = render_all(&[
            shown(),
            resolved(Some(1), true),
            resolved(Some(0), false),
            resolved(None, false),
        ]);
        assert!(text.contains("Correct!"));
        assert!(text.contains("Wrong! Correct answer: B) yes"));
        assert!(text.contains("Time's up! Correct answer: B) yes"));
    }

    #[test]
    fn renders_final_score() {
        let text = render_all(&[QuizEvent::SessionEnded { score: 4, total: 5 }]);
        assert!(text.contains("Your final score is: 4 / 5"));
    }

    #[tokio::test]
    async fn forwards_commands_until_quit() {
        let input: &[u8] = b"a\nbogus\n\ns\nq\nr\n";
        let (tx, mut rx) = mpsc::channel(8);
        read_commands(input, tx).await.unwrap();

        assert_eq!(rx.recv().await, Some(Command::Select(0)));
        assert_eq!(rx.recv().await, Some(Command::Skip));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn render_events_stops_when_sender_drops() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(QuizEvent::SessionEnded { score: 0, total: 5 }).unwrap();
        drop(tx);
        let mut out = Vec::new();
        render_events(rx, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("0 / 5"));
    }
}
