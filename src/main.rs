use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use timed_quiz::config::Config;
use timed_quiz::quiz::{runner, QuestionBank, QuizSession};
use timed_quiz::terminal;

type MainResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult {
    dotenv().ok();
    pretty_env_logger::init();

    let config = Config::from_env()?;
    let bank = match &config.questions_file {
        Some(path) => QuestionBank::from_path(path)?,
        None => QuestionBank::load(),
    };
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Java Quiz: {} questions, {}s each.", bank.len(), config.session.countdown_secs);
    println!("Answer with a-d, s to skip, r to restart, q to quit.");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (command_tx, command_rx) = mpsc::channel(16);

    let session = QuizSession::new(bank, config.session, rng, event_tx);
    let renderer = tokio::spawn(terminal::render_events(event_rx, std::io::stdout()));
    let runner = tokio::spawn(runner::run(session, command_rx));

    terminal::read_commands(BufReader::new(tokio::io::stdin()), command_tx).await?;

    // The session owns the event sender; dropping it lets the renderer drain and stop.
    let session = runner.await?;
    drop(session);
    renderer.await??;

    log::info!("Bye!");
    Ok(())
}
