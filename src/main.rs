use std::{env, sync::Arc};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use quiz_client::{
    app_state::AppState,
    config::Config,
    errors::FetchResult,
    models::dto::QuestionQuery,
    repositories::{EntityRepository, QuizRepository},
    services::{QuizPhase, QuizSessionEngine, QuizSnapshot},
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            std::process::exit(2);
        }
    };

    print_catalogue(&state).await;

    let engine = state.quiz_engine();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    start_quiz(&engine, &state.config).await;
    loop {
        let snapshot = engine.snapshot();
        let keep_going = match snapshot.phase() {
            QuizPhase::InProgress => ask_current(&engine, &snapshot, &mut input).await?,
            QuizPhase::Finished => offer_restart(&engine, &snapshot, &mut input).await?,
            QuizPhase::Failed => offer_retry(&engine, &snapshot, &mut input).await?,
            // start_quiz awaits the load, so only a rejected start lands here
            QuizPhase::Idle | QuizPhase::Loading => false,
        };
        if !keep_going {
            break;
        }
    }

    engine.shutdown();
    Ok(())
}

async fn print_catalogue(state: &AppState) {
    let (categories, topics) = futures::join!(
        state.quiz_repository.list_categories(),
        state.topics.get_all()
    );

    let topics: FetchResult<Vec<String>> = topics.map(|topics| topics.into_iter().map(|t| t.topic).collect());
    for line in [
        catalogue_line("Categories", categories),
        catalogue_line("Topics", topics),
    ]
    .into_iter()
    .flatten()
    {
        println!("{}", line);
    }
}

/// `None` for an empty list or a failed fetch; failures are logged.
fn catalogue_line(label: &str, names: FetchResult<Vec<String>>) -> Option<String> {
    match names {
        Ok(names) if !names.is_empty() => Some(format!("{}: {}", label, names.join(", "))),
        Ok(_) => None,
        Err(err) => {
            log::warn!("{} unavailable: {}", label, err);
            None
        }
    }
}

async fn start_quiz(engine: &QuizSessionEngine, config: &Config) {
    let result = match env::var("QUIZ_ID").ok().and_then(|id| id.parse().ok()) {
        Some(quiz_id) => engine.load_by_id(quiz_id).await,
        None => {
            let mut query = QuestionQuery::new(config.default_question_count);
            query.category = config.default_category.clone();
            query.difficulty = config.default_difficulty.clone();
            engine.load(query).await
        }
    };

    if let Err(err) = result {
        log::error!("Could not start quiz: {}", err);
    }
}

async fn ask_current(
    engine: &Arc<QuizSessionEngine>,
    snapshot: &QuizSnapshot,
    input: &mut Input,
) -> std::io::Result<bool> {
    let Some(question) = snapshot.current_question() else {
        return Ok(true);
    };

    println!();
    println!(
        "[{}/{}] {} ({}, {})",
        snapshot.current_index() + 1,
        snapshot.total_questions(),
        question.prompt_text(),
        question.category(),
        question.difficulty_label()
    );
    for (index, option) in question.answer_options().iter().enumerate() {
        println!("  {}) {}", index + 1, option);
    }

    let Some(line) = input.next_line().await? else {
        return Ok(false);
    };
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(false);
    }

    let selected = match line.parse::<usize>() {
        Ok(number) if number >= 1 => number - 1,
        _ => {
            println!("Enter an option number, or q to quit.");
            return Ok(true);
        }
    };

    match engine.answer(selected) {
        Ok(outcome) if outcome.correct => println!("Correct!"),
        Ok(_) => println!("Wrong, the answer was: {}", question.correct_option()),
        Err(err) => println!("{}", err),
    }
    Ok(true)
}

async fn offer_restart(
    engine: &Arc<QuizSessionEngine>,
    snapshot: &QuizSnapshot,
    input: &mut Input,
) -> std::io::Result<bool> {
    println!();
    if snapshot.total_questions() == 0 {
        println!("No questions available.");
    }
    if let Some(title) = snapshot.title() {
        println!("{}", title);
    }
    println!(
        "Score: {} ({}%)",
        snapshot.result_label(),
        snapshot.percentage()
    );
    println!("r) restart  n) new questions  q) quit");

    match input.next_line().await?.as_deref().map(str::trim) {
        Some("r") => {
            if let Err(err) = engine.restart() {
                println!("{}", err);
            }
            Ok(true)
        }
        Some("n") => {
            if let Err(err) = engine.spawn_retry() {
                println!("{}", err);
            }
            let mut rx = engine.subscribe();
            let _ = rx.wait_for(|s| !s.is_loading()).await;
            Ok(true)
        }
        Some("q") | None => Ok(false),
        Some(_) => Ok(true),
    }
}

async fn offer_retry(
    engine: &Arc<QuizSessionEngine>,
    snapshot: &QuizSnapshot,
    input: &mut Input,
) -> std::io::Result<bool> {
    println!();
    println!(
        "Error: {}",
        snapshot.last_error().unwrap_or("An unknown error occurred")
    );
    println!("r) retry  q) quit");

    match input.next_line().await?.as_deref().map(str::trim) {
        Some("r") => {
            if let Err(err) = engine.retry().await {
                println!("{}", err);
            }
            Ok(true)
        }
        Some("q") | None => Ok(false),
        Some(_) => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use quiz_client::errors::FetchError;

    use super::*;

    #[test]
    fn catalogue_line_joins_names() {
        let line = catalogue_line("Topics", Ok(vec!["Mathematics".into(), "Geography".into()]));

        assert_eq!(line.as_deref(), Some("Topics: Mathematics, Geography"));
    }

    #[test]
    fn catalogue_line_skips_empty_and_failed_lists() {
        assert_eq!(catalogue_line("Categories", Ok(Vec::new())), None);
        assert_eq!(
            catalogue_line("Topics", Err(FetchError::new("Failed to load topics"))),
            None
        );
    }
}
