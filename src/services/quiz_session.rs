//! Quiz session engine.
//!
//! One engine drives one playthrough at a time: it acquires a question set
//! through a [`QuizRepository`], tracks position and score while the player
//! answers, and turns load failures into the `Failed` phase. Every state change
//! is published as a fresh [`QuizSnapshot`] through a `tokio::sync::watch`
//! channel, which also serialises all mutations.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use tokio::{sync::watch, task::JoinHandle};
use validator::Validate;

use crate::{
    errors::{FetchResult, SessionError},
    models::{domain::QuizQuestion, dto::QuestionQuery},
    repositories::QuizRepository,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Loading,
    InProgress,
    Finished,
    Failed,
}

/// What a load intent asks the repository for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadRequest {
    Random(QuestionQuery),
    ById(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_option_index: usize,
    pub score: usize,
    pub finished: bool,
}

/// Immutable view of a session, produced on every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSnapshot {
    questions: Arc<[QuizQuestion]>,
    title: Option<String>,
    current_index: usize,
    score: usize,
    phase: QuizPhase,
    last_error: Option<String>,
}

impl Default for QuizSnapshot {
    fn default() -> Self {
        Self {
            questions: Arc::from(Vec::new()),
            title: None,
            current_index: 0,
            score: 0,
            phase: QuizPhase::Idle,
            last_error: None,
        }
    }
}

impl QuizSnapshot {
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Quiz title, only known when the set was loaded by id.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    /// True once every question has been answered. An empty loaded set counts
    /// as finished straight away.
    pub fn is_finished(&self) -> bool {
        match self.phase {
            QuizPhase::Finished => true,
            QuizPhase::InProgress => self.current_index >= self.total_questions(),
            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QuizPhase::Loading
    }

    /// Integer percentage of correct answers, 0 for an empty set.
    pub fn percentage(&self) -> usize {
        match self.total_questions() {
            0 => 0,
            total => self.score * 100 / total,
        }
    }

    /// Score as `"<score>/<total>"`.
    pub fn result_label(&self) -> String {
        format!("{}/{}", self.score, self.total_questions())
    }

    fn begin_loading(&mut self) {
        self.phase = QuizPhase::Loading;
        self.last_error = None;
    }

    fn apply_loaded(&mut self, questions: Vec<QuizQuestion>, title: Option<String>) {
        self.phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::InProgress
        };
        self.questions = Arc::from(questions);
        self.title = title;
        self.current_index = 0;
        self.score = 0;
        self.last_error = None;
    }

    fn apply_failed(&mut self, message: String) {
        self.questions = Arc::from(Vec::new());
        self.title = None;
        self.current_index = 0;
        self.score = 0;
        self.phase = QuizPhase::Failed;
        self.last_error = Some(message);
    }

    fn apply_answer(&mut self, selected_option_index: usize) -> Result<AnswerOutcome, SessionError> {
        if self.phase != QuizPhase::InProgress {
            return Err(SessionError::NoActiveQuestion);
        }
        let question = self
            .current_question()
            .ok_or(SessionError::NoActiveQuestion)?;

        if selected_option_index >= question.option_count() {
            return Err(SessionError::OptionOutOfRange {
                selected: selected_option_index,
                available: question.option_count(),
            });
        }

        let correct = question.is_correct(selected_option_index);
        let correct_option_index = question.correct_option_index();

        if correct {
            self.score += 1;
        }
        self.current_index += 1;

        let finished = self.current_index >= self.total_questions();
        if finished {
            self.phase = QuizPhase::Finished;
        }

        Ok(AnswerOutcome {
            correct,
            correct_option_index,
            score: self.score,
            finished,
        })
    }

    fn apply_restart(&mut self) -> Result<(), SessionError> {
        match self.phase {
            QuizPhase::InProgress | QuizPhase::Finished => {
                self.current_index = 0;
                self.score = 0;
                self.last_error = None;
                self.phase = if self.questions.is_empty() {
                    QuizPhase::Finished
                } else {
                    QuizPhase::InProgress
                };
                Ok(())
            }
            _ => Err(SessionError::NothingToRestart),
        }
    }
}

struct Loaded {
    questions: Vec<QuizQuestion>,
    title: Option<String>,
}

pub struct QuizSessionEngine {
    repository: Arc<dyn QuizRepository>,
    state: watch::Sender<QuizSnapshot>,
    // Bumped under the watch lock by every load start; a result is applied only
    // while its generation is still current.
    generation: AtomicU64,
    disposed: AtomicBool,
    last_request: Mutex<Option<LoadRequest>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl QuizSessionEngine {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        let (state, _) = watch::channel(QuizSnapshot::default());
        Self {
            repository,
            state,
            generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
            last_request: Mutex::new(None),
            in_flight: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.state.subscribe()
    }

    /// Load a random question set and start a fresh playthrough.
    pub async fn load(&self, query: QuestionQuery) -> Result<(), SessionError> {
        self.run(LoadRequest::Random(query)).await
    }

    /// Load the ordered question set of one quiz.
    pub async fn load_by_id(&self, quiz_id: i64) -> Result<(), SessionError> {
        self.run(LoadRequest::ById(quiz_id)).await
    }

    /// Repeat the most recent load intent.
    pub async fn retry(&self) -> Result<(), SessionError> {
        let request = self.previous_request()?;
        self.run(request).await
    }

    /// Like [`load`](Self::load) but runs on a tokio task and aborts any load
    /// still in flight. Must be called from within a tokio runtime.
    pub fn spawn_load(self: &Arc<Self>, query: QuestionQuery) -> Result<(), SessionError> {
        self.spawn_request(LoadRequest::Random(query))
    }

    pub fn spawn_load_by_id(self: &Arc<Self>, quiz_id: i64) -> Result<(), SessionError> {
        self.spawn_request(LoadRequest::ById(quiz_id))
    }

    pub fn spawn_retry(self: &Arc<Self>) -> Result<(), SessionError> {
        let request = self.previous_request()?;
        self.spawn_request(request)
    }

    pub fn answer(&self, selected_option_index: usize) -> Result<AnswerOutcome, SessionError> {
        self.ensure_active()?;

        let mut outcome = Err(SessionError::NoActiveQuestion);
        self.state.send_if_modified(|snapshot| {
            outcome = snapshot.apply_answer(selected_option_index);
            outcome.is_ok()
        });

        match &outcome {
            Ok(result) => log::debug!(
                "Answered option {} ({}), score {}{}",
                selected_option_index,
                if result.correct { "correct" } else { "wrong" },
                result.score,
                if result.finished { ", quiz finished" } else { "" }
            ),
            Err(err) => log::warn!("Rejected answer {}: {}", selected_option_index, err),
        }
        outcome
    }

    /// Replay the current question set from the start without re-fetching.
    pub fn restart(&self) -> Result<(), SessionError> {
        self.ensure_active()?;

        let mut outcome = Err(SessionError::NothingToRestart);
        self.state.send_if_modified(|snapshot| {
            outcome = snapshot.apply_restart();
            outcome.is_ok()
        });

        if outcome.is_ok() {
            log::debug!("Quiz restarted");
        }
        outcome
    }

    /// Tear the session down. Any load still running is cancelled and its
    /// result, should it arrive, is dropped without touching the state.
    pub fn shutdown(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.lock_in_flight().take() {
            handle.abort();
        }
        log::debug!("Quiz session shut down");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    async fn run(&self, request: LoadRequest) -> Result<(), SessionError> {
        let generation = self.start(&request)?;
        let result = self.fetch(&request).await;
        self.finish(generation, result);
        Ok(())
    }

    fn spawn_request(self: &Arc<Self>, request: LoadRequest) -> Result<(), SessionError> {
        let generation = self.start(&request)?;

        let engine = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = engine.fetch(&request).await;
            engine.finish(generation, result);
        });

        if let Some(previous) = self.lock_in_flight().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    /// Validate the request and enter `Loading`, returning the new generation.
    fn start(&self, request: &LoadRequest) -> Result<u64, SessionError> {
        self.ensure_active()?;

        if let LoadRequest::Random(query) = request {
            query
                .validate()
                .map_err(|e| SessionError::InvalidQuery(e.to_string()))?;
        }

        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            snapshot.begin_loading();
        });

        log::debug!("Load {} started: {:?}", generation, request);
        Ok(generation)
    }

    async fn fetch(&self, request: &LoadRequest) -> FetchResult<Loaded> {
        match request {
            LoadRequest::Random(query) => {
                let questions = self.repository.fetch_random(query).await?;
                Ok(Loaded {
                    questions,
                    title: None,
                })
            }
            LoadRequest::ById(quiz_id) => {
                let quiz = self.repository.fetch_by_quiz_id(*quiz_id).await?;
                Ok(Loaded {
                    questions: quiz.questions,
                    title: Some(quiz.title),
                })
            }
        }
    }

    fn finish(&self, generation: u64, result: FetchResult<Loaded>) {
        let applied = self.state.send_if_modified(|snapshot| {
            if self.is_disposed() || self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(loaded) => snapshot.apply_loaded(loaded.questions, loaded.title),
                Err(err) => snapshot.apply_failed(err.message().to_string()),
            }
            true
        });

        if applied {
            let snapshot = self.state.borrow();
            match snapshot.last_error() {
                Some(message) => log::warn!("Load {} failed: {}", generation, message),
                None => log::debug!(
                    "Load {} finished with {} questions",
                    generation,
                    snapshot.total_questions()
                ),
            }
        } else {
            log::info!("Discarded result of superseded load {}", generation);
        }
    }

    fn previous_request(&self) -> Result<LoadRequest, SessionError> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SessionError::NothingToRetry)
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.is_disposed() {
            Err(SessionError::Disposed)
        } else {
            Ok(())
        }
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for QuizSessionEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
