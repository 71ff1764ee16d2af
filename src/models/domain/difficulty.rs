#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pub difficulty_id: i32,
    pub mode: String, // EASY, MEDIUM, HARD
}
