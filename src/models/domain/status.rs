/// Review status of a question, e.g. "approved".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub status_id: i32,
    pub text: String,
}
