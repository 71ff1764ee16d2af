#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub topic_id: i32,
    pub topic: String,
}
