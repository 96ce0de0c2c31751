use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain acknowledgement body, e.g. `{"msg": "Post removed"}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub msg: String,
}

impl Ack {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
