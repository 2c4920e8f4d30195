use serde::{Deserialize, Serialize};

/// Body of `sendMessage`.
#[derive(Serialize, Debug)]
pub struct SendMessageRequest<'a> {
    #[serde(rename = "chat_id")]
    pub chat_id: &'a str,

    #[serde(rename = "text")]
    pub text: &'a str,

    #[serde(rename = "parse_mode")]
    pub parse_mode: &'a str,
}

/// Envelope every Bot API method answers with.
#[derive(Deserialize, Debug)]
pub struct TelegramResponse {
    #[serde(rename = "ok")]
    pub ok: bool,

    #[serde(rename = "description")]
    pub description: Option<String>,
}
