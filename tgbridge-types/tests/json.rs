#![cfg(feature = "impl-serde")]

use tgbridge_types::{Chat, ChatType, Message};

#[test]
fn chat_survives_json() {
    let mut chat = Chat::new(-100, ChatType::Supergroup { supergroup_id: 5, is_channel: false }, "devs");
    chat.last_message = Some(Message::text(1, -100, 77, "hello"));
    let json = serde_json::to_string(&chat).unwrap();
    let back: Chat = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chat);
}
