//! Integration tests for Client image handling
//!
//! These tests verify that the Client preserves ImageBlock instances
//! throughout the message lifecycle: validated URLs, data URIs, and detail
//! levels must all survive storage in history.

use menu_scout::{
    AgentOptions, Client, ContentBlock, ImageBlock, ImageDetail, Message, MessageRole, TextBlock,
};

fn test_client() -> Client {
    let options = AgentOptions::builder()
        .model("test-model")
        .base_url("http://localhost:11434/v1")
        .build()
        .expect("Valid options");
    Client::new(options).expect("Valid client")
}

#[test]
fn test_client_preserves_http_image_url() {
    let mut client = test_client();

    let image_url = "https://example.com/menu.jpg";
    let image = ImageBlock::from_url(image_url).expect("Valid HTTPS URL");
    let msg = Message::new(
        MessageRole::User,
        vec![
            ContentBlock::Text(TextBlock::new("Here's a competitor menu:")),
            ContentBlock::Image(image),
        ],
    );
    client.history_mut().push(msg);

    let stored_msg = &client.history()[0];
    assert_eq!(stored_msg.content.len(), 2, "Should have 2 content blocks");

    match &stored_msg.content[1] {
        ContentBlock::Image(img) => {
            assert_eq!(img.url(), image_url, "Image URL should be preserved");
            assert_eq!(
                img.detail(),
                ImageDetail::Auto,
                "Default detail should be Auto"
            );
        }
        _ => panic!("Expected Image content block"),
    }
}

#[test]
fn test_client_preserves_base64_data_uri() {
    let mut client = test_client();

    let base64_data = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";
    let image = ImageBlock::from_base64(base64_data, "image/png").expect("Valid base64");
    let msg = Message::new(MessageRole::User, vec![ContentBlock::Image(image)]);
    client.history_mut().push(msg);

    let stored_msg = &client.history()[0];
    assert_eq!(stored_msg.content.len(), 1, "Should have 1 content block");

    match &stored_msg.content[0] {
        ContentBlock::Image(img) => {
            let url = img.url();
            assert!(
                url.starts_with("data:image/png;base64,"),
                "Base64 image should use data URI format, got: {}",
                url
            );
            assert!(
                url.contains(base64_data),
                "Should contain original base64 data"
            );
        }
        _ => panic!("Expected Image content block"),
    }
}

#[test]
fn test_client_preserves_image_detail_level() {
    let mut client = test_client();

    let test_cases = vec![
        (ImageDetail::Low, "Low detail"),
        (ImageDetail::High, "High detail"),
        (ImageDetail::Auto, "Auto detail"),
    ];

    for (detail, _description) in &test_cases {
        let image = ImageBlock::from_url("https://example.com/menu.jpg")
            .expect("Valid URL")
            .with_detail(*detail);

        let msg = Message::new(MessageRole::User, vec![ContentBlock::Image(image)]);
        client.history_mut().push(msg);
    }

    for (i, (expected_detail, description)) in test_cases.iter().enumerate() {
        let stored_msg = &client.history()[i];
        match &stored_msg.content[0] {
            ContentBlock::Image(img) => {
                assert_eq!(
                    img.detail(),
                    *expected_detail,
                    "{} should be preserved",
                    description
                );
            }
            _ => panic!("Expected Image content block"),
        }
    }
}

#[test]
fn test_client_preserves_images_in_conversation() {
    let mut client = test_client();

    // User message with validated image
    let image_url = "https://cdn.example.com/competitor_menu.png";
    let image = ImageBlock::from_url(image_url)
        .expect("Valid URL")
        .with_detail(ImageDetail::High);
    client.history_mut().push(Message::new(
        MessageRole::User,
        vec![
            ContentBlock::Text(TextBlock::new("What's on this menu?")),
            ContentBlock::Image(image),
        ],
    ));

    // Assistant response (text only)
    client.history_mut().push(Message::new(
        MessageRole::Assistant,
        vec![ContentBlock::Text(TextBlock::new(
            "I can see burgers, fries, and drinks",
        ))],
    ));

    // Follow-up user message (text only)
    client.history_mut().push(Message::new(
        MessageRole::User,
        vec![ContentBlock::Text(TextBlock::new(
            "List the burger prices specifically",
        ))],
    ));

    assert_eq!(
        client.history().len(),
        3,
        "Should have 3 messages in history"
    );

    let user_msg_1 = &client.history()[0];
    assert_eq!(
        user_msg_1.content.len(),
        2,
        "First message should have 2 blocks"
    );
    match &user_msg_1.content[1] {
        ContentBlock::Image(img) => {
            assert_eq!(img.url(), image_url, "Image URL should be preserved");
            assert_eq!(
                img.detail(),
                ImageDetail::High,
                "Detail level should be preserved"
            );
        }
        _ => panic!("Expected Image content block"),
    }

    match &client.history()[1].content[0] {
        ContentBlock::Text(text) => {
            assert_eq!(text.text, "I can see burgers, fries, and drinks");
        }
        _ => panic!("Expected Text content block"),
    }

    match &client.history()[2].content[0] {
        ContentBlock::Text(text) => {
            assert_eq!(text.text, "List the burger prices specifically");
        }
        _ => panic!("Expected Text content block"),
    }
}

#[test]
fn test_vision_message_helpers() {
    let msg = Message::user_with_image_detail(
        "Analyze this menu in detail",
        "https://example.com/menu.png",
        ImageDetail::High,
    )
    .expect("valid message");

    assert_eq!(msg.content.len(), 2);
    match &msg.content[1] {
        ContentBlock::Image(img) => assert_eq!(img.detail(), ImageDetail::High),
        _ => panic!("Expected Image content block"),
    }

    let msg = Message::user_with_base64_image("What color is this pixel?", "aGVsbG8=", "image/png")
        .expect("valid message");
    match &msg.content[1] {
        ContentBlock::Image(img) => {
            assert!(img.url().starts_with("data:image/png;base64,"));
        }
        _ => panic!("Expected Image content block"),
    }
}
