//! Integration tests for structured menu extraction parsing
//!
//! Local vision models are told to emit bare JSON but routinely wrap it in
//! markdown fences, prefix it with prose, or both. These tests pin the
//! tolerated reply shapes and the failure mode for replies with no JSON.

use menu_scout::{Error, parse_menu_response};

#[test]
fn test_clean_array_reply() {
    let reply = r#"[
        {"item_name": "Classic Burger", "price": 6.50},
        {"item_name": "Fries", "price": 2.50},
        {"item_name": "Soda", "price": null}
    ]"#;

    let menu = parse_menu_response(reply).expect("parse clean array");
    assert_eq!(menu.items.len(), 3);
    assert_eq!(menu.items[0].item_name, "Classic Burger");
    assert_eq!(menu.items[0].price, Some(6.50));
    assert_eq!(menu.items[2].price, None);
}

#[test]
fn test_fenced_reply_with_language_tag() {
    let reply = "```json\n[{\"item_name\": \"Daily Soup\", \"price\": 4.25}]\n```";
    let menu = parse_menu_response(reply).expect("parse fenced reply");
    assert_eq!(menu.items.len(), 1);
    assert_eq!(menu.items[0].item_name, "Daily Soup");
}

#[test]
fn test_fenced_reply_without_language_tag() {
    let reply = "```\n[{\"item_name\": \"Daily Soup\", \"price\": 4.25}]\n```";
    let menu = parse_menu_response(reply).expect("parse fenced reply");
    assert_eq!(menu.items.len(), 1);
}

#[test]
fn test_reply_with_surrounding_prose() {
    let reply = "Sure! Here are the menu items I can read:\n\n\
                 [{\"item_name\": \"Garden Salad\", \"price\": 5.0}]\n\n\
                 Note that some prices were hard to read.";

    let menu = parse_menu_response(reply).expect("parse prose-wrapped reply");
    assert_eq!(menu.items.len(), 1);
    assert_eq!(menu.items[0].price, Some(5.0));
}

#[test]
fn test_items_object_reply() {
    let reply = r#"{"items": [{"item_name": "Wrap", "price": 7.0}]}"#;
    let menu = parse_menu_response(reply).expect("parse items object");
    assert_eq!(menu.items.len(), 1);
    assert_eq!(menu.items[0].item_name, "Wrap");
}

#[test]
fn test_empty_array_reply() {
    let menu = parse_menu_response("[]").expect("parse empty array");
    assert!(menu.items.is_empty());
}

#[test]
fn test_refusal_reply_is_json_error() {
    let result = parse_menu_response("I'm sorry, the image is too blurry to read any items.");
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_wrong_shape_is_json_error() {
    // An array of the wrong object shape must not silently produce items
    let result = parse_menu_response(r#"[{"menu": "stuff", "cost": 1}]"#);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_menu_serializes_back_to_json() {
    let menu = parse_menu_response(r#"[{"item_name": "Fries", "price": 2.5}]"#).unwrap();
    let json = serde_json::to_string(&menu).unwrap();
    assert!(json.contains("\"item_name\":\"Fries\""));
    assert!(json.contains("\"price\":2.5"));
}
