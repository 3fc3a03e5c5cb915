//! Tokenizer behavior: state switching, quoting, tag classification.

use willow_html::{tokenize, ParseError, Token};

fn open_tag(token: &Token) -> (&str, &[willow_html::token::Attribute], bool) {
    match token {
        Token::OpenTag {
            name,
            attributes,
            self_closing,
        } => (name, attributes, *self_closing),
        other => panic!("expected an opening tag, got {other:?}"),
    }
}

#[test]
fn text_runs_split_around_tags() {
    let tokens = tokenize("before<b>middle</b>after").unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "before"));
    assert!(matches!(&tokens[1], Token::OpenTag { name, .. } if name == "b"));
    assert!(matches!(&tokens[2], Token::Text { data } if data == "middle"));
    assert!(matches!(&tokens[3], Token::CloseTag { name } if name == "b"));
    assert!(matches!(&tokens[4], Token::Text { data } if data == "after"));
}

#[test]
fn trailing_text_is_flushed_at_end_of_input() {
    let tokens = tokenize("<br/>tail").unwrap();
    assert!(matches!(&tokens[1], Token::Text { data } if data == "tail"));
}

#[test]
fn attribute_value_styles() {
    let tokens = tokenize("<input type=\"text\" id='main' tabindex=3 required>").unwrap();
    let (name, attributes, self_closing) = open_tag(&tokens[0]);
    assert_eq!(name, "input");
    assert!(!self_closing);
    assert_eq!(attributes.len(), 4);
    assert_eq!(attributes[0].name, "type");
    assert_eq!(attributes[0].value, "text");
    assert_eq!(attributes[1].name, "id");
    assert_eq!(attributes[1].value, "main");
    assert_eq!(attributes[2].name, "tabindex");
    assert_eq!(attributes[2].value, "3");
    assert_eq!(attributes[3].name, "required");
    assert_eq!(attributes[3].value, "");
}

#[test]
fn quoted_angle_bracket_does_not_close_the_tag() {
    let tokens = tokenize("<a title=\"1 > 0\">x</a>").unwrap();
    let (_, attributes, _) = open_tag(&tokens[0]);
    assert_eq!(attributes[0].value, "1 > 0");
    assert!(matches!(&tokens[1], Token::Text { data } if data == "x"));
}

#[test]
fn a_quote_closes_only_on_its_own_kind() {
    let tokens = tokenize("<a title=\"it's fine\">").unwrap();
    let (_, attributes, _) = open_tag(&tokens[0]);
    assert_eq!(attributes[0].value, "it's fine");
}

#[test]
fn self_closing_tag_is_flagged() {
    let tokens = tokenize("<meta charset=\"UTF-8\"/>").unwrap();
    let (name, attributes, self_closing) = open_tag(&tokens[0]);
    assert_eq!(name, "meta");
    assert!(self_closing);
    assert_eq!(attributes[0].value, "UTF-8");
}

#[test]
fn duplicate_attributes_survive_tokenization() {
    let tokens = tokenize("<div id=\"a\" id=\"b\">").unwrap();
    let (_, attributes, _) = open_tag(&tokens[0]);
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].value, "a");
    assert_eq!(attributes[1].value, "b");
}

#[test]
fn comments_cdata_and_doctype() {
    let tokens = tokenize("<!--hi--><![CDATA[1 < 2]]><!DOCTYPE html>").unwrap();
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "hi"));
    assert!(matches!(&tokens[1], Token::Cdata { data } if data == "1 < 2"));
    assert!(matches!(&tokens[2], Token::Doctype { name } if name == "html"));
}

#[test]
fn doctype_keyword_is_case_insensitive() {
    let tokens = tokenize("<!doctype html>").unwrap();
    assert!(matches!(&tokens[0], Token::Doctype { name } if name == "html"));
}

#[test]
fn unrecognized_markup_declarations_are_dropped() {
    let tokens = tokenize("<!ENTITY nbsp>x").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "x"));
}

#[test]
fn processing_instruction_splits_target_and_data() {
    let tokens = tokenize("<?php echo 1; ?>").unwrap();
    assert!(matches!(
        &tokens[0],
        Token::ProcessingInstruction { target, data } if target == "php" && data == "echo 1;"
    ));
}

#[test]
fn processing_instruction_without_data() {
    let tokens = tokenize("<?xml-stylesheet?>").unwrap();
    assert!(matches!(
        &tokens[0],
        Token::ProcessingInstruction { target, data } if target == "xml-stylesheet" && data.is_empty()
    ));
}

#[test]
fn processing_instruction_without_a_target_is_an_error() {
    assert!(matches!(
        tokenize("<? echo ?>"),
        Err(ParseError::MalformedProcessingInstruction { .. })
    ));
}

#[test]
fn processing_instruction_must_end_with_a_question_mark() {
    assert!(matches!(
        tokenize("<?php echo 1;>"),
        Err(ParseError::MalformedProcessingInstruction { .. })
    ));
}

#[test]
fn empty_tags_are_dropped() {
    let tokens = tokenize("a<>b</>c").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| matches!(t, Token::Text { .. })));
}

#[test]
fn unterminated_tag_is_dropped() {
    let tokens = tokenize("ok<div class=\"x").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text { data } if data == "ok"));
}
