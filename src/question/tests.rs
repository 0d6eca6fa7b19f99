use super::*;

fn sample_record(correct_option: u8) -> QuestionRecord {
    QuestionRecord {
        external_id: Some("Q001".to_owned()),
        prompt: "What is the capital of France?".to_owned(),
        options: [
            "London".to_owned(),
            "Berlin".to_owned(),
            "Paris".to_owned(),
            "Madrid".to_owned(),
        ],
        correct_option,
        difficulty: Difficulty::Easy,
    }
}

#[test]
fn accepts_plain_numbers() {
    for (raw, expected) in &[("1", 1), ("2", 2), ("3", 3), ("4", 4), (" 2 ", 2)] {
        assert_eq!(parse_correct_option(raw), Ok(*expected));
    }
}

#[test]
fn accepts_option_prefix_in_any_case() {
    assert_eq!(parse_correct_option("Option 3"), Ok(3));
    assert_eq!(parse_correct_option("option 1"), Ok(1));
    assert_eq!(parse_correct_option("OPTION 4"), Ok(4));
    assert_eq!(parse_correct_option("option2"), Ok(2));
}

#[test]
fn accepts_letters_in_any_case() {
    assert_eq!(parse_correct_option("a"), Ok(1));
    assert_eq!(parse_correct_option("B"), Ok(2));
    assert_eq!(parse_correct_option("c"), Ok(3));
    assert_eq!(parse_correct_option("D"), Ok(4));
}

#[test]
fn strips_quote_characters() {
    assert_eq!(parse_correct_option("\"2\""), Ok(2));
    assert_eq!(parse_correct_option("'Option 4'"), Ok(4));
}

#[test]
fn rejects_everything_else() {
    for raw in &["5", "0", "yes", "", "e", "Option 5", "Option", "1.5", "-1"] {
        assert_eq!(
            parse_correct_option(raw),
            Err(InvalidCorrectOption(raw.to_string())),
            "{:?} should be rejected",
            raw
        );
    }
}

#[test]
fn difficulty_is_case_insensitive() {
    assert_eq!(Difficulty::parse("EASY"), Some(Difficulty::Easy));
    assert_eq!(Difficulty::parse(" Medium "), Some(Difficulty::Medium));
    assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::parse("extreme"), None);
}

#[test]
fn unknown_difficulty_defaults_to_medium() {
    assert_eq!(Difficulty::normalize("Hard"), (Difficulty::Hard, false));
    assert_eq!(Difficulty::normalize("impossible"), (Difficulty::Medium, true));
    assert_eq!(Difficulty::normalize(""), (Difficulty::Medium, true));
}

#[test]
fn correct_answer_follows_answer_key() {
    assert_eq!(sample_record(3).correct_answer(), Some("Paris"));
    assert_eq!(sample_record(1).correct_answer(), Some("London"));
}

#[test]
fn out_of_range_answer_key_has_no_answer() {
    assert_eq!(sample_record(0).correct_answer(), None);
    assert_eq!(sample_record(5).correct_answer(), None);
    assert_eq!(sample_record(255).correct_answer(), None);
}

#[test]
fn option_labels_are_letters() {
    assert_eq!(QuestionRecord::option_label(1), 'A');
    assert_eq!(QuestionRecord::option_label(4), 'D');
}
