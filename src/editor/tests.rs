use std::fs;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Editor, PromptPurpose};
use crate::buffer::Buffer;
use crate::config::Config;
use crate::location::Location;
use crate::mode::{Mode, SearchField};

fn editor_with(text: &str) -> Editor {
    let mut editor = Editor::new(&Config::default());
    editor.buffer = Buffer::from_text(text);
    editor
}

fn press(editor: &mut Editor, code: KeyCode) {
    press_with(editor, code, KeyModifiers::NONE);
}

fn press_with(editor: &mut Editor, code: KeyCode, modifiers: KeyModifiers) {
    editor
        .handle_key(KeyEvent::new(code, modifiers))
        .expect("key handled");
}

fn ctrl(editor: &mut Editor, c: char) {
    press_with(editor, KeyCode::Char(c), KeyModifiers::CONTROL);
}

fn shift(editor: &mut Editor, code: KeyCode) {
    press_with(editor, code, KeyModifiers::SHIFT);
}

fn type_str(editor: &mut Editor, text: &str) {
    for c in text.chars() {
        press(editor, KeyCode::Char(c));
    }
}

fn contents(editor: &Editor) -> Vec<&str> {
    editor.buffer.lines().iter().map(|line| line.content()).collect()
}

#[test]
fn typing_completes_pairs_and_backspace_removes_them() {
    let mut editor = editor_with("");
    type_str(&mut editor, "f(");
    assert_eq!(contents(&editor), vec!["f()"]);
    assert_eq!(editor.cursor, Location::new(0, 2));

    type_str(&mut editor, "x");
    assert_eq!(contents(&editor), vec!["f(x)"]);

    press(&mut editor, KeyCode::Backspace);
    assert_eq!(contents(&editor), vec!["f()"]);
    press(&mut editor, KeyCode::Backspace);
    assert_eq!(contents(&editor), vec!["f"]);
    assert_eq!(editor.cursor, Location::new(0, 1));
}

#[test]
fn enter_and_tab_edit_at_cursor() {
    let mut editor = editor_with("ab");
    editor.cursor = Location::new(0, 1);
    press(&mut editor, KeyCode::Enter);
    press(&mut editor, KeyCode::Tab);
    assert_eq!(contents(&editor), vec!["a", "    b"]);
    assert_eq!(editor.cursor, Location::new(1, 4));

    press(&mut editor, KeyCode::Backspace);
    assert_eq!(contents(&editor), vec!["a", "b"]);
    assert_eq!(editor.cursor, Location::new(1, 0));
}

#[test]
fn arrows_follow_edge_rules() {
    let mut editor = editor_with("ab\ncde");
    editor.cursor = Location::new(0, 1);
    press(&mut editor, KeyCode::Up);
    assert_eq!(editor.cursor, Location::new(0, 0));

    editor.cursor = Location::new(0, 2);
    press(&mut editor, KeyCode::Right);
    assert_eq!(editor.cursor, Location::new(1, 0));
    press(&mut editor, KeyCode::Left);
    assert_eq!(editor.cursor, Location::new(0, 2));

    press(&mut editor, KeyCode::Down);
    assert_eq!(editor.cursor, Location::new(1, 2));
    press(&mut editor, KeyCode::Down);
    assert_eq!(editor.cursor, Location::new(1, 3));
    press(&mut editor, KeyCode::Right);
    assert_eq!(editor.cursor, Location::new(1, 3));

    press(&mut editor, KeyCode::Up);
    assert_eq!(editor.cursor, Location::new(0, 2));
}

#[test]
fn skip_token_moves_over_words_numbers_and_symbols() {
    let mut editor = editor_with("foo_bar  42+x");
    let stops: Vec<usize> = (0..5)
        .map(|_| {
            press_with(&mut editor, KeyCode::Right, KeyModifiers::CONTROL);
            editor.cursor.column
        })
        .collect();
    assert_eq!(stops, vec![7, 11, 12, 13, 13]);

    let stops: Vec<usize> = (0..4)
        .map(|_| {
            press_with(&mut editor, KeyCode::Left, KeyModifiers::CONTROL);
            editor.cursor.column
        })
        .collect();
    assert_eq!(stops, vec![12, 11, 9, 0]);
}

#[test]
fn skip_token_crosses_at_most_one_line_break() {
    let mut editor = editor_with("ab\n\n  cd");
    editor.cursor = Location::new(2, 2);
    press_with(&mut editor, KeyCode::Left, KeyModifiers::CONTROL);
    assert_eq!(editor.cursor, Location::new(1, 0));
}

#[test]
fn search_cycles_through_matches() {
    let mut editor = editor_with("hello world");
    ctrl(&mut editor, 'f');
    assert_eq!(editor.mode.label(), "SEARCH");

    type_str(&mut editor, "o");
    assert_eq!(editor.cursor, Location::new(0, 5));
    let Mode::Search(params) = &editor.mode else {
        panic!("expected search mode");
    };
    assert_eq!(params.matches, vec![Location::new(0, 4), Location::new(0, 7)]);

    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.cursor, Location::new(0, 8));
    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.cursor, Location::new(0, 5));

    type_str(&mut editor, "z");
    assert_eq!(editor.cursor, Location::new(0, 5));

    press(&mut editor, KeyCode::Esc);
    assert_eq!(editor.mode, Mode::Insert);
    assert_eq!(contents(&editor), vec!["hello world"]);
}

#[test]
fn replace_one_match_at_a_time() {
    let mut editor = editor_with("foo bar foo");
    ctrl(&mut editor, 'r');
    assert_eq!(editor.mode.label(), "REPLACE");
    type_str(&mut editor, "foo");
    assert_eq!(editor.cursor, Location::new(0, 3));

    press(&mut editor, KeyCode::Enter);
    type_str(&mut editor, "x");
    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["x bar foo"]);
    assert_eq!(editor.cursor, Location::new(0, 1));

    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.cursor, Location::new(0, 9));

    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["x bar x"]);
    assert_eq!(editor.cursor, Location::new(0, 7));

    press(&mut editor, KeyCode::Enter);
    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["x bar x"]);
}

#[test]
fn replacement_containing_query_moves_on_to_later_matches() {
    let mut editor = editor_with("ab ab");
    ctrl(&mut editor, 'r');
    type_str(&mut editor, "a");
    press(&mut editor, KeyCode::Enter);
    type_str(&mut editor, "aa");

    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["aab ab"]);
    assert_eq!(editor.cursor, Location::new(0, 2));

    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["aab ab"]);
    assert_eq!(editor.cursor, Location::new(0, 5));

    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["aab aab"]);
    assert_eq!(editor.cursor, Location::new(0, 6));
}

#[test]
fn escape_steps_back_from_replacement_field() {
    let mut editor = editor_with("abc");
    ctrl(&mut editor, 'r');
    type_str(&mut editor, "b");
    press(&mut editor, KeyCode::Enter);

    press(&mut editor, KeyCode::Esc);
    let Mode::Search(params) = &editor.mode else {
        panic!("expected search mode");
    };
    assert_eq!(params.field, SearchField::Query);

    press(&mut editor, KeyCode::Esc);
    assert_eq!(editor.mode, Mode::Insert);
}

#[test]
fn typing_over_selection_replaces_it() {
    let mut editor = editor_with("hello world");
    for _ in 0..5 {
        shift(&mut editor, KeyCode::Right);
    }
    assert_eq!(editor.mode.label(), "SELECT");

    type_str(&mut editor, "J");
    assert_eq!(contents(&editor), vec!["J world"]);
    assert_eq!(editor.cursor, Location::new(0, 1));
    assert_eq!(editor.mode, Mode::Insert);
}

#[test]
fn multi_line_selection_deletes_exactly_the_range() {
    for backwards in [false, true] {
        let mut editor = editor_with("abc\ndef\nghi");
        let (start, key) = if backwards {
            (Location::new(2, 1), KeyCode::Up)
        } else {
            (Location::new(0, 1), KeyCode::Down)
        };
        editor.cursor = start;
        shift(&mut editor, key);
        shift(&mut editor, key);

        press(&mut editor, KeyCode::Backspace);
        assert_eq!(contents(&editor), vec!["ahi"]);
        assert_eq!(editor.cursor, Location::new(0, 1));
    }
}

#[test]
fn escape_deletes_selection() {
    let mut editor = editor_with("hello");
    editor.cursor = Location::new(0, 5);
    shift(&mut editor, KeyCode::Left);
    shift(&mut editor, KeyCode::Left);

    press(&mut editor, KeyCode::Esc);
    assert_eq!(contents(&editor), vec!["hel"]);
    assert_eq!(editor.cursor, Location::new(0, 3));
    assert_eq!(editor.mode, Mode::Insert);
}

#[test]
fn plain_arrow_drops_selection() {
    let mut editor = editor_with("hello");
    shift(&mut editor, KeyCode::Right);
    press(&mut editor, KeyCode::Right);
    assert_eq!(editor.mode, Mode::Insert);
    assert_eq!(editor.cursor, Location::new(0, 2));
    assert_eq!(contents(&editor), vec!["hello"]);
}

#[test]
fn control_shift_extends_by_token() {
    let mut editor = editor_with("foo bar");
    press_with(
        &mut editor,
        KeyCode::Right,
        KeyModifiers::SHIFT | KeyModifiers::CONTROL,
    );
    let Mode::Selection(params) = &editor.mode else {
        panic!("expected selection mode");
    };
    assert_eq!(params.start, Location::new(0, 0));
    assert_eq!(params.end, Location::new(0, 3));
}

#[test]
fn ctrl_s_saves_to_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut editor = editor_with("");
    editor.target = Some(path.clone());

    type_str(&mut editor, "hi");
    ctrl(&mut editor, 's');
    assert_eq!(fs::read_to_string(&path).unwrap(), "hi\n");
    assert!(editor.status.as_deref().unwrap().starts_with("Saved"));
    assert_eq!(editor.mode, Mode::Insert);
}

#[test]
fn ctrl_s_without_target_prompts_and_escape_dismisses() {
    let mut editor = editor_with("x");
    ctrl(&mut editor, 's');
    assert_eq!(
        editor.prompt.as_ref().map(|p| p.purpose),
        Some(PromptPurpose::SaveAs)
    );

    type_str(&mut editor, "ignored");
    press(&mut editor, KeyCode::Esc);
    assert!(editor.prompt.is_none());
    assert_eq!(contents(&editor), vec!["x"]);
    assert!(editor.is_running());
}

#[test]
fn quit_without_target_saves_to_prompted_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut editor = editor_with("one\ntwo");

    press(&mut editor, KeyCode::Esc);
    assert_eq!(
        editor.prompt.as_ref().map(|p| p.purpose),
        Some(PromptPurpose::SaveAndExit)
    );
    type_str(&mut editor, &path.display().to_string());
    press(&mut editor, KeyCode::Enter);

    assert!(!editor.is_running());
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    assert_eq!(editor.target.as_deref(), Some(path.as_path()));
}

#[test]
fn empty_quit_prompt_exits_without_saving() {
    let mut editor = editor_with("draft");
    press(&mut editor, KeyCode::Esc);
    press(&mut editor, KeyCode::Enter);
    assert!(!editor.is_running());
    assert!(editor.target.is_none());
}

#[test]
fn saving_onto_directory_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with("x");
    editor.target = Some(dir.path().to_path_buf());

    press(&mut editor, KeyCode::Esc);
    assert!(editor.is_running());
    assert!(editor.status.as_deref().unwrap().contains("is a directory"));
}

fn sample_tree(root: &Path) {
    fs::write(root.join("a.txt"), "one\r\ntwo").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), "inner").unwrap();
}

#[test]
fn navigation_descends_and_opens_files() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let mut editor = editor_with("");
    editor.open(dir.path().to_path_buf()).unwrap();
    assert_eq!(editor.mode.label(), "BROWSE");

    press(&mut editor, KeyCode::Down);
    press(&mut editor, KeyCode::Enter);
    let Mode::Navigation(nav) = &editor.mode else {
        panic!("expected navigation mode");
    };
    assert_eq!(nav.dir, dir.path().join("sub"));

    press(&mut editor, KeyCode::Enter);
    assert_eq!(editor.mode, Mode::Insert);
    assert_eq!(contents(&editor), vec!["inner"]);
    assert_eq!(
        editor.target.as_deref(),
        Some(dir.path().join("sub").join("b.txt").as_path())
    );
}

#[test]
fn navigation_jumps_by_first_letter_and_keeps_crlf() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let mut editor = editor_with("");
    editor.open(dir.path().to_path_buf()).unwrap();

    type_str(&mut editor, "s");
    type_str(&mut editor, "a");
    press(&mut editor, KeyCode::Enter);
    assert_eq!(contents(&editor), vec!["one\r", "two"]);
    assert_eq!(editor.cursor, Location::new(1, 3));

    ctrl(&mut editor, 's');
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "one\r\ntwo\n"
    );
}

#[test]
fn navigation_escape_exits() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor_with("");
    editor.open(dir.path().to_path_buf()).unwrap();
    press(&mut editor, KeyCode::Esc);
    assert!(!editor.is_running());
}

#[test]
fn browse_without_target_prompts_for_path() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let mut editor = editor_with("");

    ctrl(&mut editor, 'p');
    assert_eq!(
        editor.prompt.as_ref().map(|p| p.purpose),
        Some(PromptPurpose::Browse)
    );
    type_str(&mut editor, "/no/such/place");
    press(&mut editor, KeyCode::Enter);
    assert!(editor.status.as_deref().unwrap().contains("does not exist"));
    assert_eq!(editor.mode, Mode::Insert);

    ctrl(&mut editor, 'p');
    type_str(&mut editor, &dir.path().display().to_string());
    press(&mut editor, KeyCode::Enter);
    let Mode::Navigation(nav) = &editor.mode else {
        panic!("expected navigation mode");
    };
    assert_eq!(nav.entries.len(), 2);
}

#[test]
fn browse_from_file_target_lists_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());
    let mut editor = editor_with("");
    editor.open(dir.path().join("a.txt")).unwrap();

    ctrl(&mut editor, 'p');
    let Mode::Navigation(nav) = &editor.mode else {
        panic!("expected navigation mode");
    };
    assert_eq!(nav.dir, dir.path());
}

#[test]
fn opening_missing_path_sets_target_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.txt");
    let mut editor = editor_with("");
    editor.open(path.clone()).unwrap();
    assert_eq!(editor.mode, Mode::Insert);
    assert!(editor.buffer.is_blank());
    assert_eq!(editor.target, Some(path));
}

#[test]
fn viewport_follows_cursor() {
    let text = vec!["x"; 50].join("\n");
    let mut editor = editor_with(&text);
    editor.cursor = Location::new(40, 0);
    editor.scroll_to_cursor(10);
    assert_eq!(editor.viewport.origin.row, 34);
    assert_eq!(editor.viewport.relative_cursor(editor.cursor).row, 6);

    editor.cursor = Location::new(0, 0);
    editor.scroll_to_cursor(10);
    assert_eq!(editor.viewport.origin.row, 0);
}
