//! Tests for stacked spinner displays and their pause/resume coordination.

use banter::DisplayState;

mod common;
use common::helpers::*;

#[test]
fn test_spinner_becomes_active_and_live() {
    let console = plain_console();
    let spinner = console.spinner("working");
    assert_state(&spinner, DisplayState::Active);
    assert_stack(&console, 1, true, false);
}

#[test]
fn test_new_spinner_suspends_previous_top() {
    let console = plain_console();
    let outer = console.spinner("outer");
    let inner = console.spinner("inner");
    assert_state(&outer, DisplayState::Suspended);
    assert_state(&inner, DisplayState::Active);
    assert_stack(&console, 2, true, false);
}

#[test]
fn test_dropping_top_reactivates_previous() {
    let console = plain_console();
    let outer = console.spinner("outer");
    {
        let inner = console.spinner("inner");
        assert_state(&inner, DisplayState::Active);
    }
    assert_state(&outer, DisplayState::Active);
    assert_stack(&console, 1, true, false);
}

#[test]
fn test_dropping_last_spinner_clears_live_flag() {
    let console = plain_console();
    {
        let spinner = console.spinner("only");
        assert_state(&spinner, DisplayState::Active);
    }
    assert_stack(&console, 0, false, false);
}

#[test]
fn test_out_of_order_drop_keeps_top_active() {
    let console = plain_console();
    let outer = console.spinner("outer");
    let inner = console.spinner("inner");
    drop(outer);
    // The top spinner is untouched by the removal below it.
    assert_state(&inner, DisplayState::Active);
    assert_stack(&console, 1, true, false);
    drop(inner);
    assert_stack(&console, 0, false, false);
}

#[test]
fn test_three_level_nesting() {
    let console = plain_console();
    let first = console.spinner("first");
    let second = console.spinner("second");
    let third = console.spinner("third");
    assert_state(&first, DisplayState::Suspended);
    assert_state(&second, DisplayState::Suspended);
    assert_state(&third, DisplayState::Active);
    assert_stack(&console, 3, true, false);
    drop(third);
    assert_state(&second, DisplayState::Active);
    drop(second);
    assert_state(&first, DisplayState::Active);
}

#[test]
fn test_pause_suspends_top_and_marks_stack() {
    let console = plain_console();
    let spinner = console.spinner("working");
    console.pause_stack();
    assert_state(&spinner, DisplayState::Suspended);
    assert_stack(&console, 1, false, true);
}

#[test]
fn test_resume_reactivates_paused_top() {
    let console = plain_console();
    let spinner = console.spinner("working");
    console.pause_stack();
    console.resume_stack();
    assert_state(&spinner, DisplayState::Active);
    assert_stack(&console, 1, true, false);
}

#[test]
fn test_resume_without_pause_is_a_noop() {
    let console = plain_console();
    let spinner = console.spinner("working");
    console.resume_stack();
    assert_state(&spinner, DisplayState::Active);
    assert_stack(&console, 1, true, false);
}

#[test]
fn test_double_pause_and_double_resume() {
    let console = plain_console();
    let spinner = console.spinner("working");
    console.pause_stack();
    console.pause_stack();
    assert_state(&spinner, DisplayState::Suspended);
    assert_stack(&console, 1, false, true);
    console.resume_stack();
    console.resume_stack();
    assert_state(&spinner, DisplayState::Active);
    assert_stack(&console, 1, true, false);
}

#[test]
fn test_resume_does_not_touch_spinners_suspended_by_stacking() {
    let console = plain_console();
    let outer = console.spinner("outer");
    let inner = console.spinner("inner");
    console.pause_stack();
    console.resume_stack();
    // Only the top resumes; the outer spinner stays suspended by stacking.
    assert_state(&outer, DisplayState::Suspended);
    assert_state(&inner, DisplayState::Active);
}

#[test]
fn test_pause_on_empty_stack_does_nothing() {
    let console = plain_console();
    console.pause_stack();
    assert_stack(&console, 0, false, false);
}

#[test]
fn test_resume_on_empty_stack_does_nothing() {
    let console = plain_console();
    console.resume_stack();
    assert_stack(&console, 0, false, false);
}

#[test]
fn test_verbose_spinner_is_inert() {
    let console = verbose_console();
    let spinner = console.spinner("quiet");
    assert_state(&spinner, DisplayState::Idle);
    assert_stack(&console, 0, false, false);
    assert_eq!(spinner.message(), None);
}

#[test]
fn test_verbose_spinner_ignores_updates() {
    let console = verbose_console();
    let spinner = console.spinner("quiet");
    spinner.update("new message");
    assert_eq!(spinner.message(), None);
    assert_stack(&console, 0, false, false);
}

#[test]
fn test_update_normalizes_and_renders_message() {
    let console = plain_console();
    let spinner = console.spinner("start");
    spinner.update("Working:\n    step one\n        step two");
    assert_eq!(
        spinner.message().as_deref(),
        Some("Working:\nstep one\n    step two")
    );
}

#[test]
fn test_update_renders_markup() {
    let console = plain_console();
    let spinner = console.spinner("start");
    spinner.update("now [info]loading[/info]");
    assert_eq!(spinner.message().as_deref(), Some("now loading"));
}

#[test]
fn test_update_rendered_bypasses_rendering() {
    let console = plain_console();
    let spinner = console.spinner("start");
    spinner.update_rendered("raw [info]text[/info]".to_string());
    assert_eq!(spinner.message().as_deref(), Some("raw [info]text[/info]"));
}

#[test]
fn test_spinner_message_is_rendered_at_creation() {
    let console = plain_console();
    let spinner = console.spinner("load [info]index[/info]");
    assert_eq!(spinner.message().as_deref(), Some("load index"));
}

#[test]
fn test_consoles_do_not_share_stacks() {
    let console_a = plain_console();
    let console_b = plain_console();
    let _spinner = console_a.spinner("a");
    assert_stack(&console_a, 1, true, false);
    assert_stack(&console_b, 0, false, false);
}
