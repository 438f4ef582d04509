//! Boot-time run mode selection and the diagnostic console session.

use fuzzyirrigation::app::diagnostics::{
    DiagnosticSession, HUM_PROMPT, INVALID_VALUE, MODE_PROMPT, RunMode, SessionStep, TEMP_PROMPT,
    select_run_mode,
};
use fuzzyirrigation::config::SystemConfig;

use super::mock_hw::ScriptedConsole;

fn session() -> DiagnosticSession {
    DiagnosticSession::new(&SystemConfig::default()).unwrap()
}

#[test]
fn yes_enters_diagnostic_mode() {
    for answer in ["y", "Y", " y "] {
        let mut console = ScriptedConsole::with(&[Some(answer)]);
        assert_eq!(select_run_mode(&mut console, 1000), RunMode::Diagnostic);
        assert_eq!(console.output, vec![MODE_PROMPT]);
        assert_eq!(console.timeouts_requested, vec![1000]);
    }
}

#[test]
fn anything_else_or_silence_runs_the_loop() {
    for script in [vec![Some("n")], vec![Some("yes")], vec![None]] {
        let mut console = ScriptedConsole::with(&script);
        assert_eq!(select_run_mode(&mut console, 1000), RunMode::Control);
    }
}

#[test]
fn step_prints_degrees_and_duration() {
    let mut console = ScriptedConsole::with(&[Some("25"), Some("70")]);
    let step = session().step(&mut console);

    let SessionStep::Evaluated { minutes } = step else {
        panic!("expected evaluation, got {step:?}");
    };
    // Only the moderate set fires: its centroid is near 9.7 minutes.
    assert!(minutes > 7.0 && minutes < 12.0, "got {minutes}");

    assert_eq!(console.output[0], TEMP_PROMPT);
    assert_eq!(console.output[1], HUM_PROMPT);
    assert_eq!(console.output[2], "temperature: cold=0.00 normal=1.00 hot=0.00");
    assert_eq!(console.output[3], "humidity: dry=0.00 normal=1.00 humid=0.00");
    assert_eq!(console.output[4], format!("DURATION = {minutes:.2}"));
}

#[test]
fn negative_or_garbage_input_is_rejected() {
    for (t, h) in [("-1", "50"), ("20", "-0.5"), ("abc", "50"), ("20", "")] {
        let mut console = ScriptedConsole::with(&[Some(t), Some(h)]);
        let mut s = session();
        assert_eq!(s.step(&mut console), SessionStep::Rejected, "{t:?}/{h:?}");
        assert_eq!(console.output.last().unwrap(), INVALID_VALUE);
        assert_eq!(s.evaluations(), 0);
    }
}

#[test]
fn timeout_restarts_the_round() {
    let mut console = ScriptedConsole::with(&[Some("20"), None]);
    assert_eq!(session().step(&mut console), SessionStep::TimedOut);
    assert_eq!(console.timeouts_requested, vec![30_000, 30_000]);
}

#[test]
fn exit_ends_the_session() {
    let mut console = ScriptedConsole::with(&[
        Some("15"),
        Some("40"),
        None,
        Some("oops"),
        Some("1"),
        Some("EXIT"),
    ]);
    let mut s = session();
    s.run(&mut console);
    assert_eq!(s.evaluations(), 1);
    assert!(console.input.is_empty());
    assert!(console.output.iter().any(|l| l == INVALID_VALUE));
}

#[test]
fn exit_at_humidity_prompt_also_ends() {
    let mut console = ScriptedConsole::with(&[Some("15"), Some("exit")]);
    assert_eq!(session().step(&mut console), SessionStep::Exit);
}
