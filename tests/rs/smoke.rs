//! Integration smoke tests for `sorting_hat`

use sorting_hat::core::engine::{Engine, EngineOptions};
use sorting_hat::core::loader::load_session_inputs;
use sorting_hat::get_version;
use std::path::Path;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn sample_session_assigns_everyone() {
    let input = load_session_inputs(Path::new("samples/session")).expect("load samples");
    let students = input.students.len();

    let options = EngineOptions {
        session: 1,
        seed: Some(2024),
    };
    let assignment = Engine::with_options(input, options).expect("valid samples").run();

    assert_eq!(assignment.records().len(), students);
}
