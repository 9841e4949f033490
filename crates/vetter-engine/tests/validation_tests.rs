//! Integration tests for validating a login form.
//!
//! The spec mixes built-in text checks with account lookups, and covers
//! `last`, `lastAll`, generic errors, redirections and sibling data.

mod common;

use common::{capture_logger, login_registry, login_spec};
use insta::assert_json_snapshot;
use serde_json::{Value, json};
use vetter_engine::{
    EngineConfig, ErrorMap, Outcome, PredicateRegistry, Validator, run_validations,
};

fn validator() -> Validator {
    Validator::new(login_registry())
}

async fn errors_for(record: Value) -> Value {
    let outcome = validator()
        .run(&login_spec(), &record)
        .await
        .expect("run should not fail");
    match outcome {
        Outcome::Passed => Value::Null,
        Outcome::Rejected(errors) => errors.to_json(),
    }
}

// ============================================================================
// Field-level stops
// ============================================================================

#[tokio::test]
async fn empty_email_reports_first_failure_per_field() {
    let errors = errors_for(json!({"email": ""})).await;
    assert_eq!(
        errors,
        json!({
            "email": "Email cannot be empty",
            "reCaptcha": "Please solve reCaptcha",
            "password": "Password cannot be empty"
        })
    );
}

#[tokio::test]
async fn non_stopping_failures_group_under_their_field() {
    let errors = errors_for(json!({"email": "asd@asd.cc", "password": "@"})).await;
    assert_eq!(
        errors,
        json!({
            "reCaptcha": "Please solve reCaptcha",
            "password": [
                "Password must contain an uppercase letter",
                "Password must contain a lowercase letter",
                "Password must contain a digit"
            ]
        })
    );
}

#[tokio::test]
async fn malformed_email_fails_format_check() {
    let errors =
        errors_for(json!({"email": "not-an-email", "password": "aA1", "reCaptcha": "XXX"})).await;
    assert_eq!(errors, json!({"email": "Email is not valid"}));
}

// ============================================================================
// Run-level stops
// ============================================================================

#[tokio::test]
async fn last_all_skips_everything_after_it() {
    let errors =
        errors_for(json!({"email": "ghost@nowhere.io", "password": "aA1", "reCaptcha": "XXX"}))
            .await;
    assert_eq!(errors, json!({"_error": "No such user found"}));
}

#[tokio::test]
async fn last_all_keeps_errors_filed_before_it() {
    let errors =
        errors_for(json!({"email": "ghost@nowhere.io", "password": "@", "reCaptcha": ""})).await;
    assert_eq!(
        errors,
        json!({
            "reCaptcha": "Please solve reCaptcha",
            "_error": "No such user found"
        })
    );
}

#[tokio::test]
async fn locked_account_stops_remaining_password_rules() {
    let errors =
        errors_for(json!({"email": "asd@asd.cc", "password": "LockedOut1", "reCaptcha": "XXX"}))
            .await;
    assert_eq!(
        errors,
        json!({
            "_error": {
                "_message": "Your account is locked after too many attempts. Contact us to get it enabled",
                "_redirection": [{"href": "/contact", "title": "Contact us"}]
            }
        })
    );
}

#[tokio::test]
async fn wrong_password_is_filed_under_the_field() {
    let errors =
        errors_for(json!({"email": "asd@asd.cc", "password": "WrongPass1", "reCaptcha": "XXX"}))
            .await;
    assert_eq!(errors, json!({"password": "Password is not valid"}));
}

// ============================================================================
// Payloads
// ============================================================================

#[tokio::test]
async fn redirection_templates_are_interpolated() {
    let errors =
        errors_for(json!({"email": "asd@asd.cc", "password": "FailForTest", "reCaptcha": "XXX"}))
            .await;
    assert_json_snapshot!(errors, @r#"
    {
      "_error": {
        "_message": "Given value FailForTest will cause fail",
        "_redirection": [
          {
            "href": "/value/in/link/FailForTest",
            "title": "Also in title \"FailForTest\""
          }
        ]
      }
    }
    "#);
}

#[tokio::test]
async fn sibling_data_reaches_the_predicate() {
    let errors =
        errors_for(json!({"email": "new@user.io", "password": "aA1", "reCaptcha": "XXX"})).await;
    assert_eq!(
        errors,
        json!({
            "_error": {
                "_message": "Your account email is not verified, check your email",
                "_redirection": [
                    {"href": "/resend-verification-email/new@user.io", "title": "Send Verification Email"},
                    {"href": "/verify-account", "title": "Verify"}
                ]
            }
        })
    );
}

// ============================================================================
// Whole runs
// ============================================================================

#[tokio::test]
async fn valid_login_passes() {
    let outcome = validator()
        .run(
            &login_spec(),
            &json!({"email": "asd@asd.cc", "password": "aA1", "reCaptcha": "XXX"}),
        )
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Passed);
    assert!(outcome.into_result().is_ok());
}

#[tokio::test]
async fn numeric_expectations_ignore_integer_float_spelling() {
    let mut registry = PredicateRegistry::new();
    registry.register_fn("ratio", |_, _| Ok(json!(3.0)));
    registry.register_fn("count", |_, _| Ok(json!(3)));
    let spec: Value = serde_json::from_str(
        r#"{
            "a": {"v": "ratio", "ex": 3, "m": "a bad"},
            "b": {"v": "count", "ex": 3.0, "m": "b bad"}
        }"#,
    )
    .unwrap();

    let outcome = Validator::new(registry).run(&spec, &json!({})).await.unwrap();
    assert!(outcome.is_passed(), "unexpected errors: {:?}", outcome.errors());
}

#[tokio::test]
async fn repeated_runs_give_the_same_outcome() {
    let v = validator();
    let spec = login_spec();
    let record = json!({"email": "asd@asd.cc", "password": "@"});

    let first = v.run(&spec, &record).await.unwrap();
    let second = v.run(&spec, &record).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_or_missing_spec_is_a_setup_error() {
    for spec in [json!({}), Value::Null, json!("email")] {
        let outcome = validator().run(&spec, &json!({"email": ""})).await.unwrap();
        let errors = outcome.into_result().unwrap_err();
        assert_eq!(
            errors.to_json(),
            json!({"_error": "No validations setup, cannot continue."})
        );
    }
}

#[tokio::test]
async fn interleaved_matches_sequential_without_timing_differences() {
    let spec = login_spec();
    let record = json!({"email": "ghost@nowhere.io", "password": "@", "reCaptcha": ""});

    let sequential = validator().run(&spec, &record).await.unwrap();
    let interleaved = validator()
        .with_config(EngineConfig::interleaved())
        .run(&spec, &record)
        .await
        .unwrap();
    assert_eq!(sequential, interleaved);
}

#[tokio::test]
async fn run_validations_wraps_a_one_off_validator() {
    let (lines, logger) = capture_logger();
    let outcome = run_validations(
        &json!({"email": {"v": "is_empty", "m": "Email cannot be empty"}}),
        &json!({"email": ""}),
        login_registry(),
        Some(logger),
    )
    .await
    .unwrap();

    let errors: &ErrorMap = outcome.errors().unwrap();
    assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["email"]);
    assert!(!lines.lock().unwrap().is_empty());
}

// ============================================================================
// Trace lines
// ============================================================================

#[tokio::test]
async fn trace_lines_describe_each_rule() {
    let (lines, logger) = capture_logger();
    let spec = json!({
        "email": [
            {"v": "is_empty", "m": "Email cannot be empty", "last": true},
            {"v": "is_email", "m": "Email is not valid", "ex": true, "w": true}
        ],
        "token": {"v": "checked_on_server", "m": "Token is not valid"}
    });

    validator()
        .with_logger(logger)
        .run(&spec, &json!({"email": ""}))
        .await
        .unwrap();

    let lines = lines.lock().unwrap();
    assert_eq!(
        *lines,
        vec![
            "[validation-invalid  ] -- `token` Invalid or server side validator. // Token is not valid",
            "[validation-start    ] -- [ ] is_empty(...\"\") // Email cannot be empty",
            "[validation-result   ] -- [✗] is_empty(...) = true // Email cannot be empty",
            "[validation-skipped  ] -- `email` Skipping, an earlier rule for this field was last. // Email is not valid",
        ]
    );
}

#[tokio::test]
async fn redacted_trace_omits_values() {
    let (lines, logger) = capture_logger();
    validator()
        .with_config(EngineConfig::default().with_redact_values(true))
        .with_logger(logger)
        .run(
            &json!({"password": {"v": "is_empty", "m": "Password cannot be empty"}}),
            &json!({"password": "hunter2"}),
        )
        .await
        .unwrap();

    let lines = lines.lock().unwrap();
    assert!(lines.iter().all(|line| !line.contains("hunter2")));
    assert!(lines[0].contains("is_empty(...)"));
}
