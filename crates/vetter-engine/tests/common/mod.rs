//! Shared fixtures: a login form spec and the predicates it needs.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use vetter_engine::{PredicateError, PredicateRegistry, TraceLogger};

/// Built-ins plus the account lookups a login form would call out to.
pub fn login_registry() -> PredicateRegistry {
    let mut registry = PredicateRegistry::with_builtins();

    registry.register_fn("is_captcha_invalid", |value, _| {
        Ok(Value::Bool(value.as_str() != Some("XXX")))
    });
    registry.register_fn("no_user_for_email", |value, _| {
        Ok(Value::Bool(value.as_str() == Some("ghost@nowhere.io")))
    });
    registry.register_async("is_not_fail_for_test", |value, _| async move {
        tokio::task::yield_now().await;
        Ok::<_, PredicateError>(Value::Bool(value.as_str() != Some("FailForTest")))
    });
    registry.register_fn("is_account_locked", |value, _| {
        Ok(Value::Bool(value.as_str() == Some("LockedOut1")))
    });
    registry.register_fn("is_password_wrong", |value, _| {
        Ok(Value::Bool(value.as_str() == Some("WrongPass1")))
    });
    registry.register_fn("is_email_unverified", |_, siblings| {
        let email = siblings.and_then(|s| s.get("email")).and_then(Value::as_str);
        Ok(Value::Bool(email == Some("new@user.io")))
    });

    registry
}

pub fn login_spec() -> Value {
    json!({
        "email": [
            {"v": "is_empty", "m": "Email cannot be empty", "last": true},
            {"v": "is_email", "m": "Email is not valid", "ex": true, "w": true, "last": true}
        ],
        "reCaptcha": [
            {"v": "is_empty", "m": "Please solve reCaptcha", "last": true},
            {"v": "is_captcha_invalid", "m": "reCaptcha couldn't be verified, try again.", "lastAll": true}
        ],
        "_error": [
            {"v": "no_user_for_email", "m": "No such user found", "k": "email", "lastAll": true, "causeGenericError": true},
            {
                "v": "is_not_fail_for_test",
                "m": "Given value :password: will cause fail",
                "k": "password",
                "r": [{"h": "/value/in/link/:password:", "t": "Also in title \":password:\""}],
                "lastAll": true,
                "causeGenericError": true,
                "ex": true
            }
        ],
        "password": [
            {"v": "is_empty", "m": "Password cannot be empty", "last": true},
            {"v": "has_uppercase", "m": "Password must contain an uppercase letter", "ex": true, "w": true},
            {"v": "has_lowercase", "m": "Password must contain a lowercase letter", "ex": true},
            {"v": "has_digit", "m": "Password must contain a digit", "ex": true},
            {
                "v": "is_account_locked",
                "m": "Your account is locked after too many attempts. Contact us to get it enabled",
                "r": [{"h": "/contact", "t": "Contact us"}],
                "lastAll": true,
                "causeGenericError": true
            },
            {"v": "is_password_wrong", "m": "Password is not valid", "lastAll": true},
            {
                "v": "is_email_unverified",
                "m": "Your account email is not verified, check your email",
                "r": [
                    {"h": "/resend-verification-email/:email:", "t": "Send Verification Email"},
                    {"h": "/verify-account", "t": "Verify"}
                ],
                "causeGenericError": true,
                "d": true
            }
        ]
    })
}

/// A registry of async predicates that fail after a delay, for scheduling tests.
pub fn timed_registry() -> PredicateRegistry {
    let mut registry = PredicateRegistry::with_builtins();
    for (name, millis) in [("fails_slowly", 40u64), ("fails_quickly", 1)] {
        registry.register_async(name, move |_, _| async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok::<_, PredicateError>(Value::Bool(true))
        });
    }
    registry
}

/// Logger that keeps every line.
pub fn capture_logger() -> (Arc<Mutex<Vec<String>>>, Arc<dyn TraceLogger>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let logger: Arc<dyn TraceLogger> =
        Arc::new(move |line: &str| sink.lock().unwrap().push(line.to_string()));
    (lines, logger)
}
