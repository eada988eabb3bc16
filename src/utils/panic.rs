//! Last-resort boundary turning panics into errors

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ProfileError;

/// Run `f`, converting a panic into [`ProfileError::Panic`].
///
/// With `debug` set the panic is left to propagate so it can be inspected
/// with its backtrace. Otherwise the default panic hook is silenced for the
/// duration of `f`, so the panic surfaces only as the returned error.
pub fn panics_to_errors<T, E, F>(debug: bool, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<ProfileError>,
{
    if debug {
        return f();
    }

    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous_hook);

    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::debug!("Recovered from panic: {}", message);
            Err(ProfileError::Panic { message }.into())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_result_passes_through() {
        let result: Result<u32, ProfileError> = panics_to_errors(false, || Ok(7));
        assert_eq!(result.expect("ok"), 7);
    }

    #[test]
    fn test_error_result_passes_through() {
        let result: Result<(), ProfileError> = panics_to_errors(false, || {
            Err(ProfileError::Panic { message: "not really".into() })
        });
        assert!(matches!(result, Err(ProfileError::Panic { ref message }) if message == "not really"));
    }

    #[test]
    fn test_panic_becomes_error_outside_debug() {
        let result: Result<(), ProfileError> =
            panics_to_errors(false, || panic!("registry exploded: {}", 42));
        match result {
            Err(ProfileError::Panic { message }) => assert_eq!(message, "registry exploded: 42"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_static_str_panic_message() {
        let result: Result<(), anyhow::Error> = panics_to_errors(false, || panic!("boom"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_hook_is_restored_between_calls() {
        for round in 0..3 {
            let result: Result<(), ProfileError> =
                panics_to_errors(false, || panic!("round {}", round));
            let expected = format!("round {round}");
            assert!(matches!(result, Err(ProfileError::Panic { ref message }) if *message == expected));
        }
        let outside = panic::catch_unwind(|| panic!("after boundary"));
        assert!(outside.is_err());
    }

    #[test]
    #[should_panic(expected = "left to propagate")]
    fn test_panic_propagates_in_debug() {
        let _: Result<(), ProfileError> = panics_to_errors(true, || panic!("left to propagate"));
    }
}
