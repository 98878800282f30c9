//! Keeping contained panics off stderr.
//!
//! A panic inside `release()`, `exists()` or a container impl is caught and
//! reported through the diagnostic sink. The default panic hook would still
//! print it, so the first reclaim pass installs a chaining hook once per
//! process. While the current thread is inside [`quiet_panics`] that hook
//! logs the panic at `debug` level instead of printing it; everywhere else
//! it defers to whichever hook was installed before.
//!
//! A host that replaces the panic hook after the first pass disables the
//! suppression; contained panics are then printed by the host's hook.

use std::cell::Cell;
use std::panic;
use std::sync::Once;

static HOOK_INSTALL: Once = Once::new();

thread_local! {
    static QUIET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Run `f` with panic output on this thread routed to `tracing`.
pub(crate) fn quiet_panics<R>(f: impl FnOnce() -> R) -> R {
    install_hook();
    QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let _scope = QuietScope;
    f()
}

/// Whether panics on this thread are currently suppressed.
pub(crate) fn is_quiet() -> bool {
    QUIET_DEPTH.with(Cell::get) > 0
}

/// Leaves the quiet scope on drop, including during unwinding.
struct QuietScope;

impl Drop for QuietScope {
    fn drop(&mut self) {
        QUIET_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn install_hook() {
    HOOK_INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if is_quiet() {
                tracing::debug!(location = ?info.location(), "contained panic: {info}");
            } else {
                previous(info);
            }
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    #[test]
    fn quiet_only_inside_scope() {
        assert!(!is_quiet());
        quiet_panics(|| {
            assert!(is_quiet());
            quiet_panics(|| assert!(is_quiet()));
            assert!(is_quiet());
        });
        assert!(!is_quiet());
    }

    #[test]
    fn scope_is_left_after_contained_panic() {
        let caught = quiet_panics(|| catch_unwind(AssertUnwindSafe(|| panic!("contained"))));
        assert!(caught.is_err());
        assert!(!is_quiet());
    }

    #[test]
    fn scope_is_left_when_panic_escapes() {
        let escaped = catch_unwind(|| quiet_panics(|| panic!("escaped")));
        assert!(escaped.is_err());
        assert!(!is_quiet());
    }

    #[test]
    fn scope_is_per_thread() {
        quiet_panics(|| {
            let other = std::thread::spawn(is_quiet).join().unwrap();
            assert!(!other);
        });
    }
}
