//! Abrupt exit versus scoped cleanup.
//!
//! A [`ScopeGuard`] records `ctor <name>` when acquired and `dtor <name>` when
//! dropped. Leaving its scope through a normal return runs every pending
//! guard's drop in reverse order of acquisition. Calling
//! [`std::process::exit`] ends the process immediately and runs none of them.

use std::cell::RefCell;
use std::io::Write;

/// Status passed to `process::exit` by the abrupt path.
///
/// Unix truncates it to 255.
pub const ABRUPT_EXIT_CODE: i32 = -1;

/// How the scenario leaves the scope holding the guard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitPath {
    /// Return normally, unwinding the scope
    Return,
    /// Terminate the process from inside the scope
    Abrupt,
}

/// Ordered record of lifecycle events, optionally echoed to stdout
#[derive(Debug, Default)]
pub struct Journal {
    entries: RefCell<Vec<String>>,
    echo: bool,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal that also prints each entry to stdout as it is recorded
    pub fn echoing() -> Self {
        Self {
            entries: RefCell::default(),
            echo: true,
        }
    }

    fn record(&self, entry: String) {
        if self.echo {
            let mut stdout = std::io::stdout().lock();
            // Flush per entry: an abrupt exit must not lose what was already observed.
            if writeln!(stdout, "{}", entry).and_then(|()| stdout.flush()).is_err() {
                tracing::warn!(%entry, "failed to echo lifecycle event");
            }
        }
        self.entries.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

/// Scoped resource whose release is observable through a [`Journal`]
pub struct ScopeGuard<'j> {
    name: &'static str,
    journal: &'j Journal,
}

impl<'j> ScopeGuard<'j> {
    pub fn acquire(name: &'static str, journal: &'j Journal) -> Self {
        journal.record(format!("ctor {}", name));
        Self { name, journal }
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.journal.record(format!("dtor {}", self.name));
    }
}

fn terminate() -> ! {
    tracing::debug!(code = ABRUPT_EXIT_CODE, "terminating without unwinding");
    std::process::exit(ABRUPT_EXIT_CODE)
}

/// Acquire a guard, then leave its scope by `path`.
///
/// Only returns for [`ExitPath::Return`]; the abrupt path never comes back.
pub fn run_scenario(path: ExitPath, journal: &Journal) {
    let _guard = ScopeGuard::acquire("guard", journal);
    if path == ExitPath::Abrupt {
        terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normal_return_releases_once() {
        let journal = Journal::new();
        run_scenario(ExitPath::Return, &journal);
        assert_eq!(journal.entries(), vec!["ctor guard", "dtor guard"]);
    }

    #[test]
    fn test_release_in_reverse_acquisition_order() {
        let journal = Journal::new();
        {
            let _a = ScopeGuard::acquire("a", &journal);
            let _b = ScopeGuard::acquire("b", &journal);
            let _c = ScopeGuard::acquire("c", &journal);
        }
        assert_eq!(
            journal.entries(),
            vec!["ctor a", "ctor b", "ctor c", "dtor c", "dtor b", "dtor a"]
        );
    }

    #[test]
    fn test_forgotten_guard_is_not_released() {
        // The in-process analogue of skipping cleanup.
        let journal = Journal::new();
        std::mem::forget(ScopeGuard::acquire("leaked", &journal));
        assert_eq!(journal.entries(), vec!["ctor leaked"]);
    }
}
