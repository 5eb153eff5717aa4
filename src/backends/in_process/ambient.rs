// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Process-wide standard streams and termination as seen by in-process entry points.
//!
//! Entry points write through [`stdout()`], read through [`stdin()`] and end the process
//! with [`exit()`]. Outside an in-process stage these forward to the real process. While a
//! [`StreamRedirect`] is alive they are bound to private buffers and `exit` raises a
//! [`TerminationRequest`] that the invoker catches instead of ending the host.

use std::any::Any;
use std::io::{self, Cursor, Read, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

static INVOCATION_LOCK: Mutex<()> = Mutex::new(());
static STDOUT_BUFFER: Mutex<Option<Vec<u8>>> = Mutex::new(None);
static STDIN_BUFFER: Mutex<Option<Cursor<Vec<u8>>>> = Mutex::new(None);
static WORKING_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
static TRAP_INSTALLED: AtomicBool = AtomicBool::new(false);

fn lock<T>(mutex: &'static Mutex<T>) -> MutexGuard<'static, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Raised by [`exit()`] while the termination trap is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationRequest {
    pub status: i32,
}

impl TerminationRequest {
    /// Recover a request from a caught panic payload.
    pub fn from_payload(payload: &(dyn Any + Send)) -> Option<Self> {
        payload.downcast_ref::<TerminationRequest>().copied()
    }
}

/// End the process with `status`, or raise a [`TerminationRequest`] when trapped.
pub fn exit(status: i32) -> ! {
    if TRAP_INSTALLED.load(Ordering::SeqCst) {
        panic::panic_any(TerminationRequest { status });
    }
    std::process::exit(status)
}

/// Whether a [`StreamRedirect`] currently holds the ambient streams.
pub fn is_redirected() -> bool {
    TRAP_INSTALLED.load(Ordering::SeqCst)
}

/// Writer for the ambient standard output.
pub fn stdout() -> AmbientStdout {
    AmbientStdout
}

/// Reader for the ambient standard input.
pub fn stdin() -> AmbientStdin {
    AmbientStdin
}

/// Read the whole ambient standard input as UTF-8.
pub fn read_stdin_to_string() -> io::Result<String> {
    let mut text = String::new();
    stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Resolve `path` against the working directory of the current in-process stage.
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    match lock(&WORKING_DIR).as_ref() {
        Some(dir) => dir.join(path),
        None => path.as_ref().to_path_buf(),
    }
}

pub struct AmbientStdout;

impl Write for AmbientStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match lock(&STDOUT_BUFFER).as_mut() {
            Some(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match lock(&STDOUT_BUFFER).as_ref() {
            Some(_) => Ok(()),
            None => io::stdout().flush(),
        }
    }
}

pub struct AmbientStdin;

impl Read for AmbientStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match lock(&STDIN_BUFFER).as_mut() {
            Some(cursor) => cursor.read(buf),
            None => io::stdin().read(buf),
        }
    }
}

/// Scoped ownership of the ambient streams and termination policy.
///
/// Installing takes the single-flight lock, binds stdin/stdout to private buffers, swaps
/// the panic hook so trapped terminations stay quiet and arms the trap. Dropping undoes all
/// of it on every path, including unwinding.
pub struct StreamRedirect {
    restore_hook: Option<Box<dyn FnOnce()>>,
    _flight: MutexGuard<'static, ()>,
}

impl StreamRedirect {
    pub fn install(stdin: Vec<u8>, working_dir: &Path) -> Self {
        let flight = lock(&INVOCATION_LOCK);

        *lock(&STDOUT_BUFFER) = Some(Vec::new());
        *lock(&STDIN_BUFFER) = Some(Cursor::new(stdin));
        *lock(&WORKING_DIR) = Some(working_dir.to_path_buf());

        let previous = Arc::new(panic::take_hook());
        let forward = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<TerminationRequest>().is_none() {
                (**forward)(info);
            }
        }));
        let restore_hook: Box<dyn FnOnce()> = Box::new(move || {
            drop(panic::take_hook());
            match Arc::try_unwrap(previous) {
                Ok(hook) => panic::set_hook(hook),
                Err(shared) => panic::set_hook(Box::new(move |info| (**shared)(info))),
            }
        });

        TRAP_INSTALLED.store(true, Ordering::SeqCst);

        Self {
            restore_hook: Some(restore_hook),
            _flight: flight,
        }
    }

    /// Release the streams and return everything written to the ambient stdout.
    pub fn restore(self) -> Vec<u8> {
        let captured = lock(&STDOUT_BUFFER).take().unwrap_or_default();
        drop(self);
        captured
    }
}

impl Drop for StreamRedirect {
    fn drop(&mut self) {
        TRAP_INSTALLED.store(false, Ordering::SeqCst);
        *lock(&STDOUT_BUFFER) = None;
        *lock(&STDIN_BUFFER) = None;
        *lock(&WORKING_DIR) = None;

        // The hook cannot be changed from a panicking thread; the forwarding hook stays.
        if let Some(restore_hook) = self.restore_hook.take() {
            if !thread::panicking() {
                restore_hook();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;

    #[test]
    fn test_redirect_captures_stdout_and_feeds_stdin() {
        let redirect = StreamRedirect::install(b"from previous stage".to_vec(), Path::new("/work"));

        let input = read_stdin_to_string().unwrap();
        write!(stdout(), "got: {}", input).unwrap();
        assert!(is_redirected());
        assert_eq!(resolve_path("a.txt"), PathBuf::from("/work/a.txt"));

        let captured = redirect.restore();
        assert_eq!(captured, b"got: from previous stage");
    }

    #[test]
    fn test_exit_is_trapped_while_redirected() {
        let redirect = StreamRedirect::install(Vec::new(), Path::new("."));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            write!(stdout(), "partial").unwrap();
            exit(2)
        }));
        let captured = redirect.restore();

        let payload = result.unwrap_err();
        assert_eq!(
            TerminationRequest::from_payload(payload.as_ref()),
            Some(TerminationRequest { status: 2 })
        );
        assert_eq!(captured, b"partial");
    }

    #[test]
    fn test_state_is_cleared_when_dropped_without_restore() {
        {
            let _redirect = StreamRedirect::install(b"unused".to_vec(), Path::new("."));
            write!(stdout(), "discarded").unwrap();
        }
        let _next = StreamRedirect::install(Vec::new(), Path::new("."));
        assert!(lock(&STDOUT_BUFFER).as_ref().is_some_and(|b| b.is_empty()));
        assert_eq!(read_stdin_to_string().unwrap(), "");
    }
}
