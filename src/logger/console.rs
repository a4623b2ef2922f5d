//! Console output port
//!
//! The logger never prints directly; it hands finished (already colored) lines
//! to a `Console`. `StdConsole` is the real terminal, tests plug in a capture.

use std::io::{stderr, stdout, ErrorKind, Write};

pub trait Console: Send + Sync {
    /// Standard output stream
    fn out(&self, line: &str);

    /// Error output stream
    fn err(&self, line: &str);
}

/// Process stdout/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&self, line: &str) {
        print_stdout_safe(line);
    }

    fn err(&self, line: &str) {
        let mut handle = stderr().lock();
        let _ = writeln!(handle, "{}", line);
        let _ = handle.flush();
    }
}

/// Print to stdout but ignore broken pipe errors
fn print_stdout_safe(message: &str) {
    let mut handle = stdout().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
        let _ = writeln!(stderr(), "Logger stdout error: {}", e);
    }
    let _ = handle.flush();
}

#[cfg(test)]
pub(crate) mod capture {
    use super::Console;
    use std::sync::{Arc, Mutex};

    /// Console that records every line, split by stream
    #[derive(Debug, Default, Clone)]
    pub struct CaptureConsole {
        pub out: Arc<Mutex<Vec<String>>>,
        pub err: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureConsole {
        pub fn out_lines(&self) -> Vec<String> {
            self.out.lock().unwrap().clone()
        }

        pub fn err_lines(&self) -> Vec<String> {
            self.err.lock().unwrap().clone()
        }
    }

    impl Console for CaptureConsole {
        fn out(&self, line: &str) {
            self.out.lock().unwrap().push(line.to_string());
        }

        fn err(&self, line: &str) {
            self.err.lock().unwrap().push(line.to_string());
        }
    }
}
