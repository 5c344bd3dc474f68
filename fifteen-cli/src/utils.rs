use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

/// Runs `f` while a spinner with the elapsed time animates on stderr. Does
/// nothing extra when stderr is not a terminal.
pub fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if !stderr().is_terminal() {
        return f();
    }

    let spinning = Arc::new(AtomicBool::new(true));
    let spinning_clone = Arc::clone(&spinning);
    let message = message.to_string();

    let handle = thread::spawn(move || {
        let spinner_chars = ['|', '/', '-', '\\'];
        let started = Instant::now();
        let stderr = stderr();
        let mut handle = stderr.lock();

        let _ = write!(handle, "\x1b[?25l"); // hide cursor
        let _ = handle.flush();

        let mut i = 0;
        while spinning_clone.load(Ordering::Relaxed) {
            let spinner_char = spinner_chars[i % spinner_chars.len()];
            let elapsed = format_elapsed(started.elapsed());
            let _ = write!(handle, "\r{spinner_char} {message} {elapsed}");
            let _ = handle.flush();
            thread::sleep(Duration::from_millis(100));
            i += 1;
        }

        let _ = write!(handle, "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
        let _ = handle.flush();
    });

    let result = f();
    spinning.store(false, Ordering::Relaxed);
    let _ = handle.join();
    result
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}
