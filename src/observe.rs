// ABOUTME: Log observer seam for watching external-tool output lines.
// ABOUTME: The browser observer opens the hosting emulator URL when it appears.

/// Observer for stdout lines of external tools.
///
/// Installed into the process runner before any deploy call. Observers must
/// never fail the pipeline; anything going wrong inside one is swallowed.
pub trait LogObserver: Send + Sync {
    fn observe(&self, line: &str);
}

/// Default observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LogObserver for NoopObserver {
    fn observe(&self, _line: &str) {}
}

const EMULATOR_URL_PREFIX: &str = "Local server: ";

/// Watches for the hosting emulator announcing its serving URL and opens it
/// in the operator's default browser, once per matching line.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserObserver;

impl LogObserver for BrowserObserver {
    fn observe(&self, line: &str) {
        let plain = strip_ansi(line);
        if let Some(url) = plain.trim().strip_prefix(EMULATOR_URL_PREFIX) {
            // Best effort only; a headless environment is not an error.
            let _ = webbrowser::open(url.trim());
        }
    }
}

/// Remove ANSI escape sequences (CSI color/cursor codes) from a line.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Skip parameter bytes until the final letter.
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
