use std::io;
use std::str::FromStr;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use worker::Env;

use super::env::env_string;

static INIT: Once = Once::new();

/// Buffers one formatted event and hands it to the Workers console on drop.
struct ConsoleWriter(Vec<u8>);

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.0);
        let line = line.trim_end();
        if !line.is_empty() {
            worker::console_log!("{line}");
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter(Vec::new())
    }
}

/// Installs the console subscriber once per isolate. `LOG_LEVEL` defaults to `info`.
pub fn init(env: &Env) {
    INIT.call_once(|| {
        let level = env_string(env, "LOG_LEVEL")
            .and_then(|v| Level::from_str(&v).ok())
            .unwrap_or(Level::INFO);

        // No clock source for the formatter on wasm32; Workers logs carry their own timestamps.
        let _ = tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(level)
            .without_time()
            .with_target(false)
            .try_init();
    });
}
