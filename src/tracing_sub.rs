use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::LogConfig;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Ok(buf.len()),
            },
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut file) => file.flush(),
                Err(_) => Ok(()),
            },
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

/// Hands out writers to the configured log file, or to a sink when there is
/// none. The terminal itself is never written to.
#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    pub fn to_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(Mutex::new(file))),
        })
    }

    pub fn sink() -> Self {
        Self::default()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global fmt subscriber described by `config`. Safe to call
/// more than once; later calls leave the first subscriber in place.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.file {
        Some(path) => SubscriberMakeWriter::to_file(path)?,
        None => SubscriberMakeWriter::sink(),
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tv.log");
        std::fs::write(&path, "existing\n").unwrap();

        let make = SubscriberMakeWriter::to_file(&path).unwrap();
        let mut writer = make.make_writer();
        writer.write_all(b"window opened\n").unwrap();
        writer.flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "existing\nwindow opened\n");
    }

    #[test]
    fn sink_swallows_output() {
        let make = SubscriberMakeWriter::sink();
        let mut writer = make.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
    }

    #[test]
    fn init_twice_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: Some(dir.path().join("init.log")),
            level: Level::DEBUG,
        };
        init(&config).unwrap();
        init(&LogConfig::default()).unwrap();
        assert!(dir.path().join("init.log").exists());
    }
}
