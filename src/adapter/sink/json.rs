//! Sink writing one JSON array of call arguments per line.

use std::io::Write;

use parking_lot::Mutex;

use crate::domain::ReportCommand;
use crate::error::SinkError;
use crate::port::ReportSink;

pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn send(&self, command: &ReportCommand) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, &command.to_args())?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
