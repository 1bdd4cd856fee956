// src/io/child.rs

//! Subprocess plumbing: spawn a command and pump its output into the
//! terminal writer.
//!
//! stdout and stderr are pumped on separate threads into one shared writer;
//! each pump holds the writer's lock for a whole `write_bytes` call, so the
//! display never interleaves the two streams inside a single redraw. A
//! transport failure aborts the pump and surfaces here; the caller exits
//! rather than continuing against a corrupted display.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use log::{debug, trace};

use crate::io::i2c::I2cTransport;
use crate::term::writer::TerminalWriter;

/// What to run and how to wire its streams.
#[derive(Debug, Clone)]
pub struct ChildConfig<'a> {
    /// The executable to run.
    pub command: &'a str,
    /// Arguments to the executable.
    pub args: &'a [String],
    /// Mirror the child's stderr onto the display alongside stdout.
    pub mirror_stderr: bool,
}

/// Spawns the child, pumps its output to the display, and waits for exit.
///
/// Blocks until the child's streams reach EOF and the child is reaped.
pub fn run_piped<B>(
    config: &ChildConfig,
    writer: Arc<Mutex<TerminalWriter<B>>>,
) -> Result<ExitStatus>
where
    B: I2cTransport + Send + 'static,
{
    let mut command = Command::new(config.command);
    command
        .args(config.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(if config.mirror_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

    let mut child = command
        .spawn()
        .with_context(|| format!("failed to spawn '{}'", config.command))?;
    debug!("Spawned '{}' (pid {})", config.command, child.id());

    let stdout = child
        .stdout
        .take()
        .context("child stdout was not piped")?;
    let stdout_pump = spawn_pump("stdout-pump", stdout, Arc::clone(&writer))?;

    let stderr_pump = match child.stderr.take() {
        Some(stderr) => Some(spawn_pump("stderr-pump", stderr, Arc::clone(&writer))?),
        None => None,
    };

    let mut pump_result = join_pump(stdout_pump);
    if let Some(handle) = stderr_pump {
        let stderr_result = join_pump(handle);
        if pump_result.is_ok() {
            pump_result = stderr_result;
        }
    }

    let status = wait_child(&mut child, config.command)?;
    // A display failure outranks the child's own exit status.
    pump_result?;
    debug!("Child '{}' exited: {}", config.command, status);
    Ok(status)
}

fn spawn_pump<R, B>(
    name: &str,
    source: R,
    writer: Arc<Mutex<TerminalWriter<B>>>,
) -> Result<JoinHandle<Result<()>>>
where
    R: Read + Send + 'static,
    B: I2cTransport + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || pump(source, writer))
        .with_context(|| format!("failed to spawn {} thread", name))
}

/// Copies `source` to the writer until EOF or the first display error.
fn pump<R, B>(mut source: R, writer: Arc<Mutex<TerminalWriter<B>>>) -> Result<()>
where
    R: Read,
    B: I2cTransport,
{
    let mut buf = [0u8; 1024];
    loop {
        let n = source
            .read(&mut buf)
            .context("failed to read from child pipe")?;
        if n == 0 {
            return Ok(());
        }
        trace!("pumping {} bytes to the display", n);
        let mut writer = writer
            .lock()
            .map_err(|_| anyhow!("terminal writer lock poisoned"))?;
        writer
            .write_bytes(&buf[..n])
            .context("failed to write child output to the display")?;
    }
}

fn join_pump(handle: JoinHandle<Result<()>>) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow!("output pump thread panicked"))?
}

fn wait_child(child: &mut Child, command: &str) -> Result<ExitStatus> {
    child
        .wait()
        .with_context(|| format!("failed to wait for '{}'", command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::mock::MockBus;
    use crate::lcd::display::LcdDisplay;
    use crate::lcd::geometry::DisplayGeometry;
    use crate::lcd::pins::PinMap;

    fn shared_writer(bus: &MockBus) -> Arc<Mutex<TerminalWriter<MockBus>>> {
        let pins = PinMap::new(2, 1, 0, 4, 5, 6, 7, 3).unwrap();
        let geometry = DisplayGeometry::new(4, 16).unwrap();
        let display = LcdDisplay::new(bus.clone(), pins, geometry).unwrap();
        Arc::new(Mutex::new(TerminalWriter::new(display, 4).unwrap()))
    }

    #[test]
    fn child_output_lands_in_the_grid() {
        let bus = MockBus::new();
        let writer = shared_writer(&bus);

        let config = ChildConfig {
            command: "printf",
            args: &["ok".to_string()],
            mirror_stderr: true,
        };
        let status = run_piped(&config, Arc::clone(&writer)).unwrap();
        assert!(status.success());

        let writer = writer.lock().unwrap();
        assert_eq!(&writer.row(0).unwrap()[..2], b"ok");
    }

    #[test]
    fn missing_executable_is_an_error() {
        let bus = MockBus::new();
        let writer = shared_writer(&bus);
        let config = ChildConfig {
            command: "/nonexistent/definitely-not-here",
            args: &[],
            mirror_stderr: false,
        };
        assert!(run_piped(&config, writer).is_err());
    }

    #[test]
    fn child_exit_code_is_reported() {
        let bus = MockBus::new();
        let writer = shared_writer(&bus);
        let config = ChildConfig {
            command: "false",
            args: &[],
            mirror_stderr: false,
        };
        let status = run_piped(&config, writer).unwrap();
        assert_eq!(status.code(), Some(1));
    }
}
