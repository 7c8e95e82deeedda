use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::Vector3;

use crate::error::LogError;
use crate::sim::runner::TrajectoryPoint;

pub const LOG_FILE_NAME: &str = "control_log.csv";

// ---------------------------------------------------------------------------
// Log values and records
// ---------------------------------------------------------------------------

/// A single logged quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Integer(i64),
    Text(String),
}

impl LogValue {
    fn is_finite(&self) -> bool {
        match self {
            LogValue::Scalar(x) => x.is_finite(),
            LogValue::Vector(xs) => xs.iter().all(|x| x.is_finite()),
            LogValue::Integer(_) | LogValue::Text(_) => true,
        }
    }
}

/// Floats use the shortest round-trip form (`0.0`, `1e-5`); vectors join
/// their components with single spaces.
impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Scalar(x) => write!(f, "{x:?}"),
            LogValue::Vector(xs) => {
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{x:?}")?;
                }
                Ok(())
            }
            LogValue::Integer(n) => write!(f, "{n}"),
            LogValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for LogValue {
    fn from(x: f64) -> Self {
        LogValue::Scalar(x)
    }
}

impl From<Vector3<f64>> for LogValue {
    fn from(v: Vector3<f64>) -> Self {
        LogValue::Vector(v.iter().copied().collect())
    }
}

impl From<Vec<f64>> for LogValue {
    fn from(xs: Vec<f64>) -> Self {
        LogValue::Vector(xs)
    }
}

impl From<i64> for LogValue {
    fn from(n: i64) -> Self {
        LogValue::Integer(n)
    }
}

impl From<usize> for LogValue {
    fn from(n: usize) -> Self {
        LogValue::Integer(n as i64)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Text(s.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Text(s)
    }
}

/// Ordered mapping from field name to value, one per logged step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    fields: Vec<(String, LogValue)>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &LogValue> {
        self.fields.iter().map(|(_, v)| v)
    }
}

/// Standard per-step record of the relative state and the applied command.
pub fn state_record(p: &TrajectoryPoint) -> LogRecord {
    LogRecord::new()
        .field("time", p.time)
        .field("sigma", p.state.sigma)
        .field("omega", p.state.omega)
        .field("rho", p.state.rho)
        .field("v", p.state.v)
        .field("force", p.command.force)
        .field("torque", p.command.torque)
        .field("range", p.state.range())
}

// ---------------------------------------------------------------------------
// CSV state logger
// ---------------------------------------------------------------------------

/// Anything the simulation loop can hand a record to.
pub trait StepLogger {
    fn log(&mut self, record: &LogRecord) -> Result<(), LogError>;
}

/// Row-oriented CSV logger. The first record fixes the header; key sets are
/// assumed stable afterwards and are not re-checked.
#[derive(Debug)]
pub struct StateLogger<W: Write> {
    writer: W,
    path: Option<PathBuf>,
    header_written: bool,
    rows: usize,
}

impl StateLogger<BufWriter<File>> {
    /// Create `dir` (and parents) and a fresh `control_log.csv` inside it.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, LogError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let file = File::create(&path)?;
        log::info!("logging state to {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
            path: Some(path),
            header_written: false,
            rows: 0,
        })
    }
}

impl<W: Write> StateLogger<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            path: None,
            header_written: false,
            rows: 0,
        }
    }

    /// File backing this logger, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, cells: impl Iterator<Item = String>) -> Result<(), LogError> {
        let line: Vec<String> = cells.map(|c| escape(&c)).collect();
        writeln!(self.writer, "{}", line.join(","))?;
        Ok(())
    }
}

impl<W: Write> StepLogger for StateLogger<W> {
    fn log(&mut self, record: &LogRecord) -> Result<(), LogError> {
        if let Some((name, _)) = record.fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LogError::NonFinite { field: name.clone() });
        }
        if !self.header_written {
            self.write_row(record.keys().map(str::to_owned))?;
            self.header_written = true;
        }
        self.write_row(record.values().map(|v| v.to_string()))?;
        self.rows += 1;
        Ok(())
    }
}

/// Quote a cell if it holds a delimiter, quote or line break.
fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}
