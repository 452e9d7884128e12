use thiserror::Error;
#[derive(Debug, Error)]
pub enum StripchartError {
    #[error("serial port {port} is unavailable: {source}")]
    PortUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to enumerate serial ports: {0}")]
    PortEnumeration(#[source] serialport::Error),
    #[error("malformed sample line {line:?}: {reason}")]
    MalformedSample { line: String, reason: String },
    #[error("sample stream closed by the device")]
    StreamClosed,
    #[error("sample out of sequence: expected index {expected}, got {actual}")]
    OutOfSequence { expected: u64, actual: u64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for StripchartError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        StripchartError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for StripchartError {
    fn from(value: image::ImageError) -> Self {
        StripchartError::Plot(value.to_string())
    }
}
