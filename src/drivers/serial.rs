use std::io::{BufReader, Write};
use std::time::Duration;
use serialport::{DataBits, Parity, SerialPort, StopBits};
use crate::drivers::source::LineSource;
use crate::drivers::StripchartError;
/// Upper bound for a single driver read; `LineSource` retries on expiry, so reads never give up.
const READ_TIMEOUT: Duration = Duration::from_secs(1);
/// Serial link parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SerialSettings {
    pub port: String,
    pub baud_rate: u32,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub byte_size: DataBits,
}
impl Default for SerialSettings {
    fn default() -> Self {
        // Matches the SAMD20 firmware UART: 115200 8N2.
        Self {
            port: default_port_name().to_string(),
            baud_rate: 115_200,
            parity: Parity::None,
            stop_bits: StopBits::Two,
            byte_size: DataBits::Eight,
        }
    }
}
pub fn default_port_name() -> &'static str {
    if cfg!(windows) {
        "COM8"
    } else {
        "/dev/ttyUSB0"
    }
}
pub type SerialSource = LineSource<BufReader<Box<dyn SerialPort>>>;
/// Opens the configured port and wraps it in a line decoder.
pub fn open(settings: &SerialSettings) -> Result<SerialSource, StripchartError> {
    let port = serialport::new(&settings.port, settings.baud_rate)
        .parity(settings.parity)
        .stop_bits(settings.stop_bits)
        .data_bits(settings.byte_size)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|source| StripchartError::PortUnavailable {
            port: settings.port.clone(),
            source,
        })?;
    log::info!(
        "opened {} at {} baud ({:?}, {:?} stop bits, {:?} data bits)",
        settings.port,
        settings.baud_rate,
        settings.parity,
        settings.stop_bits,
        settings.byte_size
    );
    Ok(LineSource::new(BufReader::new(port), settings.port.clone()))
}
pub fn available_port_names() -> Result<Vec<String>, StripchartError> {
    let ports = serialport::available_ports().map_err(StripchartError::PortEnumeration)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
/// Prints the fallback listing shown when the configured port cannot be opened.
pub fn write_port_listing(out: &mut impl Write, ports: &[String]) -> std::io::Result<()> {
    writeln!(out, "Available serial ports:")?;
    for name in ports {
        writeln!(out, "{name}")?;
    }
    out.flush()
}
#[cfg(test)]
mod tests {
    use super::*;
    fn for_port(port: &str) -> SerialSettings {
        SerialSettings {
            port: port.to_string(),
            ..Default::default()
        }
    }
    #[test]
    fn defaults_match_firmware_link() {
        let settings = for_port("COM3");
        assert_eq!(settings.port, "COM3");
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.parity, Parity::None);
        assert_eq!(settings.stop_bits, StopBits::Two);
        assert_eq!(settings.byte_size, DataBits::Eight);
    }
    #[test]
    fn listing_names_every_port() {
        let ports = vec!["COM1".to_string(), "COM8".to_string(), "/dev/ttyACM0".to_string()];
        let mut out = Vec::new();
        write_port_listing(&mut out, &ports).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Available serial ports:\nCOM1\nCOM8\n/dev/ttyACM0\n");
    }
    #[test]
    fn missing_port_is_reported_as_unavailable() {
        let settings = for_port("/definitely/not/a/serial/port");
        match open(&settings) {
            Err(StripchartError::PortUnavailable { port, .. }) => {
                assert_eq!(port, "/definitely/not/a/serial/port")
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("opening a bogus path must fail"),
        }
    }
}
