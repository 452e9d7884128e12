// src/config.rs
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serialport::{DataBits, Parity, StopBits};

use crate::drivers::{default_port_name, SerialSettings};
use crate::types::ChartSettings;

#[derive(Parser, Debug)]
#[command(name = "tempchart")]
#[command(about = "Live stripchart of temperature readings from a serial device", long_about = None)]
pub struct Args {
    /// Serial port the sensor board is attached to
    #[arg(long, default_value_t = default_port_name().to_string())]
    pub port: String,

    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    #[arg(long, value_enum, default_value_t = ParityArg::None)]
    pub parity: ParityArg,

    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub stop_bits: u8,

    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(5..=8))]
    pub byte_size: u8,

    /// Number of samples visible on the x axis
    #[arg(long, default_value_t = 100)]
    pub width: u64,

    #[arg(long, default_value_t = -45.0, allow_negative_numbers = true)]
    pub y_min: f64,

    #[arg(long, default_value_t = 105.0, allow_negative_numbers = true)]
    pub y_max: f64,

    /// Redraw timer period in milliseconds
    #[arg(long, default_value_t = 50)]
    pub interval_ms: u64,

    /// Plot a synthetic signal instead of opening the serial port
    #[arg(long)]
    pub simulate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParityArg {
    None,
    Odd,
    Even,
}

impl From<ParityArg> for Parity {
    fn from(value: ParityArg) -> Self {
        match value {
            ParityArg::None => Parity::None,
            ParityArg::Odd => Parity::Odd,
            ParityArg::Even => Parity::Even,
        }
    }
}

impl Args {
    pub fn serial_settings(&self) -> SerialSettings {
        let stop_bits = if self.stop_bits == 1 {
            StopBits::One
        } else {
            StopBits::Two
        };
        let byte_size = match self.byte_size {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            _ => DataBits::Eight,
        };
        SerialSettings {
            port: self.port.clone(),
            baud_rate: self.baud,
            parity: self.parity.into(),
            stop_bits,
            byte_size,
        }
    }

    pub fn chart_settings(&self) -> Result<ChartSettings> {
        if self.width == 0 {
            bail!("--width must be at least 1");
        }
        if self.y_min >= self.y_max {
            bail!("--y-min ({}) must be below --y-max ({})", self.y_min, self.y_max);
        }
        if self.interval_ms == 0 {
            bail!("--interval-ms must be at least 1");
        }
        Ok(ChartSettings {
            width: self.width,
            y_min: self.y_min,
            y_max: self.y_max,
            tick_interval_ms: self.interval_ms,
        })
    }
}
