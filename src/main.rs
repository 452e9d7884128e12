// src/main.rs
mod config;
mod drivers;
mod engine;
mod gui;
mod types;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::Args;
use drivers::{available_port_names, write_port_listing, SampleSource, SimulatedSource, StripchartError};
use eframe::egui;
use engine::Stripchart;
use gui::{FatalSlot, StripchartApp};
use std::process::ExitCode;
// 打开数据源; 串口打不开时列出可用端口后直接退出
fn open_source(args: &Args) -> Result<Option<Box<dyn SampleSource>>> {
    if args.simulate {
        let source: Box<dyn SampleSource> = Box::new(SimulatedSource::new());
        return Ok(Some(source));
    }
    match drivers::serial::open(&args.serial_settings()) {
        Ok(port) => {
            let source: Box<dyn SampleSource> = Box::new(port);
            Ok(Some(source))
        }
        Err(err @ StripchartError::PortUnavailable { .. }) => {
            log::warn!("{err}");
            let ports = available_port_names().context("could not list serial ports")?;
            write_port_listing(&mut std::io::stdout().lock(), &ports)?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
fn run() -> Result<ExitCode> {
    let args = Args::parse();
    let settings = args.chart_settings()?;
    let Some(source) = open_source(&args)? else {
        return Ok(ExitCode::FAILURE);
    };
    let fatal = FatalSlot::default();
    let app = StripchartApp::new(Stripchart::new(source, settings), fatal.clone());
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 540.0])
        .with_title("Temperature stripchart");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("tempchart", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("display window failed: {err}"))?;
    finish(&fatal)
}
// 窗口关闭后: 数据流出错则返回错误
fn finish(fatal: &FatalSlot) -> Result<ExitCode> {
    let halted = fatal.borrow_mut().take();
    if let Some(err) = halted {
        return Err(err).context("temperature stream halted");
    }
    log::info!("window closed");
    Ok(ExitCode::SUCCESS)
}
fn exit_code(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
// 入口函数
fn main() -> ExitCode {
    env_logger::init();
    exit_code(run())
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn unopenable_port_stops_before_the_window() {
        let args = Args::parse_from(["tempchart", "--port", "/no/such/port"]);
        assert!(matches!(open_source(&args), Ok(None)));
    }
    #[test]
    fn simulate_flag_skips_the_serial_port() {
        let args = Args::parse_from(["tempchart", "--port", "/no/such/port", "--simulate"]);
        let mut source = open_source(&args).unwrap().unwrap();
        assert_eq!(source.next_sample().unwrap().index, 0);
    }
    #[test]
    fn halted_stream_exits_with_failure() {
        let fatal = FatalSlot::default();
        *fatal.borrow_mut() = Some(StripchartError::MalformedSample {
            line: "bad".into(),
            reason: "invalid float literal".into(),
        });
        let result = finish(&fatal);
        assert!(result.is_err());
        assert!(fatal.borrow().is_none());
        assert_eq!(exit_code(result), ExitCode::FAILURE);
    }
    #[test]
    fn clean_close_exits_with_success() {
        assert_eq!(exit_code(finish(&FatalSlot::default())), ExitCode::SUCCESS);
    }
}
