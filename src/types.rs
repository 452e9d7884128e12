// src/types.rs

// 一个采样点: 序号 + 温度值
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub index: u64,
    pub value: f64,
}

// 图表状态机
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartState {
    Running,
    // 终止状态, 串口已释放
    Closed,
}

// 图表固定参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSettings {
    /// Number of samples visible at once on the x axis.
    pub width: u64,
    pub y_min: f64,
    pub y_max: f64,
    pub tick_interval_ms: u64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        // -40..100 °C sensor range with 5 degrees of margin on both ends.
        Self {
            width: 100,
            y_min: -45.0,
            y_max: 105.0,
            tick_interval_ms: 50,
        }
    }
}
