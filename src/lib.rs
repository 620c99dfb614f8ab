//! scpp-charts: charting core of the personal-finance dashboard.
//!
//! Every chart is a pure function of (data, layout, palette) producing a
//! backend-agnostic [`render::RenderFrame`]. Animated elements are driven by
//! caller-clocked scalars from [`animation`], so hosts decide when time moves.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarChart, Dashboard, DashboardConfig, DonutChart, LineChart};
pub use error::{ChartError, ChartResult};
