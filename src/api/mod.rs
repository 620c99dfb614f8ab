mod bar_chart;
pub mod config;
pub mod contracts;
mod dashboard;
mod donut_chart;
mod line_chart;

use crate::error::{ChartError, ChartResult};

pub use bar_chart::{BarChart, BarChartProps, BarChartStyle};
pub use config::{ChartTheme, DashboardConfig, ResolvedTheme, SeriesPalette};
pub use contracts::{
    CurrentMonthSpending, DateRange, ExpensesByCategoryData, MonthlyGraphData, TopExpense,
    TopExpenseRow,
};
pub use dashboard::{
    CURRENT_MONTH_SPENDING_PATH, Dashboard, DashboardLayout, EXPENSES_BY_CATEGORY_PATH,
    MONTHLY_GRAPH_PATH,
};
pub use donut_chart::{
    DANGER_RED, DonutChart, DonutChartProps, DonutChartStyle, DonutGeometry, DonutLabelPolicy,
    SAFE_GREEN, WARNING_YELLOW, clamp_percentage, severity_color,
};
pub use line_chart::{Dataset, LineChart, LineChartProps, LineChartStyle};

pub(crate) fn validate_advance_delta(delta_seconds: f64) -> ChartResult<()> {
    if !delta_seconds.is_finite() || delta_seconds < 0.0 {
        return Err(ChartError::InvalidData(
            "animation delta must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
