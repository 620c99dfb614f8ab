//! The home dashboard: one chart of each kind fed from the aggregates API.

use tracing::{debug, warn};

use crate::core::{NumberFormat, Viewport};
use crate::error::ChartResult;
use crate::render::RenderFrame;

use super::config::{DashboardConfig, ResolvedTheme};
use super::contracts::{
    CurrentMonthSpending, ExpensesByCategoryData, MonthlyGraphData, TopExpenseRow,
};
use super::{
    BarChart, BarChartStyle, DonutChart, DonutChartProps, DonutChartStyle, LineChart,
    LineChartStyle,
};

pub const MONTHLY_GRAPH_PATH: &str = "monthly-graph";
pub const EXPENSES_BY_CATEGORY_PATH: &str = "expenses-by-category";
pub const CURRENT_MONTH_SPENDING_PATH: &str = "curr-month-spending";

/// Sizes of the dashboard widgets, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardLayout {
    pub screen_width: u32,
    pub line_chart_height: u32,
    pub donut_size: f64,
    pub donut_stroke_width: f64,
}

impl DashboardLayout {
    #[must_use]
    pub fn new(screen_width: u32) -> Self {
        Self {
            screen_width,
            line_chart_height: 250,
            donut_size: 150.0,
            donut_stroke_width: 20.0,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    theme: ResolvedTheme,
    number_format: NumberFormat,
    layout: DashboardLayout,
    monthly: LineChart,
    categories: BarChart,
    spending: DonutChart,
    category_caption: Option<String>,
    top_expenses: Vec<TopExpenseRow>,
}

impl Dashboard {
    /// Builds the three charts with no data yet.
    pub fn new(config: &DashboardConfig, layout: DashboardLayout) -> ChartResult<Self> {
        config.validate()?;
        let theme = config.theme.resolve()?;
        let number_format = config.number_format.clone();

        let monthly = LineChart::new(
            MonthlyGraphData::default().line_props(
                &theme,
                line_viewport(layout)?,
                number_format.clone(),
            ),
            LineChartStyle {
                animation: config.animation,
                ..LineChartStyle::default()
            },
        )?;
        let categories = BarChart::new(
            ExpensesByCategoryData::default().bar_props(
                &theme,
                layout.screen_width,
                number_format.clone(),
            ),
            BarChartStyle {
                animation: config.animation,
                ..BarChartStyle::default()
            },
        )?;
        let spending = DonutChart::new(
            donut_props(&CurrentMonthSpending::default(), layout),
            DonutChartStyle {
                track_color: theme.track,
                text_color: theme.foreground,
                animation: config.animation,
                ..DonutChartStyle::default()
            },
        )?;

        Ok(Self {
            theme,
            number_format,
            layout,
            monthly,
            categories,
            spending,
            category_caption: None,
            top_expenses: Vec::new(),
        })
    }

    pub fn apply_monthly_graph(&mut self, data: &MonthlyGraphData) -> ChartResult<()> {
        debug!(months = data.labels.len(), "dashboard monthly graph refreshed");
        self.monthly.set_props(data.line_props(
            &self.theme,
            line_viewport(self.layout)?,
            self.number_format.clone(),
        ))
    }

    pub fn apply_expenses_by_category(&mut self, data: &ExpensesByCategoryData) -> ChartResult<()> {
        debug!(
            categories = data.labels.len(),
            "dashboard expenses by category refreshed"
        );
        self.categories.set_props(data.bar_props(
            &self.theme,
            self.layout.screen_width,
            self.number_format.clone(),
        ))?;
        self.category_caption = match data.range_caption(self.number_format.locale) {
            Ok(caption) => caption,
            Err(err) => {
                warn!(error = %err, "dashboard range caption dropped");
                None
            }
        };
        Ok(())
    }

    pub fn apply_current_month_spending(&mut self, data: &CurrentMonthSpending) -> ChartResult<()> {
        debug!(
            percentage = data.porcentaje_usado,
            top_expenses = data.top_gastos.len(),
            "dashboard current month spending refreshed"
        );
        self.top_expenses = data.top_expense_rows(&self.number_format);
        self.spending.set_props(donut_props(data, self.layout))
    }

    /// Screen rotation or split view changed the available width.
    pub fn resize(&mut self, screen_width: u32) -> ChartResult<()> {
        let layout = DashboardLayout {
            screen_width,
            ..self.layout
        };
        self.monthly.set_viewport(line_viewport(layout)?)?;
        self.categories.set_viewport_width(screen_width)?;
        self.layout = layout;
        Ok(())
    }

    pub fn on_focus(&mut self) {
        self.spending.on_focus();
    }

    pub fn on_blur(&mut self) {
        self.spending.on_blur();
    }

    pub fn unmount(&mut self) {
        self.monthly.unmount();
        self.categories.unmount();
        self.spending.unmount();
    }

    /// Advances every chart; `true` while any of them still animates.
    pub fn advance(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        let monthly = self.monthly.advance(delta_seconds)?;
        let categories = self.categories.advance(delta_seconds)?;
        let spending = self.spending.advance(delta_seconds)?;
        Ok(monthly || categories || spending)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.monthly.is_animating() || self.categories.is_animating() || self.spending.is_animating()
    }

    #[must_use]
    pub fn monthly_chart(&self) -> &LineChart {
        &self.monthly
    }

    #[must_use]
    pub fn category_chart(&self) -> &BarChart {
        &self.categories
    }

    #[must_use]
    pub fn spending_chart(&self) -> &DonutChart {
        &self.spending
    }

    #[must_use]
    pub fn category_caption(&self) -> Option<&str> {
        self.category_caption.as_deref()
    }

    #[must_use]
    pub fn top_expenses(&self) -> &[TopExpenseRow] {
        &self.top_expenses
    }

    /// Frames in screen order: trend, categories, budget gauge.
    pub fn build_render_frames(&self) -> ChartResult<[RenderFrame; 3]> {
        Ok([
            self.monthly.build_render_frame()?,
            self.categories.build_render_frame()?,
            self.spending.build_render_frame()?,
        ])
    }
}

fn line_viewport(layout: DashboardLayout) -> ChartResult<Viewport> {
    Viewport::new(layout.screen_width, layout.line_chart_height).ensure_valid()
}

fn donut_props(data: &CurrentMonthSpending, layout: DashboardLayout) -> DonutChartProps {
    data.donut_props("Gastado", layout.donut_size, layout.donut_stroke_width)
}
