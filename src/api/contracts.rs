//! Response payloads of the aggregates API and their chart adapters.
//!
//! Field names follow the server's JSON (`gastosDataset`, `porcentajeUsado`,
//! ...); numeric fields tolerate numbers, numeric strings and `null`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{NumberFormat, NumberLocale, Viewport, truncate_label};
use crate::error::{ChartError, ChartResult};

use super::config::ResolvedTheme;
use super::{BarChartProps, Dataset, DonutChartProps, LineChartProps};

/// Rows shown next to the donut.
pub const TOP_EXPENSES_LIMIT: usize = 6;
pub const TOP_EXPENSE_PURPOSE_MAX_CHARS: usize = 12;

/// `GET /monthly-graph`: expenses, income and savings per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGraphData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    pub gastos_dataset: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    pub ingresos_dataset: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    pub ahorros_dataset: Vec<f64>,
}

impl MonthlyGraphData {
    /// Expenses, income and savings datasets, in that draw order.
    #[must_use]
    pub fn datasets(&self, theme: &ResolvedTheme) -> Vec<Dataset> {
        vec![
            Dataset::new(self.gastos_dataset.clone(), theme.expenses),
            Dataset::new(self.ingresos_dataset.clone(), theme.income),
            Dataset::new(self.ahorros_dataset.clone(), theme.savings),
        ]
    }

    #[must_use]
    pub fn line_props(
        &self,
        theme: &ResolvedTheme,
        viewport: Viewport,
        number_format: NumberFormat,
    ) -> LineChartProps {
        LineChartProps {
            datasets: self.datasets(theme),
            labels: self.labels.clone(),
            viewport,
            label_color: theme.foreground,
            number_format,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// `GET /expenses-by-category`: totals per category over a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensesByCategoryData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64_vec")]
    pub amounts: Vec<f64>,
    /// Raw per-category rows; passed through untouched.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub range: DateRange,
}

impl ExpensesByCategoryData {
    #[must_use]
    pub fn bar_props(
        &self,
        theme: &ResolvedTheme,
        viewport_width: u32,
        number_format: NumberFormat,
    ) -> BarChartProps {
        BarChartProps {
            values: self.amounts.clone(),
            labels: self.labels.clone(),
            viewport_width,
            label_color: theme.foreground,
            bar_color: theme.accent,
            number_format,
        }
    }

    /// Caption such as `"enero de 2024 - diciembre de 2024"`.
    ///
    /// `Ok(None)` while the server has not sent a range yet.
    pub fn range_caption(&self, locale: NumberLocale) -> ChartResult<Option<String>> {
        if self.range.start.is_empty() || self.range.end.is_empty() {
            return Ok(None);
        }
        let start = parse_range_date(&self.range.start)?;
        let end = parse_range_date(&self.range.end)?;
        Ok(Some(format!(
            "{} - {}",
            month_year(start, locale),
            month_year(end, locale)
        )))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopExpense {
    #[serde(default)]
    pub proposito: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monto: f64,
}

/// `GET /curr-month-spending`: budget usage plus the biggest expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthSpending {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub porcentaje_usado: f64,
    #[serde(default)]
    pub top_gastos: Vec<TopExpense>,
}

/// One formatted "top expense" row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopExpenseRow {
    pub purpose: String,
    pub amount: String,
}

impl CurrentMonthSpending {
    #[must_use]
    pub fn donut_props(&self, label: impl Into<String>, size: f64, stroke_width: f64) -> DonutChartProps {
        DonutChartProps::new(self.porcentaje_usado, label).with_size(size, stroke_width)
    }

    #[must_use]
    pub fn top_expense_rows(&self, number_format: &NumberFormat) -> Vec<TopExpenseRow> {
        self.top_gastos
            .iter()
            .take(TOP_EXPENSES_LIMIT)
            .map(|expense| TopExpenseRow {
                purpose: truncate_label(&expense.proposito, TOP_EXPENSE_PURPOSE_MAX_CHARS).to_owned(),
                amount: number_format.format(expense.monto),
            })
            .collect()
    }
}

fn parse_range_date(input: &str) -> ChartResult<NaiveDate> {
    let input = input.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| ChartError::InvalidData(format!("invalid range date `{input}`: {e}")))
}

fn month_year(date: NaiveDate, locale: NumberLocale) -> String {
    const ES: [&str; 12] = [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ];
    const EN: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    let month = date.month0() as usize;
    match locale {
        NumberLocale::EsEs => format!("{} de {}", ES[month], date.year()),
        NumberLocale::EnUs => format!("{} {}", EN[month], date.year()),
    }
}

fn lenient_number(value: serde_json::Value) -> f64 {
    let parsed = match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(0.0),
        serde_json::Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(lenient_number)
}

fn lenient_f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(lenient_number)
        .collect())
}
