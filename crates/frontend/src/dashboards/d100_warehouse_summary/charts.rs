//! Конфигурации графиков дашборда склада.
//!
//! Всё здесь - чистые данные: структура сериализуется в объект конфигурации
//! Chart.js, а подписи tooltip считаются заранее и подключаются в `ui`.

use contracts::dashboards::d100_warehouse_summary::{
    DashboardData, LabeledSeries, ReceptionsDispatches, WarehouseOccupancy,
};
use serde::Serialize;

/// Палитра дашборда
pub mod palette {
    pub const PURPLE: &str = "#7c3aed";
    pub const PURPLE_LIGHT: &str = "rgba(124, 58, 237, 0.2)";
    pub const BLACK: &str = "#1a1a1a";
    pub const BLACK_LIGHT: &str = "rgba(26, 26, 26, 0.2)";
    pub const GREEN: &str = "#10b981";
    pub const RED: &str = "#ef4444";
    pub const ORANGE: &str = "#f59e0b";
    pub const BLUE: &str = "#3b82f6";
    pub const WHITE: &str = "#fff";

    /// Цвета сегментов кольцевой диаграммы, по кругу
    pub const CATEGORY_CYCLE: [&str; 6] = [PURPLE, BLACK, GREEN, RED, ORANGE, BLUE];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    /// Подписи всплывающих подсказок (функции, в JSON не попадают)
    #[serde(skip)]
    pub tooltip: Option<TooltipText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Один цвет или по цвету на каждую точку
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(&'static str),
    PerPoint(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    /// `None` сериализуется в `null` - разрыв на графике
    pub data: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    fn new(label: &'static str, data: Vec<Option<f64>>) -> Self {
        Self {
            label,
            data,
            background_color: None,
            border_color: None,
            border_width: None,
            tension: None,
            fill: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub aspect_ratio: f64,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl ChartOptions {
    fn new(aspect_ratio: f64, legend: Legend) -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: true,
            aspect_ratio,
            plugins: Plugins { legend },
            scales: None,
        }
    }

    fn with_y_axis(mut self, step_size: Option<f64>) -> Self {
        self.scales = Some(Scales {
            y: Axis {
                begin_at_zero: true,
                ticks: step_size.map(|step_size| Ticks { step_size }),
            },
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl Legend {
    fn at(position: LegendPosition) -> Self {
        Self {
            position: Some(position),
            display: None,
        }
    }

    fn hidden() -> Self {
        Self {
            position: None,
            display: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub step_size: f64,
}

/// Текст подсказок, который Chart.js запрашивает через callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipText {
    /// `afterLabel`: процент занятости склада
    Occupancy { percentages: Vec<Option<f64>> },
    /// `label`: «категория: значение (процент%)»
    Category { percentages: Vec<f64> },
}

impl TooltipText {
    /// Имя callback-а в `options.plugins.tooltip.callbacks`
    pub fn callback_name(&self) -> &'static str {
        match self {
            TooltipText::Occupancy { .. } => "afterLabel",
            TooltipText::Category { .. } => "label",
        }
    }

    pub fn render(&self, label: &str, value: f64, index: usize) -> String {
        match self {
            TooltipText::Occupancy { percentages } => occupancy_after_label(percentages, index),
            TooltipText::Category { percentages } => {
                category_label(label, value, percentages.get(index).copied().unwrap_or(0.0))
            }
        }
    }
}

/// Доля каждого значения в сумме, %, с округлением до десятых.
/// При нулевой сумме все доли - 0.
pub fn category_percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values
        .iter()
        .map(|value| {
            if total == 0.0 {
                0.0
            } else {
                (value / total * 1000.0).round() / 10.0
            }
        })
        .collect()
}

pub fn occupancy_after_label(percentages: &[Option<f64>], index: usize) -> String {
    match percentages.get(index).copied().flatten() {
        Some(pct) if pct != 0.0 && pct.is_finite() => format!("Ocupación: {:.2}%", pct),
        _ => String::new(),
    }
}

pub fn category_label(label: &str, value: f64, percentage: f64) -> String {
    format!("{}: {} ({:.1}%)", label, value, percentage)
}

/// 1. Recepciones vs Despachos
pub fn receptions_dispatches_chart(section: &ReceptionsDispatches) -> ChartConfig {
    let mut receptions = Dataset::new("Recepciones", section.recepciones.clone());
    receptions.border_color = Some(palette::PURPLE);
    receptions.background_color = Some(Paint::Single(palette::PURPLE_LIGHT));
    receptions.tension = Some(0.4);
    receptions.fill = Some(true);

    let mut dispatches = Dataset::new("Despachos", section.despachos.clone());
    dispatches.border_color = Some(palette::BLACK);
    dispatches.background_color = Some(Paint::Single(palette::BLACK_LIGHT));
    dispatches.tension = Some(0.4);
    dispatches.fill = Some(true);

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: section.labels.clone(),
            datasets: vec![receptions, dispatches],
        },
        options: ChartOptions::new(2.5, Legend::at(LegendPosition::Top)).with_y_axis(Some(1.0)),
        tooltip: None,
    }
}

/// 2. Distribución por almacén
pub fn warehouse_distribution_chart(section: &LabeledSeries) -> ChartConfig {
    let mut products = Dataset::new("Cantidad de Productos", section.data.clone());
    products.background_color = Some(Paint::Single(palette::PURPLE));

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: section.labels.clone(),
            datasets: vec![products],
        },
        options: ChartOptions::new(1.5, Legend::hidden()).with_y_axis(None),
        tooltip: None,
    }
}

/// 3. Ocupación de almacenes
pub fn warehouse_occupancy_chart(section: &WarehouseOccupancy) -> ChartConfig {
    let mut capacity = Dataset::new("Capacidad Total", section.capacidad.clone());
    capacity.background_color = Some(Paint::Single(palette::BLACK_LIGHT));
    capacity.border_color = Some(palette::BLACK);
    capacity.border_width = Some(1);

    let mut used = Dataset::new("Capacidad Ocupada", section.ocupada.clone());
    used.background_color = Some(Paint::Single(palette::PURPLE));

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: section.labels.clone(),
            datasets: vec![capacity, used],
        },
        options: ChartOptions::new(1.5, Legend::at(LegendPosition::Top)).with_y_axis(None),
        tooltip: Some(TooltipText::Occupancy {
            percentages: section.porcentajes.clone(),
        }),
    }
}

/// 4. Productos por categoría
pub fn products_by_category_chart(section: &LabeledSeries) -> ChartConfig {
    let colors = (0..section.data.len())
        .map(|i| palette::CATEGORY_CYCLE[i % palette::CATEGORY_CYCLE.len()])
        .collect();

    let mut amount = Dataset::new("Cantidad", section.data.clone());
    amount.background_color = Some(Paint::PerPoint(colors));
    amount.border_width = Some(2);
    amount.border_color = Some(palette::WHITE);

    let values: Vec<f64> = section.data.iter().map(|v| v.unwrap_or(0.0)).collect();

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: section.labels.clone(),
            datasets: vec![amount],
        },
        options: ChartOptions::new(2.5, Legend::at(LegendPosition::Right)),
        tooltip: Some(TooltipText::Category {
            percentages: category_percentages(&values),
        }),
    }
}

/// Графики дашборда и их canvas на странице
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardChart {
    ReceptionsDispatches,
    WarehouseDistribution,
    WarehouseOccupancy,
    ProductsByCategory,
}

impl DashboardChart {
    pub const ALL: [DashboardChart; 4] = [
        DashboardChart::ReceptionsDispatches,
        DashboardChart::WarehouseDistribution,
        DashboardChart::WarehouseOccupancy,
        DashboardChart::ProductsByCategory,
    ];

    pub fn canvas_id(&self) -> &'static str {
        match self {
            DashboardChart::ReceptionsDispatches => "chartRecepcionesDespachos",
            DashboardChart::WarehouseDistribution => "chartDistribucionAlmacenes",
            DashboardChart::WarehouseOccupancy => "chartOcupacionAlmacenes",
            DashboardChart::ProductsByCategory => "chartProductosCategoria",
        }
    }

    /// Конфигурация, если в данных есть нужная секция
    pub fn config(&self, data: &DashboardData) -> Option<ChartConfig> {
        match self {
            DashboardChart::ReceptionsDispatches => data
                .recepciones_despachos
                .as_ref()
                .map(receptions_dispatches_chart),
            DashboardChart::WarehouseDistribution => data
                .distribucion_almacenes
                .as_ref()
                .map(warehouse_distribution_chart),
            DashboardChart::WarehouseOccupancy => data
                .ocupacion_almacenes
                .as_ref()
                .map(warehouse_occupancy_chart),
            DashboardChart::ProductsByCategory => data
                .productos_categoria
                .as_ref()
                .map(products_by_category_chart),
        }
    }
}

/// Какие графики строить: есть и секция данных, и canvas.
/// Графики независимы - отсутствие одного не влияет на остальные.
pub fn plan_charts(
    data: &DashboardData,
    has_mount_point: impl Fn(&str) -> bool,
) -> Vec<(DashboardChart, ChartConfig)> {
    DashboardChart::ALL
        .iter()
        .filter(|chart| has_mount_point(chart.canvas_id()))
        .filter_map(|chart| chart.config(data).map(|config| (*chart, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(labels: &[&str], data: &[f64]) -> LabeledSeries {
        LabeledSeries {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            data: data.iter().copied().map(Some).collect(),
        }
    }

    fn full_data() -> DashboardData {
        DashboardData {
            recepciones_despachos: Some(ReceptionsDispatches {
                labels: vec!["Lun".into(), "Mar".into()],
                recepciones: vec![Some(3.0), Some(5.0)],
                despachos: vec![Some(1.0), None],
            }),
            distribucion_almacenes: Some(series(&["Central", "Norte"], &[120.0, 80.0])),
            ocupacion_almacenes: Some(WarehouseOccupancy {
                labels: vec!["Central".into()],
                capacidad: vec![Some(500.0)],
                ocupada: vec![Some(250.0)],
                porcentajes: vec![Some(50.0)],
            }),
            productos_categoria: Some(series(&["A", "B", "C"], &[1.0, 1.0, 1.0])),
        }
    }

    #[test]
    fn test_all_charts_planned() {
        let planned = plan_charts(&full_data(), |_| true);
        let kinds: Vec<_> = planned.iter().map(|(chart, _)| *chart).collect();
        assert_eq!(kinds, DashboardChart::ALL.to_vec());
    }

    #[test]
    fn test_missing_section_does_not_block_others() {
        let mut data = full_data();
        data.distribucion_almacenes = None;
        data.productos_categoria = None;
        let planned = plan_charts(&data, |_| true);
        let kinds: Vec<_> = planned.iter().map(|(chart, _)| *chart).collect();
        assert_eq!(
            kinds,
            vec![
                DashboardChart::ReceptionsDispatches,
                DashboardChart::WarehouseOccupancy
            ]
        );
    }

    #[test]
    fn test_missing_mount_point_skips_only_that_chart() {
        let planned = plan_charts(&full_data(), |id| id != "chartOcupacionAlmacenes");
        assert_eq!(planned.len(), 3);
        assert!(planned
            .iter()
            .all(|(chart, _)| *chart != DashboardChart::WarehouseOccupancy));
    }

    #[test]
    fn test_empty_payload_plans_nothing() {
        assert!(plan_charts(&DashboardData::default(), |_| true).is_empty());
    }

    #[test]
    fn test_category_percentages_sum_to_hundred() {
        let cases: Vec<Vec<f64>> = vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            vec![0.5, 13.0, 999.0],
            vec![42.0],
            vec![3.0, 0.0, 7.0],
        ];
        for values in cases {
            let percentages = category_percentages(&values);
            let sum: f64 = percentages.iter().sum();
            let tolerance = 0.1 * values.len() as f64 + 1e-9;
            assert!(
                (sum - 100.0).abs() <= tolerance,
                "values {:?} -> {:?} (sum {})",
                values,
                percentages,
                sum
            );
        }
    }

    #[test]
    fn test_category_percentages_rounding() {
        assert_eq!(category_percentages(&[1.0, 2.0]), vec![33.3, 66.7]);
        assert_eq!(category_percentages(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(category_percentages(&[]).is_empty());
    }

    #[test]
    fn test_category_tooltip() {
        let config = products_by_category_chart(&series(&["Bebidas", "Limpieza"], &[1.0, 3.0]));
        let tooltip = config.tooltip.unwrap();
        assert_eq!(tooltip.callback_name(), "label");
        assert_eq!(tooltip.render("Bebidas", 1.0, 0), "Bebidas: 1 (25.0%)");
        assert_eq!(tooltip.render("Limpieza", 3.0, 1), "Limpieza: 3 (75.0%)");
    }

    #[test]
    fn test_occupancy_tooltip() {
        assert_eq!(occupancy_after_label(&[Some(45.678)], 0), "Ocupación: 45.68%");
        assert_eq!(occupancy_after_label(&[Some(45.678)], 3), "");
        assert_eq!(occupancy_after_label(&[Some(0.0)], 0), "");
        assert_eq!(occupancy_after_label(&[None], 0), "");
        assert_eq!(occupancy_after_label(&[], 0), "");
    }

    #[test]
    fn test_category_colors_cycle() {
        let values: Vec<f64> = (1..=8).map(f64::from).collect();
        let labels: Vec<&str> = vec!["x"; 8];
        let config = products_by_category_chart(&series(&labels, &values));
        let Some(Paint::PerPoint(colors)) = &config.data.datasets[0].background_color else {
            panic!("doughnut must use per-point colors");
        };
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[6], palette::PURPLE);
        assert_eq!(colors[7], palette::BLACK);
    }

    #[test]
    fn test_line_chart_json() {
        let config = receptions_dispatches_chart(full_data().recepciones_despachos.as_ref().unwrap());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "line");
        assert_eq!(value["data"]["datasets"][0]["label"], "Recepciones");
        assert_eq!(value["data"]["datasets"][0]["borderColor"], "#7c3aed");
        assert_eq!(value["data"]["datasets"][1]["backgroundColor"], "rgba(26, 26, 26, 0.2)");
        assert_eq!(value["data"]["datasets"][1]["fill"], true);
        assert_eq!(value["data"]["datasets"][1]["data"], json!([1.0, null]));
        assert_eq!(value["options"]["aspectRatio"], 2.5);
        assert_eq!(value["options"]["plugins"]["legend"], json!({"position": "top"}));
        assert_eq!(
            value["options"]["scales"]["y"],
            json!({"beginAtZero": true, "ticks": {"stepSize": 1.0}})
        );
        assert!(value.get("tooltip").is_none());
    }

    #[test]
    fn test_distribution_chart_hides_legend() {
        let config = warehouse_distribution_chart(&series(&["Central"], &[10.0]));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "bar");
        assert_eq!(value["options"]["plugins"]["legend"], json!({"display": false}));
        assert_eq!(value["options"]["scales"]["y"], json!({"beginAtZero": true}));
        assert_eq!(value["options"]["aspectRatio"], 1.5);
    }

    #[test]
    fn test_doughnut_has_no_scales() {
        let config = products_by_category_chart(&series(&["A"], &[1.0]));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "doughnut");
        assert!(value["options"].get("scales").is_none());
        assert_eq!(value["options"]["plugins"]["legend"]["position"], "right");
        assert_eq!(value["data"]["datasets"][0]["borderColor"], "#fff");
        assert_eq!(value["data"]["datasets"][0]["borderWidth"], 2);
    }

    #[test]
    fn test_category_gaps_count_as_zero() {
        let section = LabeledSeries {
            labels: vec!["A".into(), "B".into()],
            data: vec![None, Some(4.0)],
        };
        let tooltip = products_by_category_chart(&section).tooltip.unwrap();
        assert_eq!(tooltip.render("B", 4.0, 1), "B: 4 (100.0%)");
        assert_eq!(tooltip.render("A", 0.0, 0), "A: 0 (0.0%)");
    }
}
