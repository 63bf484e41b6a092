use contracts::dashboards::d100_warehouse_summary::DashboardData;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

use crate::shared::dom;

/// `<script id="dashboard-data" type="application/json">` в шаблоне дашборда
pub const DATA_ELEMENT_ID: &str = "dashboard-data";

pub const SECTION_RECEPTIONS_DISPATCHES: &str = "recepcionesDespachos";
pub const SECTION_WAREHOUSE_DISTRIBUTION: &str = "distribucionAlmacenes";
pub const SECTION_WAREHOUSE_OCCUPANCY: &str = "ocupacionAlmacenes";
pub const SECTION_PRODUCTS_BY_CATEGORY: &str = "productosCategoria";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardDataError {
    /// На странице нет элемента с данными
    MissingElement,
    /// Текст не является JSON-объектом; ни один график не строится
    Malformed(String),
}

impl fmt::Display for DashboardDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardDataError::MissingElement => {
                write!(f, "Dashboard data element '#{}' not found", DATA_ELEMENT_ID)
            }
            DashboardDataError::Malformed(e) => write!(f, "Failed to parse dashboard data: {}", e),
        }
    }
}

/// Секция, которую не удалось разобрать; остальные графики строятся
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSection {
    pub section: &'static str,
    pub reason: String,
}

impl fmt::Display for SkippedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dashboard section '{}' skipped: {}", self.section, self.reason)
    }
}

/// Разобранные данные и список пропущенных секций
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDashboard {
    pub data: DashboardData,
    pub skipped: Vec<SkippedSection>,
}

fn section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &'static str,
    skipped: &mut Vec<SkippedSection>,
) -> Option<T> {
    let value = root.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            skipped.push(SkippedSection {
                section: key,
                reason: e.to_string(),
            });
            None
        }
    }
}

/// Разбирает JSON дашборда по секциям.
///
/// Синтаксическая ошибка или не-объект - `Malformed`. Секция неверной формы
/// попадает в `skipped` и не мешает остальным.
pub fn parse_dashboard_data(text: &str) -> Result<ParsedDashboard, DashboardDataError> {
    let root: Value =
        serde_json::from_str(text).map_err(|e| DashboardDataError::Malformed(e.to_string()))?;
    let Value::Object(root) = root else {
        return Err(DashboardDataError::Malformed(
            "expected a JSON object".to_string(),
        ));
    };

    let mut skipped = Vec::new();
    let data = DashboardData {
        recepciones_despachos: section(&root, SECTION_RECEPTIONS_DISPATCHES, &mut skipped),
        distribucion_almacenes: section(&root, SECTION_WAREHOUSE_DISTRIBUTION, &mut skipped),
        ocupacion_almacenes: section(&root, SECTION_WAREHOUSE_OCCUPANCY, &mut skipped),
        productos_categoria: section(&root, SECTION_PRODUCTS_BY_CATEGORY, &mut skipped),
    };
    Ok(ParsedDashboard { data, skipped })
}

/// Читает и разбирает встроенные данные дашборда
pub fn load_dashboard_data() -> Result<ParsedDashboard, DashboardDataError> {
    let element = dom::document()
        .and_then(|d| d.get_element_by_id(DATA_ELEMENT_ID))
        .ok_or(DashboardDataError::MissingElement)?;
    parse_dashboard_data(&element.text_content().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_payload() {
        let parsed = parse_dashboard_data(
            r#"{"distribucionAlmacenes": {"labels": ["Central"], "data": [7]}}"#,
        )
        .unwrap();
        assert_eq!(parsed.data.section_count(), 1);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_malformed_payload() {
        let err = parse_dashboard_data("{\"recepcionesDespachos\": ").unwrap_err();
        assert!(matches!(err, DashboardDataError::Malformed(_)));
        assert!(err.to_string().starts_with("Failed to parse dashboard data"));
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(
            parse_dashboard_data(""),
            Err(DashboardDataError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            parse_dashboard_data("[1, 2]"),
            Err(DashboardDataError::Malformed(_))
        ));
    }

    #[test]
    fn test_numeric_labels_keep_every_section() {
        let parsed = parse_dashboard_data(
            r#"{
                "recepcionesDespachos": {"labels": [1, 2, 3], "recepciones": [4, 5, 6], "despachos": [1, 1, 2]},
                "distribucionAlmacenes": {"labels": ["Central"], "data": [7]}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.data.section_count(), 2);
        assert!(parsed.skipped.is_empty());
        let rd = parsed.data.recepciones_despachos.unwrap();
        assert_eq!(rd.labels, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_null_values_do_not_block_other_sections() {
        let parsed = parse_dashboard_data(
            r#"{
                "ocupacionAlmacenes": {"labels": ["Central"], "capacidad": [500], "ocupada": [null]},
                "productosCategoria": {"labels": ["A", "B"], "data": [1, 3]}
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.data.section_count(), 2);
        assert_eq!(parsed.data.ocupacion_almacenes.unwrap().ocupada, vec![None]);
    }

    #[test]
    fn test_bad_section_is_skipped_alone() {
        let parsed = parse_dashboard_data(
            r#"{
                "distribucionAlmacenes": {"labels": "Central", "data": 7},
                "productosCategoria": {"labels": ["A"], "data": [1]},
                "recepcionesDespachos": null
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.data.section_count(), 1);
        assert!(parsed.data.productos_categoria.is_some());
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].section, SECTION_WAREHOUSE_DISTRIBUTION);
        assert!(parsed.skipped[0]
            .to_string()
            .starts_with("Dashboard section 'distribucionAlmacenes' skipped"));
    }
}
