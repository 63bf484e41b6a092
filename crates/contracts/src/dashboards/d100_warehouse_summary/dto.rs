use serde::{Deserialize, Deserializer, Serialize};

/// Данные главного дашборда склада.
///
/// Сервер встраивает их в страницу одним JSON-объектом. Любая секция может
/// отсутствовать: соответствующий график просто не строится.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recepciones_despachos: Option<ReceptionsDispatches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribucion_almacenes: Option<LabeledSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocupacion_almacenes: Option<WarehouseOccupancy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productos_categoria: Option<LabeledSeries>,
}

impl DashboardData {
    /// Количество присутствующих секций
    pub fn section_count(&self) -> usize {
        [
            self.recepciones_despachos.is_some(),
            self.distribucion_almacenes.is_some(),
            self.ocupacion_almacenes.is_some(),
            self.productos_categoria.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Recepciones vs despachos по периодам
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceptionsDispatches {
    #[serde(deserialize_with = "labels")]
    pub labels: Vec<String>,
    pub recepciones: Vec<Option<f64>>,
    pub despachos: Vec<Option<f64>>,
}

/// Одна подписанная серия значений (распределение по складам, товары по категориям)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    #[serde(deserialize_with = "labels")]
    pub labels: Vec<String>,
    pub data: Vec<Option<f64>>,
}

/// Вместимость складов против занятого объёма
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseOccupancy {
    #[serde(deserialize_with = "labels")]
    pub labels: Vec<String>,
    pub capacidad: Vec<Option<f64>>,
    pub ocupada: Vec<Option<f64>>,
    /// Процент занятости по каждому складу (может отсутствовать)
    #[serde(default)]
    pub porcentajes: Vec<Option<f64>>,
}

/// Подписи оси: строки, числа (номера дней, годы) или null.
/// `null` превращается в пустую подпись, числа - в их текст.
fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(Vec::<Option<Raw>>::deserialize(deserializer)?
        .into_iter()
        .map(|raw| match raw {
            Some(Raw::Number(n)) => n.to_string(),
            Some(Raw::Text(s)) => s,
            None => String::new(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let json = r#"{
            "recepcionesDespachos": {"labels": ["Lun", "Mar"], "recepciones": [3, 4], "despachos": [1, 2]},
            "distribucionAlmacenes": {"labels": ["Central"], "data": [120]},
            "ocupacionAlmacenes": {"labels": ["Central"], "capacidad": [500], "ocupada": [250], "porcentajes": [50.0]},
            "productosCategoria": {"labels": ["A", "B"], "data": [1, 3]}
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.section_count(), 4);
        let rd = data.recepciones_despachos.unwrap();
        assert_eq!(rd.labels, vec!["Lun", "Mar"]);
        assert_eq!(rd.despachos, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_missing_sections() {
        let data: DashboardData =
            serde_json::from_str(r#"{"productosCategoria": {"labels": [], "data": []}}"#).unwrap();
        assert_eq!(data.section_count(), 1);
        assert!(data.recepciones_despachos.is_none());
        assert!(data.productos_categoria.is_some());
    }

    #[test]
    fn test_porcentajes_optional() {
        let data: DashboardData = serde_json::from_str(
            r#"{"ocupacionAlmacenes": {"labels": ["X"], "capacidad": [10], "ocupada": [5]}}"#,
        )
        .unwrap();
        assert!(data.ocupacion_almacenes.unwrap().porcentajes.is_empty());
    }

    #[test]
    fn test_wrong_section_shape_is_error() {
        let result: Result<DashboardData, _> =
            serde_json::from_str(r#"{"distribucionAlmacenes": {"labels": "Central"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_labels() {
        let series: LabeledSeries =
            serde_json::from_str(r#"{"labels": [1, 2.5, "Dic", null], "data": [4, 5, 6, 7]}"#).unwrap();
        assert_eq!(series.labels, vec!["1", "2.5", "Dic", ""]);
    }

    #[test]
    fn test_null_values_are_kept_as_gaps() {
        let occupancy: WarehouseOccupancy = serde_json::from_str(
            r#"{"labels": ["Central", "Norte"], "capacidad": [500, 300], "ocupada": [null, 120], "porcentajes": [null, 40]}"#,
        )
        .unwrap();
        assert_eq!(occupancy.ocupada, vec![None, Some(120.0)]);
        assert_eq!(occupancy.porcentajes, vec![None, Some(40.0)]);

        let json = serde_json::to_value(&occupancy).unwrap();
        assert!(json["ocupada"][0].is_null());
    }
}
