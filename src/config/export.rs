#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    pub nested_fields: Vec<String>,
}

// Parses the comma-separated CAMPOS_DATOS_EXPORTAR list: entries are
// trimmed, empty entries dropped, order and duplicates preserved
pub fn parse_field_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(String::from)
        .collect()
}
