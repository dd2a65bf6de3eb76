//! Records returned by the WMS products endpoint and the flattened row shape
//! that ends up in the spreadsheet.
//!
//! The API is loosely typed: nested objects may be missing, `null`, or of an
//! unexpected shape. Rather than probing raw JSON at use sites, every nested
//! field decodes into an explicit optional or list type and anything malformed
//! collapses to the empty case during deserialization.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder used when a product carries no usable category.
pub const NO_CATEGORY: &str = "Sem Categoria";

/// Spreadsheet header labels, in column order.
pub const COLUMNS: [&str; 9] = [
    "Código",
    "Descrição",
    "Categoria",
    "Unidade Medida",
    "Descrição SKU",
    "Código de Barras",
    "Situação SKU",
    "Controla Lote",
    "Controla Validade",
];

/// A scalar JSON value as it will be stored in a spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// Plain string value.
    Text(String),
    /// Numeric value, kept with its original JSON representation.
    Number(serde_json::Number),
    /// Boolean value.
    Bool(bool),
    /// Missing, `null`, or a structured value with no cell representation.
    #[default]
    Empty,
}

impl FieldValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Returns the text content when the value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Number(number) => FieldValue::Number(number),
            Value::Bool(flag) => FieldValue::Bool(flag),
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Empty,
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(FieldValue::from)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// Product category as nested under `categoriaProduto`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Category {
    #[serde(rename = "descricao", default, deserialize_with = "optional")]
    pub description: Option<String>,
}

/// Free-form product attribute, e.g. "Controla Lote".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Characteristic {
    #[serde(rename = "descricao", default)]
    pub description: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Barcode {
    #[serde(rename = "codigoBarras", default)]
    pub value: FieldValue,
}

/// A stock-keeping unit of a product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sku {
    #[serde(rename = "descricao", default)]
    pub description: FieldValue,
    #[serde(rename = "situacao", default)]
    pub situation: FieldValue,
    /// Barcode entries in API order; malformed entries stay in place as `None`
    /// so that "first barcode" keeps its positional meaning.
    #[serde(rename = "codigosBarras", default, deserialize_with = "entries")]
    pub barcodes: Vec<Option<Barcode>>,
}

/// A catalog item as returned by the products endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(rename = "codigo", default)]
    pub code: FieldValue,
    #[serde(rename = "descricaoComercial", default)]
    pub commercial_description: FieldValue,
    #[serde(rename = "unidadeMedida", default)]
    pub unit_of_measure: FieldValue,
    #[serde(rename = "categoriaProduto", default, deserialize_with = "record")]
    pub category: Option<Category>,
    #[serde(rename = "caracteristicas", default, deserialize_with = "records")]
    pub characteristics: Vec<Characteristic>,
    #[serde(default, deserialize_with = "records")]
    pub skus: Vec<Sku>,
}

/// One page of the products listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPage {
    /// Entries in API order; non-object entries are kept as `None` so an
    /// empty listing can be told apart from a malformed one.
    #[serde(default, deserialize_with = "entries")]
    pub items: Vec<Option<Product>>,
    #[serde(rename = "hasNext", default, deserialize_with = "flag")]
    pub has_next: bool,
}

/// A flattened (product, SKU) pair, ready for display and export.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub code: FieldValue,
    pub description: FieldValue,
    pub category: String,
    pub unit_of_measure: FieldValue,
    pub sku_description: FieldValue,
    pub barcode: FieldValue,
    pub sku_situation: FieldValue,
    pub has_lot_control: bool,
    pub has_expiry_control: bool,
}

impl OutputRow {
    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [FieldValue; 9] {
        [
            self.code.clone(),
            self.description.clone(),
            FieldValue::Text(self.category.clone()),
            self.unit_of_measure.clone(),
            self.sku_description.clone(),
            self.barcode.clone(),
            self.sku_situation.clone(),
            FieldValue::Bool(self.has_lot_control),
            FieldValue::Bool(self.has_expiry_control),
        ]
    }
}

/// Decodes a JSON object into `T`; any other shape yields `None`.
fn object<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_object() {
        serde_json::from_value(value).ok()
    } else {
        None
    }
}

fn record<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(deserializer).map(object)
}

/// Decodes a plain value, treating a mismatched shape as absent.
fn optional<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// List of well-formed records; non-object entries are dropped and a value
/// that is not a list decodes as empty.
fn records<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(entries::<D, T>(deserializer)?.into_iter().flatten().collect())
}

fn entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(object).collect()),
        _ => Ok(Vec::new()),
    }
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
