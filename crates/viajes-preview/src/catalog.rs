//! Package data as published by the upstream API.
//!
//! The listing is produced by an admin console, so field types drift
//! (prices as `"12000.00"`, destinations as strings or records). Decoding is
//! lenient per field: a value of the wrong shape is treated as absent instead
//! of rejecting the whole listing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A travel package from `GET /paquetes/publicos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    /// URL slug, e.g. `cancun-7d`.
    #[serde(rename = "codigoUrl", default, deserialize_with = "lenient")]
    pub codigo_url: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub titulo: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub descripcion: Option<String>,

    /// Duration in days.
    #[serde(default, deserialize_with = "lenient_days")]
    pub duracion_dias: Option<u32>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub destinos: Vec<Destination>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub imagenes: Vec<Image>,

    #[serde(default, deserialize_with = "lenient")]
    pub imagen_principal: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub imagen_portada: Option<String>,

    /// Total price in `moneda`.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub precio_total: Option<f64>,

    /// ISO currency code, e.g. `MXN`.
    #[serde(default, deserialize_with = "lenient")]
    pub moneda: Option<String>,
}

/// A destination entry: either a bare name or a record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    Name(String),
    Record {
        #[serde(default)]
        nombre: Option<String>,
        #[serde(default)]
        destino: Option<String>,
        #[serde(default)]
        ciudad: Option<String>,
    },
}

impl Destination {
    /// The display name, if the entry carries one.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Record {
                nombre,
                destino,
                ciudad,
            } => nombre.as_deref().or(destino.as_deref()).or(ciudad.as_deref()),
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }
}

/// An image entry: either a bare URL or a record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Image {
    Url(String),
    Record {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        secure_url: Option<String>,
        #[serde(default)]
        ruta: Option<String>,
    },
}

impl Image {
    /// The URL or path of this image, if any.
    pub fn location(&self) -> Option<&str> {
        let location = match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Record {
                url,
                secure_url,
                ruta,
            } => url.as_deref().or(secure_url.as_deref()).or(ruta.as_deref()),
        };
        location.map(str::trim).filter(|l| !l.is_empty())
    }
}

impl Package {
    /// Whether this package is published under `slug` (exact, case-sensitive).
    pub fn matches(&self, slug: &str) -> bool {
        self.codigo_url.as_deref() == Some(slug)
    }

    /// Destination names in listing order.
    pub fn destination_names(&self) -> Vec<&str> {
        self.destinos.iter().filter_map(Destination::name).collect()
    }

    /// Image candidates in preference order: the first image, then the
    /// secondary image fields.
    pub fn image_candidates(&self) -> impl Iterator<Item = &str> {
        self.imagenes
            .first()
            .and_then(Image::location)
            .into_iter()
            .chain(self.imagen_principal.as_deref())
            .chain(self.imagen_portada.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Deserialize any value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a list, dropping entries of the wrong shape.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Accept a JSON number or a numeric string.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    };
    Ok(amount.filter(|a: &f64| a.is_finite()))
}

fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let days = lenient_amount(deserializer)?;
    Ok(days
        .filter(|d| *d >= 1.0 && *d <= f64::from(u32::MAX))
        .map(|d| d.round() as u32))
}
