//! Fluid recommendation records
//!
//! A [`DetailRecord`] holds the recommendations for one (make, model,
//! year-range) triple. Every field is optional; the loaded JSON is trusted
//! as-is apart from [`DetailRecord::normalize_links`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::products::{resolve_product_url, SlugTable, CONSULT_SENTINEL};

/// Heading shown for a record without `model_year_text`
pub const UNTITLED_RECORD: &str = "Car Details";

/// The fluid fields a record may carry, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FluidKind {
    EngineOil,
    GearboxOil,
    RearAxleOil,
    DiffOil,
    PasFluid,
    BrakeFluid,
    Coolant,
}

/// All fluid kinds in display order
pub const FLUID_KINDS: &[FluidKind] = &[
    FluidKind::EngineOil,
    FluidKind::GearboxOil,
    FluidKind::RearAxleOil,
    FluidKind::DiffOil,
    FluidKind::PasFluid,
    FluidKind::BrakeFluid,
    FluidKind::Coolant,
];

impl FluidKind {
    /// Human-readable label ("Engine Oil")
    pub fn label(self) -> &'static str {
        match self {
            FluidKind::EngineOil => "Engine Oil",
            FluidKind::GearboxOil => "Gearbox Oil",
            FluidKind::RearAxleOil => "Rear Axle Oil",
            FluidKind::DiffOil => "Diff Oil",
            FluidKind::PasFluid => "PAS Fluid",
            FluidKind::BrakeFluid => "Brake Fluid",
            FluidKind::Coolant => "Coolant",
        }
    }

    /// JSON field name of the fluid value
    pub fn field(self) -> &'static str {
        match self {
            FluidKind::EngineOil => "engine_oil",
            FluidKind::GearboxOil => "gearbox_oil",
            FluidKind::RearAxleOil => "rear_axle_oil",
            FluidKind::DiffOil => "diff_oil",
            FluidKind::PasFluid => "pas_fluid",
            FluidKind::BrakeFluid => "brake_fluid",
            FluidKind::Coolant => "coolant",
        }
    }

    /// JSON field name of the stored purchase link
    pub fn link_field(self) -> &'static str {
        match self {
            FluidKind::EngineOil => "engine_oil_link",
            FluidKind::GearboxOil => "gearbox_oil_link",
            FluidKind::RearAxleOil => "rear_axle_oil_link",
            FluidKind::DiffOil => "diff_oil_link",
            FluidKind::PasFluid => "pas_fluid_link",
            FluidKind::BrakeFluid => "brake_fluid_link",
            FluidKind::Coolant => "coolant_link",
        }
    }
}

/// Fluid recommendations for one make/model/year-range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DetailRecord {
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub model_year_text: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub year_range: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub engine_oil: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub engine_oil_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub gearbox_oil: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub gearbox_oil_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub rear_axle_oil: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub rear_axle_oil_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub diff_oil: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub diff_oil_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub pas_fluid: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub pas_fluid_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub brake_fluid: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub brake_fluid_link: Option<String>,

    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub coolant: Option<String>,
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub coolant_link: Option<String>,
}

/// Accept any JSON scalar as text; `null`, arrays and objects read as absent
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => Some(s),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(n)) => Some(n.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
        Some(Scalar::Other(_)) | None => None,
    })
}

/// One displayed fluid line with its resolved product link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recommendation {
    pub kind: FluidKind,
    pub label: &'static str,
    pub fluid: String,
    pub product_url: Option<String>,
}

impl DetailRecord {
    /// Heading for display, falling back to [`UNTITLED_RECORD`]
    pub fn title(&self) -> &str {
        self.model_year_text.as_deref().unwrap_or(UNTITLED_RECORD)
    }

    /// Fluid value for a kind, if present
    pub fn fluid(&self, kind: FluidKind) -> Option<&str> {
        match kind {
            FluidKind::EngineOil => self.engine_oil.as_deref(),
            FluidKind::GearboxOil => self.gearbox_oil.as_deref(),
            FluidKind::RearAxleOil => self.rear_axle_oil.as_deref(),
            FluidKind::DiffOil => self.diff_oil.as_deref(),
            FluidKind::PasFluid => self.pas_fluid.as_deref(),
            FluidKind::BrakeFluid => self.brake_fluid.as_deref(),
            FluidKind::Coolant => self.coolant.as_deref(),
        }
    }

    /// Stored purchase link for a kind, if present
    pub fn link(&self, kind: FluidKind) -> Option<&str> {
        match kind {
            FluidKind::EngineOil => self.engine_oil_link.as_deref(),
            FluidKind::GearboxOil => self.gearbox_oil_link.as_deref(),
            FluidKind::RearAxleOil => self.rear_axle_oil_link.as_deref(),
            FluidKind::DiffOil => self.diff_oil_link.as_deref(),
            FluidKind::PasFluid => self.pas_fluid_link.as_deref(),
            FluidKind::BrakeFluid => self.brake_fluid_link.as_deref(),
            FluidKind::Coolant => self.coolant_link.as_deref(),
        }
    }

    /// Stored link fit to offer as a purchase link: non-empty and not the
    /// consult sentinel. Apply [`normalize_links`](Self::normalize_links) first.
    pub fn purchase_link(&self, kind: FluidKind) -> Option<&str> {
        self.link(kind)
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.to_lowercase().starts_with(CONSULT_SENTINEL))
    }

    fn link_mut(&mut self, kind: FluidKind) -> &mut Option<String> {
        match kind {
            FluidKind::EngineOil => &mut self.engine_oil_link,
            FluidKind::GearboxOil => &mut self.gearbox_oil_link,
            FluidKind::RearAxleOil => &mut self.rear_axle_oil_link,
            FluidKind::DiffOil => &mut self.diff_oil_link,
            FluidKind::PasFluid => &mut self.pas_fluid_link,
            FluidKind::BrakeFluid => &mut self.brake_fluid_link,
            FluidKind::Coolant => &mut self.coolant_link,
        }
    }

    /// Present, non-empty fluid values in display order
    pub fn fluids(&self) -> impl Iterator<Item = (FluidKind, &str)> + '_ {
        FLUID_KINDS
            .iter()
            .filter_map(|&kind| self.fluid(kind).filter(|v| !v.is_empty()).map(|v| (kind, v)))
    }

    /// Resolve a product link for every present fluid.
    ///
    /// Links are derived from the fluid label, never from the stored
    /// `<field>_link` values.
    pub fn recommendations(&self, slugs: &SlugTable) -> Vec<Recommendation> {
        self.fluids()
            .map(|(kind, fluid)| Recommendation {
                kind,
                label: kind.label(),
                fluid: fluid.to_string(),
                product_url: resolve_product_url(fluid, slugs),
            })
            .collect()
    }

    /// Repair stored links that lost their scheme.
    ///
    /// A non-empty link that starts with neither `http://`, `https://` nor the
    /// consult sentinel becomes `https://` plus the link with leading colons
    /// and slashes stripped (`"://shop/x"` → `"https://shop/x"`).
    pub fn normalize_links(&mut self) {
        for &kind in FLUID_KINDS {
            let slot = self.link_mut(kind);
            let Some(link) = slot.as_deref() else {
                continue;
            };
            let link = link.trim();
            let lower = link.to_lowercase();
            let repaired = if link.is_empty()
                || lower.starts_with("http://")
                || lower.starts_with("https://")
                || lower.starts_with(CONSULT_SENTINEL)
            {
                link.to_string()
            } else {
                format!("https://{}", link.trim_start_matches([':', '/']))
            };
            *slot = Some(repaired);
        }
    }

    /// Copy of this record with [`normalize_links`](Self::normalize_links) applied
    pub fn with_normalized_links(&self) -> DetailRecord {
        let mut record = self.clone();
        record.normalize_links();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DetailRecord {
        serde_json::from_value(serde_json::json!({
            "model_year_text": "BMW 3 Series 1990-1995",
            "engine_oil": "XL30",
            "gearbox_oil": "Consult your dealer",
            "coolant": "",
            "engine_oil_link": "://www.example.com/xl30",
            "gearbox_oil_link": "consult",
            "diff_oil_link": "https://www.example.com/ep90"
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let record: DetailRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, DetailRecord::default());
        assert_eq!(record.title(), UNTITLED_RECORD);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let record = DetailRecord {
            engine_oil: Some("XL30".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({ "engine_oil": "XL30" })
        );
    }

    #[test]
    fn test_fluids_skip_empty_values() {
        let record = sample();
        let kinds: Vec<FluidKind> = record.fluids().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![FluidKind::EngineOil, FluidKind::GearboxOil]);
    }

    #[test]
    fn test_recommendations_resolve_links() {
        let record = sample();
        let slugs = SlugTable::from_pairs([("classic-xl30", "https://x/y")]);
        let recs = record.recommendations(&slugs);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].label, "Engine Oil");
        assert_eq!(recs[0].product_url.as_deref(), Some("https://x/y"));
        assert_eq!(recs[1].kind, FluidKind::GearboxOil);
        assert_eq!(recs[1].product_url, None);
    }

    #[test]
    fn test_normalize_links() {
        let record = sample().with_normalized_links();
        assert_eq!(
            record.engine_oil_link.as_deref(),
            Some("https://www.example.com/xl30")
        );
        assert_eq!(record.gearbox_oil_link.as_deref(), Some("consult"));
        assert_eq!(
            record.diff_oil_link.as_deref(),
            Some("https://www.example.com/ep90")
        );
        assert_eq!(record.coolant_link, None);
    }

    #[test]
    fn test_normalize_links_strips_colons_and_slashes() {
        let mut record = DetailRecord {
            engine_oil_link: Some(" ://shop.test/xl30 ".into()),
            gearbox_oil_link: Some("//shop.test/ep90".into()),
            rear_axle_oil_link: Some("shop.test/ep140".into()),
            brake_fluid_link: Some("Consult specialist".into()),
            pas_fluid_link: Some("HTTP://shop.test/atf".into()),
            coolant_link: Some(String::new()),
            ..Default::default()
        };
        record.normalize_links();

        assert_eq!(record.engine_oil_link.as_deref(), Some("https://shop.test/xl30"));
        assert_eq!(record.gearbox_oil_link.as_deref(), Some("https://shop.test/ep90"));
        assert_eq!(record.rear_axle_oil_link.as_deref(), Some("https://shop.test/ep140"));
        assert_eq!(record.brake_fluid_link.as_deref(), Some("Consult specialist"));
        assert_eq!(record.pas_fluid_link.as_deref(), Some("HTTP://shop.test/atf"));
        assert_eq!(record.coolant_link.as_deref(), Some(""));
    }

    #[test]
    fn test_purchase_link_skips_consult_and_empty() {
        let mut record = sample();
        record.coolant_link = Some("  ".into());
        let record = record.with_normalized_links();

        assert_eq!(
            record.purchase_link(FluidKind::EngineOil),
            Some("https://www.example.com/xl30")
        );
        assert_eq!(record.purchase_link(FluidKind::GearboxOil), None);
        assert_eq!(record.purchase_link(FluidKind::Coolant), None);
        assert_eq!(record.purchase_link(FluidKind::BrakeFluid), None);
    }

    #[test]
    fn test_non_string_scalars_read_as_text() {
        let record: DetailRecord = serde_json::from_value(serde_json::json!({
            "year_range": 1959,
            "engine_oil": "XL30",
            "gearbox_oil": 90.5,
            "diff_oil": true,
            "coolant": null,
            "brake_fluid": ["DOT4"],
            "pas_fluid": { "grade": "ATF" }
        }))
        .unwrap();

        assert_eq!(record.year_range.as_deref(), Some("1959"));
        assert_eq!(record.engine_oil.as_deref(), Some("XL30"));
        assert_eq!(record.gearbox_oil.as_deref(), Some("90.5"));
        assert_eq!(record.diff_oil.as_deref(), Some("true"));
        assert_eq!(record.coolant, None);
        assert_eq!(record.brake_fluid, None);
        assert_eq!(record.pas_fluid, None);
    }

    #[test]
    fn test_kind_field_names_match_serde() {
        let value = serde_json::to_value(FluidKind::RearAxleOil).unwrap();
        assert_eq!(value, serde_json::json!(FluidKind::RearAxleOil.field()));
        for &kind in FLUID_KINDS {
            assert_eq!(kind.link_field(), format!("{}_link", kind.field()));
        }
    }
}
