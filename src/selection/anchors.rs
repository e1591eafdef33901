//! Declarative keyword-to-anchor rules.
//!
//! Order is significant twice over: the first theme whose keywords appear in
//! the question is tried first, and inside a theme the first anchor found in
//! the document wins regardless of where later anchors occur.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnchorTableError {
    #[error("Failed to read anchor table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed anchor table: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Rule {rule}: keywords and anchors must be non-empty strings")]
    EmptyEntry { rule: String },
}

/// A named group of question keywords and the anchors they point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub anchors: Vec<String>,
}

impl ThemeRule {
    pub fn new(name: &str, keywords: &[&str], anchors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            anchors: anchors.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// A rule whose answer spans several non-adjacent sections: every anchor
/// found gets its own window and the windows are stitched together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub anchors: Vec<String>,
    #[serde(default = "default_composite_before")]
    pub before: usize,
    #[serde(default = "default_composite_after")]
    pub after: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_composite_before() -> usize {
    1500
}

fn default_composite_after() -> usize {
    4500
}

fn default_separator() -> String {
    "\n\n---\n\n".to_string()
}

/// The full rule set consulted by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorTable {
    #[serde(default)]
    pub composite: Option<CompositeRule>,
    #[serde(default)]
    pub themes: Vec<ThemeRule>,
    #[serde(default)]
    pub fallback: Vec<String>,
}

impl Default for AnchorTable {
    fn default() -> Self {
        Self::landon()
    }
}

impl AnchorTable {
    /// Parse a table from JSON. Keywords are lower-cased on the way in.
    pub fn from_json(bytes: &[u8]) -> Result<Self, AnchorTableError> {
        let mut table: AnchorTable = serde_json::from_slice(bytes)?;
        table.normalize();
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, AnchorTableError> {
        let bytes = std::fs::read(path).map_err(|source| AnchorTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Empty keywords would match every question and empty anchors every
    /// document, so neither is allowed.
    pub fn validate(&self) -> Result<(), AnchorTableError> {
        let has_empty = |items: &[String]| items.iter().any(|s| s.is_empty());

        if let Some(rule) = &self.composite {
            if has_empty(&rule.keywords) || has_empty(&rule.anchors) {
                return Err(AnchorTableError::EmptyEntry {
                    rule: rule.name.clone(),
                });
            }
        }
        for theme in &self.themes {
            if has_empty(&theme.keywords) || has_empty(&theme.anchors) {
                return Err(AnchorTableError::EmptyEntry {
                    rule: theme.name.clone(),
                });
            }
        }
        if has_empty(&self.fallback) {
            return Err(AnchorTableError::EmptyEntry {
                rule: "fallback".to_string(),
            });
        }
        Ok(())
    }

    fn normalize(&mut self) {
        let lower = |keywords: &mut Vec<String>| {
            for k in keywords.iter_mut() {
                *k = k.to_lowercase();
            }
        };
        if let Some(rule) = self.composite.as_mut() {
            lower(&mut rule.keywords);
        }
        for theme in self.themes.iter_mut() {
            lower(&mut theme.keywords);
        }
    }

    /// The Landon Hotel brand guide rules. Keywords cover English and French
    /// phrasings of each topic.
    pub fn landon() -> Self {
        let composite = CompositeRule {
            name: "typography".to_string(),
            keywords: ["typograph", "police", "font", "typo"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            anchors: [
                "TYPOGRAPHY SYSTEM",
                "OUR PRIMARY TYPEFACE",
                "BRANDON GROTESQUE",
                "OUR ACCENT TYPEFACE",
                "ESSONNES",
                "TYPOGRAPHY USAGE",
            ]
            .iter()
            .map(|a| a.to_string())
            .collect(),
            before: default_composite_before(),
            after: default_composite_after(),
            separator: default_separator(),
        };

        let themes = vec![
            ThemeRule::new(
                "services",
                &["service", "commodit", "amenit", "équipement"],
                &["OUR SERVICES & AMENITIES", "OUR SERVICES", "AMENITIES"],
            ),
            ThemeRule::new(
                "logo",
                &["logo", "logotype", "logomark", "marque"],
                &[
                    "LOGO SYSTEM",
                    "OUR LOGO",
                    "LOGOTYPE",
                    "OUR LOGOTYPE",
                    "LOGOMARK",
                    "OUR LOGOMARK",
                    "LOGO LOCK-UP",
                    "LOGO USAGE",
                    "SECONDARY SUBMARKS",
                    "LOGO COMPONENTS & CONSTRUCTION",
                ],
            ),
            ThemeRule::new(
                "colors",
                &["couleur", "color"],
                &[
                    "COLOR SYSTEM",
                    "OUR COLORS",
                    "COLOR CODES",
                    "BACKGROUND COLORS",
                    "WEB ACCESSIBLE COLORS",
                    "COLOR USAGE",
                ],
            ),
            ThemeRule::new(
                "graphics",
                &[
                    "graphique",
                    "icône",
                    "icone",
                    "pattern",
                    "motif",
                    "bannière",
                    "banniere",
                ],
                &[
                    "SUPPORTING GRAPHICS",
                    "OUR ICONS",
                    "OUR PATTERNS",
                    "BANNER GRAPHIC",
                ],
            ),
            ThemeRule::new(
                "photography",
                &["photo", "photograph"],
                &["PHOTOGRAPHY", "STYLE", "COMPOSITION", "LIGHTING", "COLOR"],
            ),
            ThemeRule::new(
                "values",
                &["valeur", "mission", "vision", "slogan", "purpose"],
                &[
                    "OUR VALUES",
                    "MISSION STATEMENT",
                    "VISION STATEMENT",
                    "OUR SLOGAN",
                    "BRAND FOUNDATION",
                ],
            ),
            ThemeRule::new(
                "printed_materials",
                &[
                    "papier",
                    "facture",
                    "newsletter",
                    "sales sheet",
                    "stationery",
                    "devis",
                    "invoice",
                ],
                &[
                    "BRANDED MATERIALS",
                    "STATIONERY",
                    "NEWSLETTER",
                    "INVOICE",
                    "SALES SHEET",
                ],
            ),
            ThemeRule::new(
                "typography",
                &["typographie", "typo", "font", "fonts", "police", "polices"],
                &[
                    "TYPOGRAPHY SYSTEM",
                    "OUR PRIMARY TYPEFACE",
                    "OUR ACCENT TYPEFACE",
                    "TYPOGRAPHY USAGE",
                ],
            ),
            ThemeRule::new(
                "brand_personality",
                &[
                    "personnalité",
                    "personnalite",
                    "brand personality",
                    "personality",
                ],
                &["OUR BRAND PERSONALITY", "BRAND CHARACTERISTICS"],
            ),
            ThemeRule::new(
                "voice_and_tone",
                &[
                    "voix",
                    "ton",
                    "tone",
                    "voice",
                    "style verbal",
                    "style d'écriture",
                    "style d'ecriture",
                    "style ecriture",
                ],
                &["OUR VOICE & TONE", "OUR VERBAL STYLE"],
            ),
            ThemeRule::new(
                "look_and_feel",
                &["look", "feel", "style visuel", "visuel", "apparence"],
                &["OUR LOOK & FEEL", "OUR VISUAL STYLE"],
            ),
            ThemeRule::new(
                "customers",
                &["client", "clients", "customer", "customers", "cible", "audience"],
                &["OUR CUSTOMERS"],
            ),
            ThemeRule::new(
                "location",
                &[
                    "localisation",
                    "emplacement",
                    "où",
                    "ou",
                    "situé",
                    "situe",
                    "adresse",
                    "quartier",
                    "lieu",
                    "location",
                    "située",
                    "situee",
                    "se trouve",
                ],
                &[
                    "WEST END, LONDON",
                    "The Landon Hotel – West End",
                    "123 Oxford Street",
                    "LOCAL SIGHTS",
                ],
            ),
            ThemeRule::new(
                "pricing",
                &[
                    "tarif",
                    "tarifs",
                    "tarification",
                    "prix",
                    "coût",
                    "cout",
                    "frais",
                    "combien",
                    "price",
                    "prices",
                    "pricing",
                    "rate",
                    "rates",
                    "fee",
                    "fees",
                ],
                &[
                    "INVOICE",
                    "NEWSLETTER & INVOICE",
                    "Room Charge",
                    "Room Tax",
                    "Occupancy Tax",
                ],
            ),
        ];

        let fallback = ["BRANDON GROTESQUE", "OUR COLORS", "OUR SERVICES", "PHOTOGRAPHY"]
            .iter()
            .map(|a| a.to_string())
            .collect();

        AnchorTable {
            composite: Some(composite),
            themes,
            fallback,
        }
    }
}
