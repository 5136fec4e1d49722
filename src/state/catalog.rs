use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while building the project catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share the same id - the catalog requires stable unique ids
    #[error("duplicate project id: {0}")]
    DuplicateId(String),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry in a project's image gallery.
///
/// The legacy catalog format allowed a bare URL string or a `{url, caption}`
/// object, with empty URLs meaning "no asset yet". That union is resolved
/// once here, at catalog construction, so the renderers and the exporter
/// never have to re-check it.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryImage {
    /// An image with no caption
    Bare(String),
    /// An image with a caption shown as an overlay and in exports
    Captioned { path: String, caption: String },
    /// No asset supplied - rendered as a placeholder glyph
    Placeholder { caption: Option<String> },
}

impl GalleryImage {
    /// Path to the image asset, if one was supplied
    pub fn path(&self) -> Option<&str> {
        match self {
            GalleryImage::Bare(path) => Some(path),
            GalleryImage::Captioned { path, .. } => Some(path),
            GalleryImage::Placeholder { .. } => None,
        }
    }

    /// Caption text, if one was supplied
    pub fn caption(&self) -> Option<&str> {
        match self {
            GalleryImage::Bare(_) => None,
            GalleryImage::Captioned { caption, .. } => Some(caption),
            GalleryImage::Placeholder { caption } => caption.as_deref(),
        }
    }

    /// Caption to display for the entry at position `index` (zero-based),
    /// falling back to a positional label when none was supplied
    pub fn display_caption(&self, index: usize) -> String {
        match self.caption() {
            Some(caption) => caption.to_string(),
            None => format!("Image {}", index + 1),
        }
    }
}

/// A single portfolio project.
///
/// Records are created once at startup and never mutated. Their position in
/// the catalog is significant: it selects the fallback gradient and the
/// ordering of every rendered surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    /// Unique stable identifier (e.g. "orbital-debris-tracker")
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Card background image; None triggers the fallback gradient
    pub thumbnail: Option<String>,
    /// Detail-page hero image; None triggers the fallback gradient
    pub hero_image: Option<String>,
    /// Body text; paragraphs are separated by blank lines
    pub description: String,
    /// Legacy external document link, superseded by the generated export
    /// for records that carry gallery images
    pub pdf_url: Option<String>,
    /// Member of the home-page featured subset
    pub featured: bool,
    /// Unpublished records are hidden from bulk export
    pub published: bool,
    pub images: Vec<GalleryImage>,
}

impl ProjectRecord {
    /// Body paragraphs in display order (blank-line separated, trimmed)
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// The static ordered collection of project records
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    /// Build a catalog, enforcing id uniqueness
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut seen: Vec<&str> = Vec::with_capacity(records.len());
        for record in &records {
            if seen.contains(&record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
            seen.push(&record.id);
        }
        Ok(Catalog { records })
    }

    /// Load the catalog from a JSON file in the legacy format
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse the legacy JSON format: records with optional fields and the
    /// untyped image-entry union (bare string or `{url, caption}`)
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawRecord> = serde_json::from_str(json)?;
        Self::new(raw.into_iter().map(RawRecord::resolve).collect())
    }

    /// Load a user catalog if one is configured, otherwise the built-in
    /// sample. A broken user catalog degrades to the sample with a warning
    /// rather than aborting startup.
    pub fn load_or_sample() -> Self {
        let configured = std::env::var("STARFOLIO_CATALOG")
            .map(std::path::PathBuf::from)
            .ok()
            .or_else(|| {
                let local = std::path::PathBuf::from("catalog.json");
                local.exists().then_some(local)
            });

        if let Some(path) = configured {
            match Self::from_json_file(&path) {
                Ok(catalog) => {
                    println!("📚 Loaded catalog from {}", path.display());
                    return catalog;
                }
                Err(e) => {
                    eprintln!("⚠️  Ignoring catalog at {}: {}", path.display(), e);
                }
            }
        }

        Self::sample()
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ProjectRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records paired with their catalog index, in catalog order
    pub fn all(&self) -> impl Iterator<Item = (usize, &ProjectRecord)> {
        self.records.iter().enumerate()
    }

    /// The featured subset, preserving catalog order. The catalog index is
    /// retained so activation can hand the right record to the presenter.
    pub fn featured(&self) -> impl Iterator<Item = (usize, &ProjectRecord)> {
        self.all().filter(|(_, r)| r.featured)
    }

    /// Number of featured records (home-page card count)
    pub fn featured_len(&self) -> usize {
        self.featured().count()
    }

    /// The built-in sample portfolio
    pub fn sample() -> Self {
        let records = vec![
            ProjectRecord {
                id: "orbital-debris-tracker".into(),
                title: "Orbital Debris Tracker".into(),
                subtitle: "Mission Software · Tracking".into(),
                thumbnail: None,
                hero_image: None,
                description: "Ground-segment software that fuses radar and optical \
                    observations into conjunction warnings for operators of small \
                    LEO constellations. I owned the screening pipeline and the \
                    operator-facing alert views.\n\nThe screening stage prunes the \
                    full catalog against each asset using an along-track gate \
                    before running the expensive covariance propagation, which \
                    brought a full screening pass from minutes down to seconds."
                    .into(),
                pdf_url: None,
                featured: true,
                published: true,
                images: vec![
                    GalleryImage::Captioned {
                        path: "assets/debris/screening-ui.png".into(),
                        caption: "Conjunction screening dashboard".into(),
                    },
                    GalleryImage::Captioned {
                        path: "assets/debris/covariance.png".into(),
                        caption: "Propagated covariance ellipsoids at TCA".into(),
                    },
                ],
            },
            ProjectRecord {
                id: "cubesat-thermal-model".into(),
                title: "CubeSat Thermal Model".into(),
                subtitle: "Analysis · Thermal".into(),
                thumbnail: None,
                hero_image: None,
                description: "Reduced-order thermal model of a 6U CubeSat bus, \
                    correlated against thermal-vacuum test data. Built the node \
                    network, ran the correlation campaign, and delivered the \
                    flight temperature predictions.\n\nThe correlated model \
                    predicted battery temperatures within 3 °C across the full \
                    beta-angle sweep, which let us drop one heater circuit and \
                    recover mass margin."
                    .into(),
                pdf_url: None,
                featured: true,
                published: true,
                images: vec![
                    GalleryImage::Bare("assets/cubesat/node-network.png".into()),
                    GalleryImage::Captioned {
                        path: "assets/cubesat/tvac-correlation.png".into(),
                        caption: "TVAC correlation, hot case".into(),
                    },
                    GalleryImage::Placeholder {
                        caption: Some("Flight telemetry comparison (pending)".into()),
                    },
                ],
            },
            ProjectRecord {
                id: "hypersonic-inlet-study".into(),
                title: "Hypersonic Inlet Study".into(),
                subtitle: "Aerodynamics · CFD".into(),
                thumbnail: None,
                hero_image: None,
                description: "Parametric CFD study of a mixed-compression inlet \
                    at Mach 5-7, focused on unstart margin across the angle-of-attack \
                    envelope.\n\nAutomated the mesh-to-report pipeline so a new \
                    geometry variant could go from CAD to a comparison plot \
                    overnight without hand intervention."
                    .into(),
                pdf_url: Some("docs/inlet-study-summary.pdf".into()),
                featured: true,
                published: true,
                images: vec![],
            },
            ProjectRecord {
                id: "launch-telemetry-replay".into(),
                title: "Launch Telemetry Replay".into(),
                subtitle: "Ground Software · Telemetry".into(),
                thumbnail: None,
                hero_image: None,
                description: "Deterministic replay harness for launch telemetry \
                    streams, used to reproduce anomalies seen during day-of-launch \
                    operations against the exact frame timing of the original pass."
                    .into(),
                pdf_url: None,
                featured: false,
                published: true,
                images: vec![GalleryImage::Captioned {
                    path: "assets/replay/timeline.png".into(),
                    caption: "Frame-accurate replay timeline".into(),
                }],
            },
            ProjectRecord {
                id: "reaction-wheel-sizing".into(),
                title: "Reaction Wheel Sizing".into(),
                subtitle: "GNC · Draft".into(),
                thumbnail: None,
                hero_image: None,
                description: "Draft writeup of a momentum-envelope sizing study. \
                    Not ready for the portfolio yet."
                    .into(),
                pdf_url: None,
                featured: false,
                published: false,
                images: vec![],
            },
            ProjectRecord {
                id: "composite-fairing-layup".into(),
                title: "Composite Fairing Layup".into(),
                subtitle: "Structures · Draft".into(),
                thumbnail: None,
                hero_image: None,
                description: "Draft notes on a fairing layup optimization. \
                    Pending review before publishing."
                    .into(),
                pdf_url: None,
                featured: false,
                published: false,
                images: vec![],
            },
        ];

        Catalog::new(records).expect("sample catalog has unique ids")
    }
}

/// One record in the legacy JSON catalog format
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default, rename = "heroImage")]
    hero_image: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "pdfUrl")]
    pdf_url: String,
    #[serde(default)]
    featured: bool,
    #[serde(default = "default_published")]
    published: bool,
    #[serde(default)]
    images: Vec<RawImageEntry>,
}

fn default_published() -> bool {
    true
}

/// The untyped image-entry union from the legacy format
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawImageEntry {
    Bare(String),
    Captioned {
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl RawRecord {
    fn resolve(self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            title: self.title,
            subtitle: self.subtitle,
            thumbnail: non_empty(self.thumbnail),
            hero_image: non_empty(self.hero_image),
            description: self.description,
            // '#' was the legacy stand-in for "no document"
            pdf_url: non_empty(self.pdf_url).filter(|u| u != "#"),
            featured: self.featured,
            published: self.published,
            images: self.images.into_iter().map(RawImageEntry::resolve).collect(),
        }
    }
}

impl RawImageEntry {
    fn resolve(self) -> GalleryImage {
        match self {
            RawImageEntry::Bare(url) if url.is_empty() => {
                GalleryImage::Placeholder { caption: None }
            }
            RawImageEntry::Bare(url) => GalleryImage::Bare(url),
            RawImageEntry::Captioned { url, caption } if url.is_empty() => {
                GalleryImage::Placeholder { caption }
            }
            RawImageEntry::Captioned { url, caption } => match caption {
                Some(caption) => GalleryImage::Captioned { path: url, caption },
                None => GalleryImage::Bare(url),
            },
        }
    }
}

/// Empty strings in the legacy format mean "absent"
fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.into(),
            title: format!("Project {id}"),
            subtitle: "Category · Subcategory".into(),
            thumbnail: None,
            hero_image: None,
            description: "First paragraph.\n\nSecond paragraph.".into(),
            pdf_url: None,
            featured: false,
            published: true,
            images: vec![],
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![record("a"), record("b"), record("a")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.all().count(), 0);
    }

    #[test]
    fn test_featured_preserves_catalog_order_and_index() {
        let mut a = record("a");
        let mut c = record("c");
        a.featured = true;
        c.featured = true;
        let catalog = Catalog::new(vec![a, record("b"), c]).unwrap();

        let featured: Vec<(usize, &str)> = catalog
            .featured()
            .map(|(i, r)| (i, r.id.as_str()))
            .collect();
        assert_eq!(featured, vec![(0, "a"), (2, "c")]);
    }

    #[test]
    fn test_paragraph_split() {
        let r = record("a");
        let paragraphs: Vec<&str> = r.paragraphs().collect();
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_legacy_json_union_resolves_to_tagged_variants() {
        let json = r##"[{
            "id": "p1",
            "title": "P1",
            "subtitle": "S",
            "thumbnail": "",
            "heroImage": "",
            "description": "Body",
            "pdfUrl": "#",
            "featured": true,
            "images": [
                "a.jpg",
                {"url": "b.jpg", "caption": "B"},
                {"url": "", "caption": "Coming soon"},
                ""
            ]
        }]"##;

        let catalog = Catalog::from_json(json).unwrap();
        let p1 = catalog.get(0).unwrap();
        assert_eq!(p1.thumbnail, None);
        assert_eq!(p1.pdf_url, None, "'#' is the legacy no-document marker");
        assert!(p1.published, "published defaults to true");
        assert_eq!(
            p1.images,
            vec![
                GalleryImage::Bare("a.jpg".into()),
                GalleryImage::Captioned {
                    path: "b.jpg".into(),
                    caption: "B".into()
                },
                GalleryImage::Placeholder {
                    caption: Some("Coming soon".into())
                },
                GalleryImage::Placeholder { caption: None },
            ]
        );
    }

    #[test]
    fn test_display_caption_positional_fallback() {
        let bare = GalleryImage::Bare("a.jpg".into());
        assert_eq!(bare.display_caption(0), "Image 1");

        let captioned = GalleryImage::Captioned {
            path: "b.jpg".into(),
            caption: "Wind tunnel run".into(),
        };
        assert_eq!(captioned.display_caption(4), "Wind tunnel run");
    }

    #[test]
    fn test_sample_catalog_invariants() {
        let catalog = Catalog::sample();
        assert!(!catalog.is_empty());
        assert!(catalog.featured_len() >= 1);
        // The sample keeps a couple of drafts around to exercise the
        // published filter in bulk export
        assert!(catalog.records().iter().any(|r| !r.published));
    }
}
