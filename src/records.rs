//! Entities shown on master/detail pages and the catalog they are listed in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CatalogError;

const MISSING: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub caption: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseData {
    #[serde(alias = "LicenseNumber")]
    pub license_number: Option<String>,
    pub npn: Option<String>,
    pub issue_date: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecord {
    pub id: String,
    /// State name.
    pub name: String,
    pub status: String,
    pub image: Option<String>,
    pub flag_image: Option<String>,
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    #[serde(default)]
    pub license_data: LicenseData,
}

/// NIL specialists and solar partners share this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub image: Option<String>,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub description: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailRecord {
    Certification(CertificationRecord),
    NilSpecialist(ProfileRecord),
    SolarPartner(ProfileRecord),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub href: String,
}

/// What a master/detail page needs from any entity.
pub trait DisplayContract {
    fn id(&self) -> &str;
    fn heading(&self) -> String;
    fn status(&self) -> String;
    fn primary_image(&self) -> Option<&str>;
    fn gallery_images(&self) -> &[GalleryImage];
    fn detail_rows(&self) -> Vec<DetailRow>;
    fn links(&self) -> Vec<ExternalLink>;

    /// Explicit gallery, or the primary image alone captioned with the heading.
    fn gallery(&self) -> Vec<GalleryImage> {
        if !self.gallery_images().is_empty() {
            return self.gallery_images().to_vec();
        }
        match self.primary_image() {
            Some(src) if !src.is_empty() => vec![GalleryImage {
                src: src.to_string(),
                caption: self.heading(),
            }],
            _ => Vec::new(),
        }
    }
}

fn or_missing(v: &Option<String>) -> String {
    match v.as_deref() {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => MISSING.to_string(),
    }
}

fn row(label: &'static str, value: impl Into<String>) -> DetailRow {
    DetailRow {
        label,
        value: value.into(),
    }
}

impl DisplayContract for CertificationRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn heading(&self) -> String {
        format!("{} License", self.name)
    }

    fn status(&self) -> String {
        self.status.clone()
    }

    fn primary_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn gallery_images(&self) -> &[GalleryImage] {
        &self.gallery_images
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        let l = &self.license_data;
        vec![
            row("License Type", "Health Insurance"),
            row("License Number", or_missing(&l.license_number)),
            row("NPN", or_missing(&l.npn)),
            row("Issue Date", or_missing(&l.issue_date)),
            row("Expiration Date", or_missing(&l.expiration_date)),
            row("State", self.name.clone()),
        ]
    }

    fn links(&self) -> Vec<ExternalLink> {
        self.pdf_url
            .iter()
            .map(|href| ExternalLink {
                label: "PDF",
                href: href.clone(),
            })
            .collect()
    }
}

impl DisplayContract for ProfileRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn heading(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> String {
        self.title.clone()
    }

    fn primary_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn gallery_images(&self) -> &[GalleryImage] {
        &self.gallery_images
    }

    fn detail_rows(&self) -> Vec<DetailRow> {
        let mut rows = vec![row("Phone", self.phone.clone()), row("Email", self.email.clone())];
        if !self.services.is_empty() {
            rows.push(row("Services", self.services.join(", ")));
        }
        rows
    }

    fn links(&self) -> Vec<ExternalLink> {
        let mut links = Vec::new();
        if let Some(site) = &self.website {
            links.push(ExternalLink {
                label: "Website",
                href: site.clone(),
            });
        }
        links.push(ExternalLink {
            label: "Email",
            href: format!("mailto:{}", self.email),
        });
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        links.push(ExternalLink {
            label: "Call",
            href: format!("tel:{}", digits),
        });
        links
    }
}

impl DetailRecord {
    fn inner(&self) -> &dyn DisplayContract {
        match self {
            DetailRecord::Certification(c) => c as &dyn DisplayContract,
            DetailRecord::NilSpecialist(p) | DetailRecord::SolarPartner(p) => p as &dyn DisplayContract,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            DetailRecord::Certification(_) => Category::Certification,
            DetailRecord::NilSpecialist(_) => Category::Nil,
            DetailRecord::SolarPartner(_) => Category::Solar,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            DetailRecord::Certification(_) => None,
            DetailRecord::NilSpecialist(p) | DetailRecord::SolarPartner(p) => Some(&p.description),
        }
    }

    pub fn is_featured(&self) -> bool {
        match self {
            DetailRecord::Certification(_) => false,
            DetailRecord::NilSpecialist(p) | DetailRecord::SolarPartner(p) => p.featured,
        }
    }

    /// `query_lower` must already be trimmed and lowercased.
    fn matches(&self, query_lower: &str) -> bool {
        let has = |s: &str| s.to_lowercase().contains(query_lower);
        match self {
            DetailRecord::Certification(c) => {
                has(&c.name)
                    || has(&c.status)
                    || c.license_data
                        .license_number
                        .as_deref()
                        .is_some_and(|n| n.contains(query_lower))
            }
            DetailRecord::NilSpecialist(p) | DetailRecord::SolarPartner(p) => {
                has(&p.name)
                    || has(&p.title)
                    || has(&p.description)
                    || p.services.iter().any(|s| has(s.as_str()))
                    || has(&p.email)
                    || p.phone.contains(query_lower)
            }
        }
    }
}

impl DisplayContract for DetailRecord {
    fn id(&self) -> &str {
        self.inner().id()
    }
    fn heading(&self) -> String {
        self.inner().heading()
    }
    fn status(&self) -> String {
        self.inner().status()
    }
    fn primary_image(&self) -> Option<&str> {
        self.inner().primary_image()
    }
    fn gallery_images(&self) -> &[GalleryImage] {
        self.inner().gallery_images()
    }
    fn detail_rows(&self) -> Vec<DetailRow> {
        self.inner().detail_rows()
    }
    fn links(&self) -> Vec<ExternalLink> {
        self.inner().links()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    All,
    Certification,
    Nil,
    Solar,
}

impl Category {
    pub const TABS: [Category; 4] = [
        Category::All,
        Category::Certification,
        Category::Nil,
        Category::Solar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Certification => "Licenses",
            Category::Nil => "NIL",
            Category::Solar => "Solar",
        }
    }

    /// Reads `category=` from a `?a=b&c=d` query string.
    pub fn from_query_string(search: &str) -> Category {
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|kv| kv.strip_prefix("category="))
            .map(Category::parse)
            .unwrap_or(Category::All)
    }

    /// Unknown values fall back to `All`.
    pub fn parse(s: &str) -> Category {
        match s {
            "certification" | "certifications" => Category::Certification,
            "nil" => Category::Nil,
            "solar" => Category::Solar,
            _ => Category::All,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    records: Vec<DetailRecord>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Catalog, CatalogError> {
        let records: Vec<DetailRecord> = serde_json::from_str(raw)?;
        let mut seen = HashSet::new();
        for r in &records {
            if !seen.insert(r.id().to_string()) {
                return Err(CatalogError::DuplicateId(r.id().to_string()));
            }
        }
        Ok(Catalog { records })
    }

    /// Catalog compiled into the binary; empty (and logged) if it fails to parse.
    pub fn embedded() -> Catalog {
        match Catalog::from_json(include_str!("../data/catalog.json")) {
            Ok(c) => c,
            Err(err) => {
                log::warn!("embedded catalog rejected: {err}");
                Catalog::default()
            }
        }
    }

    pub fn records(&self) -> &[DetailRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&DetailRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Category first, then free-text query; a blank query matches everything.
    pub fn filter(&self, category: Category, query: &str) -> Vec<&DetailRecord> {
        let q = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| category == Category::All || r.category() == category)
            .filter(|r| q.is_empty() || r.matches(&q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"kind": "certification", "id": "cert-co", "name": "Colorado", "status": "Active",
         "image": "media/Certification/Colorado.png",
         "licenseData": {"LicenseNumber": "890294", "npn": "21533411", "issueDate": ""}},
        {"kind": "certification", "id": "cert-tx", "name": "Texas", "status": "Pending"},
        {"kind": "nil_specialist", "id": "nil-1", "name": "Victoria Whitfield",
         "title": "NIL Athlete", "image": "NiL/Vicotoria.png", "phone": "(813) 555-0100",
         "email": "victoria@example.com", "description": "Track and field standout.",
         "services": ["Brand Partnerships"], "featured": true,
         "galleryImages": [{"src": "NiL/Vicotoria1.png", "caption": "Meet"},
                           {"src": "NiL/Vicotoria2.png", "caption": "Award"}]},
        {"kind": "solar_partner", "id": "solar-1", "name": "Enphase", "title": "Microinverters",
         "image": "Solar/solarEnphase.png", "phone": "+1 (877) 797-4743",
         "email": "info@example.com", "website": "https://enphase.com",
         "description": "Home energy systems.", "services": ["Inverters", "Batteries"]}
    ]"#;

    fn sample() -> Catalog {
        Catalog::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn parses_tagged_variants() {
        let c = sample();
        let kinds: Vec<Category> = c.records().iter().map(|r| r.category()).collect();
        assert_eq!(
            kinds,
            vec![Category::Certification, Category::Certification, Category::Nil, Category::Solar]
        );
    }

    #[test]
    fn license_fields_fall_back_to_dash() {
        let c = sample();
        let rows = c.get("cert-co").unwrap().detail_rows();
        let value = |label: &str| rows.iter().find(|r| r.label == label).unwrap().value.clone();
        assert_eq!(value("License Number"), "890294");
        assert_eq!(value("NPN"), "21533411");
        assert_eq!(value("Issue Date"), "-");
        assert_eq!(value("Expiration Date"), "-");
    }

    #[test]
    fn gallery_falls_back_to_primary_image() {
        let c = sample();
        let g = c.get("cert-co").unwrap().gallery();
        assert_eq!(
            g,
            vec![GalleryImage {
                src: "media/Certification/Colorado.png".into(),
                caption: "Colorado License".into()
            }]
        );
        assert!(c.get("cert-tx").unwrap().gallery().is_empty());
        assert_eq!(c.get("nil-1").unwrap().gallery().len(), 2);
    }

    #[test]
    fn profile_links_include_website_mail_and_phone() {
        let c = sample();
        let links = c.get("solar-1").unwrap().links();
        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["https://enphase.com", "mailto:info@example.com", "tel:+18777974743"]
        );
    }

    #[test]
    fn filter_by_category_then_query() {
        let c = sample();
        assert_eq!(c.filter(Category::All, "").len(), 4);
        assert_eq!(c.filter(Category::Certification, "  ").len(), 2);
        let ids = |v: Vec<&DetailRecord>| v.iter().map(|r| r.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(c.filter(Category::All, "BATTER")), vec!["solar-1"]);
        assert_eq!(ids(c.filter(Category::All, "555-0100")), vec!["nil-1"]);
        assert_eq!(ids(c.filter(Category::All, "8902")), vec!["cert-co"]);
        assert!(c.filter(Category::Nil, "enphase").is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[{"kind":"certification","id":"a","name":"A","status":"Active"},
                      {"kind":"certification","id":"a","name":"B","status":"Active"}]"#;
        assert!(matches!(Catalog::from_json(raw), Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn embedded_catalog_loads() {
        let c = Catalog::embedded();
        assert!(!c.records().is_empty());
        assert!(c.records().iter().any(|r| r.category() == Category::Solar));
    }

    #[test]
    fn category_parse_defaults_to_all() {
        assert_eq!(Category::parse("solar"), Category::Solar);
        assert_eq!(Category::parse("health"), Category::All);
    }

    #[test]
    fn category_from_query_string() {
        assert_eq!(Category::from_query_string("?category=nil"), Category::Nil);
        assert_eq!(Category::from_query_string("?x=1&category=solar"), Category::Solar);
        assert_eq!(Category::from_query_string(""), Category::All);
    }

    #[test]
    fn featured_only_applies_to_profiles() {
        let c = sample();
        assert!(c.get("nil-1").unwrap().is_featured());
        assert!(!c.get("cert-co").unwrap().is_featured());
        assert!(!c.get("solar-1").unwrap().is_featured());
    }
}
