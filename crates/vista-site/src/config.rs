//! Static site data. `SiteConfig::default()` is the built-in property page;
//! a JSON document can override any part of it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use vista_motion::Slide;
use web_time::Duration;

use crate::error::SiteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Amenities,
    Colleges,
    Gallery,
    Location,
    Contact,
}

impl SectionId {
    /// Fragment used in links to the section.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Amenities => "amenities",
            SectionId::Colleges => "colleges",
            SectionId::Gallery => "gallery",
            SectionId::Location => "location",
            SectionId::Contact => "contact",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: SectionId,
    pub title: String,
    /// Listed in the navbar.
    #[serde(default)]
    pub in_nav: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub name: String,
    pub distance: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phones: Vec<String>,
    pub email: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub autoplay_interval_ms: u64,
    pub popup_delay_ms: u64,
    pub form_reset_delay_ms: u64,
    pub navbar_scroll_threshold_px: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 5_000,
            popup_delay_ms: 3_000,
            form_reset_delay_ms: 2_500,
            navbar_scroll_threshold_px: 50.0,
        }
    }
}

impl Timing {
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }
    pub fn form_reset_delay(&self) -> Duration {
        Duration::from_millis(self.form_reset_delay_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub sections: Vec<SectionConfig>,
    pub slides: Vec<Slide>,
    pub amenities: Vec<String>,
    pub colleges: Vec<College>,
    pub contact: ContactDetails,
    pub timing: Timing,
}

fn section(id: SectionId, title: &str, in_nav: bool) -> SectionConfig {
    SectionConfig {
        id,
        title: title.to_owned(),
        in_nav,
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let slides = [
            ("2_bed_Room_pic2.webp", "Cozy 2-Bed Room View", "Comfortable Twin Sharing"),
            ("2_bed_Room_pic3.webp", "Spacious 2-Bed Room", "Spacious Interiors"),
            ("2_bed_Room_pic4.webp", "2-Bed Room Detail", "Thoughtful Design"),
            ("3_bed_Room_pic1.webp", "3-Bed Room Overview", "Triple Sharing Comfort"),
            ("Common_Kitchen.webp", "Modern Common Kitchen", "Fully Equipped Kitchen"),
            ("CupboardPic.webp", "Spacious Wardrobes", "Ample Storage"),
            ("Enscape_2025-04-21-12-23-42.webp", "Building Exterior", "Modern Architecture"),
            ("HallWay.webp", "Clean Hallway", "Well-Lit Corridors"),
        ]
        .into_iter()
        .map(|(file, alt, caption)| Slide::new(format!("/images/{file}"), alt, caption))
        .collect();

        let colleges = [
            ("DJ Sanghvi College of Engineering", "Right Opposite"),
            ("Narsee Monjee College of Commerce and Economics", "1.2 km"),
            ("Mukesh Patel School of Technology Management & Engineering", "1.5 km"),
            ("Bhagubhai Mafatlal Polytechnic & College of Engineering", "2.1 km"),
            ("NMIMS", "2.5 km"),
            ("Mithibai College of Arts", "1.8 km"),
        ]
        .into_iter()
        .map(|(name, distance)| College {
            name: name.to_owned(),
            distance: distance.to_owned(),
        })
        .collect();

        Self {
            name: "Rahi Homes".to_owned(),
            sections: vec![
                section(SectionId::Home, "Home", true),
                section(SectionId::About, "About", true),
                section(SectionId::Amenities, "Amenities", true),
                section(SectionId::Colleges, "Colleges", true),
                section(SectionId::Gallery, "Gallery", false),
                section(SectionId::Location, "Location", true),
                section(SectionId::Contact, "Contact", true),
            ],
            slides,
            amenities: [
                "High-Speed WiFi",
                "Air Conditioning",
                "Smart TV",
                "Library",
                "Housekeeping",
                "Coffee Machine",
                "Recreational Space",
                "Home-Cooked Meals",
                "Automation",
                "24/7 Security",
                "CCTV Surveillance",
                "Laundry Services",
            ]
            .map(str::to_owned)
            .to_vec(),
            colleges,
            contact: ContactDetails {
                phones: vec!["+919821327143".to_owned(), "+918104071032".to_owned()],
                email: "rahi.homes56@gmail.com".to_owned(),
            },
            timing: Timing::default(),
        }
    }
}

impl SiteConfig {
    /// Parses a JSON document over the defaults and validates the result.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if self.slides.is_empty() {
            return Err(SiteError::InvalidConfig("gallery has no slides".into()));
        }
        if let Some(i) = self.slides.iter().position(|s| s.source_ref.trim().is_empty()) {
            return Err(SiteError::InvalidConfig(format!(
                "slide {i} has an empty source"
            )));
        }
        let mut seen = HashSet::new();
        for s in &self.sections {
            if !seen.insert(s.id) {
                return Err(SiteError::InvalidConfig(format!(
                    "section {:?} listed twice",
                    s.id
                )));
            }
        }
        if self.timing.autoplay_interval_ms == 0 {
            return Err(SiteError::InvalidConfig(
                "autoplay interval must be positive".into(),
            ));
        }
        if !self.timing.navbar_scroll_threshold_px.is_finite() {
            return Err(SiteError::InvalidConfig(
                "navbar threshold must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn has_section(&self, id: SectionId) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// Navbar entries, in page order.
    pub fn nav_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.in_nav)
    }
}
