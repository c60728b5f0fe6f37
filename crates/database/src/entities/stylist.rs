//! Stylist entity definitions and the service type catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of salon service a stylist can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Haircut,
    HairColoring,
    HairStyling,
    HairTreatment,
    HairRemoval,
    Nail,
    SkinCare,
    MakeUp,
    Others,
}

impl ServiceType {
    pub const ALL: [ServiceType; 9] = [
        ServiceType::Haircut,
        ServiceType::HairColoring,
        ServiceType::HairStyling,
        ServiceType::HairTreatment,
        ServiceType::HairRemoval,
        ServiceType::Nail,
        ServiceType::SkinCare,
        ServiceType::MakeUp,
        ServiceType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Haircut => "HAIRCUT",
            ServiceType::HairColoring => "HAIR_COLORING",
            ServiceType::HairStyling => "HAIR_STYLING",
            ServiceType::HairTreatment => "HAIR_TREATMENT",
            ServiceType::HairRemoval => "HAIR_REMOVAL",
            ServiceType::Nail => "NAIL",
            ServiceType::SkinCare => "SKIN_CARE",
            ServiceType::MakeUp => "MAKE_UP",
            ServiceType::Others => "OTHERS",
        }
    }

    /// Human readable label shown to customers.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Haircut => "Haircut",
            ServiceType::HairColoring => "Hair Coloring",
            ServiceType::HairStyling => "Hair Styling",
            ServiceType::HairTreatment => "Hair Treatment",
            ServiceType::HairRemoval => "Hair Removal",
            ServiceType::Nail => "Nail Care",
            ServiceType::SkinCare => "Skin Care",
            ServiceType::MakeUp => "Make Up",
            ServiceType::Others => "Others",
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| format!("unknown service type '{s}'"))
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a stylist's price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffer {
    pub service_type: ServiceType,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylist {
    pub id: i64,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Vec<ServiceOffer>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub shop_id: Option<i64>,
    pub shop_public_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Stylist {
    pub fn offer_for(&self, service_type: ServiceType) -> Option<&ServiceOffer> {
        self.services
            .iter()
            .find(|offer| offer.service_type == service_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStylist {
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Vec<ServiceOffer>,
    pub email: String,
    pub password_hash: String,
    pub shop_id: Option<i64>,
}

/// Partial update; `services` replaces the whole list when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylistUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Option<Vec<ServiceOffer>>,
    pub shop_id: Option<i64>,
}

/// Filters for listing stylists. Empty filter lists everyone.
#[derive(Debug, Clone, Default)]
pub struct StylistQuery {
    pub shop_id: Option<i64>,
    pub service_type: Option<ServiceType>,
}
