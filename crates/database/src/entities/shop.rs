//! Shop entity definitions

use serde::{Deserialize, Serialize};

/// A salon shop. `stylist_ids` holds the public ids of the stylists working there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub address: String,
    pub stylist_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShop {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
}
