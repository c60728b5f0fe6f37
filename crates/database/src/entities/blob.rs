//! Blob metadata entity definitions

use serde::{Deserialize, Serialize};

/// Metadata for a file held in external object storage. `user_id` is the public id of
/// the owning stylist or customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub id: i64,
    pub public_id: String,
    pub blob_type: String,
    pub file_name: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlob {
    pub blob_type: String,
    pub file_name: String,
    pub user_id: String,
}

/// Blob metadata supplied before the owner exists, e.g. the icon sent with a signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobDescriptor {
    pub blob_type: String,
    pub file_name: String,
}

impl BlobDescriptor {
    pub fn owned_by(&self, user_id: impl Into<String>) -> NewBlob {
        NewBlob {
            blob_type: self.blob_type.clone(),
            file_name: self.file_name.clone(),
            user_id: user_id.into(),
        }
    }
}
