use serde::{Deserialize, Serialize};

/// A department entry returned by the branch-code endpoint.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct BranchCode {
    #[serde(rename = "bransKoduId")]
    pub id: i64,

    /// Short department code, also the data file name.
    #[serde(rename = "dersBransKodu")]
    pub code: String,
}
