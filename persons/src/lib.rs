//! Shared contact model for the phonebook server and client.

use serde::{Deserialize, Serialize};

/// A stored contact. The id is assigned by the store on creation and never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Candidate name/number pair carried by create and update requests.
///
/// Fields missing from the JSON body deserialize as empty strings, so a
/// presence check treats an absent field and an empty one alike.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
}
