/// Item link parsing
///
/// A chat item link wraps an item string such as
/// `item:40395:0:0:0:0:0:-39:12345:80`. Field 1 is the item id and field 7
/// the random-property suffix id.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ItemId;
use crate::utils::string::{parse_i64, parse_u32};

static ITEM_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"item[-?\d:]+").expect("item string pattern"));

const ID_FIELD: usize = 1;
const SUFFIX_FIELD: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLink {
    pub id: ItemId,
    /// Random-property suffix, only when positive
    pub suffix_id: Option<u32>,
}

impl ItemLink {
    /// Parse a raw link. `None` when there is no item string or the id is
    /// missing or zero.
    pub fn parse(link: &str) -> Option<Self> {
        let item_string = ITEM_STRING.find(link)?.as_str().trim();
        let fields: Vec<&str> = item_string.split(':').collect();

        let id = fields.get(ID_FIELD).and_then(|f| parse_u32(f)).filter(|id| *id > 0)?;
        let suffix_id = fields
            .get(SUFFIX_FIELD)
            .and_then(|f| parse_i64(f))
            .filter(|suffix| *suffix > 0)
            .and_then(|suffix| u32::try_from(suffix).ok());

        Some(Self { id, suffix_id })
    }
}
