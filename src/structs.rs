use super::*;

/// A token class ("denom"). One record per collection.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Globally unique class identifier. Immutable once issued.
    pub id: String,
    /// Human readable name, unique across all classes.
    pub name: String,
    /// Free form schema string, interpreted by callers.
    pub schema: String,
    /// Short display symbol, not required to be unique.
    pub symbol: String,
    /// Account that issued the class. Changed only by `transfer_class_owner`.
    pub creator: AccountAddress,
    /// Fixed at issuance. Enforced by the host's message layer, carried here.
    pub mint_restricted: bool,
    /// Fixed at issuance. When set, no token under the class can be edited.
    pub update_restricted: bool,
}

/// Opaque token metadata payload, boxed in a tagged envelope so richer
/// payload kinds can be added without breaking stored records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenData {
    /// A single string payload.
    Text(String),
}

impl Serial for TokenData {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            TokenData::Text(payload) => {
                out.write_u8(TOKEN_DATA_TEXT_TAG)?;
                payload.serial(out)
            }
        }
    }
}

impl Deserial for TokenData {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            TOKEN_DATA_TEXT_TAG => String::deserial(source).map(TokenData::Text),
            _ => Err(ParseError::default()),
        }
    }
}

/// A minted token. Always belongs to exactly one class.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Class the token was minted under. Immutable.
    pub class_id: String,
    /// Token identifier, unique within the class. Immutable.
    pub token_id: String,
    /// Token URI, mutable by the owner unless the class is update restricted.
    pub uri: String,
    /// Opaque metadata payload, mutable under the same rule as `uri`.
    pub data: TokenData,
    /// Current owner, mutable only via transfer.
    pub owner: AccountAddress,
}

impl Token {
    pub fn id(&self) -> &str {
        &self.token_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn data(&self) -> &TokenData {
        &self.data
    }

    pub fn owner(&self) -> &AccountAddress {
        &self.owner
    }
}

/// Minting Data.
#[derive(Serialize, Debug, Clone)]
pub struct MintParams {
    /// Class to mint under.
    pub class_id: String,
    /// New token identifier, unique within the class.
    pub token_id: String,
    /// Token URI.
    pub uri: String,
    /// Opaque metadata payload.
    pub data: TokenData,
    /// Initial owner of the token.
    pub owner: AccountAddress,
}

/// Edit Data.
///
/// The empty string is the "no change" sentinel for both fields, so an edit
/// can never set a field to the empty string.
#[derive(Serialize, SchemaType, Debug, Clone)]
pub struct EditParams {
    /// Class of the token to edit.
    pub class_id: String,
    /// Token to edit.
    pub token_id: String,
    /// New token URI, or the empty string to leave it untouched.
    pub uri: String,
    /// New string payload for the metadata envelope, or the empty string to
    /// leave it untouched.
    pub data: String,
}

/// Cursor for paginated scans.
#[derive(Serialize, SchemaType, Debug, Clone, Default)]
pub struct PageRequest {
    /// Exclusive lower bound: skip every entry up to and including this full
    /// store key.
    pub start_after: Option<Vec<u8>>,
    /// Maximum number of items to return. Zero means no limit.
    pub limit: u32,
}

impl PageRequest {
    /// Scan everything in one page.
    pub fn all() -> Self {
        Self::default()
    }

    /// First page of the given size.
    pub fn first(limit: u32) -> Self {
        Self {
            start_after: None,
            limit,
        }
    }

    /// Page of the given size starting strictly after a store key.
    pub fn after(start_after: Vec<u8>, limit: u32) -> Self {
        Self {
            start_after: Some(start_after),
            limit,
        }
    }
}

/// One page of scan results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// Whether the scan stopped at the page limit with entries remaining.
    pub has_more: bool,
}

/// Token ids of one class held by some account.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct IdCollection {
    pub class_id: String,
    pub token_ids: Vec<String>,
}

/// One page of an account's holdings, grouped by class. Groups appear in the
/// order their class first shows up within the page.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub address: AccountAddress,
    pub collections: Vec<IdCollection>,
}

/// A class together with one page of its tokens.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub class: Class,
    pub tokens: Vec<Token>,
    pub has_more: bool,
}

/// Class record as stored by the legacy flat layout.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LegacyClass {
    pub id: String,
    pub name: String,
    pub schema: String,
    pub symbol: String,
    /// Creator address, stored as a hex string in the legacy layout.
    pub creator: String,
    pub mint_restricted: bool,
    pub update_restricted: bool,
}

/// Token record as stored by the legacy flat layout.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LegacyToken {
    pub token_id: String,
    /// Display name. The class partitioned layout has no name slot, so
    /// migration drops it.
    pub name: String,
    pub uri: String,
    /// Metadata payload, stored as a bare string in the legacy layout.
    pub data: String,
    /// Owner address, stored as a hex string in the legacy layout.
    pub owner: String,
}

/// Counts reported by a migration run.
#[derive(Serialize, SchemaType, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationSummary {
    pub classes: u64,
    pub tokens: u64,
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn token_data_round_trips_through_the_envelope() {
        let data = TokenData::Text("ipfs://meta".into());
        let bytes = to_bytes(&data);
        claim_eq!(bytes[0], TOKEN_DATA_TEXT_TAG);
        let back: TokenData = from_bytes(&bytes).expect_report("envelope decodes");
        claim_eq!(back, data);
    }

    #[concordium_test]
    fn unknown_envelope_tag_fails_to_parse() {
        let result: ParseResult<TokenData> = from_bytes(&[0xff, 0, 0, 0, 0]);
        claim!(result.is_err());
    }
}
