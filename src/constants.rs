/// Tag for the token record key family.
pub const TOKEN_FAMILY: u8 = 0x01;

/// Tag for the ownership index key family.
pub const OWNER_FAMILY: u8 = 0x02;

// 0x03 held the per class supply counter in the legacy layout. Supply is
// counted from the token family now, so the tag stays unused.

/// Tag for the class record key family.
pub const CLASS_FAMILY: u8 = 0x04;

/// Tag for the class name uniqueness index key family.
pub const CLASS_NAME_FAMILY: u8 = 0x05;

/// Tag for token records in the legacy flat layout.
pub const LEGACY_TOKEN_FAMILY: u8 = 0x11;

/// Tag for ownership entries in the legacy flat layout.
pub const LEGACY_OWNER_FAMILY: u8 = 0x12;

/// Tag for the per class supply counter of the legacy flat layout.
pub const LEGACY_COLLECTION_FAMILY: u8 = 0x13;

/// Tag for class records in the legacy flat layout.
pub const LEGACY_CLASS_FAMILY: u8 = 0x14;

/// Tag for the class name index of the legacy flat layout.
pub const LEGACY_CLASS_NAME_FAMILY: u8 = 0x15;

/// Delimiter between key components. Class and token ids must not contain it.
pub const KEY_DELIMITER: &[u8] = b"/";

/// Tag for the text payload variant of the token metadata envelope.
pub const TOKEN_DATA_TEXT_TAG: u8 = 0;
