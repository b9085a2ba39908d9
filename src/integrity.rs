//! Content hashing for discovered binaries.

use sha2::{ Digest, Sha256 };



/// Lower-case hex SHA-256 of `bytes`, attached to a unit record as an opaque integrity tag.
pub fn integrity_tag( bytes: &[u8] ) -> String {
	hex::encode( Sha256::digest( bytes ))
}
