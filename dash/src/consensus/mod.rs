// Rust Dash Library
// Originally written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Bitcoin
// Updated for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Dash consensus.
//!
//! This module defines structures, functions, and traits that are needed to
//! conform to Dash consensus.
//!

pub mod encode;

pub use self::encode::{
    Decodable, Encodable, VarInt, deserialize, deserialize_partial, serialize, serialize_hex,
};
