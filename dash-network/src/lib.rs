//! Dash network types shared across Dash crates

use std::fmt;

/// The cryptocurrency network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Classic Dash Core Payment Chain
    Dash,
    /// Dash's testnet network.
    Testnet,
    /// Dash's devnet network.
    Devnet,
    /// Bitcoin's regtest network.
    Regtest,
}

impl Network {
    /// The version byte prefixed to a WIF-encoded private key on this network.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dash_network::Network;
    ///
    /// assert_eq!(Network::Dash.wif_prefix(), 0xcc);
    /// assert_eq!(Network::Testnet.wif_prefix(), 0xef);
    /// ```
    pub fn wif_prefix(self) -> u8 {
        match self {
            Network::Dash => 0xcc,
            Network::Testnet | Network::Devnet | Network::Regtest => 0xef,
        }
    }

    /// Resolves a WIF version byte to a network.
    ///
    /// Test networks share a single prefix, so `0xef` always resolves to
    /// [`Network::Testnet`].
    pub fn from_wif_prefix(prefix: u8) -> Option<Network> {
        match prefix {
            0xcc => Some(Network::Dash),
            0xef => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Dash => write!(f, "dash"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dash" | "mainnet" => Ok(Network::Dash),
            "testnet" | "test" => Ok(Network::Testnet),
            "devnet" | "dev" => Ok(Network::Devnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}
