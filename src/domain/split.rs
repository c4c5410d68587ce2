// ============================================================
// Layer 3 — Dataset Split
// ============================================================
// A split (or "mode") selects which image list and which
// feature cache file are loaded. The lower-case name is used
// verbatim in file names, e.g. train_image_encoding.pkl.

use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev   => "dev",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lets clap parse `--mode train` without the domain layer
/// depending on clap.
impl FromStr for Split {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train"               => Ok(Split::Train),
            "dev" | "validation"  => Ok(Split::Dev),
            "test"                => Ok(Split::Test),
            other => bail!("unknown split '{other}' (expected train, dev or test)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("Validation".parse::<Split>().unwrap(), Split::Dev);
        assert_eq!(Split::Test.to_string(), "test");
    }

    #[test]
    fn test_unknown_split_is_error() {
        assert!("holdout".parse::<Split>().is_err());
    }
}
